//! Page Controller
//! Owns the constants form and the chart, and runs validation, the simulation
//! request and the chart update in that order.

use crate::api::{ApiError, SimulationBackend, SimulationResponse};
use crate::charts::{ChartState, ResponseFunctions, SampleGrid};
use crate::form::{FormError, FormState, SystemKind};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// Result of a background simulation request.
enum RequestResult {
    Response(SimulationResponse),
    Failed(ApiError),
}

/// What happened when the user pressed submit.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Request posted on a background thread
    Sent,
    /// Form incomplete; the error dialog is open
    Invalid(FormError),
    /// A request is already in flight
    Busy,
}

/// Orchestrates form → request → chart for the single page.
pub struct PageController {
    backend: Arc<dyn SimulationBackend>,
    grid: SampleGrid,
    pub form: FormState,
    chart: ChartState,
    system_kind: SystemKind,
    system_label: String,
    error_dialog: Option<FormError>,
    status: String,

    // Async request
    response_rx: Option<Receiver<RequestResult>>,
}

impl PageController {
    pub fn new(backend: Arc<dyn SimulationBackend>, grid: SampleGrid) -> Self {
        Self {
            backend,
            grid,
            form: FormState::new(),
            chart: ChartState::new(),
            system_kind: SystemKind::default(),
            system_label: String::new(),
            error_dialog: None,
            status: "Ready".to_string(),
            response_rx: None,
        }
    }

    /// Validate the form and post it. The response is applied by [`poll`].
    ///
    /// [`poll`]: PageController::poll
    pub fn submit(&mut self) -> SubmitOutcome {
        if let Err(err) = self.form.validate() {
            tracing::info!(%err, "form rejected");
            self.error_dialog = Some(err.clone());
            return SubmitOutcome::Invalid(err);
        }
        if self.is_busy() {
            tracing::debug!("submit ignored, request in flight");
            return SubmitOutcome::Busy;
        }

        let payload = self.form.to_payload();
        let backend = Arc::clone(&self.backend);
        let (tx, rx) = channel();
        self.response_rx = Some(rx);
        self.status = "Simulating...".to_string();

        thread::spawn(move || {
            let result = match backend.simulate(&payload) {
                Ok(response) => RequestResult::Response(response),
                Err(err) => RequestResult::Failed(err),
            };
            let _ = tx.send(result);
        });

        SubmitOutcome::Sent
    }

    /// Apply a finished request, if any. Returns true when something changed.
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.response_rx.take() else {
            return false;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.handle_result(result);
                true
            }
            Err(TryRecvError::Empty) => {
                self.response_rx = Some(rx);
                false
            }
            Err(TryRecvError::Disconnected) => {
                tracing::error!("simulation worker exited without a result");
                self.status = "Error: simulation worker stopped".to_string();
                true
            }
        }
    }

    fn handle_result(&mut self, result: RequestResult) {
        match result {
            RequestResult::Response(response) => self.apply_response(&response),
            RequestResult::Failed(err) => {
                tracing::error!(%err, "simulation request failed");
                self.status = format!("Error: {}", err);
            }
        }
    }

    /// Project an "OK" response onto the chart. Other statuses leave it alone.
    pub fn apply_response(&mut self, response: &SimulationResponse) {
        let Some(data) = response.ok_data() else {
            tracing::warn!(status = %response.status, "simulation did not return OK");
            self.status = format!("Server returned status {}", response.status);
            return;
        };

        self.system_label = data.sistemtype.clone();
        match self.update_chart(&data.functions(), false) {
            Ok(()) => {
                self.status = format!("Complete! {}", self.system_label)
                    .trim_end()
                    .to_string();
            }
            Err(err) => {
                tracing::error!(%err, "response expression rejected");
                self.status = format!("Error: {}", err);
            }
        }
    }

    fn update_chart(
        &mut self,
        functions: &ResponseFunctions,
        clean: bool,
    ) -> Result<(), crate::charts::ExpressionError> {
        self.chart
            .update(functions, self.system_kind, &self.grid, clean)
    }

    /// Clear the label and the chart, and restore the form defaults.
    pub fn reset(&mut self) {
        self.system_label.clear();
        // Clean mode never evaluates expressions
        let _ = self.update_chart(&ResponseFunctions::default(), true);
        self.form.reset();
        self.system_kind = self.form.system_kind();
        self.status = "Ready".to_string();
    }

    pub fn on_forcing_type_change(&mut self, value: &str) {
        self.form.set_forcing_type(value);
    }

    /// Select the dataset template used by the next chart update.
    pub fn on_system_kind_change(&mut self, rlc: bool) {
        self.form.rlc = rlc;
        self.system_kind = SystemKind::from_rlc(rlc);
    }

    pub fn dismiss_error_dialog(&mut self) {
        self.error_dialog = None;
    }

    pub fn error_dialog(&self) -> Option<&FormError> {
        self.error_dialog.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.response_rx.is_some()
    }

    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    pub fn system_kind(&self) -> SystemKind {
        self.system_kind
    }

    pub fn system_label(&self) -> &str {
        &self.system_label
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ResponseData;
    use crate::form::ConstantsPayload;
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    /// Backend that records every payload and answers with a canned response.
    struct RecordingBackend {
        calls: Mutex<Vec<ConstantsPayload>>,
        response: SimulationResponse,
    }

    impl RecordingBackend {
        fn answering(response: SimulationResponse) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                response,
            })
        }

        fn calls(&self) -> Vec<ConstantsPayload> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl SimulationBackend for RecordingBackend {
        fn simulate(&self, payload: &ConstantsPayload) -> Result<SimulationResponse, ApiError> {
            self.calls.lock().unwrap().push(payload.clone());
            Ok(self.response.clone())
        }
    }

    fn ok_response(yt: &str, vt: &str, at: &str) -> SimulationResponse {
        SimulationResponse {
            status: "OK".into(),
            data: Some(ResponseData {
                yt: yt.into(),
                vt: vt.into(),
                at: at.into(),
                sistemtype: "Underdamped".into(),
            }),
        }
    }

    fn controller(backend: Arc<RecordingBackend>) -> PageController {
        let grid = SampleGrid {
            count: 100,
            ..SampleGrid::default()
        };
        PageController::new(backend, grid)
    }

    fn fill(form: &mut FormState) {
        form.m = "1".into();
        form.k = "4".into();
        form.b = "0.2".into();
        form.c1 = "1".into();
        form.c2 = "0".into();
        form.ft_type = "1".into();
    }

    /// Poll like the UI loop does until the background request is applied.
    fn settle(page: &mut PageController) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !page.poll() {
            assert!(Instant::now() < deadline, "worker did not answer");
            thread::sleep(Duration::from_millis(5));
        }
    }

    /// Backend whose worker thread dies before answering.
    struct PanickingBackend;

    impl SimulationBackend for PanickingBackend {
        fn simulate(&self, _payload: &ConstantsPayload) -> Result<SimulationResponse, ApiError> {
            panic!("simulation backend crashed");
        }
    }

    #[test]
    fn valid_form_posts_exactly_once_with_current_values() {
        let backend = RecordingBackend::answering(ok_response("t", "1", "0"));
        let mut page = controller(Arc::clone(&backend));
        fill(&mut page.form);

        assert_eq!(page.submit(), SubmitOutcome::Sent);
        settle(&mut page);

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], page.form.to_payload());
        assert!(page.error_dialog().is_none());
    }

    #[test]
    fn invalid_form_opens_dialog_without_request() {
        let backend = RecordingBackend::answering(ok_response("t", "1", "0"));
        let mut page = controller(Arc::clone(&backend));
        page.form.m = "1".into();

        let outcome = page.submit();
        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert!(page.error_dialog().is_some());
        assert!(!page.is_busy());
        assert!(backend.calls().is_empty());

        page.dismiss_error_dialog();
        assert!(page.error_dialog().is_none());
    }

    #[test]
    fn ok_response_fills_chart_and_label() {
        let backend = RecordingBackend::answering(ok_response("t", "1", "0"));
        let mut page = controller(backend);
        fill(&mut page.form);

        page.submit();
        settle(&mut page);

        assert_eq!(page.system_label(), "Underdamped");
        let y = &page.chart().datasets()[0].values;
        assert_eq!(y.len(), 100);
        assert_eq!(y[99], 9.9);
        assert!(!page.is_busy());
    }

    #[test]
    fn non_ok_response_leaves_chart_untouched() {
        let mut page = controller(RecordingBackend::answering(ok_response("t", "1", "0")));
        page.apply_response(&ok_response("t", "1", "0"));
        let before = page.chart().datasets().to_vec();

        page.apply_response(&SimulationResponse {
            status: "ERROR".into(),
            data: Some(ResponseData {
                yt: "2*t".into(),
                vt: "0".into(),
                at: "0".into(),
                sistemtype: "Other".into(),
            }),
        });

        assert_eq!(page.chart().datasets(), before.as_slice());
        assert_eq!(page.system_label(), "Underdamped");
        assert!(page.status().contains("ERROR"));
    }

    #[test]
    fn malformed_expression_reports_error() {
        let mut page = controller(RecordingBackend::answering(ok_response("t", "1", "0")));
        page.apply_response(&ok_response("t", "1", "0"));

        page.apply_response(&ok_response("sin(t", "1", "0"));
        assert!(page.status().starts_with("Error:"));
        assert_eq!(page.chart().datasets().len(), 3);
    }

    #[test]
    fn reset_cleans_chart_label_and_form() {
        let mut page = controller(RecordingBackend::answering(ok_response("t", "1", "0")));
        fill(&mut page.form);
        page.on_system_kind_change(true);
        page.apply_response(&ok_response("t", "1", "0"));
        assert!(!page.chart().is_empty());

        page.reset();
        assert!(page.chart().labels().is_empty());
        assert!(page.chart().datasets().is_empty());
        assert!(page.system_label().is_empty());
        assert_eq!(page.form, FormState::default());
        assert_eq!(page.system_kind(), SystemKind::Mechanical);
    }

    #[test]
    fn system_kind_applies_on_next_update_only() {
        let mut page = controller(RecordingBackend::answering(ok_response("t", "1", "0")));
        page.apply_response(&ok_response("t", "1", "0"));
        assert_eq!(page.chart().datasets()[0].label(), "Y(t)");

        page.on_system_kind_change(true);
        assert!(page.form.rlc);
        let labels: Vec<&str> = page.chart().datasets().iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["Y(t)", "V(t)", "A(t)"]);

        page.apply_response(&ok_response("t", "1", "0"));
        let labels: Vec<&str> = page.chart().datasets().iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["q(t)", "i(t)"]);
    }

    #[test]
    fn forcing_type_change_zeroes_parameters() {
        let mut page = controller(RecordingBackend::answering(ok_response("t", "1", "0")));
        page.form.ft1 = 4.0;
        page.form.ft2 = 2.0;
        page.on_forcing_type_change("2");
        assert_eq!((page.form.ft1, page.form.ft2), (4.0, 2.0));

        page.on_forcing_type_change("3");
        page.on_forcing_type_change("3");
        assert_eq!((page.form.ft1, page.form.ft2), (0.0, 0.0));
        assert_eq!(page.form.ft_type, "3");
    }

    #[test]
    fn second_submit_while_busy_is_ignored() {
        let backend = RecordingBackend::answering(ok_response("t", "1", "0"));
        let mut page = controller(Arc::clone(&backend));
        fill(&mut page.form);

        assert_eq!(page.submit(), SubmitOutcome::Sent);
        assert_eq!(page.submit(), SubmitOutcome::Busy);
        settle(&mut page);
        assert_eq!(backend.calls().len(), 1);
    }

    #[test]
    fn dead_worker_reports_error_and_frees_the_page() {
        let mut page = PageController::new(Arc::new(PanickingBackend), SampleGrid::default());
        fill(&mut page.form);

        assert_eq!(page.submit(), SubmitOutcome::Sent);
        assert!(page.is_busy());
        settle(&mut page);

        assert!(page.status().starts_with("Error:"), "status: {}", page.status());
        assert!(!page.is_busy());
        assert!(page.chart().is_empty());
    }

    #[test]
    fn poll_without_request_is_a_no_op() {
        let mut page = controller(RecordingBackend::answering(ok_response("t", "1", "0")));
        assert!(!page.poll());
        assert_eq!(page.status(), "Ready");
    }
}
