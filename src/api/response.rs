//! Simulation Response Module
//! Wire format returned by the simulation service.

use crate::charts::ResponseFunctions;
use serde::Deserialize;

/// Status value marking a successful simulation.
pub const STATUS_OK: &str = "OK";

/// Top-level response body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationResponse {
    pub status: String,
    #[serde(default)]
    pub data: Option<ResponseData>,
}

/// Response expressions in `t`. The electrical variant names the first two
/// `q` and `i` and may omit the third.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ResponseData {
    #[serde(alias = "q")]
    pub yt: String,
    #[serde(alias = "i")]
    pub vt: String,
    #[serde(default)]
    pub at: String,
    #[serde(default)]
    pub sistemtype: String,
}

impl SimulationResponse {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    /// Payload of an "OK" response; `None` for any other status.
    pub fn ok_data(&self) -> Option<&ResponseData> {
        if self.is_ok() {
            self.data.as_ref()
        } else {
            None
        }
    }
}

impl ResponseData {
    pub fn functions(&self) -> ResponseFunctions {
        ResponseFunctions {
            primary: self.yt.clone(),
            first_derivative: self.vt.clone(),
            second_derivative: self.at.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mechanical_response() {
        let body = r#"{
            "status": "OK",
            "data": {
                "yt": "exp(-t)*sin(t)",
                "vt": "exp(-t)*(cos(t) - sin(t))",
                "at": "-2*exp(-t)*cos(t)",
                "sistemtype": "Subamortiguado"
            }
        }"#;
        let resp: SimulationResponse = serde_json::from_str(body).unwrap();
        let data = resp.ok_data().unwrap();
        assert_eq!(data.yt, "exp(-t)*sin(t)");
        assert_eq!(data.sistemtype, "Subamortiguado");
        assert_eq!(data.functions().second_derivative, "-2*exp(-t)*cos(t)");
    }

    #[test]
    fn accepts_electrical_field_names() {
        let body = r#"{ "status": "OK", "data": { "q": "t", "i": "1", "sistemtype": "RLC" } }"#;
        let resp: SimulationResponse = serde_json::from_str(body).unwrap();
        let data = resp.ok_data().unwrap();
        assert_eq!(data.yt, "t");
        assert_eq!(data.vt, "1");
        assert!(data.at.is_empty());
    }

    #[test]
    fn non_ok_status_has_no_usable_data() {
        let body = r#"{ "status": "ERROR", "data": { "yt": "t", "vt": "1", "at": "0" } }"#;
        let resp: SimulationResponse = serde_json::from_str(body).unwrap();
        assert!(!resp.is_ok());
        assert!(resp.ok_data().is_none());

        let bare: SimulationResponse = serde_json::from_str(r#"{ "status": "FAIL" }"#).unwrap();
        assert!(bare.data.is_none());
    }
}
