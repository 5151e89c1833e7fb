//! Control Panel Widget
//! Left side panel with the system constants form and action buttons.

use crate::controller::PageController;
use crate::form::FORCING_TYPES;
use egui::{Color32, RichText};

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    Submit,
    Clean,
    ExportPng,
}

/// Left side control panel holding the constants form.
#[derive(Default)]
pub struct ControlPanel;

impl ControlPanel {
    pub fn new() -> Self {
        Self
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, page: &mut PageController) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📈 SimView")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Second-order system response")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== System Kind Section =====
        ui.label(RichText::new("⚙️ System").size(14.0).strong());
        ui.add_space(5.0);

        let mut rlc = page.form.rlc;
        ui.horizontal(|ui| {
            ui.selectable_value(&mut rlc, false, "Mass-spring-damper");
            ui.selectable_value(&mut rlc, true, "RLC circuit");
        });
        if rlc != page.form.rlc {
            page.on_system_kind_change(rlc);
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Constants Section =====
        ui.label(RichText::new("🔧 Constants").size(14.0).strong());
        ui.add_space(8.0);

        let (m_label, k_label, b_label) = if page.form.rlc {
            ("L (inductance):", "1/C (elastance):", "R (resistance):")
        } else {
            ("m (mass):", "k (stiffness):", "b (damping):")
        };

        let label_width = 120.0;
        let field_width = 150.0;
        let form = &mut page.form;
        for (label, value) in [
            (m_label, &mut form.m),
            (k_label, &mut form.k),
            (b_label, &mut form.b),
            ("c1:", &mut form.c1),
            ("c2:", &mut form.c2),
        ] {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new(label));
                ui.add(egui::TextEdit::singleline(value).desired_width(field_width));
            });
            ui.add_space(5.0);
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Forcing Function Section =====
        ui.label(RichText::new("📈 Forcing Function").size(14.0).strong());
        ui.add_space(5.0);

        let mut selected = page.form.ft_type.clone();
        ui.horizontal_wrapped(|ui| {
            for (code, name) in FORCING_TYPES {
                ui.radio_value(&mut selected, code.to_string(), name);
            }
        });
        if selected != page.form.ft_type {
            page.on_forcing_type_change(&selected);
        }

        ui.add_space(5.0);
        ui.add_enabled_ui(page.form.uses_custom_forcing(), |ui| {
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("fT1:"));
                ui.add(egui::DragValue::new(&mut page.form.ft1).speed(0.1));
            });
            ui.horizontal(|ui| {
                ui.add_sized([label_width, 20.0], egui::Label::new("fT2:"));
                ui.add(egui::DragValue::new(&mut page.form.ft2).speed(0.1));
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(!page.is_busy(), |ui| {
                let button = egui::Button::new(RichText::new("▶ Simulate").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::Submit;
                }
            });

            ui.add_space(8.0);

            let clean_button = egui::Button::new(RichText::new("🧹 Clean").size(14.0))
                .min_size(egui::vec2(150.0, 30.0));
            if ui.add(clean_button).clicked() {
                action = ControlPanelAction::Clean;
            }

            ui.add_space(8.0);

            ui.add_enabled_ui(!page.chart().is_empty(), |ui| {
                let export_button = egui::Button::new(RichText::new("📄 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(export_button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        if page.is_busy() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Waiting for the simulation service...").size(11.0));
            });
        }

        let status = page.status();
        let status_color = if status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if status.contains("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(status).size(11.0).color(status_color));

        action
    }
}
