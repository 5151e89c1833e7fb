//! Constants Form Module
//! Holds the user-entered system constants and validates them before submission.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Forcing-function type code that keeps user-supplied parameters.
pub const CUSTOM_FORCING_TYPE: &str = "2";

/// Forcing-function choices offered by the simulation service (code, label).
pub const FORCING_TYPES: [(&str, &str); 3] = [
    ("1", "Sinusoidal"),
    (CUSTOM_FORCING_TYPE, "Custom"),
    ("3", "Exponential"),
];

/// Which physical model the constants describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemKind {
    /// Mass-spring-damper: displacement, velocity, acceleration
    #[default]
    Mechanical,
    /// RLC circuit: charge and current
    Electrical,
}

impl SystemKind {
    pub fn from_rlc(rlc: bool) -> Self {
        if rlc {
            SystemKind::Electrical
        } else {
            SystemKind::Mechanical
        }
    }
}

/// Fields that must be filled in before the form can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Mass,
    Stiffness,
    Damping,
    Coefficient1,
    Coefficient2,
    ForcingType,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequiredField::Mass => "m",
            RequiredField::Stiffness => "k",
            RequiredField::Damping => "b",
            RequiredField::Coefficient1 => "c1",
            RequiredField::Coefficient2 => "c2",
            RequiredField::ForcingType => "forcing type",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Missing required fields: {}", join_fields(.0))]
    MissingFields(Vec<RequiredField>),
}

fn join_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Form values as entered by the user.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormState {
    pub rlc: bool,
    pub m: String,
    pub k: String,
    pub b: String,
    pub c1: String,
    pub c2: String,
    pub ft_type: String,
    pub ft1: f64,
    pub ft2: f64,
}

/// JSON body posted to the simulation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstantsPayload {
    pub rlc: bool,
    pub m: String,
    pub k: String,
    pub b: String,
    pub c1: String,
    pub c2: String,
    #[serde(rename = "ftType")]
    pub ft_type: String,
    #[serde(rename = "fT1")]
    pub ft1: f64,
    #[serde(rename = "fT2")]
    pub ft2: f64,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system_kind(&self) -> SystemKind {
        SystemKind::from_rlc(self.rlc)
    }

    /// Required fields that are empty or whitespace only.
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        [
            (RequiredField::Mass, &self.m),
            (RequiredField::Stiffness, &self.k),
            (RequiredField::Damping, &self.b),
            (RequiredField::Coefficient1, &self.c1),
            (RequiredField::Coefficient2, &self.c2),
            (RequiredField::ForcingType, &self.ft_type),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn validate(&self) -> Result<(), FormError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(FormError::MissingFields(missing))
        }
    }

    /// Snapshot of the current values, ready to post.
    pub fn to_payload(&self) -> ConstantsPayload {
        ConstantsPayload {
            rlc: self.rlc,
            m: self.m.trim().to_string(),
            k: self.k.trim().to_string(),
            b: self.b.trim().to_string(),
            c1: self.c1.trim().to_string(),
            c2: self.c2.trim().to_string(),
            ft_type: self.ft_type.trim().to_string(),
            ft1: self.ft1,
            ft2: self.ft2,
        }
    }

    /// Select a forcing type. Any non-custom selection zeroes the parameters.
    pub fn set_forcing_type(&mut self, value: &str) {
        self.ft_type = value.to_string();
        if !value.is_empty() && value != CUSTOM_FORCING_TYPE {
            self.ft1 = 0.0;
            self.ft2 = 0.0;
        }
    }

    pub fn uses_custom_forcing(&self) -> bool {
        self.ft_type == CUSTOM_FORCING_TYPE
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
