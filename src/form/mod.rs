//! Form module - Constants form state and validation

mod constants;

pub use constants::{
    ConstantsPayload, FormError, FormState, RequiredField, SystemKind, CUSTOM_FORCING_TYPE,
    FORCING_TYPES,
};
