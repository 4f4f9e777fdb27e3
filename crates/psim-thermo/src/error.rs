//! Thermodynamic property errors.

use crate::phase::PhaseLabel;
use crate::units::{UnitError, UnitKind};
use psim_core::CoreError;
use thiserror::Error;

/// Result type for thermo operations.
pub type ThermoResult<T> = Result<T, ThermoError>;

/// Errors raised while building, reading or restoring thermodynamic states.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThermoError {
    /// Key is not part of the catalog of this variant.
    #[error("Unknown property '{key}'")]
    UnknownProperty { key: String },

    /// Backend output or serialized map lacks a required property.
    #[error("Missing property '{key}'")]
    MissingProperty { key: &'static str },

    /// Scalar given where a per-component list was expected, or the reverse.
    #[error("Shape mismatch for property '{key}'")]
    ShapeMismatch { key: &'static str },

    /// Value tagged with the wrong unit kind.
    #[error("Unit mismatch for '{key}': expected {expected}, got {found}")]
    UnitMismatch {
        key: &'static str,
        expected: UnitKind,
        found: UnitKind,
    },

    /// Phase has not been computed yet.
    #[error("Phase state not populated")]
    NotPopulated,

    /// Phase absent at these conditions.
    #[error("Phase unavailable: {label}")]
    PhaseUnavailable { label: PhaseLabel },

    /// Non-physical values (negative density, pressure, etc.).
    #[error("Non-physical value for {what}")]
    NonPhysical { what: &'static str },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Operation not supported by a backend or variant.
    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Unit error: {0}")]
    Unit(UnitError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<UnitError> for ThermoError {
    fn from(err: UnitError) -> Self {
        ThermoError::Unit(err)
    }
}

impl From<serde_json::Error> for ThermoError {
    fn from(err: serde_json::Error) -> Self {
        ThermoError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ThermoError::MissingProperty { key: "cp" };
        assert!(err.to_string().contains("cp"));

        let err = ThermoError::PhaseUnavailable {
            label: PhaseLabel::Superheated,
        };
        assert_eq!(err.to_string(), "Phase unavailable: Superheated");
    }

    #[test]
    fn core_error_converts() {
        let err: ThermoError = CoreError::InvalidArg { what: "x" }.into();
        assert!(matches!(err, ThermoError::Core(_)));
    }
}
