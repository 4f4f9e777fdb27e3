//! Error types for equipment calculations.

use psim_core::error::CoreError;
use psim_thermo::ThermoError;
use thiserror::Error;

/// Required inputs whose absence leaves the equipment unresolved.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingInput {
    #[error("undefined gas stream")]
    GasStream,

    #[error("undefined liquid stream")]
    LiquidStream,

    #[error("undefined diameter")]
    Diameter,

    #[error("undefined efficiency")]
    Efficiency,
}

/// Errors that can occur during equipment calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComponentError {
    #[error("Missing input: {0}")]
    MissingInput(#[from] MissingInput),

    /// A correlation was evaluated outside its mathematical domain.
    #[error("Domain error: {what}")]
    Domain { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error(
        "Target efficiency {target} unreachable: attainable range is [{min}, {max}]"
    )]
    DesignUnreachable { target: f64, min: f64, max: f64 },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Thermo error: {message}")]
    Thermo { message: String },
}

pub type ComponentResult<T> = Result<T, ComponentError>;

impl From<ThermoError> for ComponentError {
    fn from(e: ThermoError) -> Self {
        ComponentError::Thermo {
            message: e.to_string(),
        }
    }
}

impl From<CoreError> for ComponentError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::NonFinite { what, .. } => ComponentError::NonPhysical { what },
            CoreError::InvalidArg { what } => ComponentError::InvalidArg { what },
            CoreError::Domain { what } => ComponentError::Domain { what },
            CoreError::NonPhysical { what } => ComponentError::NonPhysical { what },
            CoreError::LengthMismatch { what, .. } => ComponentError::InvalidArg { what },
            CoreError::NotBracketed { what, .. } => ComponentError::ConvergenceFailed { what },
            CoreError::NoConvergence { what, .. } => ComponentError::ConvergenceFailed { what },
        }
    }
}

impl From<ComponentError> for CoreError {
    fn from(e: ComponentError) -> Self {
        match e {
            ComponentError::MissingInput(_) => CoreError::InvalidArg {
                what: "missing equipment input",
            },
            ComponentError::Domain { what } => CoreError::Domain { what },
            ComponentError::NonPhysical { what } => CoreError::NonPhysical { what },
            ComponentError::DesignUnreachable { .. } => CoreError::InvalidArg {
                what: "design target unreachable",
            },
            ComponentError::ConvergenceFailed { what } => CoreError::NoConvergence {
                what,
                iterations: 0,
            },
            ComponentError::InvalidArg { what } => CoreError::InvalidArg { what },
            ComponentError::Thermo { message: _ } => CoreError::InvalidArg {
                what: "thermo error",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_input_messages() {
        assert_eq!(MissingInput::GasStream.to_string(), "undefined gas stream");
        assert_eq!(
            MissingInput::LiquidStream.to_string(),
            "undefined liquid stream"
        );
        assert_eq!(MissingInput::Diameter.to_string(), "undefined diameter");
        assert_eq!(MissingInput::Efficiency.to_string(), "undefined efficiency");
    }

    #[test]
    fn error_display() {
        let err = ComponentError::Domain {
            what: "calvert log argument",
        };
        assert!(err.to_string().contains("calvert"));
        let err: ComponentError = MissingInput::Diameter.into();
        assert!(err.to_string().contains("undefined diameter"));
    }

    #[test]
    fn error_conversion() {
        let core: CoreError = ComponentError::InvalidArg { what: "test" }.into();
        assert!(matches!(core, CoreError::InvalidArg { .. }));
        let back: ComponentError = CoreError::NoConvergence {
            what: "throat diameter",
            iterations: 200,
        }
        .into();
        assert!(matches!(back, ComponentError::ConvergenceFailed { .. }));
    }

    #[test]
    fn domain_and_non_physical_survive_core_round_trip() {
        for err in [
            ComponentError::Domain {
                what: "calvert log argument",
            },
            ComponentError::NonPhysical {
                what: "outlet pressure",
            },
        ] {
            let core: CoreError = err.clone().into();
            assert_eq!(ComponentError::from(core), err);
        }
    }
}
