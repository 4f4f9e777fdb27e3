//! Scrubber configuration.

use crate::error::ComponentError;
use crate::physics::CunninghamMethod;
use psim_core::units::{Length, Pressure, pa};
use serde::{Deserialize, Serialize};

/// Johnstone constant used when none is given.
pub const DEFAULT_VENTURI_CONSTANT: f64 = 1000.0;

/// Calvert coefficient used when none is given.
pub const DEFAULT_CALVERT_COEFFICIENT: f64 = 0.5;

/// What the scrubber solves for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Given the throat diameter, compute the efficiency.
    #[default]
    Rating = 0,
    /// Given a target efficiency, compute the throat diameter.
    Design = 1,
}

impl TryFrom<u8> for CalculationMode {
    type Error = ComponentError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(CalculationMode::Rating),
            1 => Ok(CalculationMode::Design),
            _ => Err(ComponentError::InvalidArg {
                what: "calculation mode id",
            }),
        }
    }
}

/// Particle-capture efficiency correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EfficiencyModelKind {
    #[default]
    Johnstone = 0,
    Calvert = 1,
}

impl EfficiencyModelKind {
    pub fn name(&self) -> &'static str {
        match self {
            EfficiencyModelKind::Johnstone => "Johnstone (1954)",
            EfficiencyModelKind::Calvert => "Calvert (1972)",
        }
    }
}

impl TryFrom<u8> for EfficiencyModelKind {
    type Error = ComponentError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(EfficiencyModelKind::Johnstone),
            1 => Ok(EfficiencyModelKind::Calvert),
            _ => Err(ComponentError::InvalidArg {
                what: "efficiency model id",
            }),
        }
    }
}

/// Pressure-drop correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PressureDropModelKind {
    #[default]
    Calvert = 0,
    Hesketh = 1,
    Gleason = 2,
    Volgin = 3,
    Young = 4,
}

impl PressureDropModelKind {
    pub const ALL: [PressureDropModelKind; 5] = [
        PressureDropModelKind::Calvert,
        PressureDropModelKind::Hesketh,
        PressureDropModelKind::Gleason,
        PressureDropModelKind::Volgin,
        PressureDropModelKind::Young,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PressureDropModelKind::Calvert => "Calvert (1968)",
            PressureDropModelKind::Hesketh => "Hesketh (1974)",
            PressureDropModelKind::Gleason => "Gleason (1971)",
            PressureDropModelKind::Volgin => "Volgin (1968)",
            PressureDropModelKind::Young => "Young (1977)",
        }
    }

    pub fn needs_throat_length(&self) -> bool {
        matches!(
            self,
            PressureDropModelKind::Volgin | PressureDropModelKind::Young
        )
    }
}

impl TryFrom<u8> for PressureDropModelKind {
    type Error = ComponentError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(PressureDropModelKind::Calvert),
            1 => Ok(PressureDropModelKind::Hesketh),
            2 => Ok(PressureDropModelKind::Gleason),
            3 => Ok(PressureDropModelKind::Volgin),
            4 => Ok(PressureDropModelKind::Young),
            _ => Err(ComponentError::InvalidArg {
                what: "pressure drop model id",
            }),
        }
    }
}

/// Immutable scrubber configuration.
///
/// `None` (or zero) marks an unset input; validation decides whether that
/// is fatal or falls back to a default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrubberConfig {
    pub mode: CalculationMode,
    /// Throat diameter (rating mode)
    pub diameter: Option<Length>,
    /// Global efficiency to reach (design mode)
    pub target_efficiency: Option<f64>,
    pub efficiency_model: EfficiencyModelKind,
    /// Johnstone empirical constant
    pub k: Option<f64>,
    /// Calvert hydrophobicity coefficient
    pub f: Option<f64>,
    pub pressure_drop_model: PressureDropModelKind,
    pub throat_length: Option<Length>,
    /// Subtracted from the inlet pressure for the logged outlet estimate
    pub pressure_drop_allowance: Pressure,
    pub cunningham: CunninghamMethod,
}

impl ScrubberConfig {
    /// Rating configuration for a throat diameter.
    pub fn rating(diameter: Length) -> Self {
        Self {
            mode: CalculationMode::Rating,
            diameter: Some(diameter),
            ..Self::default()
        }
    }

    /// Design configuration for a target global efficiency.
    pub fn design(target_efficiency: f64) -> Self {
        Self {
            mode: CalculationMode::Design,
            target_efficiency: Some(target_efficiency),
            ..Self::default()
        }
    }

    pub fn with_johnstone(self, k: f64) -> Self {
        Self {
            efficiency_model: EfficiencyModelKind::Johnstone,
            k: Some(k),
            ..self
        }
    }

    pub fn with_calvert(self, f: f64) -> Self {
        Self {
            efficiency_model: EfficiencyModelKind::Calvert,
            f: Some(f),
            ..self
        }
    }

    pub fn with_pressure_drop(self, model: PressureDropModelKind) -> Self {
        Self {
            pressure_drop_model: model,
            ..self
        }
    }

    pub fn with_throat_length(self, length: Length) -> Self {
        Self {
            throat_length: Some(length),
            ..self
        }
    }

    pub fn with_cunningham(self, method: CunninghamMethod) -> Self {
        Self {
            cunningham: method,
            ..self
        }
    }

    pub fn with_pressure_drop_allowance(self, allowance: Pressure) -> Self {
        Self {
            pressure_drop_allowance: allowance,
            ..self
        }
    }
}

impl Default for ScrubberConfig {
    fn default() -> Self {
        Self {
            mode: CalculationMode::Rating,
            diameter: None,
            target_efficiency: None,
            efficiency_model: EfficiencyModelKind::Johnstone,
            k: None,
            f: None,
            pressure_drop_model: PressureDropModelKind::Calvert,
            throat_length: None,
            pressure_drop_allowance: pa(0.0),
            cunningham: CunninghamMethod::Davies,
        }
    }
}
