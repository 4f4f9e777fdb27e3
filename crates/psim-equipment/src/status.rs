//! Equipment status and non-fatal warnings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of validating and solving a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentStatus {
    /// Validation failed; nothing was computed.
    Unresolved,
    Solved,
    /// Solved with at least one defaulted or skipped input.
    Degraded,
}

impl EquipmentStatus {
    /// Numeric status code: 0 unresolved, 1 solved, 3 degraded.
    pub fn code(&self) -> u8 {
        match self {
            EquipmentStatus::Unresolved => 0,
            EquipmentStatus::Solved => 1,
            EquipmentStatus::Degraded => 3,
        }
    }

    /// Status for a successful solve with the given warnings.
    pub fn from_warnings(warnings: &[Warning]) -> Self {
        if warnings.is_empty() {
            EquipmentStatus::Solved
        } else {
            EquipmentStatus::Degraded
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EquipmentStatus::Unresolved => "unresolved",
            EquipmentStatus::Solved => "solved",
            EquipmentStatus::Degraded => "degraded",
        };
        f.write_str(s)
    }
}

/// Input that was missing but had a usable fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Warning {
    /// Johnstone constant defaulted to 1000.
    VenturiConstant,
    /// Calvert coefficient defaulted to 0.5.
    CalvertCoefficient,
    /// Throat length missing; pressure drop reported as zero.
    ThroatLength,
}

impl Warning {
    pub fn message(&self) -> &'static str {
        match self {
            Warning::VenturiConstant => "undefined venturi constant",
            Warning::CalvertCoefficient => "undefined calvert coefficient",
            Warning::ThroatLength => "undefined throat length",
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(EquipmentStatus::Unresolved.code(), 0);
        assert_eq!(EquipmentStatus::Solved.code(), 1);
        assert_eq!(EquipmentStatus::Degraded.code(), 3);
    }

    #[test]
    fn warnings_degrade() {
        assert_eq!(EquipmentStatus::from_warnings(&[]), EquipmentStatus::Solved);
        assert_eq!(
            EquipmentStatus::from_warnings(&[Warning::ThroatLength]),
            EquipmentStatus::Degraded
        );
        assert_eq!(
            Warning::CalvertCoefficient.to_string(),
            "undefined calvert coefficient"
        );
    }
}
