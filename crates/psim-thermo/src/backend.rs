//! Equation-of-state backend trait and its output record.
//!
//! A backend flashes a composition at (T, P) and reports raw property values
//! keyed by catalog key. [`FluidState`](crate::fluid::FluidState) turns that
//! output into the typed state, deriving everything with a closed form.

use crate::catalog::ThermoVariant;
use crate::composition::Composition;
use crate::error::{ThermoError, ThermoResult};
use crate::global::{IdealGasRaw, StreamConditions};
use crate::phase::RawPhase;
use crate::state_map::StateMap;
use psim_core::units::{Pressure, Temperature};

/// Everything a backend knows about one flash.
#[derive(Debug, Clone, PartialEq)]
pub struct EosOutput {
    /// Property set the backend filled in.
    pub variant: ThermoVariant,
    pub conditions: StreamConditions,
    pub ideal: Option<IdealGasRaw>,
    /// Extra global values (Hvap, invT, RefProp block, ...).
    pub globals: StateMap,
    pub liquid: Option<RawPhase>,
    pub gas: Option<RawPhase>,
}

/// Property backend.
///
/// Implementations must be thread-safe (Send + Sync); streams share them
/// through `Arc`.
pub trait EosBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Property set this backend produces.
    fn variant(&self) -> ThermoVariant;

    fn supports_composition(&self, comp: &Composition) -> bool;

    fn flash(&self, t: Temperature, p: Pressure, comp: &Composition) -> ThermoResult<EosOutput>;
}

pub(crate) mod validation {
    use super::*;

    pub fn validate_pressure(p: Pressure) -> ThermoResult<()> {
        if !p.value.is_finite() || p.value <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "pressure must be positive and finite",
            });
        }
        Ok(())
    }

    pub fn validate_temperature(t: Temperature) -> ThermoResult<()> {
        if !t.value.is_finite() || t.value <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    pub fn validate_positive(value: f64, what: &'static str) -> ThermoResult<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(ThermoError::NonPhysical { what });
        }
        Ok(())
    }
}
