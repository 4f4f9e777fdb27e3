//! Whole-stream thermodynamic state: global values plus liquid and gas phases.

use crate::backend::EosOutput;
use crate::catalog::ThermoVariant;
use crate::composition::Composition;
use crate::error::{ThermoError, ThermoResult};
use crate::global::GlobalState;
use crate::phase::{PhaseContext, PhaseFlows, PhaseLabel, PhaseState, RawPhase};
use crate::state_map::{FluidStateMap, StateMap};
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseKind {
    Liquid,
    Gas,
}

/// State variables usable in [`FluidState::derivative`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateVar {
    P,
    T,
    V,
    U,
    H,
    S,
    G,
    A,
}

impl std::str::FromStr for StateVar {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "P" => Ok(StateVar::P),
            "T" => Ok(StateVar::T),
            "v" => Ok(StateVar::V),
            "u" => Ok(StateVar::U),
            "h" => Ok(StateVar::H),
            "s" => Ok(StateVar::S),
            "g" => Ok(StateVar::G),
            "a" => Ok(StateVar::A),
            _ => Err("unknown state variable"),
        }
    }
}

/// Descriptive phase region of a state point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseRegion {
    SupercriticalFluid,
    Gas,
    CompressibleLiquid,
    CriticalPoint,
    SaturatedVapor,
    SaturatedLiquid,
    TwoPhases,
    Vapour,
    Liquid,
    Unknown,
}

impl PhaseRegion {
    /// Classify a point against the critical point.
    ///
    /// `on_saturation` marks states that sit on the vapour-liquid
    /// equilibrium line. T and P are rounded to 8 decimals first.
    pub fn classify(tc: f64, pc: f64, t: f64, p: f64, x: f64, on_saturation: bool) -> Self {
        let t = round8(t);
        let p = round8(p);
        if p > pc && t > tc {
            PhaseRegion::SupercriticalFluid
        } else if t > tc {
            PhaseRegion::Gas
        } else if p > pc {
            PhaseRegion::CompressibleLiquid
        } else if p == pc && t == tc {
            PhaseRegion::CriticalPoint
        } else if on_saturation && x == 1.0 {
            PhaseRegion::SaturatedVapor
        } else if on_saturation && x == 0.0 {
            PhaseRegion::SaturatedLiquid
        } else if on_saturation {
            PhaseRegion::TwoPhases
        } else if x == 1.0 {
            PhaseRegion::Vapour
        } else if x == 0.0 {
            PhaseRegion::Liquid
        } else {
            PhaseRegion::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseRegion::SupercriticalFluid => "Supercritical fluid",
            PhaseRegion::Gas => "Gas",
            PhaseRegion::CompressibleLiquid => "Compressible liquid",
            PhaseRegion::CriticalPoint => "Critical point",
            PhaseRegion::SaturatedVapor => "Saturated vapor",
            PhaseRegion::SaturatedLiquid => "Saturated liquid",
            PhaseRegion::TwoPhases => "Two phases",
            PhaseRegion::Vapour => "Vapour",
            PhaseRegion::Liquid => "Liquid",
            PhaseRegion::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PhaseRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn round8(v: f64) -> f64 {
    (v * 1e8).round() / 1e8
}

/// Global state plus one [`PhaseState`] per phase.
#[derive(Debug, Clone, PartialEq)]
pub struct FluidState {
    variant: ThermoVariant,
    global: GlobalState,
    liquid: PhaseState,
    gas: PhaseState,
}

impl FluidState {
    /// Build the typed state from a backend flash carrying `mass_flow` kg/s.
    pub fn from_output(
        output: &EosOutput,
        mass_flow: f64,
        composition: &Composition,
    ) -> ThermoResult<Self> {
        let variant = output.variant;
        let global = GlobalState::compute(
            variant,
            &output.conditions,
            output.ideal.as_ref(),
            &output.globals,
        )?;
        let label = global.phase_label()?;
        let ctx = PhaseContext {
            t: output.conditions.t,
            p: output.conditions.p,
        };
        let molar_masses: Vec<f64> = composition.components().map(|c| c.molar_mass()).collect();
        let x = output.conditions.quality;

        let build = |raw: Option<&RawPhase>, phase_mass: f64| -> ThermoResult<PhaseState> {
            match raw {
                Some(raw) => {
                    let v = raw_scalar(raw, "v")?;
                    let flows =
                        PhaseFlows::new(phase_mass, v, &raw.mole_fractions, &molar_masses)?;
                    PhaseState::compute(variant, raw, ctx, flows)
                }
                None => Ok(PhaseState::unavailable(variant, label)),
            }
        };
        let liquid = build(output.liquid.as_ref(), mass_flow * (1.0 - x))?;
        let gas = build(output.gas.as_ref(), mass_flow * x)?;
        debug!(%variant, x, %label, "fluid state built");

        Ok(Self {
            variant,
            global,
            liquid,
            gas,
        })
    }

    pub fn variant(&self) -> ThermoVariant {
        self.variant
    }

    pub fn global(&self) -> &GlobalState {
        &self.global
    }

    pub fn liquid(&self) -> &PhaseState {
        &self.liquid
    }

    pub fn gas(&self) -> &PhaseState {
        &self.gas
    }

    pub fn phase(&self, kind: PhaseKind) -> &PhaseState {
        match kind {
            PhaseKind::Liquid => &self.liquid,
            PhaseKind::Gas => &self.gas,
        }
    }

    pub fn phase_label(&self) -> ThermoResult<PhaseLabel> {
        self.global.phase_label()
    }

    /// Region of the stream; both phases present counts as saturation.
    pub fn region(&self) -> ThermoResult<PhaseRegion> {
        let t = self.global.scalar("T")?;
        let p = self.global.scalar("P")?;
        let tc = t / self.global.scalar("Tr")?;
        let pc = p / self.global.scalar("Pr")?;
        let x = self.global.scalar("x")?;
        let saturated = self.liquid.is_populated() && self.gas.is_populated();
        Ok(PhaseRegion::classify(tc, pc, t, p, x, saturated))
    }

    pub fn serialize(&self) -> FluidStateMap {
        let mut global = StateMap::new();
        self.global.write(&mut global);
        FluidStateMap {
            variant: self.variant,
            global,
            liquid: self.liquid.serialize(),
            gas: self.gas.serialize(),
        }
    }

    /// Rebuild from [`serialize`](Self::serialize) output. Empty phase maps
    /// come back as unavailable phases labelled from the global state.
    pub fn restore(map: &FluidStateMap) -> ThermoResult<Self> {
        let variant = map.variant;
        let global = GlobalState::read(variant, &map.global)?;
        let restore_phase = |phase: &StateMap| -> ThermoResult<PhaseState> {
            if phase.is_empty() {
                Ok(PhaseState::unavailable(variant, global.phase_label()?))
            } else {
                PhaseState::restore(variant, phase)
            }
        };
        let liquid = restore_phase(&map.liquid)?;
        let gas = restore_phase(&map.gas)?;
        Ok(Self {
            variant,
            global,
            liquid,
            gas,
        })
    }

    /// Partial derivative (∂z/∂x)_y on one phase, from cp, v, s, the
    /// expansivity and the isothermal compressibility.
    pub fn derivative(
        &self,
        z: StateVar,
        x: StateVar,
        y: StateVar,
        phase: PhaseKind,
    ) -> ThermoResult<f64> {
        let ph = self.phase(phase);
        let p = self.global.scalar("P")?;
        let t = self.global.scalar("T")?;
        let v = ph.scalar("v")?;
        let s = ph.scalar("s")?;
        let cp = ph.scalar("cp")?;
        let alfav = ph.scalar("alfav")?;
        let kappa = ph.scalar("kappa")?;

        // Differentials of each variable in T and P.
        let d_t = |var: StateVar| match var {
            StateVar::P => 0.0,
            StateVar::T => 1.0,
            StateVar::V => v * alfav,
            StateVar::U => cp - p * v * alfav,
            StateVar::H => cp,
            StateVar::S => cp / t,
            StateVar::G => -s,
            StateVar::A => -p * v * alfav - s,
        };
        let d_p = |var: StateVar| match var {
            StateVar::P => 1.0,
            StateVar::T => 0.0,
            StateVar::V => -v * kappa,
            StateVar::U => v * (p * kappa - t * alfav),
            StateVar::H => v * (1.0 - t * alfav),
            StateVar::S => -v * alfav,
            StateVar::G => v,
            StateVar::A => p * v * kappa,
        };

        let num = d_p(z) * d_t(y) - d_t(z) * d_p(y);
        let den = d_p(x) * d_t(y) - d_t(x) * d_p(y);
        if den == 0.0 || !den.is_finite() {
            return Err(ThermoError::InvalidArg {
                what: "derivative undefined for these variables",
            });
        }
        Ok(num / den)
    }
}

fn raw_scalar(raw: &RawPhase, key: &'static str) -> ThermoResult<f64> {
    match raw.values.get(key) {
        Some(crate::state_map::StateValue::Number(v)) => Ok(*v),
        Some(_) => Err(ThermoError::ShapeMismatch { key }),
        None => Err(ThermoError::MissingProperty { key }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::EosBackend;
    use crate::component::Component;
    use crate::ideal_gas::IdealGasBackend;
    use crate::incompressible::IncompressibleBackend;
    use psim_core::constants::R_UNIVERSAL;
    use psim_core::numeric::{Tolerances, nearly_equal};
    use psim_core::units::{k, pa};

    fn air_state() -> FluidState {
        let comp = Composition::pure(Component::Air);
        let out = IdealGasBackend::new()
            .flash(k(350.0), pa(101_325.0), &comp)
            .unwrap();
        FluidState::from_output(&out, 0.01, &comp).unwrap()
    }

    #[test]
    fn gas_only_stream_labels_liquid() {
        let state = air_state();
        assert!(state.gas().is_populated());
        assert_eq!(
            state.liquid().status(),
            crate::phase::PhaseStatus::Unavailable(PhaseLabel::Supercritical)
        );
        assert_eq!(state.region().unwrap(), PhaseRegion::Gas);
        let flows = state.gas().flows().unwrap();
        assert_eq!(flows.mass_flow, 0.01);
    }

    #[test]
    fn liquid_stream_is_subcooled_for_gas() {
        let comp = Composition::pure(Component::H2O);
        let out = IncompressibleBackend::water()
            .flash(k(300.0), pa(101_325.0), &comp)
            .unwrap();
        let state = FluidState::from_output(&out, 0.1, &comp).unwrap();
        assert_eq!(state.phase_label().unwrap(), PhaseLabel::Subcooled);
        assert_eq!(state.region().unwrap(), PhaseRegion::Liquid);
        assert!(state.liquid().is_populated());
    }

    #[test]
    fn round_trip_through_json() {
        let state = air_state();
        let json = state.serialize().to_json().unwrap();
        let back = FluidState::restore(&FluidStateMap::from_json(&json).unwrap()).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn ideal_gas_derivatives() {
        let state = air_state();
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        let cp = state.gas().scalar("cp").unwrap();
        let dh_dt = state
            .derivative(StateVar::H, StateVar::T, StateVar::P, PhaseKind::Gas)
            .unwrap();
        assert!(nearly_equal(dh_dt, cp, tol));

        let dv_dt = state
            .derivative(StateVar::V, StateVar::T, StateVar::P, PhaseKind::Gas)
            .unwrap();
        let expected = R_UNIVERSAL / Component::Air.molar_mass() / 101_325.0;
        assert!(nearly_equal(dv_dt, expected, tol));

        let dp_dt = state
            .derivative(StateVar::P, StateVar::T, StateVar::V, PhaseKind::Gas)
            .unwrap();
        assert!(nearly_equal(dp_dt, 101_325.0 / 350.0, tol));

        assert!(
            state
                .derivative(StateVar::H, StateVar::T, StateVar::T, PhaseKind::Gas)
                .is_err()
        );
        assert!(
            state
                .derivative(StateVar::H, StateVar::T, StateVar::P, PhaseKind::Liquid)
                .is_err()
        );
    }

    #[test]
    fn region_classification() {
        use PhaseRegion::*;
        assert_eq!(PhaseRegion::classify(647.0, 22e6, 700.0, 25e6, 1.0, false), SupercriticalFluid);
        assert_eq!(PhaseRegion::classify(647.0, 22e6, 700.0, 1e5, 1.0, false), Gas);
        assert_eq!(PhaseRegion::classify(647.0, 22e6, 300.0, 25e6, 0.0, false), CompressibleLiquid);
        assert_eq!(PhaseRegion::classify(647.0, 22e6, 647.0, 22e6, 0.5, false), CriticalPoint);
        assert_eq!(PhaseRegion::classify(647.0, 22e6, 373.0, 1e5, 1.0, true), SaturatedVapor);
        assert_eq!(PhaseRegion::classify(647.0, 22e6, 373.0, 1e5, 0.0, true), SaturatedLiquid);
        assert_eq!(PhaseRegion::classify(647.0, 22e6, 373.0, 1e5, 0.4, true), TwoPhases);
        assert_eq!(PhaseRegion::classify(647.0, 22e6, 400.0, 1e5, 1.0, false), Vapour);
        assert_eq!(PhaseRegion::classify(647.0, 22e6, 300.0, 1e5, 0.0, false), Liquid);
        assert_eq!(PhaseRegion::classify(647.0, 22e6, 300.0, 1e5, 0.4, false), Unknown);
    }
}
