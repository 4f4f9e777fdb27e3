//! Serialize/restore round trips for every state variant.
//!
//! The RefProp and two-phase states come from a small in-test backend that
//! decorates the ideal-gas output with the extra keys.

use proptest::prelude::*;
use psim_core::units::{Pressure, Temperature, k, pa};
use psim_thermo::{
    Component, Composition, EosBackend, EosOutput, FluidState, FluidStateMap, IdealGasBackend,
    IncompressibleBackend, PhaseRegion, StateValue, ThermoResult, ThermoVariant,
};

/// Advanced ideal gas plus the RefProp block, optionally with a liquid phase.
struct DecoratedBackend {
    two_phase: bool,
}

impl EosBackend for DecoratedBackend {
    fn name(&self) -> &str {
        "decorated"
    }

    fn variant(&self) -> ThermoVariant {
        ThermoVariant::RefProp
    }

    fn supports_composition(&self, _comp: &Composition) -> bool {
        true
    }

    fn flash(&self, t: Temperature, p: Pressure, comp: &Composition) -> ThermoResult<EosOutput> {
        let mut out = IdealGasBackend::advanced().flash(t, p, comp)?;
        out.variant = ThermoVariant::RefProp;
        let n = comp.len();

        for (i, key) in ["P0", "P_Pideal", "vE", "uE", "hE", "sE", "aE", "gE", "pr"]
            .iter()
            .enumerate()
        {
            out.globals
                .insert((*key).to_string(), StateValue::Number(0.1 * i as f64 + 0.3));
        }
        for key in ["ur", "hr", "sr", "ar", "gr", "cpr", "cvr", "fpv", "b12", "cstar"] {
            out.globals.insert(key.to_string(), StateValue::Number(1.0 / 3.0));
        }
        for key in ["K", "csat", "dpdt_sat", "cv2p", "chempot"] {
            out.globals.insert(
                key.to_string(),
                StateValue::List((0..n).map(|i| 0.7 + i as f64).collect()),
            );
        }

        if let Some(gas) = out.gas.as_mut() {
            for key in ["virialD", "virialBa", "virialCa", "dCdt", "dCdt2", "dBdt"] {
                gas.insert(key, 2.0e-7);
            }
        }
        if self.two_phase {
            let mut liquid = out.gas.clone().unwrap_or_default();
            liquid.insert("v", 1.1e-3);
            liquid.insert("sigma", 0.02);
            out.liquid = Some(liquid);
            out.conditions.quality = 0.25;
        }
        Ok(out)
    }
}

fn state_from(backend: &dyn EosBackend, t: f64, p: f64, comp: &Composition) -> FluidState {
    let out = backend.flash(k(t), pa(p), comp).unwrap();
    FluidState::from_output(&out, 0.5, comp).unwrap()
}

fn assert_round_trip(state: &FluidState) {
    let map = state.serialize();
    let json = map.to_json().unwrap();
    let parsed = FluidStateMap::from_json(&json).unwrap();
    assert_eq!(parsed, map);
    let back = FluidState::restore(&parsed).unwrap();
    assert_eq!(&back, state);
}

#[test]
fn base_round_trip() {
    let comp = Composition::new_mole_fractions(vec![(Component::N2, 0.79), (Component::O2, 0.21)])
        .unwrap();
    let state = state_from(&IdealGasBackend::new(), 320.0, 2.0e5, &comp);
    assert_eq!(state.variant(), ThermoVariant::Base);
    assert_round_trip(&state);
}

#[test]
fn water_round_trip() {
    let comp = Composition::pure(Component::H2O);
    let state = state_from(&IncompressibleBackend::water(), 300.0, 101_325.0, &comp);
    assert_eq!(state.variant(), ThermoVariant::Water);
    let map = state.serialize();
    assert!(map.liquid.contains_key("epsilon"));
    assert!(map.liquid.contains_key("n"));
    assert!(map.gas.is_empty());
    assert_round_trip(&state);
}

#[test]
fn advanced_round_trip() {
    let comp = Composition::pure(Component::CO2);
    let state = state_from(&IdealGasBackend::advanced(), 400.0, 5.0e5, &comp);
    assert!(state.serialize().global.contains_key("invT"));
    assert_round_trip(&state);
}

#[test]
fn refprop_round_trip_two_phase() {
    let comp = Composition::new_mole_fractions(vec![(Component::CH4, 0.9), (Component::CO2, 0.1)])
        .unwrap();
    let state = state_from(&DecoratedBackend { two_phase: true }, 180.0, 2.0e6, &comp);
    assert!(state.liquid().is_populated());
    assert!(state.gas().is_populated());
    assert_eq!(state.region().unwrap(), PhaseRegion::TwoPhases);

    let liquid_flow = state.liquid().flows().unwrap().mass_flow;
    let gas_flow = state.gas().flows().unwrap().mass_flow;
    assert!((liquid_flow - 0.375).abs() < 1e-15);
    assert!((gas_flow - 0.125).abs() < 1e-15);
    assert_round_trip(&state);
}

#[test]
fn restore_rejects_variant_mismatch() {
    let comp = Composition::pure(Component::CO2);
    let state = state_from(&IdealGasBackend::advanced(), 400.0, 5.0e5, &comp);
    let mut map = state.serialize();
    map.variant = ThermoVariant::Base;
    assert!(FluidState::restore(&map).is_err());
}

proptest! {
    #[test]
    fn round_trip_is_exact_over_conditions(
        t in 200.0_f64..900.0,
        p in 1.0e4_f64..5.0e6,
        y in 0.01_f64..0.99,
        refprop in any::<bool>(),
    ) {
        let comp = Composition::new_mole_fractions(vec![
            (Component::N2, y),
            (Component::Ar, 1.0 - y),
        ])
        .unwrap();
        let state = if refprop {
            state_from(&DecoratedBackend { two_phase: false }, t, p, &comp)
        } else {
            state_from(&IdealGasBackend::advanced(), t, p, &comp)
        };
        let back = FluidState::restore(&state.serialize()).unwrap();
        prop_assert_eq!(back, state);
    }
}
