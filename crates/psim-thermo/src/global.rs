//! Stream-level (global) thermodynamic properties.

use crate::catalog::{PropertyDef, Scope, ThermoVariant};
use crate::error::{ThermoError, ThermoResult};
use crate::phase::PhaseLabel;
use crate::state_map::{PropertyValue, StateMap};
use crate::units::Quantity;
use std::collections::BTreeMap;

/// Ideal-gas reference values reported by a backend at stream T, P. All SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGasRaw {
    pub v: f64,
    pub h: f64,
    pub s: f64,
    pub cp: f64,
    pub cv: f64,
}

/// Global values keyed by the global catalog keys of a variant.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalState {
    variant: ThermoVariant,
    values: BTreeMap<&'static str, PropertyValue>,
}

impl GlobalState {
    pub fn new(variant: ThermoVariant) -> Self {
        Self {
            variant,
            values: BTreeMap::new(),
        }
    }

    /// Fill T, P, reduced conditions, quality, the ideal-gas block and any
    /// extra global values a backend reports.
    pub fn compute(
        variant: ThermoVariant,
        conditions: &StreamConditions,
        ideal: Option<&IdealGasRaw>,
        extra: &StateMap,
    ) -> ThermoResult<Self> {
        let mut state = Self::new(variant);
        let StreamConditions { t, p, tc, pc, quality } = *conditions;
        if tc <= 0.0 || pc <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "critical point",
            });
        }

        state.set_si("T", t)?;
        state.set_si("Tr", t / tc)?;
        state.set_si("P", p)?;
        state.set_si("Pr", p / pc)?;
        state.set_si("x", quality)?;

        if let Some(ig) = ideal {
            let u0 = ig.h - p * ig.v;
            let cp0_cv = ig.cp / ig.cv;
            state.set_si("v0", ig.v)?;
            state.set_si("rho0", 1.0 / ig.v)?;
            state.set_si("h0", ig.h)?;
            state.set_si("u0", u0)?;
            state.set_si("s0", ig.s)?;
            state.set_si("a0", u0 - t * ig.s)?;
            state.set_si("g0", ig.h - t * ig.s)?;
            state.set_si("cp0", ig.cp)?;
            state.set_si("cv0", ig.cv)?;
            state.set_si("cp0_cv", cp0_cv)?;
            state.set_si("gamma0", cp0_cv)?;
        }

        for (key, value) in extra {
            let def = state.def(key)?;
            state
                .values
                .insert(def.key, PropertyValue::from_state_value(def, value)?);
        }
        Ok(state)
    }

    pub fn variant(&self) -> ThermoVariant {
        self.variant
    }

    fn def(&self, key: &str) -> ThermoResult<&'static PropertyDef> {
        self.variant
            .catalog()
            .lookup(key)
            .filter(|def| def.scope == Scope::Global)
            .ok_or_else(|| ThermoError::UnknownProperty {
                key: key.to_string(),
            })
    }

    /// Value of a global key, `None` when the backend did not report it.
    pub fn get(&self, key: &str) -> ThermoResult<Option<&PropertyValue>> {
        let def = self.def(key)?;
        Ok(self.values.get(def.key))
    }

    /// Scalar global value in SI.
    pub fn scalar(&self, key: &str) -> ThermoResult<f64> {
        let def = self.def(key)?;
        match self.values.get(def.key) {
            Some(PropertyValue::Scalar(q)) => Ok(q.si()),
            Some(PropertyValue::List(_)) => Err(ThermoError::ShapeMismatch { key: def.key }),
            None => Err(ThermoError::MissingProperty { key: def.key }),
        }
    }

    /// Store a value; key, shape and unit must match the catalog.
    pub fn set(&mut self, key: &str, value: PropertyValue) -> ThermoResult<()> {
        let def = self.def(key)?;
        value.check(def)?;
        self.values.insert(def.key, value);
        Ok(())
    }

    pub fn set_si(&mut self, key: &str, si: f64) -> ThermoResult<()> {
        let def = self.def(key)?;
        self.set(key, PropertyValue::Scalar(Quantity::new(def.unit, si)))
    }

    /// Stored values in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PropertyValue)> + '_ {
        self.variant
            .catalog()
            .entries_in(Scope::Global)
            .filter_map(move |def| self.values.get(def.key).map(|v| (def.key, v)))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Write every stored global value into `map`.
    pub fn write(&self, map: &mut StateMap) {
        for (key, value) in &self.values {
            map.insert((*key).to_string(), value.to_state_value());
        }
    }

    /// Read global values back, re-wrapping each with its catalog unit.
    pub fn read(variant: ThermoVariant, map: &StateMap) -> ThermoResult<Self> {
        let mut state = Self::new(variant);
        for (key, value) in map {
            let def = state.def(key)?;
            state
                .values
                .insert(def.key, PropertyValue::from_state_value(def, value)?);
        }
        Ok(state)
    }

    /// Label for phases absent at the stream conditions.
    pub fn phase_label(&self) -> ThermoResult<PhaseLabel> {
        Ok(PhaseLabel::classify(
            self.scalar("x")?,
            self.scalar("Tr")?,
            self.scalar("Pr")?,
        ))
    }
}

/// Stream conditions a backend flashed at, plus the critical point used for
/// reduced properties. All SI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamConditions {
    pub t: f64,
    pub p: f64,
    pub tc: f64,
    pub pc: f64,
    /// Vapour mass fraction
    pub quality: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_map::StateValue;
    use crate::units::UnitKind;

    fn conditions() -> StreamConditions {
        StreamConditions {
            t: 350.0,
            p: 101_325.0,
            tc: 132.5,
            pc: 3.786e6,
            quality: 1.0,
        }
    }

    fn ideal() -> IdealGasRaw {
        IdealGasRaw {
            v: 0.99,
            h: 52_000.0,
            s: 160.0,
            cp: 1006.0,
            cv: 719.0,
        }
    }

    #[test]
    fn ideal_block_is_derived() {
        let g = GlobalState::compute(
            ThermoVariant::Base,
            &conditions(),
            Some(&ideal()),
            &StateMap::new(),
        )
        .unwrap();
        let u0 = 52_000.0 - 101_325.0 * 0.99;
        assert_eq!(g.scalar("u0").unwrap(), u0);
        assert_eq!(g.scalar("a0").unwrap(), u0 - 350.0 * 160.0);
        assert_eq!(g.scalar("g0").unwrap(), 52_000.0 - 350.0 * 160.0);
        assert_eq!(g.scalar("gamma0").unwrap(), 1006.0 / 719.0);
        assert_eq!(g.scalar("rho0").unwrap(), 1.0 / 0.99);
        assert_eq!(g.phase_label().unwrap(), PhaseLabel::Supercritical);
        assert_eq!(g.len(), 16);
    }

    #[test]
    fn set_validates_against_catalog() {
        let mut g = GlobalState::new(ThermoVariant::Base);
        assert!(matches!(
            g.set_si("invT", 1.0),
            Err(ThermoError::UnknownProperty { .. })
        ));
        assert!(matches!(g.set_si("h", 1.0), Err(ThermoError::UnknownProperty { .. })));
        let wrong = PropertyValue::Scalar(Quantity::new(UnitKind::Pressure, 300.0));
        assert!(matches!(
            g.set("T", wrong),
            Err(ThermoError::UnitMismatch { key: "T", .. })
        ));
        assert_eq!(g.get("Hvap").unwrap(), None);
    }

    #[test]
    fn per_component_globals_convert_element_wise() {
        let mut extra = StateMap::new();
        extra.insert("K".into(), StateValue::List(vec![1.5, 0.3]));
        extra.insert("chempot".into(), StateValue::List(vec![-1.0e5, -2.0e5]));
        extra.insert("invT".into(), StateValue::Number(-1.0 / 350.0));
        let g = GlobalState::compute(ThermoVariant::RefProp, &conditions(), None, &extra).unwrap();

        let mut map = StateMap::new();
        g.write(&mut map);
        let back = GlobalState::read(ThermoVariant::RefProp, &map).unwrap();
        assert_eq!(back, g);
        let chempot = back.get("chempot").unwrap().unwrap().list().unwrap();
        assert_eq!(chempot[1].kind(), UnitKind::Enthalpy);

        map.insert("K".into(), StateValue::Number(1.0));
        assert!(matches!(
            GlobalState::read(ThermoVariant::RefProp, &map),
            Err(ThermoError::ShapeMismatch { key: "K" })
        ));
    }
}
