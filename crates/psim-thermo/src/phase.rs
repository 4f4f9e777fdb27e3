//! Per-phase thermodynamic state.
//!
//! A [`PhaseState`] holds one value per per-phase catalog key of its variant.
//! It starts `Unset`, becomes `Populated` through [`PhaseState::compute`] or
//! [`PhaseState::restore`], or `Unavailable` when the phase does not exist at
//! the stream conditions.

use crate::catalog::{Layer, PropertyCatalog, PropertyDef, Scope, ThermoVariant};
use crate::error::{ThermoError, ThermoResult};
use crate::state_map::{PropertyValue, StateMap, StateValue};
use crate::units::{Quantity, UnitKind};
use psim_core::constants::R_UNIVERSAL;
use std::collections::BTreeMap;
use std::fmt;

/// Keys recomputed from stored ones on every populate; never serialized.
const DERIVED_KEYS: [&str; 9] = ["rho", "rhoM", "hM", "sM", "uM", "aM", "gM", "cvM", "cpM"];

/// Wire name of a catalog key in the state mapping.
fn wire_key(key: &str) -> &str {
    match key {
        "cp_cv" => "cp/cv",
        other => other,
    }
}

const FLOW_KEYS: [&str; 8] = [
    "M",
    "volFlow",
    "massFlow",
    "molarFlow",
    "fraction",
    "massFraction",
    "massUnitFlow",
    "molarUnitFlow",
];

/// Explanation shown in place of the properties of an absent phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhaseLabel {
    Subcooled,
    Superheated,
    CriticPoint,
    Supercritical,
}

impl PhaseLabel {
    /// Label from quality and reduced conditions of the stream.
    pub fn classify(x: f64, tr: f64, pr: f64) -> Self {
        if x == 0.0 {
            PhaseLabel::Subcooled
        } else if tr < 1.0 && pr < 1.0 {
            PhaseLabel::Superheated
        } else if tr == 1.0 && pr == 1.0 {
            PhaseLabel::CriticPoint
        } else {
            PhaseLabel::Supercritical
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseLabel::Subcooled => "Subcooled",
            PhaseLabel::Superheated => "Superheated",
            PhaseLabel::CriticPoint => "Critic point",
            PhaseLabel::Supercritical => "Supercritical",
        }
    }
}

impl fmt::Display for PhaseLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a caller gets back when asking a phase for a property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyReading<'a> {
    Value(&'a PropertyValue),
    Unavailable(PhaseLabel),
}

/// Phase values as returned by a backend: catalog key → SI number or list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPhase {
    /// Phase molar mass [kg/kmol]
    pub molar_mass: f64,
    /// Phase mole fractions, in composition order
    pub mole_fractions: Vec<f64>,
    pub values: StateMap,
}

impl RawPhase {
    pub fn insert(&mut self, key: &str, value: impl Into<StateValue>) {
        self.values.insert(key.to_string(), value.into());
    }
}

/// Conditions a phase is evaluated at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseContext {
    /// Temperature [K]
    pub t: f64,
    /// Pressure [Pa]
    pub p: f64,
}

/// Material flows carried by one phase. All SI.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhaseFlows {
    /// m³/s
    pub vol_flow: f64,
    /// kg/s
    pub mass_flow: f64,
    /// kmol/s
    pub molar_flow: f64,
    pub mole_fractions: Vec<f64>,
    pub mass_fractions: Vec<f64>,
    /// kg/s per component
    pub mass_unit_flows: Vec<f64>,
    /// kmol/s per component
    pub molar_unit_flows: Vec<f64>,
}

impl PhaseFlows {
    /// Split a phase mass flow into per-component flows.
    ///
    /// `component_molar_masses` follow the order of `mole_fractions`.
    pub fn new(
        mass_flow: f64,
        specific_volume: f64,
        mole_fractions: &[f64],
        component_molar_masses: &[f64],
    ) -> ThermoResult<Self> {
        if mole_fractions.len() != component_molar_masses.len() {
            return Err(ThermoError::InvalidArg {
                what: "phase mole fractions do not match the composition",
            });
        }
        let molar_mass: f64 = mole_fractions
            .iter()
            .zip(component_molar_masses)
            .map(|(y, m)| y * m)
            .sum();
        if molar_mass <= 0.0 || !molar_mass.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "phase molar mass",
            });
        }

        let molar_flow = mass_flow / molar_mass;
        let mass_fractions: Vec<f64> = mole_fractions
            .iter()
            .zip(component_molar_masses)
            .map(|(y, m)| y * m / molar_mass)
            .collect();

        Ok(Self {
            vol_flow: mass_flow * specific_volume,
            mass_flow,
            molar_flow,
            mole_fractions: mole_fractions.to_vec(),
            mass_unit_flows: mass_fractions.iter().map(|w| w * mass_flow).collect(),
            molar_unit_flows: mole_fractions.iter().map(|y| y * molar_flow).collect(),
            mass_fractions,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Populated {
    molar_mass: f64,
    values: BTreeMap<&'static str, PropertyValue>,
    flows: PhaseFlows,
}

#[derive(Debug, Clone, PartialEq)]
enum Contents {
    Unset,
    Populated(Box<Populated>),
    Unavailable(PhaseLabel),
}

/// Lifecycle status of a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    Unset,
    Populated,
    Unavailable(PhaseLabel),
}

/// Thermodynamic state of one phase of a stream.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseState {
    variant: ThermoVariant,
    contents: Contents,
}

impl PhaseState {
    pub fn new(variant: ThermoVariant) -> Self {
        Self {
            variant,
            contents: Contents::Unset,
        }
    }

    pub fn unavailable(variant: ThermoVariant, label: PhaseLabel) -> Self {
        Self {
            variant,
            contents: Contents::Unavailable(label),
        }
    }

    /// Populate every per-phase property from backend output.
    ///
    /// Density and the molar block are always derived. Internal energy, free
    /// energies, heat-capacity ratio, transport groups and compressibility are
    /// derived only when the backend leaves them out. Any other missing key is
    /// an error.
    pub fn compute(
        variant: ThermoVariant,
        raw: &RawPhase,
        ctx: PhaseContext,
        flows: PhaseFlows,
    ) -> ThermoResult<Self> {
        let catalog = variant.catalog();
        let m = raw.molar_mass;
        if m <= 0.0 || !m.is_finite() {
            return Err(ThermoError::NonPhysical {
                what: "phase molar mass",
            });
        }

        let mut values = BTreeMap::new();
        for (key, value) in &raw.values {
            let def = catalog
                .lookup(key)
                .filter(|def| def.scope == Scope::Phase)
                .ok_or_else(|| ThermoError::UnknownProperty { key: key.clone() })?;
            if DERIVED_KEYS.contains(&def.key) {
                continue;
            }
            values.insert(def.key, PropertyValue::from_state_value(def, value)?);
        }

        let mut d = Deriver {
            catalog,
            values: &mut values,
        };
        let (t, p) = (ctx.t, ctx.p);
        let v = d.get("v")?;
        let h = d.get("h")?;
        let s = d.get("s")?;
        let cp = d.get("cp")?;
        let cv = d.get("cv")?;
        let mu = d.get("mu")?;
        let k = d.get("k")?;
        let rho = 1.0 / v;

        let u = d.or_derive("u", || h - p * v)?;
        d.or_derive("a", || u - t * s)?;
        d.or_derive("g", || h - t * s)?;
        d.or_derive("cp_cv", || cp / cv)?;
        d.or_derive("gamma", || cp / cv)?;
        d.or_derive("nu", || mu / rho)?;
        d.or_derive("alfa", || k / (rho * cp))?;
        d.or_derive("Prandt", || cp * mu / k)?;
        d.or_derive("Z", || p * v * m / (R_UNIVERSAL * t))?;

        derive_density_and_molar(catalog, &mut values, m)?;

        for def in catalog.entries_in(Scope::Phase) {
            if !values.contains_key(def.key) {
                return Err(ThermoError::MissingProperty { key: def.key });
            }
        }

        Ok(Self {
            variant,
            contents: Contents::Populated(Box::new(Populated {
                molar_mass: m,
                values,
                flows,
            })),
        })
    }

    /// Mark the phase absent; every accessor then reports `label`.
    pub fn fill_unavailable(&mut self, label: PhaseLabel) {
        self.contents = Contents::Unavailable(label);
    }

    pub fn variant(&self) -> ThermoVariant {
        self.variant
    }

    pub fn status(&self) -> PhaseStatus {
        match &self.contents {
            Contents::Unset => PhaseStatus::Unset,
            Contents::Populated(_) => PhaseStatus::Populated,
            Contents::Unavailable(label) => PhaseStatus::Unavailable(*label),
        }
    }

    pub fn is_populated(&self) -> bool {
        matches!(self.contents, Contents::Populated(_))
    }

    fn populated(&self) -> ThermoResult<&Populated> {
        match &self.contents {
            Contents::Populated(p) => Ok(p),
            Contents::Unset => Err(ThermoError::NotPopulated),
            Contents::Unavailable(label) => Err(ThermoError::PhaseUnavailable { label: *label }),
        }
    }

    /// Read a per-phase property.
    pub fn get(&self, key: &str) -> ThermoResult<PropertyReading<'_>> {
        let known = self
            .variant
            .catalog()
            .lookup(key)
            .is_some_and(|def| def.scope == Scope::Phase);
        if !known {
            return Err(ThermoError::UnknownProperty {
                key: key.to_string(),
            });
        }
        match &self.contents {
            Contents::Unset => Err(ThermoError::NotPopulated),
            Contents::Unavailable(label) => Ok(PropertyReading::Unavailable(*label)),
            Contents::Populated(p) => p
                .values
                .get(key)
                .map(PropertyReading::Value)
                .ok_or_else(|| ThermoError::UnknownProperty {
                    key: key.to_string(),
                }),
        }
    }

    /// Scalar property in SI; fails on absent phases.
    pub fn scalar(&self, key: &str) -> ThermoResult<f64> {
        self.quantity(key).map(|q| q.si())
    }

    pub fn quantity(&self, key: &str) -> ThermoResult<Quantity> {
        let populated = self.populated()?;
        match populated.values.get(key) {
            Some(PropertyValue::Scalar(q)) => Ok(*q),
            Some(PropertyValue::List(_)) => Err(ThermoError::InvalidArg {
                what: "per-component property read as scalar",
            }),
            None => Err(ThermoError::UnknownProperty {
                key: key.to_string(),
            }),
        }
    }

    pub fn list(&self, key: &str) -> ThermoResult<&[Quantity]> {
        let populated = self.populated()?;
        match populated.values.get(key) {
            Some(PropertyValue::List(items)) => Ok(items),
            Some(PropertyValue::Scalar(_)) => Err(ThermoError::InvalidArg {
                what: "scalar property read as list",
            }),
            None => Err(ThermoError::UnknownProperty {
                key: key.to_string(),
            }),
        }
    }

    /// Phase molar mass [kg/kmol].
    pub fn molar_mass(&self) -> ThermoResult<f64> {
        Ok(self.populated()?.molar_mass)
    }

    pub fn flows(&self) -> ThermoResult<&PhaseFlows> {
        Ok(&self.populated()?.flows)
    }

    /// Stored properties in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PropertyValue)> + '_ {
        let populated = match &self.contents {
            Contents::Populated(p) => Some(p),
            _ => None,
        };
        self.variant
            .catalog()
            .entries_in(Scope::Phase)
            .filter_map(move |def| {
                populated
                    .and_then(|p| p.values.get(def.key))
                    .map(|value| (def.key, value))
            })
    }

    /// Write the phase into a mapping. Unpopulated phases give an empty map.
    pub fn serialize(&self) -> StateMap {
        let mut map = StateMap::new();
        let Contents::Populated(p) = &self.contents else {
            return map;
        };

        map.insert("M".into(), p.molar_mass.into());
        for layer in self.variant.layers() {
            for def in stored_phase_entries(*layer) {
                if let Some(value) = p.values.get(def.key) {
                    map.insert(wire_key(def.key).to_string(), value.to_state_value());
                }
            }
        }

        let f = &p.flows;
        map.insert("volFlow".into(), f.vol_flow.into());
        map.insert("massFlow".into(), f.mass_flow.into());
        map.insert("molarFlow".into(), f.molar_flow.into());
        map.insert("fraction".into(), f.mole_fractions.clone().into());
        map.insert("massFraction".into(), f.mass_fractions.clone().into());
        map.insert("massUnitFlow".into(), f.mass_unit_flows.clone().into());
        map.insert("molarUnitFlow".into(), f.molar_unit_flows.clone().into());
        map
    }

    /// Rebuild a phase from [`serialize`](Self::serialize) output.
    pub fn restore(variant: ThermoVariant, map: &StateMap) -> ThermoResult<Self> {
        if map.is_empty() {
            return Ok(Self::new(variant));
        }
        let catalog = variant.catalog();

        let mut values = BTreeMap::new();
        let mut consumed = FLOW_KEYS.len();
        for layer in variant.layers() {
            for def in stored_phase_entries(*layer) {
                let value = map
                    .get(wire_key(def.key))
                    .ok_or(ThermoError::MissingProperty { key: def.key })?;
                values.insert(def.key, PropertyValue::from_state_value(def, value)?);
                consumed += 1;
            }
        }
        if map.len() > consumed {
            let stray = map
                .keys()
                .find(|k| {
                    !FLOW_KEYS.contains(&k.as_str())
                        && !catalog
                            .entries_in(Scope::Phase)
                            .any(|def| wire_key(def.key) == k.as_str())
                })
                .cloned()
                .unwrap_or_default();
            return Err(ThermoError::UnknownProperty { key: stray });
        }

        let molar_mass = number(map, "M")?;
        let flows = PhaseFlows {
            vol_flow: number(map, "volFlow")?,
            mass_flow: number(map, "massFlow")?,
            molar_flow: number(map, "molarFlow")?,
            mole_fractions: list(map, "fraction")?,
            mass_fractions: list(map, "massFraction")?,
            mass_unit_flows: list(map, "massUnitFlow")?,
            molar_unit_flows: list(map, "molarUnitFlow")?,
        };

        derive_density_and_molar(catalog, &mut values, molar_mass)?;

        Ok(Self {
            variant,
            contents: Contents::Populated(Box::new(Populated {
                molar_mass,
                values,
                flows,
            })),
        })
    }
}

fn stored_phase_entries(layer: Layer) -> impl Iterator<Item = &'static PropertyDef> {
    layer
        .properties()
        .iter()
        .filter(|def| def.scope == Scope::Phase && !DERIVED_KEYS.contains(&def.key))
}

fn number(map: &StateMap, key: &'static str) -> ThermoResult<f64> {
    match map.get(key) {
        Some(StateValue::Number(v)) => Ok(*v),
        Some(StateValue::List(_)) => Err(ThermoError::ShapeMismatch { key }),
        None => Err(ThermoError::MissingProperty { key }),
    }
}

fn list(map: &StateMap, key: &'static str) -> ThermoResult<Vec<f64>> {
    match map.get(key) {
        Some(StateValue::List(v)) => Ok(v.clone()),
        Some(StateValue::Number(_)) => Err(ThermoError::ShapeMismatch { key }),
        None => Err(ThermoError::MissingProperty { key }),
    }
}

/// ρ = 1/v, ρM = ρ/M and molar quantities = specific quantity × M.
fn derive_density_and_molar(
    catalog: &PropertyCatalog,
    values: &mut BTreeMap<&'static str, PropertyValue>,
    m: f64,
) -> ThermoResult<()> {
    let mut d = Deriver { catalog, values };
    let rho = 1.0 / d.get("v")?;
    d.set("rho", rho)?;
    d.set("rhoM", rho / m)?;
    for (mass_key, molar_key) in [
        ("h", "hM"),
        ("s", "sM"),
        ("u", "uM"),
        ("a", "aM"),
        ("g", "gM"),
        ("cv", "cvM"),
        ("cp", "cpM"),
    ] {
        let value = d.get(mass_key)?;
        d.set(molar_key, value * m)?;
    }
    Ok(())
}

struct Deriver<'a> {
    catalog: &'a PropertyCatalog,
    values: &'a mut BTreeMap<&'static str, PropertyValue>,
}

impl Deriver<'_> {
    fn def_key(&self, key: &str) -> ThermoResult<(&'static str, UnitKind)> {
        self.catalog
            .lookup(key)
            .map(|def| (def.key, def.unit))
            .ok_or_else(|| ThermoError::UnknownProperty {
                key: key.to_string(),
            })
    }

    fn get(&self, key: &str) -> ThermoResult<f64> {
        let (key, _) = self.def_key(key)?;
        match self.values.get(key) {
            Some(PropertyValue::Scalar(q)) => Ok(q.si()),
            Some(PropertyValue::List(_)) => Err(ThermoError::ShapeMismatch { key }),
            None => Err(ThermoError::MissingProperty { key }),
        }
    }

    fn set(&mut self, key: &str, si: f64) -> ThermoResult<()> {
        let (key, unit) = self.def_key(key)?;
        self.values
            .insert(key, PropertyValue::Scalar(Quantity::new(unit, si)));
        Ok(())
    }

    fn or_derive(&mut self, key: &str, f: impl FnOnce() -> f64) -> ThermoResult<f64> {
        match self.get(key) {
            Ok(v) => Ok(v),
            Err(ThermoError::MissingProperty { .. }) => {
                let v = f();
                self.set(key, v)?;
                Ok(v)
            }
            Err(e) => Err(e),
        }
    }
}
