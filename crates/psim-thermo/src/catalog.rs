//! Property catalog: the ordered list of thermodynamic properties each state
//! variant exposes.
//!
//! A variant's catalog is the base table plus the extension slices it
//! composes, merged by each entry's ordering key. Base entries use multiples
//! of 100 so extensions can slot between them:
//!
//! - water entries sit between `Prandt` and the ideal-gas block
//! - advanced entries sit between `joule` and `deltat`
//! - RefProp entries are appended after everything else
//!
//! Catalogs are built once per variant and shared read-only.

use crate::units::UnitKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Where a property lives: on the stream as a whole or on each phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Global,
    Phase,
}

/// One number, or one number per component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Scalar,
    PerComponent,
}

/// Catalog entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDef {
    pub order: u32,
    pub name: &'static str,
    pub key: &'static str,
    pub unit: UnitKind,
    pub scope: Scope,
    pub shape: Shape,
}

const fn phase(order: u32, name: &'static str, key: &'static str, unit: UnitKind) -> PropertyDef {
    PropertyDef {
        order,
        name,
        key,
        unit,
        scope: Scope::Phase,
        shape: Shape::Scalar,
    }
}

const fn phase_list(
    order: u32,
    name: &'static str,
    key: &'static str,
    unit: UnitKind,
) -> PropertyDef {
    PropertyDef {
        order,
        name,
        key,
        unit,
        scope: Scope::Phase,
        shape: Shape::PerComponent,
    }
}

const fn global(order: u32, name: &'static str, key: &'static str, unit: UnitKind) -> PropertyDef {
    PropertyDef {
        order,
        name,
        key,
        unit,
        scope: Scope::Global,
        shape: Shape::Scalar,
    }
}

const fn global_list(
    order: u32,
    name: &'static str,
    key: &'static str,
    unit: UnitKind,
) -> PropertyDef {
    PropertyDef {
        order,
        name,
        key,
        unit,
        scope: Scope::Global,
        shape: Shape::PerComponent,
    }
}

use UnitKind as U;

static BASE: [PropertyDef; 54] = [
    global(0, "Temperature", "T", U::Temperature),
    global(100, "Reduced temperature", "Tr", U::Dimensionless),
    global(200, "Pressure", "P", U::Pressure),
    global(300, "Reduced Pressure", "Pr", U::Dimensionless),
    global(400, "Quality", "x", U::Dimensionless),
    phase(500, "Density", "rho", U::Density),
    phase(600, "Molar Density", "rhoM", U::MolarDensity),
    phase(700, "Volume", "v", U::SpecificVolume),
    phase(800, "Enthalpy", "h", U::Enthalpy),
    phase(900, "Molar Enthalpy", "hM", U::MolarEnthalpy),
    phase(1000, "Entropy", "s", U::SpecificHeat),
    phase(1100, "Molar Entropy", "sM", U::MolarSpecificHeat),
    phase(1200, "Internal Energy", "u", U::Enthalpy),
    phase(1300, "Molar Internal Energy", "uM", U::MolarEnthalpy),
    phase(1400, "Helmholtz Free Energy", "a", U::Enthalpy),
    phase(1500, "Molar Helmholtz Free Energy", "aM", U::MolarEnthalpy),
    phase(1600, "Gibbs Free Energy", "g", U::Enthalpy),
    phase(1700, "Molar Gibbs Free Energy", "gM", U::MolarEnthalpy),
    phase(1800, "Specific isochoric heat capacity", "cv", U::SpecificHeat),
    phase(1900, "Molar Specific isochoric heat capacity", "cvM", U::MolarSpecificHeat),
    phase(2000, "Specific isobaric heat capacity", "cp", U::SpecificHeat),
    phase(2100, "Molar Specific isobaric heat capacity", "cpM", U::MolarSpecificHeat),
    phase(2200, "Heat capacities ratio", "cp_cv", U::Dimensionless),
    phase(2300, "Speed sound", "w", U::Speed),
    phase(2400, "Compresibility", "Z", U::Dimensionless),
    phase_list(2500, "Fugacity coefficient", "fi", U::Dimensionless),
    phase_list(2600, "Fugacity", "f", U::Pressure),
    phase(2700, "Isoentropic exponent", "gamma", U::Dimensionless),
    phase(2800, "Volume Expansivity", "alfav", U::InvTemperature),
    phase(2900, "Isothermal compresibility", "kappa", U::InvPressure),
    phase(3000, "Adiabatic compresibility", "kappas", U::InvPressure),
    phase(3100, "Relative pressure coefficient", "alfap", U::InvTemperature),
    phase(3200, "Isothermal stress coefficient", "betap", U::Density),
    phase(3300, "Joule-Thomson coefficient", "joule", U::TemperaturePressure),
    phase(3400, "Isothermal throttling coefficient", "deltat", U::EnthalpyPressure),
    global(3500, "Vaporization heat", "Hvap", U::Enthalpy),
    global(3600, "Vaporization entropy", "Svap", U::SpecificHeat),
    phase(3700, "Viscosity", "mu", U::Viscosity),
    phase(3800, "Thermal conductivity", "k", U::ThermalConductivity),
    phase(3900, "Kinematic viscosity", "nu", U::Diffusivity),
    phase(4000, "Thermal diffusivity", "alfa", U::Diffusivity),
    phase(4100, "Surface tension", "sigma", U::Tension),
    phase(4200, "Prandtl number", "Prandt", U::Dimensionless),
    global(4300, "Ideal gas Specific volume", "v0", U::SpecificVolume),
    global(4400, "Ideal gas Density", "rho0", U::Density),
    global(4500, "Ideal gas Specific enthalpy", "h0", U::Enthalpy),
    global(4600, "Ideal gas Specific internal energy", "u0", U::Enthalpy),
    global(4700, "Ideal gas Specific entropy", "s0", U::SpecificHeat),
    global(4800, "Ideal gas Specific Helmholtz free energy", "a0", U::Enthalpy),
    global(4900, "Ideal gas Specific Gibbs free energy", "g0", U::Enthalpy),
    global(5000, "Ideal gas Specific isobaric heat capacity", "cp0", U::SpecificHeat),
    global(5100, "Ideal gas Specific isochoric heat capacity", "cv0", U::SpecificHeat),
    global(5200, "Ideal gas heat capacities ratio", "cp0_cv", U::Dimensionless),
    global(5300, "Ideal gas Isoentropic exponent", "gamma0", U::Dimensionless),
];

static WATER: [PropertyDef; 2] = [
    phase(4210, "Dielectric constant", "epsilon", U::Dimensionless),
    phase(4220, "Refractive index", "n", U::Dimensionless),
];

static ADVANCED: [PropertyDef; 21] = [
    phase(3301, "Isentropic temperature-pressure", "betas", U::TemperaturePressure),
    phase(3302, "Gruneisen parameter", "Gruneisen", U::Dimensionless),
    phase(3303, "2nd virial coefficient", "virialB", U::SpecificVolume),
    phase(3304, "3er virial coefficient", "virialC", U::SpecificVolumeSquare),
    phase(3305, "(dp/dT)_rho", "dpdT_rho", U::PressureTemperature),
    phase(3306, "(dp/drho)_T", "dpdrho_T", U::PressureDensity),
    phase(3307, "(drho/dT)_P", "drhodT_P", U::DensityTemperature),
    phase(3308, "(drho/dP)_T", "drhodP_T", U::DensityPressure),
    phase(3309, "(dh/dT)_rho", "dhdT_rho", U::SpecificHeat),
    phase(3310, "(dh/dP)_T", "dhdP_T", U::EnthalpyPressure),
    phase(3311, "(dh/dT)_P", "dhdT_P", U::SpecificHeat),
    phase(3312, "(dh/drho)_T", "dhdrho_T", U::EnthalpyDensity),
    phase(3313, "(dh/dP)_rho", "dhdP_rho", U::EnthalpyPressure),
    phase(3314, "Isothermal expansion coefficient", "kt", U::Dimensionless),
    phase(3315, "Isentropic expansion coefficient", "ks", U::Dimensionless),
    phase(3316, "Adiabatic bulk modulus", "Ks", U::Pressure),
    phase(3317, "Isothermal bulk modulus", "Kt", U::Pressure),
    phase(3318, "Internal pressure", "IntP", U::Pressure),
    global(3319, "Negative reciprocal temperature", "invT", U::InvTemperature),
    phase(3320, "Specific heat input", "hInput", U::Enthalpy),
    phase(3321, "Dielectric constant", "epsilon", U::Dimensionless),
];

static REFPROP: [PropertyDef; 30] = [
    global(10_000, "Ideal Pressure", "P0", U::Pressure),
    global(10_100, "Residual Pressure", "P_Pideal", U::Pressure),
    global_list(10_200, "K value", "K", U::Dimensionless),
    global_list(10_300, "Heat Capacity along the saturation line", "csat", U::SpecificHeat),
    global_list(10_400, "dP/dT [sat]", "dpdt_sat", U::PressureTemperature),
    global_list(10_500, "Cv two phases", "cv2p", U::SpecificHeat),
    global(10_600, "Excess volume", "vE", U::SpecificVolume),
    global(10_700, "Excess internal energy", "uE", U::Enthalpy),
    global(10_800, "Excess enthalpy", "hE", U::Enthalpy),
    global(10_900, "Excess entropy", "sE", U::SpecificHeat),
    global(11_000, "Excess Helmholtz energy", "aE", U::Enthalpy),
    global(11_100, "Excess Gibbs energy", "gE", U::Enthalpy),
    global(11_200, "Residual pressure", "pr", U::Pressure),
    global(11_300, "Residual internal energy", "ur", U::Enthalpy),
    global(11_400, "Residual enthalpy", "hr", U::Enthalpy),
    global(11_500, "Residual entropy", "sr", U::SpecificHeat),
    global(11_600, "Residual Helmholtz energy", "ar", U::Enthalpy),
    global(11_700, "Residual Gibbs energy", "gr", U::Enthalpy),
    global(11_800, "Residual isobaric heat capacity", "cpr", U::SpecificHeat),
    global(11_900, "Residual isochoric heat capacity", "cvr", U::SpecificHeat),
    global(12_000, "Supercompressibility factor", "fpv", U::Dimensionless),
    global_list(12_100, "Chemical potential", "chempot", U::Enthalpy),
    phase(12_200, "Fourth virial coefficient", "virialD", U::Dimensionless),
    phase(12_300, "Second acoustic virial coefficient", "virialBa", U::SpecificVolume),
    phase(12_400, "Third acoustic virial coefficient", "virialCa", U::SpecificVolumeSquare),
    phase(12_500, "dC/dT", "dCdt", U::Dimensionless),
    phase(12_600, "d²C/dT²", "dCdt2", U::Dimensionless),
    phase(12_700, "dB/dT", "dBdt", U::Dimensionless),
    global(12_800, "b12", "b12", U::SpecificVolume),
    global(12_900, "Critical flow factor", "cstar", U::Dimensionless),
];

/// A slice of properties contributed by one level of the state hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Base,
    Water,
    Advanced,
    RefProp,
}

impl Layer {
    pub fn properties(&self) -> &'static [PropertyDef] {
        match self {
            Layer::Base => &BASE,
            Layer::Water => &WATER,
            Layer::Advanced => &ADVANCED,
            Layer::RefProp => &REFPROP,
        }
    }
}

/// Thermodynamic state variant, i.e. which property set a backend produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermoVariant {
    Base,
    Water,
    Advanced,
    RefProp,
}

impl ThermoVariant {
    pub const ALL: [ThermoVariant; 4] = [
        ThermoVariant::Base,
        ThermoVariant::Water,
        ThermoVariant::Advanced,
        ThermoVariant::RefProp,
    ];

    /// Layers in composition order, base first.
    pub fn layers(&self) -> &'static [Layer] {
        match self {
            ThermoVariant::Base => &[Layer::Base],
            ThermoVariant::Water => &[Layer::Base, Layer::Water],
            ThermoVariant::Advanced => &[Layer::Base, Layer::Advanced],
            ThermoVariant::RefProp => &[Layer::Base, Layer::Advanced, Layer::RefProp],
        }
    }

    pub fn catalog(&self) -> &'static PropertyCatalog {
        static BASE_CATALOG: OnceLock<PropertyCatalog> = OnceLock::new();
        static WATER_CATALOG: OnceLock<PropertyCatalog> = OnceLock::new();
        static ADVANCED_CATALOG: OnceLock<PropertyCatalog> = OnceLock::new();
        static REFPROP_CATALOG: OnceLock<PropertyCatalog> = OnceLock::new();

        let cell = match self {
            ThermoVariant::Base => &BASE_CATALOG,
            ThermoVariant::Water => &WATER_CATALOG,
            ThermoVariant::Advanced => &ADVANCED_CATALOG,
            ThermoVariant::RefProp => &REFPROP_CATALOG,
        };
        cell.get_or_init(|| PropertyCatalog::build(*self))
    }
}

impl std::str::FromStr for ThermoVariant {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(ThermoVariant::Base),
            "water" => Ok(ThermoVariant::Water),
            "advanced" => Ok(ThermoVariant::Advanced),
            "refprop" => Ok(ThermoVariant::RefProp),
            _ => Err("unknown thermo variant"),
        }
    }
}

impl std::fmt::Display for ThermoVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ThermoVariant::Base => "base",
            ThermoVariant::Water => "water",
            ThermoVariant::Advanced => "advanced",
            ThermoVariant::RefProp => "refprop",
        };
        f.write_str(name)
    }
}

/// Merged, ordered property list of one variant.
#[derive(Debug)]
pub struct PropertyCatalog {
    variant: ThermoVariant,
    entries: Vec<PropertyDef>,
    index: HashMap<&'static str, usize>,
}

impl PropertyCatalog {
    fn build(variant: ThermoVariant) -> Self {
        let mut entries: Vec<PropertyDef> = variant
            .layers()
            .iter()
            .flat_map(|layer| layer.properties().iter().copied())
            .collect();
        entries.sort_by_key(|def| def.order);

        let index: HashMap<&'static str, usize> = entries
            .iter()
            .enumerate()
            .map(|(i, def)| (def.key, i))
            .collect();
        debug_assert_eq!(index.len(), entries.len(), "duplicate catalog key");

        Self {
            variant,
            entries,
            index,
        }
    }

    pub fn variant(&self) -> ThermoVariant {
        self.variant
    }

    pub fn entries(&self) -> &[PropertyDef] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|def| def.name).collect()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.entries.iter().map(|def| def.key).collect()
    }

    pub fn units(&self) -> Vec<UnitKind> {
        self.entries.iter().map(|def| def.unit).collect()
    }

    pub fn unit_map(&self) -> HashMap<&'static str, UnitKind> {
        self.entries.iter().map(|def| (def.key, def.unit)).collect()
    }

    /// Global keys, in catalog order.
    pub fn global_keys(&self) -> Vec<&'static str> {
        self.keys_in(Scope::Global)
    }

    /// Per-phase keys (the complement of the global ones), in catalog order.
    pub fn phase_keys(&self) -> Vec<&'static str> {
        self.keys_in(Scope::Phase)
    }

    pub fn entries_in(&self, scope: Scope) -> impl Iterator<Item = &PropertyDef> + '_ {
        self.entries.iter().filter(move |def| def.scope == scope)
    }

    fn keys_in(&self, scope: Scope) -> Vec<&'static str> {
        self.entries_in(scope).map(|def| def.key).collect()
    }

    pub fn lookup(&self, key: &str) -> Option<&PropertyDef> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_sizes() {
        assert_eq!(ThermoVariant::Base.catalog().len(), 54);
        assert_eq!(ThermoVariant::Water.catalog().len(), 56);
        assert_eq!(ThermoVariant::Advanced.catalog().len(), 75);
        assert_eq!(ThermoVariant::RefProp.catalog().len(), 105);

        assert_eq!(ThermoVariant::Base.catalog().global_keys().len(), 18);
        assert_eq!(ThermoVariant::Water.catalog().global_keys().len(), 18);
        assert_eq!(ThermoVariant::Advanced.catalog().global_keys().len(), 19);
        assert_eq!(ThermoVariant::RefProp.catalog().global_keys().len(), 43);
    }

    #[test]
    fn partition_invariant_for_every_variant() {
        for variant in ThermoVariant::ALL {
            let cat = variant.catalog();
            let keys = cat.keys();
            let unique: HashSet<_> = keys.iter().collect();
            assert_eq!(unique.len(), keys.len(), "{variant}: duplicate key");

            let global = cat.global_keys();
            let phase = cat.phase_keys();
            assert_eq!(global.len() + phase.len(), keys.len());

            // global is an order-preserving sub-list of the full list
            let mut it = keys.iter();
            for g in &global {
                assert!(it.any(|k| k == g), "{variant}: {g} out of order");
            }
            for p in &phase {
                assert!(!global.contains(p));
            }
        }
    }

    #[test]
    fn base_global_keys_in_order() {
        assert_eq!(
            ThermoVariant::Base.catalog().global_keys(),
            vec![
                "T", "Tr", "P", "Pr", "x", "Hvap", "Svap", "v0", "rho0", "h0", "u0", "s0", "a0",
                "g0", "cp0", "cv0", "cp0_cv", "gamma0"
            ]
        );
    }

    #[test]
    fn water_entries_follow_prandtl() {
        let keys = ThermoVariant::Water.catalog().keys();
        let pos = keys.iter().position(|k| *k == "Prandt").unwrap();
        assert_eq!(&keys[pos..pos + 4], &["Prandt", "epsilon", "n", "v0"]);
    }

    #[test]
    fn advanced_entries_between_joule_and_deltat() {
        let keys = ThermoVariant::Advanced.catalog().keys();
        let joule = keys.iter().position(|k| *k == "joule").unwrap();
        let deltat = keys.iter().position(|k| *k == "deltat").unwrap();
        assert_eq!(deltat - joule, 22);
        assert_eq!(keys[joule + 1], "betas");
        assert_eq!(keys[deltat - 1], "epsilon");
    }

    #[test]
    fn refprop_extends_advanced() {
        let adv = ThermoVariant::Advanced.catalog().keys();
        let rp = ThermoVariant::RefProp.catalog().keys();
        assert_eq!(&rp[..adv.len()], adv.as_slice());
        assert_eq!(rp.last(), Some(&"cstar"));
    }

    #[test]
    fn lookup_and_units() {
        let cat = ThermoVariant::RefProp.catalog();
        let def = cat.lookup("chempot").unwrap();
        assert_eq!(def.shape, Shape::PerComponent);
        assert_eq!(def.scope, Scope::Global);
        assert_eq!(cat.unit_map()["pr"], UnitKind::Pressure);
        assert!(cat.lookup("bogus").is_none());
        assert!(!ThermoVariant::Base.catalog().contains("epsilon"));
    }

    #[test]
    fn variant_parse_and_display() {
        for v in ThermoVariant::ALL {
            assert_eq!(v.to_string().parse::<ThermoVariant>().unwrap(), v);
        }
    }
}
