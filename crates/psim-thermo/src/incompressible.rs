//! Incompressible-liquid backend with constant properties.
//!
//! Emits the `Water` property set when dielectric constant and refractive
//! index are both supplied, the `Base` set otherwise.

use crate::backend::{EosBackend, EosOutput, validation};
use crate::catalog::ThermoVariant;
use crate::composition::Composition;
use crate::error::ThermoResult;
use crate::global::StreamConditions;
use crate::phase::RawPhase;
use crate::state_map::StateMap;
use psim_core::constants::{P_ATM, T_REF};
use psim_core::units::{Pressure, Temperature};
use serde::{Deserialize, Serialize};

/// Constant liquid properties. All SI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiquidProperties {
    /// kg/m³
    pub density: f64,
    /// J/(kg·K)
    pub cp: f64,
    /// Pa·s
    pub viscosity: f64,
    /// W/(m·K)
    pub conductivity: f64,
    /// N/m
    pub surface_tension: f64,
    /// m/s
    pub speed_of_sound: f64,
    #[serde(default)]
    pub dielectric_constant: Option<f64>,
    #[serde(default)]
    pub refractive_index: Option<f64>,
}

impl LiquidProperties {
    /// Liquid water near 300 K.
    pub fn water() -> Self {
        Self {
            density: 996.5,
            cp: 4180.0,
            viscosity: 8.5e-4,
            conductivity: 0.61,
            surface_tension: 0.0717,
            speed_of_sound: 1500.0,
            dielectric_constant: Some(77.7),
            refractive_index: Some(1.333),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncompressibleBackend {
    props: LiquidProperties,
}

impl IncompressibleBackend {
    pub fn new(props: LiquidProperties) -> ThermoResult<Self> {
        validation::validate_positive(props.density, "liquid density")?;
        validation::validate_positive(props.cp, "liquid cp")?;
        validation::validate_positive(props.viscosity, "liquid viscosity")?;
        validation::validate_positive(props.conductivity, "liquid conductivity")?;
        validation::validate_positive(props.surface_tension, "liquid surface tension")?;
        validation::validate_positive(props.speed_of_sound, "liquid speed of sound")?;
        Ok(Self { props })
    }

    pub fn water() -> Self {
        Self {
            props: LiquidProperties::water(),
        }
    }

    pub fn properties(&self) -> &LiquidProperties {
        &self.props
    }
}

impl EosBackend for IncompressibleBackend {
    fn name(&self) -> &str {
        "incompressible"
    }

    fn variant(&self) -> ThermoVariant {
        match (self.props.dielectric_constant, self.props.refractive_index) {
            (Some(_), Some(_)) => ThermoVariant::Water,
            _ => ThermoVariant::Base,
        }
    }

    fn supports_composition(&self, comp: &Composition) -> bool {
        !comp.is_empty()
    }

    fn flash(&self, t: Temperature, p: Pressure, comp: &Composition) -> ThermoResult<EosOutput> {
        validation::validate_temperature(t)?;
        validation::validate_pressure(p)?;
        let (t, p) = (t.value, p.value);
        let lp = &self.props;

        let v = 1.0 / lp.density;
        let h = lp.cp * (t - T_REF) + v * (p - P_ATM);
        let s = lp.cp * (t / T_REF).ln();
        let y = comp.mole_fractions();

        let mut liquid = RawPhase {
            molar_mass: comp.molar_mass(),
            mole_fractions: y.clone(),
            ..RawPhase::default()
        };
        liquid.insert("v", v);
        liquid.insert("h", h);
        liquid.insert("s", s);
        liquid.insert("cv", lp.cp);
        liquid.insert("cp", lp.cp);
        liquid.insert("w", lp.speed_of_sound);
        liquid.insert("fi", vec![1.0; y.len()]);
        liquid.insert("f", y.iter().map(|yi| yi * p).collect::<Vec<_>>());
        liquid.insert("gamma", 1.0);
        liquid.insert("alfav", 0.0);
        liquid.insert("kappa", 0.0);
        liquid.insert("kappas", 0.0);
        liquid.insert("alfap", 0.0);
        liquid.insert("betap", 0.0);
        liquid.insert("joule", -v / lp.cp);
        liquid.insert("deltat", v);
        liquid.insert("mu", lp.viscosity);
        liquid.insert("k", lp.conductivity);
        liquid.insert("sigma", lp.surface_tension);

        let variant = self.variant();
        if let (ThermoVariant::Water, Some(eps), Some(n)) =
            (variant, lp.dielectric_constant, lp.refractive_index)
        {
            liquid.insert("epsilon", eps);
            liquid.insert("n", n);
        }

        let (mut tc, mut pc) = (0.0, 0.0);
        for (c, yi) in comp.iter() {
            tc += yi * c.critical_temperature();
            pc += yi * c.critical_pressure();
        }

        Ok(EosOutput {
            variant,
            conditions: StreamConditions {
                t,
                p,
                tc,
                pc,
                quality: 0.0,
            },
            ideal: None,
            globals: StateMap::new(),
            liquid: Some(liquid),
            gas: None,
        })
    }
}
