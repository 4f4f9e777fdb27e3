//! Perfect-gas backend.
//!
//! Constant cp per component (mass-weighted for mixtures), Sutherland
//! viscosity with mole-fraction mixing, modified Eucken conductivity and
//! Kay's rule for the pseudo-critical point. Every advanced derivative has a
//! closed form for a perfect gas, so this backend can emit the `Advanced`
//! property set as well as `Base`.

use crate::backend::{EosBackend, EosOutput, validation};
use crate::catalog::ThermoVariant;
use crate::composition::Composition;
use crate::error::{ThermoError, ThermoResult};
use crate::global::{IdealGasRaw, StreamConditions};
use crate::phase::RawPhase;
use crate::state_map::StateMap;
use psim_core::constants::{P_ATM, R_UNIVERSAL, T_REF};
use psim_core::units::{Pressure, Temperature};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdealGasBackend {
    variant: ThermoVariant,
}

impl Default for IdealGasBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl IdealGasBackend {
    pub fn new() -> Self {
        Self {
            variant: ThermoVariant::Base,
        }
    }

    pub fn advanced() -> Self {
        Self {
            variant: ThermoVariant::Advanced,
        }
    }

    pub fn with_variant(variant: ThermoVariant) -> ThermoResult<Self> {
        match variant {
            ThermoVariant::Base | ThermoVariant::Advanced => Ok(Self { variant }),
            _ => Err(ThermoError::NotSupported {
                what: "ideal-gas backend emits base or advanced states only",
            }),
        }
    }
}

/// Mixture constants at a given temperature.
struct Mixture {
    molar_mass: f64,
    cp: f64,
    mu: f64,
    tc: f64,
    pc: f64,
}

impl Mixture {
    fn new(comp: &Composition, t: f64) -> Self {
        let w = comp.mass_fractions();
        let mut mix = Mixture {
            molar_mass: comp.molar_mass(),
            cp: 0.0,
            mu: 0.0,
            tc: 0.0,
            pc: 0.0,
        };
        for ((c, y), wi) in comp.iter().zip(w) {
            mix.cp += wi * c.ideal_cp();
            mix.mu += y * c.sutherland().viscosity(t);
            mix.tc += y * c.critical_temperature();
            mix.pc += y * c.critical_pressure();
        }
        mix
    }
}

impl EosBackend for IdealGasBackend {
    fn name(&self) -> &str {
        "ideal-gas"
    }

    fn variant(&self) -> ThermoVariant {
        self.variant
    }

    fn supports_composition(&self, comp: &Composition) -> bool {
        !comp.is_empty()
    }

    fn flash(&self, t: Temperature, p: Pressure, comp: &Composition) -> ThermoResult<EosOutput> {
        validation::validate_temperature(t)?;
        validation::validate_pressure(p)?;
        let (t, p) = (t.value, p.value);

        let mix = Mixture::new(comp, t);
        validation::validate_positive(mix.molar_mass, "molar mass")?;
        let rs = R_UNIVERSAL / mix.molar_mass;
        let cp = mix.cp;
        let cv = cp - rs;
        validation::validate_positive(cv, "cv must be positive")?;
        let gamma = cp / cv;

        let v = rs * t / p;
        let rho = 1.0 / v;
        let h = cp * (t - T_REF);
        let s = cp * (t / T_REF).ln() - rs * (p / P_ATM).ln();
        let w = (gamma * rs * t).sqrt();
        let k = mix.mu * (cp + 1.25 * rs);
        let y = comp.mole_fractions();
        trace!(t, p, rho, cp, mu = mix.mu, "ideal-gas flash");

        let mut gas = RawPhase {
            molar_mass: mix.molar_mass,
            mole_fractions: y.clone(),
            ..RawPhase::default()
        };
        gas.insert("v", v);
        gas.insert("h", h);
        gas.insert("s", s);
        gas.insert("cv", cv);
        gas.insert("cp", cp);
        gas.insert("w", w);
        gas.insert("Z", 1.0);
        gas.insert("fi", vec![1.0; y.len()]);
        gas.insert("f", y.iter().map(|yi| yi * p).collect::<Vec<_>>());
        gas.insert("gamma", gamma);
        gas.insert("alfav", 1.0 / t);
        gas.insert("kappa", 1.0 / p);
        gas.insert("kappas", 1.0 / (gamma * p));
        gas.insert("alfap", 1.0 / t);
        gas.insert("betap", rho);
        gas.insert("joule", 0.0);
        gas.insert("deltat", 0.0);
        gas.insert("mu", mix.mu);
        gas.insert("k", k);
        gas.insert("sigma", 0.0);

        let mut globals = StateMap::new();
        if self.variant == ThermoVariant::Advanced {
            gas.insert("betas", v / cp);
            gas.insert("Gruneisen", gamma - 1.0);
            gas.insert("virialB", 0.0);
            gas.insert("virialC", 0.0);
            gas.insert("dpdT_rho", p / t);
            gas.insert("dpdrho_T", rs * t);
            gas.insert("drhodT_P", -rho / t);
            gas.insert("drhodP_T", rho / p);
            gas.insert("dhdT_rho", cp);
            gas.insert("dhdP_T", 0.0);
            gas.insert("dhdT_P", cp);
            gas.insert("dhdrho_T", 0.0);
            gas.insert("dhdP_rho", cp / (rho * rs));
            gas.insert("kt", 1.0);
            gas.insert("ks", gamma);
            gas.insert("Ks", gamma * p);
            gas.insert("Kt", p);
            gas.insert("IntP", 0.0);
            gas.insert("hInput", cp * t);
            gas.insert("epsilon", 1.0);
            globals.insert("invT".into(), (-1.0 / t).into());
        }

        Ok(EosOutput {
            variant: self.variant,
            conditions: StreamConditions {
                t,
                p,
                tc: mix.tc,
                pc: mix.pc,
                quality: 1.0,
            },
            ideal: Some(IdealGasRaw { v, h, s, cp, cv }),
            globals,
            liquid: None,
            gas: Some(gas),
        })
    }
}
