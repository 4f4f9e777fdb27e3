//! Particle-capture efficiency correlations.
//!
//! Both correlations work from the inertial impaction parameter
//! kp = C·ρp·dp²·Vg / (9·μg·dd) of each particle size.

use super::config::{
    DEFAULT_CALVERT_COEFFICIENT, DEFAULT_VENTURI_CONSTANT, EfficiencyModelKind,
};
use super::throat::ThroatConditions;
use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use crate::physics::{CunninghamMethod, knudsen, mean_free_path};
use psim_core::numeric::weighted_sum;
use psim_thermo::Solid;

/// Below this |kp·f| the Calvert bracket is evaluated by its series.
const CALVERT_SERIES_LIMIT: f64 = 1e-3;

/// Efficiency correlation with its resolved constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EfficiencyModel {
    /// Johnstone (1954): penetration = exp(−k·R·√kp)
    Johnstone { k: f64 },
    /// Calvert (1972) with hydrophobicity coefficient `f`
    Calvert { f: f64 },
}

impl EfficiencyModel {
    /// Build from a model kind, defaulting unset constants.
    pub fn resolve(kind: EfficiencyModelKind, k: Option<f64>, f: Option<f64>) -> Self {
        match kind {
            EfficiencyModelKind::Johnstone => EfficiencyModel::Johnstone {
                k: k.unwrap_or(DEFAULT_VENTURI_CONSTANT),
            },
            EfficiencyModelKind::Calvert => EfficiencyModel::Calvert {
                f: f.unwrap_or(DEFAULT_CALVERT_COEFFICIENT),
            },
        }
    }

    pub fn kind(&self) -> EfficiencyModelKind {
        match self {
            EfficiencyModel::Johnstone { .. } => EfficiencyModelKind::Johnstone,
            EfficiencyModel::Calvert { .. } => EfficiencyModelKind::Calvert,
        }
    }

    pub fn reference(&self) -> &'static str {
        match self {
            EfficiencyModel::Johnstone { .. } => {
                "Johnstone, H.F., Field, R.B., Tassler, M.C. (1954) Gas absorption and aerosol collection in a venturi atomizer"
            }
            EfficiencyModel::Calvert { .. } => {
                "Calvert, S., Goldshmid, J., Leith, D., Mehta, D. (1972) Scrubber handbook"
            }
        }
    }

    /// Fraction of particles with inertial parameter `kp` that escape.
    pub fn penetration(&self, kp: f64, throat: &ThroatConditions) -> ComponentResult<f64> {
        let r = throat.liquid_gas_ratio;
        let pen = match *self {
            EfficiencyModel::Johnstone { k } => {
                if kp < 0.0 {
                    return Err(ComponentError::Domain {
                        what: "negative inertial parameter",
                    });
                }
                (-k * r * kp.sqrt()).exp()
            }
            EfficiencyModel::Calvert { f } => {
                if kp <= 0.0 {
                    return Err(ComponentError::Domain {
                        what: "calvert inertial parameter",
                    });
                }
                let z = kp * f;
                if z + 0.7 <= 0.0 {
                    return Err(ComponentError::Domain {
                        what: "calvert log argument",
                    });
                }
                let b = calvert_bracket(z) / kp;
                let scale = r * throat.gas_velocity.value
                    * throat.liquid_density.value
                    * throat.droplet_diameter.value
                    / 55.0
                    / throat.gas_viscosity.value;
                (scale * b).exp()
            }
        };
        check_finite(pen, "penetration")
    }
}

/// Calvert bracket F(z) = −0.7 − z + 1.4·ln((z + 0.7)/0.7) + 0.49/(0.7 + z).
///
/// F vanishes to third order at z = 0, so small arguments use the series
/// −z³/(3a²)·(1 − 3z/(2a) + 9z²/(5a²) − 2z³/a³) with a = 0.7.
pub fn calvert_bracket(z: f64) -> f64 {
    const A: f64 = 0.7;
    if z.abs() < CALVERT_SERIES_LIMIT {
        let u = z / A;
        -z.powi(3) / (3.0 * A * A) * (1.0 - 1.5 * u + 1.8 * u * u - 2.0 * u.powi(3))
    } else {
        -A - z + 2.0 * A * ((z + A) / A).ln() + A * A / (A + z)
    }
}

/// Inertial impaction parameter of one particle diameter [m].
pub fn inertial_parameter(
    throat: &ThroatConditions,
    cunningham: CunninghamMethod,
    particle_density: f64,
    diameter: f64,
) -> ComponentResult<f64> {
    let dp = check_positive(diameter, "particle diameter")?;
    let mu = check_positive(throat.gas_viscosity.value, "gas viscosity")?;
    let lambda = mean_free_path(mu, throat.gas_density.value, throat.gas_pressure.value);
    let lambda = check_finite(lambda, "mean free path")?;
    let c = cunningham.correction(knudsen(lambda, dp));
    let kp = c * particle_density * dp * dp * throat.gas_velocity.value
        / (9.0 * mu * throat.droplet_diameter.value);
    check_finite(kp, "inertial parameter")
}

/// Per-bin and mass-weighted global efficiencies.
#[derive(Debug, Clone, PartialEq)]
pub struct EfficiencyResult {
    pub fractional: Vec<f64>,
    pub global: f64,
}

/// Evaluate the model over every bin of a particle-size distribution.
pub fn evaluate(
    model: &EfficiencyModel,
    cunningham: CunninghamMethod,
    throat: &ThroatConditions,
    solid: &Solid,
) -> ComponentResult<EfficiencyResult> {
    let rho_p = solid.density().value;
    let fractional = solid
        .diameters_si()
        .iter()
        .map(|dp| {
            let kp = inertial_parameter(throat, cunningham, rho_p, *dp)?;
            let eta = 1.0 - model.penetration(kp, throat)?;
            if !(0.0..=1.0).contains(&eta) {
                return Err(ComponentError::Domain {
                    what: "fractional efficiency outside [0, 1]",
                });
            }
            Ok(eta)
        })
        .collect::<ComponentResult<Vec<f64>>>()?;
    let global = weighted_sum(&fractional, solid.fractions(), "global efficiency")?;
    Ok(EfficiencyResult { fractional, global })
}
