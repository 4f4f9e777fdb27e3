//! Aerosol physics shared by the particle-collection correlations.

use serde::{Deserialize, Serialize};

/// Constant of the gas mean-free-path expression.
const MEAN_FREE_PATH_FACTOR: f64 = 0.4987445;

/// Mean free path of gas molecules [m].
///
/// λ = √(π/8)·μ / 0.4987445 / √(ρ·P)
pub fn mean_free_path(viscosity: f64, density: f64, pressure: f64) -> f64 {
    (std::f64::consts::PI / 8.0).sqrt() * viscosity / MEAN_FREE_PATH_FACTOR
        / (density * pressure).sqrt()
}

/// Knudsen number of a particle, Kn = 2λ/dp.
pub fn knudsen(mean_free_path: f64, diameter: f64) -> f64 {
    2.0 * mean_free_path / diameter
}

/// Coefficient set of the Cunningham slip correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CunninghamMethod {
    /// Davies (1945)
    #[default]
    Davies,
    /// Allen & Raabe (1985)
    AllenRaabe,
}

impl CunninghamMethod {
    /// (A1, A2, A3) in C = 1 + Kn·(A1 + A2·exp(−A3/Kn)).
    pub fn coefficients(&self) -> (f64, f64, f64) {
        match self {
            CunninghamMethod::Davies => (1.257, 0.4, 1.1),
            CunninghamMethod::AllenRaabe => (1.142, 0.558, 0.999),
        }
    }

    /// Slip correction factor for a Knudsen number.
    pub fn correction(&self, kn: f64) -> f64 {
        if kn <= 0.0 {
            return 1.0;
        }
        let (a1, a2, a3) = self.coefficients();
        1.0 + kn * (a1 + a2 * (-a3 / kn).exp())
    }

    pub fn reference(&self) -> &'static str {
        match self {
            CunninghamMethod::Davies => {
                "Davies, C.N. (1945) Definitive equations for the fluid resistance of spheres"
            }
            CunninghamMethod::AllenRaabe => {
                "Allen, M.D., Raabe, O.G. (1985) Slip correction measurements of spherical solid aerosol particles"
            }
        }
    }
}
