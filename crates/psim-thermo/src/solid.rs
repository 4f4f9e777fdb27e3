//! Particle-size distribution of the solids carried by a stream.

use crate::error::{ThermoError, ThermoResult};
use psim_core::units::{Density, Length, MassRate, kg_m3, kgps, m};
use serde::{Deserialize, Serialize};

/// Solid phase: size bins with mass fractions, total flow and particle density.
///
/// Fractions are normalized on construction. A solid with zero flow keeps its
/// bins with zero fractions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    /// Bin diameters [m]
    diameters: Vec<f64>,
    fractions: Vec<f64>,
    /// kg/s
    mass_flow: f64,
    /// kg/m³
    density: f64,
}

impl Solid {
    pub fn new(
        mass_flow: MassRate,
        density: Density,
        diameters: Vec<Length>,
        fractions: Vec<f64>,
    ) -> ThermoResult<Self> {
        if diameters.len() != fractions.len() {
            return Err(ThermoError::InvalidArg {
                what: "solid diameters and fractions differ in length",
            });
        }
        if diameters.is_empty() {
            return Err(ThermoError::InvalidArg {
                what: "empty particle-size distribution",
            });
        }
        if !density.value.is_finite() || density.value <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "particle density",
            });
        }
        if !mass_flow.value.is_finite() || mass_flow.value < 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "solid mass flow",
            });
        }
        if diameters.iter().any(|d| !d.value.is_finite() || d.value <= 0.0) {
            return Err(ThermoError::NonPhysical {
                what: "particle diameter",
            });
        }
        if fractions.iter().any(|f| !f.is_finite() || *f < 0.0) {
            return Err(ThermoError::NonPhysical {
                what: "particle mass fraction",
            });
        }
        let sum: f64 = fractions.iter().sum();
        if sum <= 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "particle mass fractions sum to zero",
            });
        }

        Ok(Self {
            diameters: diameters.iter().map(|d| d.value).collect(),
            fractions: fractions.iter().map(|f| f / sum).collect(),
            mass_flow: mass_flow.value,
            density: density.value,
        })
    }

    /// Rebuild from per-bin mass flows [kg/s].
    fn from_bin_flows(diameters: &[f64], flows: &[f64], density: f64) -> Self {
        let total: f64 = flows.iter().sum();
        let fractions = if total > 0.0 {
            flows.iter().map(|f| f / total).collect()
        } else {
            vec![0.0; flows.len()]
        };
        Self {
            diameters: diameters.to_vec(),
            fractions,
            mass_flow: total,
            density,
        }
    }

    pub fn len(&self) -> usize {
        self.diameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diameters.is_empty()
    }

    pub fn diameters(&self) -> Vec<Length> {
        self.diameters.iter().map(|d| m(*d)).collect()
    }

    pub fn diameters_si(&self) -> &[f64] {
        &self.diameters
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    pub fn mass_flow(&self) -> MassRate {
        kgps(self.mass_flow)
    }

    pub fn density(&self) -> Density {
        kg_m3(self.density)
    }

    /// Mass flow per bin [kg/s].
    pub fn bin_flows(&self) -> Vec<f64> {
        self.fractions.iter().map(|w| w * self.mass_flow).collect()
    }

    /// Mass-weighted mean diameter Σ wᵢ dᵢ.
    pub fn mean_diameter(&self) -> Length {
        m(self
            .diameters
            .iter()
            .zip(&self.fractions)
            .map(|(d, w)| d * w)
            .sum())
    }

    /// Split by per-bin capture efficiency into `(not_captured, captured)`.
    ///
    /// capturedᵢ = ηᵢ·inputᵢ and not_capturedᵢ = inputᵢ − capturedᵢ.
    pub fn separate(&self, efficiencies: &[f64]) -> ThermoResult<(Solid, Solid)> {
        if efficiencies.len() != self.len() {
            return Err(ThermoError::InvalidArg {
                what: "one efficiency per size bin is required",
            });
        }
        if efficiencies
            .iter()
            .any(|e| !e.is_finite() || !(0.0..=1.0).contains(e))
        {
            return Err(ThermoError::NonPhysical {
                what: "separation efficiency outside [0, 1]",
            });
        }

        let input = self.bin_flows();
        let captured: Vec<f64> = input.iter().zip(efficiencies).map(|(m, e)| m * e).collect();
        let escaped: Vec<f64> = input.iter().zip(&captured).map(|(m, c)| m - c).collect();

        Ok((
            Self::from_bin_flows(&self.diameters, &escaped, self.density),
            Self::from_bin_flows(&self.diameters, &captured, self.density),
        ))
    }
}
