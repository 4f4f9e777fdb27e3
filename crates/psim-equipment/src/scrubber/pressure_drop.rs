//! Venturi pressure-drop correlations.

use super::config::PressureDropModelKind;
use super::throat::{ThroatConditions, VenturiGeometry};
use crate::common::{check_finite, check_positive};
use crate::error::{ComponentError, ComponentResult};
use psim_core::units::{AreaExt, DensityExt, Pressure, VelocityExt, VolumeRate, VolumeRateExt, pa};
use tracing::debug;

/// Everything the five correlations read.
#[derive(Debug, Clone, Copy)]
pub struct PressureDropInputs<'a> {
    pub geometry: &'a VenturiGeometry,
    pub throat: &'a ThroatConditions,
    pub liquid_flow: VolumeRate,
}

impl PressureDropModelKind {
    pub fn reference(&self) -> &'static str {
        match self {
            PressureDropModelKind::Calvert => {
                "Calvert, S. (1968) Source control by liquid scrubbing"
            }
            PressureDropModelKind::Hesketh => {
                "Hesketh, H.E. (1974) Atomization and cloud behavior in venturi scrubbing"
            }
            PressureDropModelKind::Gleason => {
                "Gleason, R.J., Hesketh, H.E. (1971) Pressure drop in venturi scrubbers"
            }
            PressureDropModelKind::Volgin => {
                "Volgin, B.P. et al. (1968) Venturi scrubber pressure drop"
            }
            PressureDropModelKind::Young => {
                "Yung, S.C., Barbarika, H.F., Calvert, S. (1977) Pressure loss in venturi scrubbers"
            }
        }
    }

    /// Pressure drop across the throat.
    ///
    /// Returns `None` when the model needs a throat length and none is set.
    pub fn pressure_drop(&self, inputs: &PressureDropInputs<'_>) -> ComponentResult<Option<Pressure>> {
        let t = inputs.throat;
        let r = t.liquid_gas_ratio;
        let vg = t.gas_velocity.value;
        let vg_cms = t.gas_velocity.cms();

        let lt = if self.needs_throat_length() {
            match inputs.geometry.length {
                Some(l) => check_positive(l.value, "throat length")?,
                None => {
                    debug!(model = self.name(), "throat length unset, pressure drop skipped");
                    return Ok(None);
                }
            }
        } else {
            0.0
        };

        let dp = match self {
            PressureDropModelKind::Calvert => 0.85 * t.liquid_density.value * vg * vg * r,
            PressureDropModelKind::Hesketh => {
                1.36e-4
                    * vg_cms
                    * vg_cms
                    * t.gas_density.gcc()
                    * inputs.geometry.area.cm2().powf(0.133)
                    * (0.56 + 935.0 * r + 1.29e-2 * r * r)
            }
            PressureDropModelKind::Gleason => {
                2.08e-5 * vg_cms * vg_cms * (0.264 * inputs.liquid_flow.ccs() + 73.8)
            }
            PressureDropModelKind::Volgin => 3.32e-6 * vg_cms * vg_cms * r.powf(0.26) * lt.powf(1.43),
            PressureDropModelKind::Young => {
                let dd = check_positive(t.droplet_diameter.value, "droplet diameter")?;
                let rho_g = t.gas_density.value;
                let rho_l = t.liquid_density.value;
                let re = check_positive(dd * vg * rho_g / t.gas_viscosity.value, "droplet Reynolds number")?;
                let cd = 0.22 + 24.0 / re * (1.0 + 0.15 * re.powf(0.6));
                let x = 3.0 * lt * cd * rho_g / (16.0 * dd * rho_l) + 1.0;
                2.0 * rho_l * vg * vg * r * (1.0 - x * x + (x.powi(4) - x * x).sqrt())
            }
        };

        let dp = check_finite(dp, "pressure drop")?;
        if dp < 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "negative pressure drop",
            });
        }
        Ok(Some(pa(dp)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use psim_core::units::{kg_m3, m, m3ps, mps, pa_s};

    fn throat() -> ThroatConditions {
        ThroatConditions {
            gas_velocity: mps(0.20199782052060186),
            liquid_gas_ratio: 0.01012059660299336,
            droplet_diameter: m(0.025468488969714334),
            gas_density: kg_m3(1.0085174514882882),
            gas_viscosity: pa_s(2.0735008364120164e-05),
            gas_pressure: pa(101_325.0),
            liquid_density: kg_m3(996.5),
        }
    }

    fn drop(kind: PressureDropModelKind, length: Option<f64>) -> Option<f64> {
        let geometry = VenturiGeometry::new(m(0.25), length.map(m)).unwrap();
        let t = throat();
        let inputs = PressureDropInputs {
            geometry: &geometry,
            throat: &t,
            liquid_flow: m3ps(0.1 / 996.5),
        };
        kind.pressure_drop(&inputs).unwrap().map(|p| p.value)
    }

    fn close(a: f64, b: f64) -> bool {
        (a / b - 1.0).abs() < 1e-9
    }

    #[test]
    fn correlations_at_reference_point() {
        use PressureDropModelKind::*;
        assert!(close(drop(Calvert, None).unwrap(), 0.34978059373051884));
        assert!(close(drop(Hesketh, None).unwrap(), 0.0012787981043888314));
        assert!(close(drop(Gleason, None).unwrap(), 0.8511892529345501));
        assert!(close(drop(Volgin, Some(0.3)).unwrap(), 7.336153924460739e-05));
        assert!(close(drop(Young, Some(0.3)).unwrap(), 0.04388170678838106));
    }

    #[test]
    fn throat_length_models_skip_without_length() {
        assert_eq!(drop(PressureDropModelKind::Volgin, None), None);
        assert_eq!(drop(PressureDropModelKind::Young, None), None);
        assert!(drop(PressureDropModelKind::Calvert, None).is_some());
    }

    #[test]
    fn throat_length_ignored_by_models_without_it() {
        use PressureDropModelKind::*;
        for kind in [Calvert, Hesketh, Gleason] {
            let stray = drop(kind, Some(-0.3)).unwrap();
            assert!(close(stray, drop(kind, None).unwrap()), "{}", kind.name());
        }
    }

    #[test]
    fn negative_throat_length_is_a_domain_error() {
        let geometry = VenturiGeometry::new(m(0.25), Some(m(-0.3))).unwrap();
        let t = throat();
        let inputs = PressureDropInputs {
            geometry: &geometry,
            throat: &t,
            liquid_flow: m3ps(0.1 / 996.5),
        };
        for kind in [PressureDropModelKind::Volgin, PressureDropModelKind::Young] {
            assert!(matches!(
                kind.pressure_drop(&inputs),
                Err(ComponentError::Domain { .. })
            ));
        }
    }

    #[test]
    fn references_are_named() {
        for kind in PressureDropModelKind::ALL {
            assert!(!kind.reference().is_empty());
        }
    }
}
