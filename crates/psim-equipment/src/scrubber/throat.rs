//! Venturi throat geometry and the gas/liquid conditions inside it.

use crate::common::{check_finite, check_positive};
use crate::error::ComponentResult;
use psim_core::units::{
    Area, Density, DensityExt, DynVisc, Length, Pressure, Velocity, VelocityExt, m, m2, mps,
};
use psim_thermo::{GasSnapshot, LiquidSnapshot, ThermoError};
use uom::si::dynamic_viscosity::poise;

/// Throat diameter, optional length and flow area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VenturiGeometry {
    pub diameter: Length,
    pub length: Option<Length>,
    pub area: Area,
}

impl VenturiGeometry {
    pub fn new(diameter: Length, length: Option<Length>) -> ComponentResult<Self> {
        let d = check_positive(diameter.value, "throat diameter")?;
        let area = std::f64::consts::PI / 4.0 * d * d;
        Ok(Self {
            diameter,
            length,
            area: m2(check_positive(area, "throat area")?),
        })
    }
}

/// Gas and liquid state at the throat, shared by every correlation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThroatConditions {
    pub gas_velocity: Velocity,
    /// Liquid to gas volumetric flow ratio
    pub liquid_gas_ratio: f64,
    /// Mean droplet diameter
    pub droplet_diameter: Length,
    pub gas_density: Density,
    pub gas_viscosity: DynVisc,
    pub gas_pressure: Pressure,
    pub liquid_density: Density,
}

impl ThroatConditions {
    pub fn new(
        geometry: &VenturiGeometry,
        gas: &GasSnapshot,
        gas_pressure: Pressure,
        liquid: &LiquidSnapshot,
    ) -> ComponentResult<Self> {
        let q_gas = check_positive(gas.vol_flow.value, "gas volumetric flow")?;
        let q_liquid = check_finite(liquid.vol_flow.value, "liquid volumetric flow")?;
        let vg = mps(check_finite(q_gas / geometry.area.value, "gas velocity")?);
        let r = check_finite(q_liquid / q_gas, "liquid to gas ratio")?;
        let dd = droplet_diameter(vg, liquid, r)?;

        Ok(Self {
            gas_velocity: vg,
            liquid_gas_ratio: r,
            droplet_diameter: dd,
            gas_density: gas.density,
            gas_viscosity: gas.viscosity,
            gas_pressure,
            liquid_density: liquid.density,
        })
    }
}

/// Sauter mean droplet diameter of the atomized liquid (Nukiyama–Tanasawa).
///
/// In CGS units:
/// dd[µm] = 58600/Vg·(σ/ρL)^0.5 + 597·(μL/(σ·ρL)^0.5)^0.45·(1000·R)^1.5
pub fn droplet_diameter(
    gas_velocity: Velocity,
    liquid: &LiquidSnapshot,
    liquid_gas_ratio: f64,
) -> ComponentResult<Length> {
    let vg = check_positive(gas_velocity.cms(), "gas velocity")?;
    let sigma = liquid
        .surface_tension
        .in_unit("dyn/cm")
        .map_err(ThermoError::from)?;
    let sigma = check_positive(sigma, "liquid surface tension")?;
    let rho = check_positive(liquid.density.gcc(), "liquid density")?;
    let mu = check_finite(liquid.viscosity.get::<poise>(), "liquid viscosity")?;
    let r = check_finite(liquid_gas_ratio.max(0.0), "liquid to gas ratio")?;

    let microns = 58600.0 / vg * (sigma / rho).sqrt()
        + 597.0 * (mu / (sigma * rho).sqrt()).powf(0.45) * (1000.0 * r).powf(1.5);
    Ok(m(check_positive(microns, "droplet diameter")? * 1e-6))
}

#[cfg(test)]
mod tests {
    use super::*;
    use psim_core::units::{kg_m3, m3ps, pa_s};
    use psim_thermo::{Quantity, UnitKind};

    fn water(vol_flow: f64) -> LiquidSnapshot {
        LiquidSnapshot {
            density: kg_m3(996.5),
            viscosity: pa_s(8.5e-4),
            surface_tension: Quantity::new(UnitKind::Tension, 0.0717),
            vol_flow: m3ps(vol_flow),
        }
    }

    #[test]
    fn throat_area() {
        let g = VenturiGeometry::new(m(0.25), None).unwrap();
        assert!((g.area.value - 0.049_087_385_212_340_52).abs() < 1e-15);
        assert!(VenturiGeometry::new(m(0.0), None).is_err());
    }

    #[test]
    fn droplet_diameter_without_liquid_loading() {
        // R = 0 leaves the velocity term only: 58600/Vg·(σ/ρL)^0.5
        let dd = droplet_diameter(mps(100.0), &water(0.0), 0.0).unwrap();
        let expected = 58600.0 / 1.0e4 * (71.7_f64 / 0.9965).sqrt() * 1e-6;
        assert!((dd.value / expected - 1.0).abs() < 1e-12);
    }

    #[test]
    fn droplets_shrink_with_velocity() {
        let slow = droplet_diameter(mps(50.0), &water(1e-3), 1e-3).unwrap();
        let fast = droplet_diameter(mps(100.0), &water(1e-3), 1e-3).unwrap();
        assert!(fast.value < slow.value);
        assert!(droplet_diameter(mps(0.0), &water(1e-3), 1e-3).is_err());
    }

    #[test]
    fn conditions_from_snapshots() {
        let g = VenturiGeometry::new(m(0.1), Some(m(0.2))).unwrap();
        let gas = GasSnapshot {
            density: kg_m3(1.2),
            viscosity: pa_s(1.8e-5),
            vol_flow: m3ps(0.5),
        };
        let c = ThroatConditions::new(&g, &gas, psim_core::units::pa(1e5), &water(5e-4)).unwrap();
        assert!((c.liquid_gas_ratio - 1e-3).abs() < 1e-15);
        assert!((c.gas_velocity.value - 0.5 / g.area.value).abs() < 1e-9);

        let stagnant = GasSnapshot {
            vol_flow: m3ps(0.0),
            ..gas
        };
        assert!(ThroatConditions::new(&g, &stagnant, psim_core::units::pa(1e5), &water(5e-4)).is_err());
    }
}
