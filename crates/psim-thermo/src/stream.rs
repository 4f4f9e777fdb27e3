//! Material streams: conditions, composition, flashed state and solids.

use crate::backend::EosBackend;
use crate::composition::Composition;
use crate::error::{ThermoError, ThermoResult};
use crate::fluid::FluidState;
use crate::phase::PhaseState;
use crate::solid::Solid;
use crate::units::Quantity;
use psim_core::units::{
    Density, DynVisc, MassRate, Pressure, Temperature, VolumeRate, kg_m3, m3ps, pa_s,
};
use std::fmt;
use std::sync::Arc;

/// Inputs that define a stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSpec {
    pub t: Temperature,
    pub p: Pressure,
    pub mass_flow: MassRate,
    pub composition: Composition,
}

/// Fields a derived stream may change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamOverrides {
    pub t: Option<Temperature>,
    pub p: Option<Pressure>,
    pub solid: Option<Solid>,
}

/// Gas-phase values the scrubber correlations read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasSnapshot {
    pub density: Density,
    pub viscosity: DynVisc,
    pub vol_flow: VolumeRate,
}

/// Liquid-phase values the scrubber correlations read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidSnapshot {
    pub density: Density,
    pub viscosity: DynVisc,
    /// N/m
    pub surface_tension: Quantity,
    pub vol_flow: VolumeRate,
}

/// Immutable material stream.
///
/// Construction flashes the composition through the backend; derived
/// streams come from [`Stream::clone_with`], never from mutation.
#[derive(Clone)]
pub struct Stream {
    backend: Arc<dyn EosBackend>,
    spec: StreamSpec,
    thermo: FluidState,
    solid: Option<Solid>,
}

impl Stream {
    pub fn new(
        backend: Arc<dyn EosBackend>,
        spec: StreamSpec,
        solid: Option<Solid>,
    ) -> ThermoResult<Self> {
        if !spec.mass_flow.value.is_finite() || spec.mass_flow.value < 0.0 {
            return Err(ThermoError::NonPhysical {
                what: "stream mass flow",
            });
        }
        if !backend.supports_composition(&spec.composition) {
            return Err(ThermoError::NotSupported {
                what: "composition not supported by backend",
            });
        }
        let output = backend.flash(spec.t, spec.p, &spec.composition)?;
        let thermo = FluidState::from_output(&output, spec.mass_flow.value, &spec.composition)?;
        Ok(Self {
            backend,
            spec,
            thermo,
            solid,
        })
    }

    /// New stream with the given fields replaced and the state re-flashed.
    pub fn clone_with(&self, overrides: StreamOverrides) -> ThermoResult<Self> {
        let spec = StreamSpec {
            t: overrides.t.unwrap_or(self.spec.t),
            p: overrides.p.unwrap_or(self.spec.p),
            ..self.spec.clone()
        };
        let solid = overrides.solid.or_else(|| self.solid.clone());
        Self::new(Arc::clone(&self.backend), spec, solid)
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn spec(&self) -> &StreamSpec {
        &self.spec
    }

    pub fn temperature(&self) -> Temperature {
        self.spec.t
    }

    pub fn pressure(&self) -> Pressure {
        self.spec.p
    }

    pub fn mass_flow(&self) -> MassRate {
        self.spec.mass_flow
    }

    pub fn composition(&self) -> &Composition {
        &self.spec.composition
    }

    pub fn thermo(&self) -> &FluidState {
        &self.thermo
    }

    pub fn solid(&self) -> Option<&Solid> {
        self.solid.as_ref()
    }

    pub fn gas(&self) -> &PhaseState {
        self.thermo.gas()
    }

    pub fn liquid(&self) -> &PhaseState {
        self.thermo.liquid()
    }

    /// Total volumetric flow over the phases present.
    pub fn vol_flow(&self) -> VolumeRate {
        let total: f64 = [self.liquid(), self.gas()]
            .iter()
            .filter_map(|phase| phase.flows().ok())
            .map(|flows| flows.vol_flow)
            .sum();
        m3ps(total)
    }

    /// Total molar flow [kmol/s] over the phases present.
    pub fn molar_flow(&self) -> f64 {
        [self.liquid(), self.gas()]
            .iter()
            .filter_map(|phase| phase.flows().ok())
            .map(|flows| flows.molar_flow)
            .sum()
    }

    /// Gas-phase properties with the total stream volumetric flow.
    pub fn gas_properties(&self) -> ThermoResult<GasSnapshot> {
        let gas = self.gas();
        Ok(GasSnapshot {
            density: kg_m3(gas.scalar("rho")?),
            viscosity: pa_s(gas.scalar("mu")?),
            vol_flow: self.vol_flow(),
        })
    }

    /// Liquid-phase properties with the total stream volumetric flow.
    pub fn liquid_properties(&self) -> ThermoResult<LiquidSnapshot> {
        let liquid = self.liquid();
        Ok(LiquidSnapshot {
            density: kg_m3(liquid.scalar("rho")?),
            viscosity: pa_s(liquid.scalar("mu")?),
            surface_tension: liquid.quantity("sigma")?,
            vol_flow: self.vol_flow(),
        })
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("backend", &self.backend.name())
            .field("spec", &self.spec)
            .field("thermo", &self.thermo)
            .field("solid", &self.solid)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Component;
    use crate::ideal_gas::IdealGasBackend;
    use crate::incompressible::IncompressibleBackend;
    use psim_core::units::{k, kgps, pa, um};

    fn air() -> Stream {
        Stream::new(
            Arc::new(IdealGasBackend::new()),
            StreamSpec {
                t: k(350.0),
                p: pa(101_325.0),
                mass_flow: kgps(0.01),
                composition: Composition::pure(Component::Air),
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn gas_stream_volumetric_flow() {
        let s = air();
        let gas = s.gas_properties().unwrap();
        let expected = 0.01 / gas.density.value;
        assert!((s.vol_flow().value - expected).abs() < 1e-15);
        assert!(s.liquid_properties().is_err());
        assert!(s.molar_flow() > 0.0);
    }

    #[test]
    fn clone_with_reflashes_and_keeps_receiver() {
        let s = air();
        let solid = Solid::new(kgps(1e-3), kg_m3(2000.0), vec![um(5.0)], vec![1.0]).unwrap();
        let low = s
            .clone_with(StreamOverrides {
                p: Some(pa(90_000.0)),
                solid: Some(solid.clone()),
                ..StreamOverrides::default()
            })
            .unwrap();
        assert_eq!(low.pressure().value, 90_000.0);
        assert_eq!(low.solid(), Some(&solid));
        assert!(low.gas_properties().unwrap().density.value < s.gas_properties().unwrap().density.value);
        assert_eq!(s.pressure().value, 101_325.0);
        assert!(s.solid().is_none());
    }

    /// Ideal gas with 20 % of the mass condensed into a dense liquid.
    struct WetGasBackend;

    impl EosBackend for WetGasBackend {
        fn name(&self) -> &str {
            "wet gas"
        }

        fn variant(&self) -> crate::catalog::ThermoVariant {
            crate::catalog::ThermoVariant::Base
        }

        fn supports_composition(&self, _comp: &Composition) -> bool {
            true
        }

        fn flash(
            &self,
            t: Temperature,
            p: Pressure,
            comp: &Composition,
        ) -> ThermoResult<crate::backend::EosOutput> {
            let mut out = IdealGasBackend::new().flash(t, p, comp)?;
            let mut liquid = out.gas.clone().unwrap_or_default();
            liquid.insert("v", 1.0e-3);
            out.liquid = Some(liquid);
            out.conditions.quality = 0.8;
            Ok(out)
        }
    }

    #[test]
    fn wet_gas_snapshot_uses_total_volumetric_flow() {
        let s = Stream::new(
            Arc::new(WetGasBackend),
            StreamSpec {
                t: k(350.0),
                p: pa(101_325.0),
                mass_flow: kgps(0.01),
                composition: Composition::pure(Component::Air),
            },
            None,
        )
        .unwrap();
        let gas_phase = s.gas().flows().unwrap().vol_flow;
        let liquid_phase = s.liquid().flows().unwrap().vol_flow;
        assert!((liquid_phase - 0.002 * 1.0e-3).abs() < 1e-15);

        let snapshot = s.gas_properties().unwrap();
        assert_eq!(snapshot.vol_flow, s.vol_flow());
        assert!((snapshot.vol_flow.value - (gas_phase + liquid_phase)).abs() < 1e-15);
        assert!(snapshot.vol_flow.value > gas_phase);
    }

    #[test]
    fn liquid_stream_properties() {
        let s = Stream::new(
            Arc::new(IncompressibleBackend::water()),
            StreamSpec {
                t: k(300.0),
                p: pa(101_325.0),
                mass_flow: kgps(0.1),
                composition: Composition::pure(Component::H2O),
            },
            None,
        )
        .unwrap();
        let liq = s.liquid_properties().unwrap();
        assert!((liq.density.value - 996.5).abs() < 1e-9);
        assert!((liq.surface_tension.si() - 0.0717).abs() < 1e-15);
        assert!((liq.vol_flow.value - 0.1 / 996.5).abs() < 1e-15);
    }
}
