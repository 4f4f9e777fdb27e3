//! Turning a validated case into streams and equipment.

use crate::schema::{BackendDef, Case, CompositionDef, ScrubberDef, SolidDef, StreamDef};
use crate::{CaseError, CaseResult};
use psim_core::units::{k, kg_m3, kgps, m, pa, um};
use psim_equipment::{Scrubber, ScrubberConfig};
use psim_thermo::{
    Component, Composition, EosBackend, IdealGasBackend, IncompressibleBackend, Solid, Stream,
    StreamSpec, ThermoError, UnitKind,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

fn backend(def: &BackendDef) -> CaseResult<Arc<dyn EosBackend>> {
    let backend: Arc<dyn EosBackend> = match def {
        BackendDef::IdealGas { advanced: false } => Arc::new(IdealGasBackend::new()),
        BackendDef::IdealGas { advanced: true } => Arc::new(IdealGasBackend::advanced()),
        BackendDef::Incompressible { properties: None } => Arc::new(IncompressibleBackend::water()),
        BackendDef::Incompressible {
            properties: Some(props),
        } => Arc::new(IncompressibleBackend::new(*props)?),
    };
    Ok(backend)
}

fn species(name: &str) -> CaseResult<Component> {
    name.parse::<Component>()
        .map_err(|_| CaseError::from(ThermoError::InvalidArg { what: "unknown species" }))
}

fn pairs(fractions: &[(String, f64)]) -> CaseResult<Vec<(Component, f64)>> {
    fractions
        .iter()
        .map(|(s, x)| Ok((species(s)?, *x)))
        .collect()
}

fn composition(def: &CompositionDef) -> CaseResult<Composition> {
    Ok(match def {
        CompositionDef::Pure { species: s } => Composition::pure(species(s)?),
        CompositionDef::MoleFractions { fractions } => {
            Composition::new_mole_fractions(pairs(fractions)?)?
        }
        CompositionDef::MassFractions { fractions } => {
            Composition::new_mass_fractions(pairs(fractions)?)?
        }
    })
}

fn solid(def: &SolidDef, field: &str) -> CaseResult<Solid> {
    let flow = def.mass_flow.to_si(UnitKind::MassFlow, field)?;
    let rho = def.density.to_si(UnitKind::Density, field)?;
    Ok(Solid::new(
        kgps(flow),
        kg_m3(rho),
        def.diameters_um.iter().map(|d| um(*d)).collect(),
        def.fractions.clone(),
    )?)
}

/// Flash one stream definition.
pub fn build_stream(def: &StreamDef) -> CaseResult<Stream> {
    let field = format!("stream '{}'", def.id);
    let spec = StreamSpec {
        t: k(def.temperature.to_si(UnitKind::Temperature, &field)?),
        p: pa(def.pressure.to_si(UnitKind::Pressure, &field)?),
        mass_flow: kgps(def.mass_flow.to_si(UnitKind::MassFlow, &field)?),
        composition: composition(&def.composition)?,
    };
    let solid = def.solid.as_ref().map(|s| solid(s, &field)).transpose()?;
    let stream = Stream::new(backend(&def.backend)?, spec, solid)?;
    debug!(id = %def.id, backend = stream.backend_name(), "stream built");
    Ok(stream)
}

/// Flash every stream of a case, keyed by id.
pub fn build_streams(case: &Case) -> CaseResult<BTreeMap<String, Stream>> {
    case.streams
        .iter()
        .map(|def| Ok((def.id.clone(), build_stream(def)?)))
        .collect()
}

/// Scrubber configuration of a case block. Zero values stay unset.
pub fn scrubber_config(def: &ScrubberDef) -> ScrubberConfig {
    ScrubberConfig {
        mode: def.mode,
        diameter: def.diameter_m.map(m),
        target_efficiency: def.target_efficiency,
        efficiency_model: def.efficiency_model,
        k: def.k,
        f: def.f,
        pressure_drop_model: def.pressure_drop_model,
        throat_length: def.throat_length_m.map(m),
        pressure_drop_allowance: pa(def.pressure_drop_allowance_pa),
        cunningham: def.cunningham,
    }
}

/// Scrubber of a case wired to its inlet streams.
pub fn build_scrubber(case: &Case, streams: &BTreeMap<String, Stream>) -> CaseResult<Scrubber> {
    let def = case.scrubber.as_ref().ok_or(CaseError::MissingSection {
        what: "scrubber",
    })?;
    let lookup = |id: &str| {
        streams.get(id).cloned().ok_or_else(|| CaseError::UnknownStream {
            id: id.to_string(),
        })
    };
    Ok(Scrubber::new(def.id.clone(), scrubber_config(def))
        .with_gas(lookup(&def.gas)?)
        .with_liquid(lookup(&def.liquid)?))
}
