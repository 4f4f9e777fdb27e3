//! psim-thermo: thermodynamic property sets, backends and streams.
//!
//! Provides:
//! - Component constants and compositions
//! - The property catalog of each state variant (base, water, advanced, refprop)
//! - Typed phase, global and whole-fluid states with serialize/restore
//! - The `EosBackend` trait with ideal-gas and incompressible-liquid backends
//! - Particle-size distributions and material streams
//!
//! # Architecture
//!
//! Backends report raw numbers keyed by catalog key. `FluidState` turns them
//! into unit-tagged values, deriving every property with a closed form, and
//! is the only thing equipment models read. The catalog of a variant is the
//! single source of truth for which keys exist, their units and their scope.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use psim_thermo::{Component, Composition, IdealGasBackend, Stream, StreamSpec};
//! use psim_core::units::{k, kgps, pa};
//!
//! let spec = StreamSpec {
//!     t: k(350.0),
//!     p: pa(101_325.0),
//!     mass_flow: kgps(0.01),
//!     composition: Composition::pure(Component::Air),
//! };
//! let air = Stream::new(Arc::new(IdealGasBackend::new()), spec, None).unwrap();
//! let rho = air.gas().scalar("rho").unwrap();
//! println!("Density: {} kg/m³", rho);
//! ```

pub mod backend;
pub mod catalog;
pub mod component;
pub mod composition;
pub mod error;
pub mod fluid;
pub mod global;
pub mod ideal_gas;
pub mod incompressible;
pub mod phase;
pub mod solid;
pub mod state_map;
pub mod stream;
pub mod units;

pub use backend::{EosBackend, EosOutput};
pub use catalog::{Layer, PropertyCatalog, PropertyDef, Scope, Shape, ThermoVariant};
pub use component::Component;
pub use composition::Composition;
pub use error::{ThermoError, ThermoResult};
pub use fluid::{FluidState, PhaseKind, PhaseRegion, StateVar};
pub use global::{GlobalState, IdealGasRaw, StreamConditions};
pub use ideal_gas::IdealGasBackend;
pub use incompressible::{IncompressibleBackend, LiquidProperties};
pub use phase::{
    PhaseContext, PhaseFlows, PhaseLabel, PhaseState, PhaseStatus, PropertyReading, RawPhase,
};
pub use solid::Solid;
pub use state_map::{FluidStateMap, PropertyValue, StateMap, StateValue};
pub use stream::{GasSnapshot, LiquidSnapshot, Stream, StreamOverrides, StreamSpec};
pub use units::{Quantity, UnitError, UnitKind, parse_quantity};
