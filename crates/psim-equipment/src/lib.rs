//! psim-equipment: equipment models for gas-solid-liquid processes.
//!
//! Provides:
//! - The `Equipment` trait and the status/warning model shared by equipment
//! - Aerosol physics (mean free path, Cunningham slip correction)
//! - A venturi scrubber with Johnstone and Calvert efficiency correlations,
//!   five pressure-drop correlations, rating and design modes
//!
//! Equipment reads immutable [`psim_thermo::Stream`]s and returns new output
//! streams; inputs are never mutated.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use psim_core::units::{k, kg_m3, kgps, m, pa, um};
//! use psim_equipment::{Equipment, Scrubber, ScrubberConfig};
//! use psim_thermo::{
//!     Component, Composition, IdealGasBackend, IncompressibleBackend, Solid, Stream, StreamSpec,
//! };
//!
//! let dust = Solid::new(kgps(1.0 / 3600.0), kg_m3(2000.0), vec![um(20.0), um(60.0)], vec![0.5, 0.5])
//!     .unwrap();
//! let air = Stream::new(
//!     Arc::new(IdealGasBackend::new()),
//!     StreamSpec { t: k(350.0), p: pa(101_325.0), mass_flow: kgps(0.01), composition: Composition::pure(Component::Air) },
//!     Some(dust),
//! )
//! .unwrap();
//! let water = Stream::new(
//!     Arc::new(IncompressibleBackend::water()),
//!     StreamSpec { t: k(300.0), p: pa(101_325.0), mass_flow: kgps(0.1), composition: Composition::pure(Component::H2O) },
//!     None,
//! )
//! .unwrap();
//!
//! let scrubber = Scrubber::new("venturi", ScrubberConfig::rating(m(0.25)).with_calvert(0.5))
//!     .with_gas(air)
//!     .with_liquid(water);
//! let solution = scrubber.solve().unwrap();
//! println!("Global efficiency: {}", solution.efficiency.global);
//! ```

pub mod common;
pub mod error;
pub mod physics;
pub mod scrubber;
pub mod status;
pub mod traits;

// Re-exports
pub use error::{ComponentError, ComponentResult, MissingInput};
pub use physics::CunninghamMethod;
pub use scrubber::{
    CalculationMode, EfficiencyModel, EfficiencyModelKind, PressureDropModelKind, Scrubber,
    ScrubberConfig, ScrubberReport, ScrubberSolution, SolidBalance,
};
pub use status::{EquipmentStatus, Warning};
pub use traits::Equipment;
