//! Venturi scrubber: particle capture, pressure drop and stream split.
//!
//! Rating mode computes the efficiencies of a given throat; design mode
//! searches the throat diameter that reaches a target global efficiency
//! and then rates it, so both modes produce the same [`ScrubberSolution`].

pub mod config;
pub mod efficiency;
pub mod pressure_drop;
pub mod throat;

pub use config::{
    CalculationMode, DEFAULT_CALVERT_COEFFICIENT, DEFAULT_VENTURI_CONSTANT, EfficiencyModelKind,
    PressureDropModelKind, ScrubberConfig,
};
pub use efficiency::{EfficiencyModel, EfficiencyResult};
pub use pressure_drop::PressureDropInputs;
pub use throat::{ThroatConditions, VenturiGeometry};

use crate::common::defined;
use crate::error::{ComponentError, ComponentResult, MissingInput};
use crate::status::{EquipmentStatus, Warning};
use crate::traits::Equipment;
use psim_core::error::CoreError;
use psim_core::numeric::bisect;
use psim_core::units::{Length, Pressure, m, pa};
use psim_thermo::{GasSnapshot, LiquidSnapshot, Solid, Stream, StreamOverrides};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Throat diameter search interval of design mode [m].
const DESIGN_DIAMETER_RANGE: (f64, f64) = (1e-3, 10.0);
const DESIGN_MAX_ITER: usize = 200;

/// Venturi scrubber fed by a dusty gas stream and a scrubbing liquid.
#[derive(Debug, Clone)]
pub struct Scrubber {
    name: String,
    config: ScrubberConfig,
    gas: Option<Stream>,
    liquid: Option<Stream>,
}

/// Inlet, not-captured and captured solid flows with their mean diameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolidBalance {
    /// kg/s
    pub inlet_flow: f64,
    /// m
    pub inlet_mean_diameter: f64,
    pub escaped_flow: f64,
    pub escaped_mean_diameter: f64,
    pub captured_flow: f64,
    pub captured_mean_diameter: f64,
}

impl SolidBalance {
    fn new(inlet: &Solid, escaped: &Solid, captured: &Solid) -> Self {
        Self {
            inlet_flow: inlet.mass_flow().value,
            inlet_mean_diameter: inlet.mean_diameter().value,
            escaped_flow: escaped.mass_flow().value,
            escaped_mean_diameter: escaped.mean_diameter().value,
            captured_flow: captured.mass_flow().value,
            captured_mean_diameter: captured.mean_diameter().value,
        }
    }
}

/// Complete result of a scrubber calculation.
#[derive(Debug, Clone)]
pub struct ScrubberSolution {
    pub status: EquipmentStatus,
    pub warnings: Vec<Warning>,
    pub geometry: VenturiGeometry,
    pub throat: ThroatConditions,
    pub efficiency_model: EfficiencyModel,
    pub pressure_drop_model: PressureDropModelKind,
    pub efficiency: EfficiencyResult,
    pub pressure_drop: Pressure,
    pub pressure_in: Pressure,
    pub pressure_out: Pressure,
    pub solids: SolidBalance,
    /// Gas outlet carrying the solids that were not captured
    pub gas_out: Stream,
    /// Liquid outlet carrying the captured solids
    pub liquid_out: Stream,
}

/// Flat, serializable summary of a [`ScrubberSolution`] in SI units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrubberReport {
    pub status: EquipmentStatus,
    pub status_code: u8,
    pub warnings: Vec<String>,
    pub efficiency_model: &'static str,
    pub pressure_drop_model: &'static str,
    pub throat_diameter: f64,
    pub throat_length: Option<f64>,
    pub throat_area: f64,
    pub gas_velocity: f64,
    pub liquid_gas_ratio: f64,
    pub droplet_diameter: f64,
    pub fractional_efficiency: Vec<f64>,
    pub global_efficiency: f64,
    pub pressure_drop: f64,
    pub pressure_in: f64,
    pub pressure_out: f64,
    pub solids: SolidBalance,
    pub references: Vec<&'static str>,
}

impl ScrubberSolution {
    pub fn report(&self) -> ScrubberReport {
        ScrubberReport {
            status: self.status,
            status_code: self.status.code(),
            warnings: self.warnings.iter().map(|w| w.to_string()).collect(),
            efficiency_model: self.efficiency_model.kind().name(),
            pressure_drop_model: self.pressure_drop_model.name(),
            throat_diameter: self.geometry.diameter.value,
            throat_length: self.geometry.length.map(|l| l.value),
            throat_area: self.geometry.area.value,
            gas_velocity: self.throat.gas_velocity.value,
            liquid_gas_ratio: self.throat.liquid_gas_ratio,
            droplet_diameter: self.throat.droplet_diameter.value,
            fractional_efficiency: self.efficiency.fractional.clone(),
            global_efficiency: self.efficiency.global,
            pressure_drop: self.pressure_drop.value,
            pressure_in: self.pressure_in.value,
            pressure_out: self.pressure_out.value,
            solids: self.solids,
            references: vec![
                self.efficiency_model.reference(),
                self.pressure_drop_model.reference(),
            ],
        }
    }
}

/// Inlet data read once per solve.
struct Inlets<'a> {
    gas: &'a Stream,
    liquid: &'a Stream,
    solid: &'a Solid,
    gas_props: GasSnapshot,
    liquid_props: LiquidSnapshot,
}

impl Scrubber {
    pub fn new(name: impl Into<String>, config: ScrubberConfig) -> Self {
        Self {
            name: name.into(),
            config,
            gas: None,
            liquid: None,
        }
    }

    pub fn with_gas(self, gas: Stream) -> Self {
        Self {
            gas: Some(gas),
            ..self
        }
    }

    pub fn with_liquid(self, liquid: Stream) -> Self {
        Self {
            liquid: Some(liquid),
            ..self
        }
    }

    pub fn config(&self) -> &ScrubberConfig {
        &self.config
    }

    pub fn gas(&self) -> Option<&Stream> {
        self.gas.as_ref()
    }

    pub fn liquid(&self) -> Option<&Stream> {
        self.liquid.as_ref()
    }

    /// Status the current inputs would solve to, without solving.
    pub fn status(&self) -> EquipmentStatus {
        match self.check() {
            Ok(warnings) => EquipmentStatus::from_warnings(&warnings),
            Err(_) => EquipmentStatus::Unresolved,
        }
    }

    fn throat_length(&self) -> Option<Length> {
        defined(self.config.throat_length.map(|l| l.value)).map(m)
    }

    fn efficiency_model(&self) -> EfficiencyModel {
        EfficiencyModel::resolve(
            self.config.efficiency_model,
            defined(self.config.k),
            defined(self.config.f),
        )
    }

    fn inlets(&self) -> ComponentResult<Inlets<'_>> {
        let gas = self.gas.as_ref().ok_or(MissingInput::GasStream)?;
        let liquid = self.liquid.as_ref().ok_or(MissingInput::LiquidStream)?;
        let solid = gas.solid().ok_or(ComponentError::InvalidArg {
            what: "gas stream carries no solids",
        })?;
        Ok(Inlets {
            gas,
            liquid,
            solid,
            gas_props: gas.gas_properties()?,
            liquid_props: liquid.liquid_properties()?,
        })
    }

    fn throat_at(
        &self,
        inlets: &Inlets<'_>,
        diameter: Length,
    ) -> ComponentResult<(VenturiGeometry, ThroatConditions)> {
        let geometry = VenturiGeometry::new(diameter, self.throat_length())?;
        let throat = ThroatConditions::new(
            &geometry,
            &inlets.gas_props,
            inlets.gas.pressure(),
            &inlets.liquid_props,
        )?;
        Ok((geometry, throat))
    }

    fn global_efficiency_at(&self, inlets: &Inlets<'_>, diameter: f64) -> ComponentResult<f64> {
        let (_, throat) = self.throat_at(inlets, m(diameter))?;
        let result = efficiency::evaluate(
            &self.efficiency_model(),
            self.config.cunningham,
            &throat,
            inlets.solid,
        )?;
        Ok(result.global)
    }

    fn design_diameter(&self, inlets: &Inlets<'_>, target: f64) -> ComponentResult<Length> {
        search_diameter(|d| self.global_efficiency_at(inlets, d), target)
    }
}

/// Throat diameter reaching `target` global efficiency.
///
/// Efficiency falls as the throat widens, so the search brackets the
/// target between the narrowest and widest admissible throats and
/// bisects on ln(D).
fn search_diameter<F>(mut efficiency_at: F, target: f64) -> ComponentResult<Length>
where
    F: FnMut(f64) -> ComponentResult<f64>,
{
    let (d_lo, d_hi) = DESIGN_DIAMETER_RANGE;
    let eta_narrow = efficiency_at(d_lo)?;
    let eta_wide = efficiency_at(d_hi)?;
    let (min, max) = (eta_narrow.min(eta_wide), eta_narrow.max(eta_wide));
    if !(min..=max).contains(&target) {
        return Err(ComponentError::DesignUnreachable { target, min, max });
    }

    // Errors raised while rating a trial throat keep their own kind.
    let mut failure: Option<ComponentError> = None;
    let mut iteration = 0usize;
    let search = bisect(
        |x| {
            iteration += 1;
            match efficiency_at(x.exp()) {
                Ok(eta) => {
                    debug!(iteration, diameter = x.exp(), eta, "design bisection");
                    Ok(eta - target)
                }
                Err(e) => {
                    let core = CoreError::from(e.clone());
                    failure = Some(e);
                    Err(core)
                }
            }
        },
        d_lo.ln(),
        d_hi.ln(),
        1e-12,
        1e-12,
        DESIGN_MAX_ITER,
        "scrubber throat diameter",
    );
    let ln_d = match (search, failure) {
        (Ok(ln_d), _) => ln_d,
        (Err(_), Some(e)) => return Err(e),
        (Err(e), None) => return Err(e.into()),
    };
    info!(diameter = ln_d.exp(), target, "design throat diameter found");
    Ok(m(ln_d.exp()))
}

impl Equipment for Scrubber {
    type Solution = ScrubberSolution;

    fn name(&self) -> &str {
        &self.name
    }

    fn check(&self) -> ComponentResult<Vec<Warning>> {
        if self.gas.is_none() {
            return Err(MissingInput::GasStream.into());
        }
        if self.liquid.is_none() {
            return Err(MissingInput::LiquidStream.into());
        }
        match self.config.mode {
            CalculationMode::Rating => {
                if defined(self.config.diameter.map(|d| d.value)).is_none() {
                    return Err(MissingInput::Diameter.into());
                }
            }
            CalculationMode::Design => {
                if defined(self.config.target_efficiency).is_none() {
                    return Err(MissingInput::Efficiency.into());
                }
            }
        }

        let mut warnings = Vec::new();
        match self.config.efficiency_model {
            EfficiencyModelKind::Johnstone if defined(self.config.k).is_none() => {
                warnings.push(Warning::VenturiConstant)
            }
            EfficiencyModelKind::Calvert if defined(self.config.f).is_none() => {
                warnings.push(Warning::CalvertCoefficient)
            }
            _ => {}
        }
        if self.config.pressure_drop_model.needs_throat_length() && self.throat_length().is_none()
        {
            warnings.push(Warning::ThroatLength);
        }
        for w in &warnings {
            warn!(scrubber = %self.name, "{w}");
        }
        Ok(warnings)
    }

    fn solve(&self) -> ComponentResult<ScrubberSolution> {
        let warnings = self.check()?;
        let inlets = self.inlets()?;

        let pressure_in = pa(inlets.gas.pressure().value.min(inlets.liquid.pressure().value));
        debug!(
            scrubber = %self.name,
            outlet_estimate = pressure_in.value - self.config.pressure_drop_allowance.value,
            "outlet pressure candidate"
        );

        let diameter = match self.config.mode {
            CalculationMode::Rating => m(defined(self.config.diameter.map(|d| d.value))
                .ok_or(MissingInput::Diameter)?),
            CalculationMode::Design => {
                let target = defined(self.config.target_efficiency).ok_or(MissingInput::Efficiency)?;
                self.design_diameter(&inlets, target)?
            }
        };

        let (geometry, throat) = self.throat_at(&inlets, diameter)?;
        let efficiency_model = self.efficiency_model();
        let efficiency = efficiency::evaluate(
            &efficiency_model,
            self.config.cunningham,
            &throat,
            inlets.solid,
        )?;

        let pressure_drop_model = self.config.pressure_drop_model;
        let pressure_drop = pressure_drop_model
            .pressure_drop(&PressureDropInputs {
                geometry: &geometry,
                throat: &throat,
                liquid_flow: inlets.liquid_props.vol_flow,
            })?
            .unwrap_or(pa(0.0));

        let (escaped, captured) = inlets.solid.separate(&efficiency.fractional)?;
        let solids = SolidBalance::new(inlets.solid, &escaped, &captured);

        let pressure_out = pressure_in - pressure_drop;
        if pressure_out.value <= 0.0 {
            return Err(ComponentError::NonPhysical {
                what: "outlet pressure",
            });
        }

        let gas_out = inlets.gas.clone_with(StreamOverrides {
            p: Some(pressure_out),
            solid: Some(escaped),
            ..StreamOverrides::default()
        })?;
        let liquid_out = inlets.liquid.clone_with(StreamOverrides {
            p: Some(pressure_out),
            solid: Some(captured),
            ..StreamOverrides::default()
        })?;

        let status = EquipmentStatus::from_warnings(&warnings);
        info!(
            scrubber = %self.name,
            %status,
            eta = efficiency.global,
            dp = pressure_drop.value,
            "scrubber solved"
        );

        Ok(ScrubberSolution {
            status,
            warnings,
            geometry,
            throat,
            efficiency_model,
            pressure_drop_model,
            efficiency,
            pressure_drop,
            pressure_in,
            pressure_out,
            solids,
            gas_out,
            liquid_out,
        })
    }

    fn references(&self) -> Vec<&'static str> {
        vec![
            self.efficiency_model().reference(),
            self.config.pressure_drop_model.reference(),
            self.config.cunningham.reference(),
        ]
    }
}
