//! Case validation logic.

use crate::schema::{Case, CompositionDef, ScrubberDef, SolidDef, StreamDef, ValueDef};
use psim_equipment::CalculationMode;
use psim_thermo::{Component, UnitKind, parse_quantity};
use std::collections::HashSet;

/// Newest case file version understood by this crate.
pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

impl ValueDef {
    /// SI value, parsing unit-tagged text.
    pub fn to_si(&self, kind: UnitKind, field: &str) -> Result<f64, ValidationError> {
        match self {
            ValueDef::Number(v) => Ok(*v),
            ValueDef::Text(text) => {
                parse_quantity(text, kind).map_err(|e| ValidationError::InvalidValue {
                    field: field.to_string(),
                    value: text.clone(),
                    reason: e.to_string(),
                })
            }
        }
    }
}

pub fn validate_case(case: &Case) -> Result<(), ValidationError> {
    if case.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    let mut stream_ids = HashSet::new();
    for stream in &case.streams {
        if !stream_ids.insert(stream.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: stream.id.clone(),
                context: "streams".to_string(),
            });
        }
        validate_stream(stream)?;
    }

    if let Some(scrubber) = &case.scrubber {
        validate_scrubber(scrubber, case)?;
    }

    Ok(())
}

fn invalid(field: String, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(value: f64, field: String) -> Result<f64, ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(field, value, "must be positive"))
    }
}

fn optional_positive(value: Option<f64>, field: String) -> Result<(), ValidationError> {
    match value {
        Some(v) if v != 0.0 => positive(v, field).map(|_| ()),
        _ => Ok(()),
    }
}

fn validate_stream(stream: &StreamDef) -> Result<(), ValidationError> {
    let ctx = |field: &str| format!("stream '{}' {}", stream.id, field);

    let t = stream.temperature.to_si(UnitKind::Temperature, &ctx("temperature"))?;
    positive(t, ctx("temperature"))?;
    let p = stream.pressure.to_si(UnitKind::Pressure, &ctx("pressure"))?;
    positive(p, ctx("pressure"))?;
    let m = stream.mass_flow.to_si(UnitKind::MassFlow, &ctx("mass_flow"))?;
    if !m.is_finite() || m < 0.0 {
        return Err(invalid(ctx("mass_flow"), m, "must be non-negative"));
    }

    validate_composition(&stream.composition, &ctx("composition"))?;

    if let Some(solid) = &stream.solid {
        validate_solid(solid, &ctx("solid"))?;
    }
    Ok(())
}

fn validate_composition(comp: &CompositionDef, field: &str) -> Result<(), ValidationError> {
    let fractions: Vec<(&str, f64)> = match comp {
        CompositionDef::Pure { species } => vec![(species.as_str(), 1.0)],
        CompositionDef::MoleFractions { fractions } | CompositionDef::MassFractions { fractions } => {
            fractions.iter().map(|(s, x)| (s.as_str(), *x)).collect()
        }
    };
    if fractions.is_empty() {
        return Err(invalid(field.to_string(), "[]", "empty composition"));
    }
    for (species, x) in fractions {
        if species.parse::<Component>().is_err() {
            return Err(invalid(field.to_string(), species, "unknown species"));
        }
        if !x.is_finite() || x < 0.0 {
            return Err(invalid(field.to_string(), x, "fraction must be non-negative"));
        }
    }
    Ok(())
}

fn validate_solid(solid: &SolidDef, field: &str) -> Result<(), ValidationError> {
    let flow = solid
        .mass_flow
        .to_si(UnitKind::MassFlow, &format!("{field} mass_flow"))?;
    if !flow.is_finite() || flow < 0.0 {
        return Err(invalid(format!("{field} mass_flow"), flow, "must be non-negative"));
    }
    let rho = solid
        .density
        .to_si(UnitKind::Density, &format!("{field} density"))?;
    positive(rho, format!("{field} density"))?;

    if solid.diameters_um.len() != solid.fractions.len() {
        return Err(invalid(
            format!("{field} fractions"),
            solid.fractions.len(),
            "one fraction per diameter is required",
        ));
    }
    if solid.diameters_um.is_empty() {
        return Err(invalid(format!("{field} diameters_um"), "[]", "empty distribution"));
    }
    for d in &solid.diameters_um {
        positive(*d, format!("{field} diameters_um"))?;
    }
    if solid.fractions.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(invalid(
            format!("{field} fractions"),
            format!("{:?}", solid.fractions),
            "fractions must be non-negative",
        ));
    }
    Ok(())
}

fn validate_scrubber(scrubber: &ScrubberDef, case: &Case) -> Result<(), ValidationError> {
    let context = format!("scrubber '{}'", scrubber.id);
    let find = |id: &str, role: &str| {
        case.streams
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ValidationError::MissingReference {
                id: id.to_string(),
                context: format!("{context} {role} stream"),
            })
    };
    let gas = find(&scrubber.gas, "gas")?;
    find(&scrubber.liquid, "liquid")?;

    if gas.solid.is_none() {
        return Err(invalid(
            format!("{context} gas"),
            &scrubber.gas,
            "gas stream carries no solids",
        ));
    }

    // Zero leaves an input unset; the scrubber reports it when solving.
    match scrubber.mode {
        CalculationMode::Rating => {
            optional_positive(scrubber.diameter_m, format!("{context} diameter_m"))?;
        }
        CalculationMode::Design => {
            let eta = scrubber.target_efficiency.unwrap_or(0.0);
            if eta != 0.0 && !(eta > 0.0 && eta < 1.0) {
                return Err(invalid(
                    format!("{context} target_efficiency"),
                    eta,
                    "must lie in (0, 1)",
                ));
            }
        }
    }
    optional_positive(scrubber.throat_length_m, format!("{context} throat_length_m"))?;
    if !scrubber.pressure_drop_allowance_pa.is_finite() || scrubber.pressure_drop_allowance_pa < 0.0
    {
        return Err(invalid(
            format!("{context} pressure_drop_allowance_pa"),
            scrubber.pressure_drop_allowance_pa,
            "must be non-negative",
        ));
    }
    Ok(())
}
