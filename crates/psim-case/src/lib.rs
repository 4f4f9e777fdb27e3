//! psim-case: case file format, validation and model building.
//!
//! A case names a set of streams and, optionally, a venturi scrubber that
//! connects two of them. Files are YAML or JSON, chosen by extension.

pub mod build;
pub mod schema;
pub mod validate;

pub use build::{build_scrubber, build_stream, build_streams, scrubber_config};
pub use schema::*;
pub use validate::{LATEST_VERSION, ValidationError, validate_case};

use psim_equipment::ComponentError;
use psim_thermo::ThermoError;
use std::path::Path;

pub type CaseResult<T> = Result<T, CaseError>;

#[derive(thiserror::Error, Debug)]
pub enum CaseError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unknown stream: {id}")]
    UnknownStream { id: String },

    #[error("Case has no {what} section")]
    MissingSection { what: &'static str },

    #[error("Unsupported case file extension: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Thermo error: {0}")]
    Thermo(#[from] ThermoError),

    #[error("Equipment error: {0}")]
    Equipment(#[from] ComponentError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn from_yaml_str(content: &str) -> CaseResult<Case> {
    let case: Case = serde_yaml::from_str(content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn from_json_str(content: &str) -> CaseResult<Case> {
    let case: Case = serde_json::from_str(content)?;
    validate_case(&case)?;
    Ok(case)
}

pub fn load_yaml(path: &Path) -> CaseResult<Case> {
    from_yaml_str(&std::fs::read_to_string(path)?)
}

pub fn load_json(path: &Path) -> CaseResult<Case> {
    from_json_str(&std::fs::read_to_string(path)?)
}

/// Load by extension: `.yaml`/`.yml` or `.json`.
pub fn load(path: &Path) -> CaseResult<Case> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    match extension.as_str() {
        "yaml" | "yml" => load_yaml(path),
        "json" => load_json(path),
        _ => Err(CaseError::UnsupportedFormat { extension }),
    }
}

pub fn save_yaml(path: &Path, case: &Case) -> CaseResult<()> {
    validate_case(case)?;
    std::fs::write(path, serde_yaml::to_string(case)?)?;
    Ok(())
}

pub fn save_json(path: &Path, case: &Case) -> CaseResult<()> {
    validate_case(case)?;
    std::fs::write(path, serde_json::to_string_pretty(case)?)?;
    Ok(())
}
