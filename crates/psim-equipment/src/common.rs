//! Common utilities for equipment calculations.

use crate::error::{ComponentError, ComponentResult};
use psim_core::numeric::ensure_finite;

/// Ensure a value is finite, returning `ComponentError::Domain` if not.
pub fn check_finite(value: f64, what: &'static str) -> ComponentResult<f64> {
    ensure_finite(value, what).map_err(|_| ComponentError::Domain { what })
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ComponentResult<f64> {
    let value = check_finite(value, what)?;
    if value <= 0.0 {
        return Err(ComponentError::Domain { what });
    }
    Ok(value)
}

/// Zero and non-finite numeric inputs count as unset.
pub fn defined(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v != 0.0)
}
