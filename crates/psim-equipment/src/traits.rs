//! Core traits for equipment models.

use crate::error::ComponentResult;
use crate::status::Warning;

/// Trait for equipment that validates its inputs and solves to a full result.
///
/// Implementations are deterministic functions of their configuration and
/// input streams. `solve` either returns the complete solution or an error;
/// it never leaves partial results behind.
pub trait Equipment: Send + Sync {
    type Solution;

    /// Equipment name for diagnostics.
    fn name(&self) -> &str;

    /// Validate the inputs.
    ///
    /// Fatal problems are returned as errors; recoverable ones as warnings.
    fn check(&self) -> ComponentResult<Vec<Warning>>;

    fn solve(&self) -> ComponentResult<Self::Solution>;

    /// Literature references of the correlations in use.
    fn references(&self) -> Vec<&'static str> {
        Vec::new()
    }
}
