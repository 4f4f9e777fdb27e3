use thiserror::Error;

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Domain error: {what}")]
    Domain { what: &'static str },

    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Length mismatch for {what}: {left} vs {right}")]
    LengthMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },

    #[error("Root not bracketed for {what}: f(lo)={f_lo}, f(hi)={f_hi}")]
    NotBracketed {
        what: &'static str,
        f_lo: f64,
        f_hi: f64,
    },

    #[error("No convergence for {what} after {iterations} iterations")]
    NoConvergence {
        what: &'static str,
        iterations: usize,
    },
}
