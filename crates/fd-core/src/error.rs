use thiserror::Error;

pub type FdResult<T> = Result<T, FdError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FdError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Negative value for {what}: {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },
}
