use thiserror::Error;

/// Errors raised by index construction and closest-pair queries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("point cloud is empty")]
    EmptyInput,

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("no fixed point reached within {iterations} iterations")]
    NonConvergence { iterations: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
