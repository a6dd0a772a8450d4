
pub mod bit;
pub mod branch;
pub mod history;
pub mod logic;
pub mod predictor;
pub mod stats;
pub mod table;
pub mod trace;

pub use bit::*;
pub use branch::*;
pub use history::*;
pub use predictor::*;
pub use table::*;

/// A branch outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome { N, T }
impl Outcome {
    pub fn is_taken(self) -> bool { matches!(self, Self::T) }
}
impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}
impl From<bool> for Outcome {
    fn from(x: bool) -> Self {
        match x {
            true => Self::T,
            false => Self::N
        }
    }
}
impl Into<bool> for Outcome {
    fn into(self) -> bool {
        match self {
            Self::T => true,
            Self::N => false,
        }
    }
}

/// Errors surfaced by registers, banks, tables, and predictors.
///
/// Every failure here is a caller or configuration bug; nothing is
/// transient or retryable.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A bit sequence disagrees with the width a component was built for.
    #[error("bit sequence is {found} bits wide, expected {expected}")]
    SizeMismatch { expected: usize, found: usize },

    /// A table lookup for a key that was never defaulted or written.
    #[error("no entry stored under key {key}")]
    KeyNotFound { key: String },

    /// Inconsistent construction parameters.
    #[error("invalid predictor configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, Error>;
