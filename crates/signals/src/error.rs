// In crates/signals/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Insufficient history: {len} observations, {required} required")]
    InsufficientHistory { len: usize, required: usize },

    #[error("Non-finite value at index {index}")]
    NonFinite { index: usize },

    #[error("Series share no timestamps")]
    AlignmentEmpty,

    #[error("Invalid MACD settings: {0}")]
    InvalidSettings(String),

    #[error("Indicator error: {0}")]
    Indicator(String),
}

pub type Result<T> = std::result::Result<T, Error>;
