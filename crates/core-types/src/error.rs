// In crates/core-types/src/error.rs

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Series is not in ascending order at index {index}")]
    UnorderedSeries { index: usize },

    #[error("Series contains a duplicate timestamp: {timestamp}")]
    DuplicateTimestamp { timestamp: DateTime<Utc> },

    #[error("Symbol must not be empty")]
    EmptySymbol,
}

pub type Result<T> = std::result::Result<T, Error>;
