// In crates/signals/src/lib.rs

use core_types::{Classification, Series};

pub mod error;
pub mod macd;
pub mod relative_strength;
pub mod types;

// Re-export public types
pub use core_types::CrossingWindow;
pub use error::{Error, Result};
pub use macd::MacdEngine;
pub use relative_strength::{align, ratio, relative_strength};
pub use types::MacdSettings;

/// The universal interface for a series classifier.
///
/// A classifier is a pure function of its input: the same series always
/// produces the same classification, and an absent series is a normal input.
pub trait Classifier {
    /// The name of the classifier.
    fn name(&self) -> &'static str;

    /// Classifies a series, returning a typed error when it cannot be judged.
    fn evaluate(&self, series: &Series) -> Result<Classification>;

    /// Classifies a possibly absent series. Never fails.
    fn classify(&self, series: Option<&Series>) -> Classification;
}
