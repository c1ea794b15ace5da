// In crates/signals/src/types.rs

use core_types::CrossingWindow;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FAST_SPAN: usize = 12;
pub const DEFAULT_SLOW_SPAN: usize = 26;
/// Enough bars for the slow average to settle plus two comparison points.
pub const DEFAULT_MIN_HISTORY: usize = 35;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct MacdSettings {
    #[serde(default = "default_fast_span")]
    pub fast_span: usize,
    #[serde(default = "default_slow_span")]
    pub slow_span: usize,
    #[serde(default = "default_min_history")]
    pub min_history: usize,
    #[serde(default)]
    pub window: CrossingWindow,
}

impl Default for MacdSettings {
    fn default() -> Self {
        Self {
            fast_span: DEFAULT_FAST_SPAN,
            slow_span: DEFAULT_SLOW_SPAN,
            min_history: DEFAULT_MIN_HISTORY,
            window: CrossingWindow::Confirmed,
        }
    }
}

impl MacdSettings {
    pub fn with_window(self, window: CrossingWindow) -> Self {
        Self { window, ..self }
    }
}

fn default_fast_span() -> usize { DEFAULT_FAST_SPAN }
fn default_slow_span() -> usize { DEFAULT_SLOW_SPAN }
fn default_min_history() -> usize { DEFAULT_MIN_HISTORY }
