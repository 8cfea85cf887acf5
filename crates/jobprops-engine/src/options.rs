//! Selector configuration

use serde::{Deserialize, Serialize};

/// Behavior switches for an [`EntitySelector`](crate::EntitySelector)
///
/// None of these change what a path means; they only control diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorOptions {
    /// Emit a trace event for every call skipped because of a sticky error
    pub log_skipped_calls: bool,

    /// Emit a debug event with the full match list after each `locate`
    pub log_matches: bool,
}

impl SelectorOptions {
    /// Default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set skipped-call logging
    #[inline]
    #[must_use]
    pub fn with_log_skipped_calls(mut self, enabled: bool) -> Self {
        self.log_skipped_calls = enabled;
        self
    }

    /// Set match-list logging
    #[inline]
    #[must_use]
    pub fn with_log_matches(mut self, enabled: bool) -> Self {
        self.log_matches = enabled;
        self
    }
}
