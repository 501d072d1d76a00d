use serde::Serialize;

/// A single subtitle cue: a fixed display window plus its text.
///
/// Timing is integer milliseconds (`start_ms <= end_ms`), matching SubRip's
/// millisecond resolution. Cue sequences are expected to be sorted by
/// `start_ms`; overlapping windows are carried through untouched.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Display start in milliseconds.
    pub start_ms: u64,
    /// Display end in milliseconds.
    pub end_ms: u64,
    /// Cue text. Empty when no words have been assigned yet.
    pub text: String,
}

impl Cue {
    /// Create a cue with the given window and text.
    pub fn new(start_ms: u64, end_ms: u64, text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            text: text.into(),
        }
    }

    /// Create a cue with the given window and no text.
    pub fn empty(start_ms: u64, end_ms: u64) -> Self {
        Self::new(start_ms, end_ms, String::new())
    }
}
