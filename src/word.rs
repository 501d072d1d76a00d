use serde::{Deserialize, Serialize};

/// A single word produced by a transcription provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Word {
    /// Start time in seconds (transcription providers report seconds).
    #[serde(rename = "start")]
    pub start_seconds: f64,
    /// Word text.
    #[serde(rename = "word")]
    pub text: String,
}

impl Word {
    pub fn new(start_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            start_seconds,
            text: text.into(),
        }
    }

    /// Start time in milliseconds, kept as `f64` so sub-millisecond
    /// timestamps compare exactly the way the provider reported them.
    pub fn start_ms(&self) -> f64 {
        self.start_seconds * 1000.0
    }
}
