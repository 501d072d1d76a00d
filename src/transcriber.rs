//! Transcription provider seam.
//!
//! The enhancement pipeline only needs one capability from a transcription
//! provider: turn audio bytes into timestamped words. We keep that behind a
//! trait so the assignment logic and its tests have no dependency on any
//! specific network provider.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::opts::Opts;
use crate::word::Word;

/// Pluggable transcription provider used by [`crate::enhancer::Enhancer`].
///
/// Implementations must return words ordered non-decreasing by start time;
/// the assignment step relies on that ordering for stable, monotonic
/// placement.
pub trait Transcriber {
    /// Transcribe encoded audio into timestamped words.
    ///
    /// The call is blocking and all-or-nothing: it either returns the full
    /// word list or fails the run. There is no retry here; callers that want
    /// retries should wrap the provider.
    fn transcribe(&self, opts: &Opts, audio: &[u8]) -> Result<Vec<Word>>;
}

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "whisper-1";

/// Per-request timeout. Transcribing long audio is slow, so this is generous.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// A [`Transcriber`] backed by an OpenAI-compatible
/// `/v1/audio/transcriptions` endpoint.
///
/// We request `verbose_json` with word-level timestamp granularity and read
/// only the `words` array; segment-level output is ignored.
pub struct OpenAiTranscriber {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiTranscriber {
    /// Create a transcriber against the default OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        // Client construction only fails on TLS backend misconfiguration;
        // fall back to the default client rather than surfacing that here.
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point the transcriber at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a different transcription model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// The subset of the `verbose_json` transcription response we consume.
#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    #[serde(default)]
    words: Vec<Word>,
}

impl Transcriber for OpenAiTranscriber {
    fn transcribe(&self, opts: &Opts, audio: &[u8]) -> Result<Vec<Word>> {
        let url = format!("{}/v1/audio/transcriptions", self.base_url);

        tracing::debug!(
            bytes = audio.len(),
            model = %self.model,
            "requesting word-level transcription"
        );

        let part = Part::bytes(audio.to_vec())
            .file_name("audio.mp3")
            .mime_str("audio/mpeg")
            .map_err(|err| Error::provider("transcription provider", err.to_string()))?;

        let mut form = Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word")
            .part("file", part);
        if let Some(language) = &opts.language {
            form = form.text("language", language.clone());
        }

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::provider(
                "transcription provider",
                format!("HTTP {status}: {}", body.trim()),
            ));
        }

        let parsed: VerboseTranscription = response.json()?;
        tracing::debug!(words = parsed.words.len(), "transcription complete");

        Ok(parsed.words)
    }
}
