//! Grammar-improvement provider seam.
//!
//! After words have been assigned, the cue text is raw transcription output:
//! no punctuation repair, no casing fixes. The improvement pass hands the
//! whole SRT document to a text model and takes its answer verbatim. By
//! contract the provider keeps timings and cue count intact; we do not
//! verify that.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::cue::Cue;
use crate::error::{Error, Result};
use crate::opts::Opts;
use crate::srt;

/// Pluggable text-improvement provider used by [`crate::enhancer::Enhancer`].
pub trait TextImprover {
    /// Produce a grammatically improved SRT document for the given cues.
    ///
    /// The return value is finished SRT text, written to output verbatim.
    fn improve(&self, opts: &Opts, cues: &[Cue]) -> Result<String>;
}

const DEFAULT_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "gpt-4";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// The instruction sent with every improvement request. The model answers in
/// the subtitles' own language, so there is no language knob here.
const SYSTEM_PROMPT: &str = "Improve the grammatical quality of these srt subtitles \
without changing any of the timings and answer in the language of the original subtitles:";

/// A [`TextImprover`] backed by an OpenAI-compatible chat-completions
/// endpoint.
pub struct OpenAiImprover {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiImprover {
    /// Create an improver against the default OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
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

    /// Point the improver at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Use a different chat model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl TextImprover for OpenAiImprover {
    fn improve(&self, _opts: &Opts, cues: &[Cue]) -> Result<String> {
        let srt_text = srt::to_string(cues)?;
        let url = format!("{}/v1/chat/completions", self.base_url);

        tracing::debug!(cues = cues.len(), model = %self.model, "requesting grammar pass");

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": srt_text }
            ]
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::provider(
                "improvement provider",
                format!("HTTP {status}: {}", body.trim()),
            ));
        }

        let json: serde_json::Value = response.json()?;
        let improved = json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                Error::provider("improvement provider", "response contained no text")
            })?;

        Ok(improved.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `OpenAiImprover` must stay usable as `dyn TextImprover`.
    #[test]
    fn improver_is_object_safe() {
        let p: Box<dyn TextImprover> = Box::new(OpenAiImprover::new("sk-test"));
        drop(p);
    }

    #[test]
    fn builders_override_endpoint_and_model() {
        let p = OpenAiImprover::new("sk-test")
            .with_base_url("http://localhost:11434")
            .with_model("qwen2.5:3b");
        assert_eq!(p.base_url, "http://localhost:11434");
        assert_eq!(p.model, "qwen2.5:3b");
    }
}
