//! High-level API for running subtitle enhancements.
//!
//! We expose a single, ergonomic entry point (`Enhancer`) that wires up the
//! full pipeline: parse SRT → transcribe audio → assign words to cues →
//! (optional) grammar pass → emit.
//!
//! The intent is:
//! - The two external collaborators (transcription, text improvement) sit
//!   behind traits, so tests and alternative providers plug in without
//!   touching the pipeline.
//! - Callers choose output format and behavior via `Opts`.
//!
//! Each call is sequential and blocking: either every step completes and
//! output is written, or the run fails as a whole. The provider calls are the
//! only points of latency and failure; everything between them is pure.

use std::io::{BufWriter, Read, Write};

use crate::assign::assign;
use crate::cue::Cue;
use crate::cue_encoder::CueEncoder;
use crate::error::{Error, Result};
use crate::improver::{OpenAiImprover, TextImprover};
use crate::json_array_encoder::JsonArrayEncoder;
use crate::opts::Opts;
use crate::output_type::OutputType;
use crate::srt;
use crate::srt_encoder::SrtEncoder;
use crate::transcriber::{OpenAiTranscriber, Transcriber};

/// The main high-level enhancement entry point.
///
/// `Enhancer` owns the two provider handles for the lifetime of the value and
/// reuses them across runs. No other state crosses invocations; every
/// `enhance` call operates on its own cue and word sequences.
///
/// Typical usage:
/// - Construct once (`Enhancer::openai(key)` or `with_providers`).
/// - Call `enhance` many times with different inputs and outputs.
pub struct Enhancer<T = OpenAiTranscriber, P = OpenAiImprover> {
    transcriber: T,
    improver: P,
}

impl Enhancer<OpenAiTranscriber, OpenAiImprover> {
    /// Create an enhancer using the default OpenAI-backed providers, both
    /// authenticated with the same API key.
    pub fn openai(api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        Self::with_providers(
            OpenAiTranscriber::new(api_key.clone()),
            OpenAiImprover::new(api_key),
        )
    }
}

impl<T: Transcriber, P: TextImprover> Enhancer<T, P> {
    /// Create an enhancer using custom providers.
    pub fn with_providers(transcriber: T, improver: P) -> Self {
        Self {
            transcriber,
            improver,
        }
    }

    /// Run the full pipeline and write the enhanced document to `out`.
    ///
    /// We accept generic `Read` inputs rather than filenames so callers can
    /// pass files, stdin, or HTTP bodies.
    ///
    /// Output selection:
    /// - SRT with the grammar pass enabled: the improver's SRT text is
    ///   written verbatim. The provider's contract is to keep timings and
    ///   cue count intact; we do not re-parse or validate its answer.
    /// - SRT with the grammar pass disabled, or JSON: the re-texted cues are
    ///   streamed through the matching encoder.
    pub fn enhance<A, S, W>(&self, audio: A, subtitles: S, out: W, opts: &Opts) -> Result<()>
    where
        A: Read,
        S: Read,
        W: Write,
    {
        let cues = self.retext(audio, subtitles, opts)?;

        // Buffer output for efficiency (especially important for stdout).
        let mut writer = BufWriter::new(out);

        // Select an encoder based on the requested output type.
        // We keep this explicit (no trait objects) to avoid lifetime surprises.
        match opts.output_type {
            OutputType::Srt if opts.enable_grammar_improvement => {
                let improved = self.improver.improve(opts, &cues)?;
                writer.write_all(improved.as_bytes())?;
                if !improved.ends_with('\n') {
                    writer.write_all(b"\n")?;
                }
                writer.flush()?;
                Ok(())
            }
            OutputType::Srt => write_cues(SrtEncoder::new(writer), &cues),
            OutputType::Json => write_cues(JsonArrayEncoder::new(writer), &cues),
        }
    }

    /// Run the pipeline up to and including word assignment, returning the
    /// re-texted cues without the grammar pass.
    ///
    /// Fails with [`Error::EmptyCueSet`] when the subtitle input contains no
    /// cues; there is nowhere to place a word, so callers should surface
    /// "no subtitles to enhance" rather than emit an empty document.
    pub fn retext<A, S>(&self, mut audio: A, subtitles: S, opts: &Opts) -> Result<Vec<Cue>>
    where
        A: Read,
        S: Read,
    {
        let cues = srt::parse(subtitles)?;
        if cues.is_empty() {
            return Err(Error::EmptyCueSet);
        }

        let mut audio_bytes = Vec::new();
        audio.read_to_end(&mut audio_bytes)?;

        let words = self.transcriber.transcribe(opts, &audio_bytes)?;

        tracing::debug!(
            cues = cues.len(),
            words = words.len(),
            "assigning words to cue windows"
        );

        Ok(assign(&cues, &words))
    }

    /// Access the configured transcription provider.
    pub fn transcriber(&self) -> &T {
        &self.transcriber
    }

    /// Access the configured improvement provider.
    pub fn improver(&self) -> &P {
        &self.improver
    }
}

fn write_cues<E: CueEncoder>(mut encoder: E, cues: &[Cue]) -> Result<()> {
    for cue in cues {
        encoder.write_cue(cue)?;
    }
    encoder.close()?;
    Ok(())
}
