//! `recue` — a small, focused subtitle re-texting library.
//!
//! This crate provides:
//! - Word-to-cue assignment: place every transcribed word into exactly one
//!   existing subtitle cue without touching cue timing
//! - SubRip (`.srt`) parsing and serialization
//! - Pluggable provider seams for transcription and grammar improvement,
//!   with OpenAI-backed defaults
//! - Pluggable output encoders (SRT, JSON)
//!
//! The library is designed to be used by both CLI tools and long-running services,
//! with an emphasis on clarity, deterministic assignment, and minimal surprises.

// High-level API (most consumers should start here).
pub mod enhancer;
pub mod opts;

// Core word-to-cue assignment.
pub mod assign;

// Cue and word data structures.
pub mod cue;
pub mod word;

// SubRip parsing and timestamp handling.
pub mod srt;

// Provider seams for the two external collaborators.
pub mod improver;
pub mod transcriber;

// Output selection and encoder interfaces.
pub mod cue_encoder;
pub mod output_type;

// Output encoders that serialize cues into various formats.
pub mod json_array_encoder;
pub mod srt_encoder;

// Logging configuration and control.
#[cfg(feature = "logging")]
pub mod logging;

pub mod error;

pub use error::{Error, Result};
