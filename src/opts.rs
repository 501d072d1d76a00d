use crate::output_type::OutputType;

/// Options that control how an enhancement run is performed.
///
/// This struct represents *library-level configuration*, not CLI flags directly.
/// The CLI is responsible for mapping user input into this type so that:
/// - the library remains reusable outside of a CLI context
/// - other frontends (APIs, tests, batch jobs) can construct options programmatically
#[derive(Debug, Clone)]
pub struct Opts {
    /// Optional language hint (e.g. `"en"`, `"es"`), forwarded to the
    /// transcription provider.
    ///
    /// When `None`, the provider auto-detects the spoken language. The
    /// grammar pass always answers in the language of the original
    /// subtitles regardless of this hint.
    pub language: Option<String>,

    /// Whether to run the grammar-improvement pass after word assignment.
    ///
    /// When disabled, the re-texted cues are emitted as-is. The pass only
    /// applies to SRT output; the improvement provider returns finished SRT
    /// text, which we do not re-parse.
    pub enable_grammar_improvement: bool,

    /// The desired output format for enhanced cues.
    pub output_type: OutputType,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            language: None,
            enable_grammar_improvement: true,
            output_type: OutputType::Srt,
        }
    }
}
