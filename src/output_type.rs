/// The supported output formats for enhanced cues.
///
/// Why this exists:
/// - We want a single, strongly-typed representation of output formats
///   across the CLI and library code.
/// - Using an enum avoids stringly-typed conditionals and keeps format
///   selection explicit and discoverable.
///
/// Integration notes:
/// - With the `cli` feature enabled, `ValueEnum` allows this enum to be used
///   directly as a CLI flag with `clap`.
/// - Each variant maps to a concrete `CueEncoder` implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputType {
    /// Output cues as a SubRip (`.srt`) document.
    Srt,

    /// Output cues as a JSON array.
    Json,
}
