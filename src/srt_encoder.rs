use anyhow::Result;
use std::io::Write;

use crate::cue::Cue;
use crate::cue_encoder::CueEncoder;
use crate::srt::format_timestamp;

/// A `CueEncoder` that writes cues in SubRip (`.srt`) format.
///
/// Design:
/// - We stream output directly to a `Write` implementation.
/// - Sequence numbers are generated here, starting at 1, so callers never
///   have to track them (input numbering is discarded at parse time anyway).
pub struct SrtEncoder<W: Write> {
    /// The underlying writer we stream SRT into.
    w: W,

    /// Sequence number of the next cue to be written (SRT counts from 1).
    next_index: u64,

    /// Whether the encoder has been closed.
    closed: bool,
}

impl<W: Write> SrtEncoder<W> {
    /// Create a new SRT encoder that writes to the provided writer.
    pub fn new(w: W) -> Self {
        Self {
            w,
            next_index: 1,
            closed: false,
        }
    }
}

impl<W: Write> CueEncoder for SrtEncoder<W> {
    /// Write a single numbered SRT entry.
    fn write_cue(&mut self, cue: &Cue) -> Result<()> {
        if self.closed {
            anyhow::bail!("cannot write cue: encoder is already closed");
        }

        // SRT timestamps use `HH:MM:SS,mmm`.
        let start = format_timestamp(cue.start_ms);
        let end = format_timestamp(cue.end_ms);

        writeln!(&mut self.w, "{}", self.next_index)?;
        self.next_index += 1;

        // Cue timing line.
        writeln!(&mut self.w, "{start} --> {end}")?;

        // Cue text. (We write it verbatim; if we later want to sanitize/escape,
        // this is where we'd do it.)
        writeln!(&mut self.w, "{}", cue.text)?;

        // Blank line separates entries.
        writeln!(&mut self.w)?;

        // Flush so streaming consumers (stdout, pipes, sockets) see output promptly.
        self.w.flush()?;

        Ok(())
    }

    /// Flush the underlying writer. This is idempotent.
    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        self.w.flush()?;
        self.closed = true;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srt_close_without_cues_emits_nothing() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.close()?;
        assert_eq!(std::str::from_utf8(&out)?, "");
        Ok(())
    }

    #[test]
    fn srt_numbers_entries_and_formats_timestamps() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);

        enc.write_cue(&Cue::new(0, 1235, "hello"))?;
        enc.write_cue(&Cue::new(61_200, 62_000, "world"))?;
        enc.close()?;

        let s = std::str::from_utf8(&out)?;
        assert_eq!(
            s,
            "1\n00:00:00,000 --> 00:00:01,235\nhello\n\n2\n00:01:01,200 --> 00:01:02,000\nworld\n\n"
        );
        Ok(())
    }

    #[test]
    fn srt_output_parses_back_to_the_same_cues() -> anyhow::Result<()> {
        let cues = vec![Cue::new(0, 900, "a b"), Cue::new(1000, 2000, "c")];
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        for cue in &cues {
            enc.write_cue(cue)?;
        }
        enc.close()?;

        assert_eq!(crate::srt::parse_str(std::str::from_utf8(&out)?)?, cues);
        Ok(())
    }

    #[test]
    fn srt_write_after_close_errors() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let mut enc = SrtEncoder::new(&mut out);
        enc.close()?;
        let err = enc.write_cue(&Cue::new(0, 1000, "nope")).unwrap_err();
        assert!(err.to_string().contains("already closed"));
        Ok(())
    }
}
