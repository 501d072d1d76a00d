//! SubRip (`.srt`) parsing and timestamp handling.
//!
//! The format is line-oriented: a numeric sequence line, a
//! `HH:MM:SS,mmm --> HH:MM:SS,mmm` timing line, one or more text lines, and a
//! blank separator. We ignore the sequence numbers on input (files in the
//! wild renumber badly) and renumber on output; see [`crate::srt_encoder`].

use std::io::Read;

use crate::error::{Error, Result};
use crate::cue::Cue;

/// Parse a SubRip document into cues.
///
/// Tolerates CRLF line endings, a leading UTF-8 BOM, and runs of blank lines
/// between entries. Multi-line cue text is joined with single spaces, since
/// the assignment step rebuilds text word-by-word anyway and the improvement
/// pass treats it as prose.
pub fn parse(mut r: impl Read) -> Result<Vec<Cue>> {
    let mut raw = String::new();
    r.read_to_string(&mut raw)?;
    parse_str(&raw)
}

/// Parse a SubRip document held in memory.
pub fn parse_str(raw: &str) -> Result<Vec<Cue>> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut cues = Vec::new();
    let mut lines = raw.lines().enumerate().peekable();

    while let Some((line_no, line)) = lines.next() {
        let line = line.trim_end_matches('\r').trim();
        if line.is_empty() {
            continue;
        }

        // Sequence number line. Its value is ignored, but a non-numeric line
        // where we expect a new entry means the file has lost its framing.
        if line.parse::<u64>().is_err() {
            return Err(Error::MalformedSrt {
                line: line_no + 1,
                reason: format!("expected a sequence number, found {line:?}"),
            });
        }

        let Some((line_no, timing)) = lines.next() else {
            return Err(Error::MalformedSrt {
                line: line_no + 2,
                reason: "missing timing line after sequence number".to_string(),
            });
        };
        let (start_ms, end_ms) = parse_timing_line(timing.trim_end_matches('\r').trim())
            .map_err(|reason| Error::MalformedSrt {
                line: line_no + 1,
                reason,
            })?;

        // Text lines run until the blank separator (or EOF).
        let mut text_lines: Vec<&str> = Vec::new();
        while let Some(&(_, line)) = lines.peek() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                break;
            }
            text_lines.push(line.trim());
            lines.next();
        }

        cues.push(Cue::new(start_ms, end_ms, text_lines.join(" ")));
    }

    Ok(cues)
}

/// Split a `start --> end` timing line into millisecond offsets.
fn parse_timing_line(line: &str) -> std::result::Result<(u64, u64), String> {
    let (start, end) = line
        .split_once("-->")
        .ok_or_else(|| format!("expected 'start --> end', found {line:?}"))?;

    // Timing lines may carry position hints after the end timestamp
    // ("X1:… Y1:…"); only the leading token is the timestamp.
    let end = end.trim().split_whitespace().next().unwrap_or("");

    Ok((parse_timestamp(start.trim())?, parse_timestamp(end)?))
}

/// Parse an `HH:MM:SS,mmm` timestamp into milliseconds.
///
/// A period is accepted in place of the comma; some encoders emit the WebVTT
/// separator into `.srt` files.
pub fn parse_timestamp(ts: &str) -> std::result::Result<u64, String> {
    let bad = || format!("invalid timestamp {ts:?}, expected HH:MM:SS,mmm");

    let (hms, ms) = ts
        .split_once(',')
        .or_else(|| ts.split_once('.'))
        .ok_or_else(bad)?;

    let mut parts = hms.split(':');
    let (Some(h), Some(m), Some(s), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(bad());
    };

    let h: u64 = h.parse().map_err(|_| bad())?;
    let m: u64 = m.parse().map_err(|_| bad())?;
    let s: u64 = s.parse().map_err(|_| bad())?;
    let ms: u64 = ms.parse().map_err(|_| bad())?;
    if m >= 60 || s >= 60 || ms >= 1000 {
        return Err(bad());
    }

    Ok(((h * 60 + m) * 60 + s) * 1000 + ms)
}

/// Serialize cues to a SubRip document held in memory.
///
/// The streaming path is [`crate::srt_encoder::SrtEncoder`]; this helper
/// exists for callers that need the whole document as a string, like the
/// improvement request body.
pub fn to_string(cues: &[Cue]) -> Result<String> {
    use crate::cue_encoder::CueEncoder;

    let mut buf = Vec::new();
    let mut enc = crate::srt_encoder::SrtEncoder::new(&mut buf);
    for cue in cues {
        enc.write_cue(cue)?;
    }
    enc.close()?;

    Ok(std::str::from_utf8(&buf)?.to_owned())
}

/// Format milliseconds as an SRT `HH:MM:SS,mmm` timestamp.
pub fn format_timestamp(total_ms: u64) -> String {
    let ms = total_ms % 1000;
    let total_s = total_ms / 1000;

    let s = total_s % 60;
    let total_m = total_s / 60;

    let m = total_m % 60;
    let h = total_m / 60;

    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_two_entry_file() -> anyhow::Result<()> {
        let srt = "1\n00:00:00,000 --> 00:00:01,500\nhello there\n\n2\n00:00:02,000 --> 00:00:03,250\nworld\n";
        let cues = parse_str(srt)?;
        assert_eq!(
            cues,
            vec![
                Cue::new(0, 1500, "hello there"),
                Cue::new(2000, 3250, "world"),
            ]
        );
        Ok(())
    }

    #[test]
    fn joins_multi_line_text_and_tolerates_crlf_and_bom() -> anyhow::Result<()> {
        let srt = "\u{feff}1\r\n00:01:00,000 --> 00:01:02,000\r\nfirst line\r\nsecond line\r\n\r\n";
        let cues = parse_str(srt)?;
        assert_eq!(cues, vec![Cue::new(60_000, 62_000, "first line second line")]);
        Ok(())
    }

    #[test]
    fn skips_blank_runs_between_entries() -> anyhow::Result<()> {
        let srt = "1\n00:00:00,000 --> 00:00:01,000\na\n\n\n\n2\n00:00:01,000 --> 00:00:02,000\nb\n";
        assert_eq!(parse_str(srt)?.len(), 2);
        Ok(())
    }

    #[test]
    fn empty_input_parses_to_no_cues() -> anyhow::Result<()> {
        assert!(parse_str("")?.is_empty());
        assert!(parse_str("\n\n\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn reports_line_numbers_for_malformed_timing() {
        let srt = "1\nnot a timing line\ntext\n";
        let err = parse_str(srt).unwrap_err();
        assert!(matches!(err, Error::MalformedSrt { line: 2, .. }), "{err}");
    }

    #[test]
    fn rejects_garbage_where_a_sequence_number_belongs() {
        let err = parse_str("garbage\n").unwrap_err();
        assert!(matches!(err, Error::MalformedSrt { line: 1, .. }), "{err}");
    }

    #[test]
    fn parse_timestamp_handles_comma_and_period_separators() {
        assert_eq!(parse_timestamp("00:00:00,000"), Ok(0));
        assert_eq!(parse_timestamp("01:02:03,004"), Ok(3_723_004));
        assert_eq!(parse_timestamp("00:00:05.500"), Ok(5_500));
        assert!(parse_timestamp("00:99:00,000").is_err());
        assert!(parse_timestamp("00:00:00").is_err());
    }

    #[test]
    fn format_timestamp_round_trips() {
        for ms in [0, 999, 1_000, 59_999, 60_000, 3_599_999, 3_600_000, 86_399_999] {
            assert_eq!(parse_timestamp(&format_timestamp(ms)), Ok(ms));
        }
        assert_eq!(format_timestamp(3_723_004), "01:02:03,004");
    }
}
