//! Word-to-cue assignment.
//!
//! Given cues sorted by start time and words sorted by timestamp, every word
//! is placed into exactly one cue and each cue's text is rebuilt as the
//! space-joined run of words it received. Timing is never touched.
//!
//! Each word costs one binary search over the cue starts plus a single
//! comparison against the previous cue's end, so the whole pass is
//! `O(W log C)`.

use crate::cue::Cue;
use crate::word::Word;

/// Assign every word to exactly one cue and return the re-texted cue list.
///
/// The output has the same length and timings as `cues`; only `text` is
/// replaced. Cues that receive no words get an empty string. An empty `cues`
/// slice yields an empty vector (no word can be placed; callers that need to
/// treat this as a failure should check before calling).
///
/// Placement of a word at `t` milliseconds:
/// - `pos` is the number of cues starting strictly before `t`.
/// - `pos == len`: the word falls after every cue start; clamp to the last cue.
/// - `pos == 0`: the word precedes the first cue; it belongs to cue 0.
/// - `t > end[pos - 1]`: the word falls in the gap after the previous cue;
///   assign it forward to cue `pos`.
/// - otherwise it is still inside the previous cue's window; assign `pos - 1`.
///
/// A word landing exactly on a shared boundary (`end[i] == start[i + 1] == t`)
/// is therefore owned by cue `i`: the search counts only strictly-earlier
/// starts, and `t` is not past `end[i]`.
pub fn assign(cues: &[Cue], words: &[Word]) -> Vec<Cue> {
    let mut texts: Vec<Vec<&str>> = vec![Vec::new(); cues.len()];

    if !cues.is_empty() {
        for word in words {
            let t = word.start_ms();
            let index = cue_index_for(cues, t);
            texts[index].push(word.text.as_str());
        }
    }

    cues.iter()
        .zip(texts)
        .map(|(cue, words)| Cue::new(cue.start_ms, cue.end_ms, words.join(" ")))
        .collect()
}

/// Find the index of the cue that owns a word at `t` milliseconds.
///
/// `cues` must be non-empty and sorted by `start_ms`.
fn cue_index_for(cues: &[Cue], t: f64) -> usize {
    // Word timestamps arrive as fractional milliseconds; cue starts are
    // integers. Comparing in f64 is exact for any realistic timestamp.
    let pos = cues.partition_point(|c| (c.start_ms as f64) < t);

    if pos == cues.len() {
        // Past the last cue's start: late words attach to the final cue.
        cues.len() - 1
    } else if pos == 0 {
        // Before the first cue starts: early words attach to cue 0.
        0
    } else if t > cues[pos - 1].end_ms as f64 {
        // In the gap between cues: the word belongs to the cue it precedes.
        pos
    } else {
        pos - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cues(windows: &[(u64, u64)]) -> Vec<Cue> {
        windows.iter().map(|&(s, e)| Cue::empty(s, e)).collect()
    }

    fn words(entries: &[(f64, &str)]) -> Vec<Word> {
        entries.iter().map(|&(t, w)| Word::new(t, w)).collect()
    }

    fn texts(cues: &[Cue]) -> Vec<&str> {
        cues.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn assigns_words_inside_their_cue_windows() {
        let cues = cues(&[(0, 1000), (1000, 2000), (3000, 4000)]);
        let words = words(&[(0.5, "a"), (1.5, "b"), (3.5, "d")]);
        assert_eq!(texts(&assign(&cues, &words)), vec!["a", "b", "d"]);
    }

    #[test]
    fn gap_words_assign_forward_and_late_words_clamp_to_last_cue() {
        // The worked example: 2.5s falls in the 2000..3000 gap and goes
        // forward to the third cue; 5.0s is past everything and clamps back.
        let cues = cues(&[(0, 1000), (1000, 2000), (3000, 4000)]);
        let words = words(&[(0.5, "a"), (1.5, "b"), (2.5, "c"), (3.5, "d"), (5.0, "e")]);
        assert_eq!(texts(&assign(&cues, &words)), vec!["a", "b", "c d e"]);
    }

    #[test]
    fn word_before_first_cue_goes_to_cue_zero() {
        let cues = cues(&[(5000, 6000), (7000, 8000)]);
        let words = words(&[(0.1, "early"), (5.5, "on")]);
        assert_eq!(texts(&assign(&cues, &words)), vec!["early on", ""]);
    }

    #[test]
    fn boundary_word_belongs_to_the_earlier_cue() {
        // t == end of cue 0 == start of cue 1: the search counts only starts
        // strictly below t, so the word stays with cue 0.
        let cues = cues(&[(0, 1000), (1000, 2000)]);
        let words = words(&[(1.0, "edge")]);
        assert_eq!(texts(&assign(&cues, &words)), vec!["edge", ""]);
    }

    #[test]
    fn word_at_start_of_gapped_cue_assigns_forward() {
        let cues = cues(&[(0, 1000), (2000, 3000)]);
        let words = words(&[(2.0, "go")]);
        assert_eq!(texts(&assign(&cues, &words)), vec!["", "go"]);
    }

    #[test]
    fn empty_words_leave_every_cue_empty_with_timing_intact() {
        let input = cues(&[(0, 1000), (1000, 2000)]);
        let out = assign(&input, &[]);
        assert_eq!(out.len(), input.len());
        for (a, b) in input.iter().zip(&out) {
            assert_eq!((a.start_ms, a.end_ms), (b.start_ms, b.end_ms));
            assert!(b.text.is_empty());
        }
    }

    #[test]
    fn empty_cues_yield_empty_output() {
        let out = assign(&[], &words(&[(1.0, "lost")]));
        assert!(out.is_empty());
    }

    #[test]
    fn single_cue_collects_all_words_in_order() {
        let cues = cues(&[(1000, 2000)]);
        let words = words(&[(0.2, "before"), (1.5, "inside"), (9.0, "after")]);
        assert_eq!(texts(&assign(&cues, &words)), vec!["before inside after"]);
    }

    #[test]
    fn identical_timestamps_keep_their_input_order() {
        let cues = cues(&[(0, 1000)]);
        let words = words(&[(0.5, "one"), (0.5, "two"), (0.5, "three")]);
        assert_eq!(texts(&assign(&cues, &words)), vec!["one two three"]);
    }

    #[test]
    fn every_word_lands_in_exactly_one_cue() {
        let cues = cues(&[(0, 900), (1000, 1900), (2000, 2900), (4000, 5000)]);
        let words: Vec<Word> = (0..60)
            .map(|i| Word::new(i as f64 * 0.1, format!("w{i}")))
            .collect();
        let out = assign(&cues, &words);
        let total: usize = out
            .iter()
            .map(|c| c.text.split_whitespace().count())
            .sum();
        assert_eq!(total, words.len());
    }

    #[test]
    fn assignment_is_monotonic_in_word_time() {
        let cues = cues(&[(0, 500), (700, 1200), (1200, 1800), (2500, 3000)]);
        let mut last = 0;
        for i in 0..35 {
            let t = i as f64 * 100.0;
            let index = cue_index_for(&cues, t);
            assert!(index >= last, "index went backwards at t={t}ms");
            last = index;
        }
    }

    #[test]
    fn overwrites_preexisting_cue_text() {
        let input = vec![Cue::new(0, 1000, "old text")];
        let out = assign(&input, &words(&[(0.5, "new")]));
        assert_eq!(out[0].text, "new");
    }
}
