//! Match occurrences and the offset-based line rebuild.
//!
//! Offsets always refer to the original, unmodified line. Overlapping
//! occurrences are not resolved: when an occurrence starts before the end of
//! the previous one, no original text is copied for it, its replacement is
//! appended anyway and the cursor jumps to its end (possibly backwards). The
//! output is then wrong but well defined.

use serde::Serialize;

/// One match of one rule within one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOccurrence {
    /// Byte offset where capture group 1 starts.
    pub start: usize,
    /// Byte offset where capture group 1 ends.
    pub end: usize,
    /// Index of the rule in its `RuleSet`.
    pub rule_index: usize,
    /// Identifier assigned to the captured value.
    pub id: u64,
    /// The rendered replacement text.
    pub replacement: String,
}

/// Rebuilds `line` with every occurrence replaced.
///
/// Occurrences are stably sorted by start offset first, so ties keep the
/// order they were discovered in (rule order). Bytes outside the occurrences
/// are copied as they are, whatever their encoding.
pub fn rebuild_line(line: &[u8], occurrences: &mut [MatchOccurrence]) -> Vec<u8> {
    if occurrences.is_empty() {
        return line.to_vec();
    }

    occurrences.sort_by_key(|o| o.start);

    let mut out = Vec::with_capacity(line.len());
    let mut cursor = 0usize;
    for occurrence in occurrences.iter() {
        if occurrence.start > cursor {
            out.extend_from_slice(&line[cursor..occurrence.start]);
        }
        out.extend_from_slice(occurrence.replacement.as_bytes());
        cursor = occurrence.end;
    }
    out.extend_from_slice(&line[cursor..]);
    out
}
