//! Paragraph segmentation (rule P1).
//!
//! A paragraph ends after any character of bidi class B. CR LF is one
//! separator.

use core::ops::Range;

use crate::bidi::class::{BidiClass, bidi_class};

/// Offset just past the paragraph that starts at `pos`.
pub fn next_paragraph_boundary(text: &[char], pos: usize) -> usize {
    let mut i = pos;
    while i < text.len() {
        if bidi_class(text[i]) == BidiClass::B {
            if text[i] == '\r' && text.get(i + 1) == Some(&'\n') {
                return i + 2;
            }
            return i + 1;
        }
        i += 1;
    }
    text.len()
}

/// All paragraph ranges of `text`, separators included.
pub fn paragraph_ranges(text: &[char]) -> Vec<Range<usize>> {
    let mut ranges = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let end = next_paragraph_boundary(text, start);
        ranges.push(start..end);
        start = end;
    }
    ranges
}
