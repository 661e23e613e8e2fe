use core::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

/// A Unicode extended grapheme cluster.
///
/// The range is expressed in code-point offsets into the scanned slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphemeCluster {
    pub range: Range<usize>,
}

impl GraphemeCluster {
    pub fn len(&self) -> usize {
        self.range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }
}

/// Compute all grapheme clusters for the given text in scan order.
pub fn grapheme_clusters(text: &[char]) -> Vec<GraphemeCluster> {
    let s: String = text.iter().collect();
    let mut start = 0;
    s.graphemes(true)
        .map(|g| {
            let end = start + g.chars().count();
            let cluster = GraphemeCluster { range: start..end };
            start = end;
            cluster
        })
        .collect()
}

/// Returns `true` if `offset` is at a grapheme cluster boundary.
///
/// `offset` is clamped to `0..=text.len()`.
pub fn is_grapheme_boundary(text: &[char], offset: usize) -> bool {
    let offset = offset.min(text.len());
    if offset == 0 || offset == text.len() {
        return true;
    }
    grapheme_clusters(text)
        .iter()
        .any(|cluster| cluster.range.start == offset)
}

/// End of the grapheme cluster containing `offset`.
///
/// Returns `text.len()` when `offset` is at or past the end.
pub fn next_grapheme_boundary(text: &[char], offset: usize) -> usize {
    if offset >= text.len() {
        return text.len();
    }
    grapheme_clusters(text)
        .into_iter()
        .find(|cluster| offset < cluster.range.end)
        .map_or(text.len(), |cluster| cluster.range.end)
}
