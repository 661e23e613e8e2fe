//! Bidi_Mirroring_Glyph lookup for rule L4.

use super::mirror_table::MIRROR_PAIRS;

/// Return the mirrored counterpart of `cp`, if it has one.
pub fn mirror_of(cp: char) -> Option<char> {
    MIRROR_PAIRS
        .binary_search_by_key(&cp, |&(from, _)| from)
        .ok()
        .map(|idx| MIRROR_PAIRS[idx].1)
}

/// Return the mirrored counterpart of `cp`, or `cp` itself when it has none.
pub fn mirrored_or_self(cp: char) -> char {
    mirror_of(cp).unwrap_or(cp)
}
