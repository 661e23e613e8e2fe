//! Paired bracket properties used by BD16.
//!
//! Bracket data comes from `unicode-bidi`'s hardcoded tables, which already
//! normalize each pair to a canonical opening bracket. Canonical
//! decomposition equivalence is checked on top of that through
//! `unicode-normalization`, so pairs such as U+2329/U+3009 still match.

use unicode_bidi::{BidiDataSource, HardcodedBidiData};
use unicode_normalization::char::decompose_canonical;

/// Bidi_Paired_Bracket_Type of a code point.
///
/// Both bracket variants carry the canonical opening bracket of their pair,
/// which is the value compared when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketType {
    None,
    Open(char),
    Close(char),
}

/// Look up the paired bracket type of `cp`.
pub fn bracket_type(cp: char) -> BracketType {
    match HardcodedBidiData.bidi_matched_opening_bracket(cp) {
        Some(bracket) if bracket.is_open => BracketType::Open(bracket.opening),
        Some(bracket) => BracketType::Close(bracket.opening),
        None => BracketType::None,
    }
}

/// Canonical decomposition of `cp`, or an empty vector when `cp` does not
/// decompose.
pub fn decompositions_of(cp: char) -> Vec<char> {
    let mut out = Vec::new();
    decompose_canonical(cp, |d| out.push(d));
    if out.len() == 1 && out[0] == cp {
        out.clear();
    }
    out
}

/// Whether two opening brackets are identical or canonically equivalent.
pub fn brackets_match(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    let da = decompositions_of(a);
    let db = decompositions_of(b);
    match (da.is_empty(), db.is_empty()) {
        (true, true) => false,
        (false, true) => da == [b],
        (true, false) => db == [a],
        (false, false) => da == db,
    }
}
