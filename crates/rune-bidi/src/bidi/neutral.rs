//! 3.3.5 Resolving Neutral and Isolate Formatting Types
//!
//! http://www.unicode.org/reports/tr9/#Resolving_Neutral_Types

use super::brackets::{BracketType, bracket_type, brackets_match};
use super::class::{BidiClass, is_neutral_or_isolate};
use super::runs::SequenceView;

use BidiClass::*;

/// Capacity of the BD16 opening-bracket stack.
pub const BRACKET_STACK_CAPACITY: usize = 63;

/// A paired bracket (BD16), as positions within a run sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BracketPair {
    pub open: usize,
    pub close: usize,
}

/// Apply BD16, N0, N1 and N2 to one isolating run sequence.
pub fn resolve_neutral_types(seq: &mut SequenceView<'_>) {
    let pairs = find_bracket_pairs(seq);
    if !pairs.is_empty() {
        log::trace!("{} bracket pairs", pairs.len());
    }
    n0(seq, &pairs);
    n1(seq);
    n2(seq);
}

/// BD16: identify bracket pairs, sorted by the position of the opener.
///
/// Only characters whose current class is ON take part. Once the stack is
/// full, the next opener ends pairing for the rest of the sequence.
pub fn find_bracket_pairs(seq: &SequenceView<'_>) -> Vec<BracketPair> {
    let mut pairs = Vec::new();
    let mut stack: Vec<(usize, char)> = Vec::with_capacity(BRACKET_STACK_CAPACITY);

    for i in 0..seq.len() {
        if seq.class(i) != ON {
            continue;
        }
        match bracket_type(seq.record(i).cp) {
            BracketType::Open(opening) => {
                if stack.len() == BRACKET_STACK_CAPACITY {
                    log::trace!("bracket stack overflow at sequence position {i}");
                    break;
                }
                stack.push((i, opening));
            }
            BracketType::Close(opening) => {
                let found = stack
                    .iter()
                    .rposition(|&(_, candidate)| brackets_match(candidate, opening));
                if let Some(k) = found {
                    pairs.push(BracketPair {
                        open: stack[k].0,
                        close: i,
                    });
                    stack.truncate(k);
                }
            }
            BracketType::None => {}
        }
    }

    pairs.sort_unstable();
    pairs
}

/// Strong direction for the purposes of N0 and N1: EN and AN count as R.
fn strong_direction(class: BidiClass) -> Option<BidiClass> {
    match class {
        L => Some(L),
        R | AL | EN | AN => Some(R),
        _ => None,
    }
}

/// Set a bracket and any originally-NSM records right after it.
fn set_bracket_class(seq: &mut SequenceView<'_>, at: usize, class: BidiClass) {
    seq.set_class(at, class);
    let mut i = at + 1;
    while i < seq.len() && seq.record(i).originally_nsm {
        seq.set_class(i, class);
        i += 1;
    }
}

/// N0: resolve paired brackets from their content and preceding context.
fn n0(seq: &mut SequenceView<'_>, pairs: &[BracketPair]) {
    let embedding = seq.embedding_direction();
    let mut prev_strong = seq.sos;
    let mut next_pair = pairs.iter().peekable();

    for i in 0..seq.len() {
        let Some(&&pair) = next_pair.peek() else {
            break;
        };
        if let Some(direction) = strong_direction(seq.class(i)) {
            prev_strong = direction;
        }
        if i != pair.open {
            continue;
        }
        next_pair.next();

        let mut found_opposite = false;
        let mut found_embedding = false;
        for j in pair.open + 1..pair.close {
            match strong_direction(seq.class(j)) {
                Some(d) if d == embedding => {
                    found_embedding = true;
                    break;
                }
                Some(_) => found_opposite = true,
                None => {}
            }
        }

        let resolved = if found_embedding {
            embedding
        } else if found_opposite {
            if prev_strong != embedding {
                prev_strong
            } else {
                embedding
            }
        } else {
            continue;
        };

        set_bracket_class(seq, pair.open, resolved);
        set_bracket_class(seq, pair.close, resolved);
        // The opener is now strong context for pairs nested inside it.
        prev_strong = resolved;
    }
}

/// N1: a sequence of NIs between two characters of the same direction
/// takes that direction. sos and eos stand in at the sequence ends.
fn n1(seq: &mut SequenceView<'_>) {
    let len = seq.len();
    let mut i = 0;
    while i < len {
        if !is_neutral_or_isolate(seq.class(i)) {
            i += 1;
            continue;
        }
        let start = i;
        while i < len && is_neutral_or_isolate(seq.class(i)) {
            i += 1;
        }

        let before = if start == 0 {
            Some(seq.sos)
        } else {
            strong_direction(seq.class(start - 1))
        };
        let after = if i == len {
            Some(seq.eos)
        } else {
            strong_direction(seq.class(i))
        };

        if let (Some(before), Some(after)) = (before, after) {
            if before == after {
                for j in start..i {
                    seq.set_class(j, before);
                }
            }
        }
    }
}

/// N2: remaining NIs take the embedding direction.
fn n2(seq: &mut SequenceView<'_>) {
    let embedding = seq.embedding_direction();
    for i in 0..seq.len() {
        if is_neutral_or_isolate(seq.class(i)) {
            seq.set_class(i, embedding);
        }
    }
}
