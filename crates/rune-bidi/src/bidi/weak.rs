//! 3.3.4 Resolving Weak Types
//!
//! http://www.unicode.org/reports/tr9/#Resolving_Weak_Types

use super::class::{BidiClass, is_isolate_control, is_strong};
use super::runs::SequenceView;

use BidiClass::*;

/// Apply W1 through W7, in order, to one isolating run sequence.
pub fn resolve_weak_types(seq: &mut SequenceView<'_>) {
    w1(seq);
    w2_w7(seq, AL, AN);
    w3(seq);
    w4(seq);
    w5(seq);
    w6(seq);
    w2_w7(seq, L, L);
}

/// W1: NSM takes the class of the previous character, or ON after an
/// isolate initiator or PDI.
fn w1(seq: &mut SequenceView<'_>) {
    let mut prev = seq.sos;
    for i in 0..seq.len() {
        let mut class = seq.class(i);
        if class == NSM {
            class = if is_isolate_control(prev) { ON } else { prev };
            let record = seq.record_mut(i);
            record.class = class;
            record.originally_nsm = true;
        }
        prev = class;
    }
}

/// W2 (`AL` -> `AN`) and W7 (`L` -> `L`): rewrite EN by the nearest
/// preceding strong type.
///
/// W7 sees no AL since W3 has run by then.
fn w2_w7(seq: &mut SequenceView<'_>, trigger: BidiClass, replacement: BidiClass) {
    let mut last_strong = seq.sos;
    for i in 0..seq.len() {
        let class = seq.class(i);
        if is_strong(class) {
            last_strong = class;
        } else if class == EN && last_strong == trigger {
            seq.set_class(i, replacement);
        }
    }
}

/// W3: AL -> R.
fn w3(seq: &mut SequenceView<'_>) {
    for i in 0..seq.len() {
        if seq.class(i) == AL {
            seq.set_class(i, R);
        }
    }
}

/// W4: a single ES between two ENs, or a single CS between two numbers of
/// the same type, takes the number type.
fn w4(seq: &mut SequenceView<'_>) {
    for i in 1..seq.len().saturating_sub(1) {
        let prev = seq.class(i - 1);
        let next = seq.class(i + 1);
        match seq.class(i) {
            ES if prev == EN && next == EN => seq.set_class(i, EN),
            CS if prev == next && matches!(prev, EN | AN) => seq.set_class(i, prev),
            _ => {}
        }
    }
}

/// W5: a sequence of ETs adjacent to an EN becomes EN.
fn w5(seq: &mut SequenceView<'_>) {
    let len = seq.len();
    let mut i = 0;
    while i < len {
        if seq.class(i) != ET {
            i += 1;
            continue;
        }
        let start = i;
        while i < len && seq.class(i) == ET {
            i += 1;
        }
        let before = start > 0 && seq.class(start - 1) == EN;
        let after = i < len && seq.class(i) == EN;
        if before || after {
            for j in start..i {
                seq.set_class(j, EN);
            }
        }
    }
}

/// W6: remaining separators and terminators become ON.
fn w6(seq: &mut SequenceView<'_>) {
    for i in 0..seq.len() {
        if matches!(seq.class(i), ES | ET | CS) {
            seq.set_class(i, ON);
        }
    }
}
