//! Bidi class lookup and the class predicates shared by the resolution passes.

pub use unicode_bidi::BidiClass;

use BidiClass::*;

/// Find the `BidiClass` of a single code point.
///
/// Code points without an explicit Bidi_Class resolve to `L`.
pub fn bidi_class(cp: char) -> BidiClass {
    unicode_bidi::bidi_class(cp)
}

/// Like [`bidi_class`], but accepts any 32-bit value.
///
/// Values that are not Unicode scalar values (surrogates, out of range)
/// map to `L`.
pub fn bidi_class_of_scalar(cp: u32) -> BidiClass {
    char::from_u32(cp).map(bidi_class).unwrap_or(L)
}

/// LRI, RLI or FSI.
pub fn is_isolate_initiator(class: BidiClass) -> bool {
    matches!(class, LRI | RLI | FSI)
}

/// LRI, RLI, FSI or PDI.
pub fn is_isolate_control(class: BidiClass) -> bool {
    matches!(class, LRI | RLI | FSI | PDI)
}

/// Characters dropped by rule X9.
///
/// http://www.unicode.org/reports/tr9/#X9
pub fn removed_by_x9(class: BidiClass) -> bool {
    matches!(class, RLE | LRE | RLO | LRO | PDF | BN)
}

/// Strong types as seen by W2 and W7.
pub(crate) fn is_strong(class: BidiClass) -> bool {
    matches!(class, L | R | AL)
}

/// Neutral and isolate formatting types (NI) as used by N1 and N2.
pub(crate) fn is_neutral_or_isolate(class: BidiClass) -> bool {
    matches!(class, B | S | WS | ON | FSI | LRI | RLI | PDI)
}

/// The strong direction implied by a level: `L` for even, `R` for odd.
pub(crate) fn class_for_level(level: u8) -> BidiClass {
    if level % 2 == 0 { L } else { R }
}
