use super::class::BidiClass;

/// Deepest explicit embedding level (BD2).
pub const MAX_DEPTH: u8 = 125;

/// Per-code-point state carried through paragraph resolution.
///
/// `original_class` never changes after the record is created; `class` is
/// rewritten by the explicit, weak and neutral passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidiRecord {
    /// Position of the code point within its paragraph.
    pub index: usize,
    pub cp: char,
    pub level: u8,
    pub original_class: BidiClass,
    pub class: BidiClass,
    pub unmatched_pdi: bool,
    pub originally_nsm: bool,
}

impl BidiRecord {
    pub fn new(index: usize, cp: char, level: u8, class: BidiClass) -> Self {
        Self {
            index,
            cp,
            level,
            original_class: class,
            class,
            unmatched_pdi: false,
            originally_nsm: false,
        }
    }
}
