//! The Unicode Bidirectional Algorithm (UAX #9).
//!
//! Resolution happens per paragraph: explicit levels (X1-X9), run
//! sequences (BD13, X10), weak and neutral types (W1-W7, BD16, N0-N2) and
//! implicit levels (I1, I2). Reordering (L1-L4) happens per line as
//! subranges are pulled from [`BidiSubranges`].

pub mod brackets;
pub mod class;
pub mod explicit;
pub mod implicit;
pub mod levels;
pub mod line;
pub mod mirror;
mod mirror_table;
pub mod neutral;
pub mod paragraph;
pub mod record;
pub mod reorder;
pub mod runs;
pub mod subranges;
pub mod weak;

pub use brackets::{BracketType, bracket_type, brackets_match, decompositions_of};
pub use class::{BidiClass, bidi_class, bidi_class_of_scalar};
pub use levels::{
    BaseDirection, ParagraphBidi, ParagraphDirection, bidi_levels, paragraph_bidi_info,
    reordered_indices, visual_string,
};
pub use mirror::{mirror_of, mirrored_or_self};
pub use paragraph::Paragraph;
pub use record::{BidiRecord, MAX_DEPTH};
pub use reorder::ReorderedRun;
pub use subranges::{
    BidiSubrange, BidiSubranges, LineBreakMarker, SubrangeChars, bidi_subranges,
    bidi_subranges_with_level,
};
