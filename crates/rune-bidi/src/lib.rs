//! rune-bidi: the Unicode Bidirectional Algorithm (UAX #9).
//!
//! Text goes in as code points and comes out as [`BidiSubrange`]s in
//! visual order, one line at a time:
//!
//! ```
//! let text: Vec<char> = "abc \u{05D0}\u{05D1}\u{05D2}".chars().collect();
//! let visual: String = rune_bidi::bidi_subranges(&text)
//!     .map(|s| s.to_string())
//!     .collect();
//! assert_eq!(visual, "abc \u{05D2}\u{05D1}\u{05D0}");
//! ```
//!
//! Line breaking is pluggable through [`LineBreaker`]; segmentation,
//! bracket and mirroring data come from the Unicode data crates.

pub mod bidi;
pub mod error;
pub mod layout;
pub mod unicode;

pub use bidi::{
    BaseDirection, BidiClass, BidiSubrange, BidiSubranges, LineBreakMarker, ParagraphBidi,
    ParagraphDirection, bidi_class, bidi_levels, bidi_subranges, bidi_subranges_with_level,
    paragraph_bidi_info, reordered_indices, visual_string,
};
pub use error::{BidiError, Result};
pub use layout::{HardLineBreaks, LineBreak, LineBreakKind, LineBreaker, WrapMode, WrappingLineBreaks};
