//! Segmentation collaborators consumed by the bidi emitter.
//!
//! Both work over `&[char]` and code-point offsets, the units the
//! algorithm itself is expressed in.

pub mod graphemes;
pub mod paragraphs;

pub use graphemes::{GraphemeCluster, grapheme_clusters, is_grapheme_boundary, next_grapheme_boundary};
pub use paragraphs::{next_paragraph_boundary, paragraph_ranges};
