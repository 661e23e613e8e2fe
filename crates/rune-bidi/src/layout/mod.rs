//! Line breaking strategies consumed by the subrange emitter.

pub mod line_breaker;

pub use line_breaker::{
    HardLineBreaks, LineBreak, LineBreakKind, LineBreaker, WrappingLineBreaks,
    line_break_opportunities,
};

/// Line wrapping strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Do not perform automatic wrapping (only explicit newlines).
    #[default]
    NoWrap,
    /// Wrap at word boundaries where possible, falling back to
    /// grapheme boundaries for long words.
    BreakWord,
    /// Allow breaking between all grapheme clusters (aggressive).
    BreakAll,
}
