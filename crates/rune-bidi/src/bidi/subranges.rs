//! Lazy production of visually ordered subranges.
//!
//! [`BidiSubranges`] walks the input paragraph by paragraph and line by
//! line, resolving each paragraph when it is entered and reordering each
//! line when it is entered. Every [`BidiSubrange`] is a contiguous slice of
//! the input whose code points are read either forwards or backwards.

use core::fmt;
use core::iter::FusedIterator;
use core::ops::Range;
use std::collections::VecDeque;

use super::mirror::{mirror_of, mirrored_or_self};
use super::paragraph::Paragraph;
use super::reorder::{ReorderedRun, split_graphemes};
use crate::error::{Result, validate_paragraph_level};
use crate::layout::{HardLineBreaks, LineBreakKind, LineBreaker};
use crate::unicode::{grapheme_clusters, next_paragraph_boundary};

/// How the line containing a subrange ends, if the subrange is its last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineBreakMarker {
    /// Not the last subrange of its line.
    #[default]
    None,
    /// The line ends at a break opportunity chosen by the line breaker.
    Allowed,
    /// The line ends at a mandatory break or the end of its paragraph.
    Hard,
}

impl From<LineBreakKind> for LineBreakMarker {
    fn from(kind: LineBreakKind) -> Self {
        match kind {
            LineBreakKind::Hard => LineBreakMarker::Hard,
            LineBreakKind::Allowed => LineBreakMarker::Allowed,
        }
    }
}

/// One visually ordered piece of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidiSubrange<'a> {
    text: &'a [char],
    range: Range<usize>,
    level: u8,
    reversed: bool,
    mirrored: bool,
    marker: LineBreakMarker,
}

impl<'a> BidiSubrange<'a> {
    /// Code points in visual order.
    pub fn chars(&self) -> SubrangeChars<'a> {
        SubrangeChars {
            slice: self.text,
            reversed: self.reversed,
            mirrored: self.mirrored,
        }
    }

    /// Grapheme clusters in visual order.
    ///
    /// Clusters are never reordered internally.
    pub fn graphemes(&self) -> Vec<String> {
        let mut clusters: Vec<String> = grapheme_clusters(self.text)
            .into_iter()
            .map(|cluster| {
                self.text[cluster.range]
                    .iter()
                    .map(|&c| if self.mirrored { mirrored_or_self(c) } else { c })
                    .collect()
            })
            .collect();
        if self.reversed {
            clusters.reverse();
        }
        clusters
    }

    /// The underlying code points in logical order.
    pub fn logical_text(&self) -> &'a [char] {
        self.text
    }

    /// Code-point range within the whole input.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Resolved embedding level after L1.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Whether this is a single code point replaced by its mirror (L4).
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn line_break(&self) -> LineBreakMarker {
        self.marker
    }

    /// Last subrange of its line.
    pub fn is_line_break(&self) -> bool {
        self.marker != LineBreakMarker::None
    }

    pub fn is_hard_break(&self) -> bool {
        self.marker == LineBreakMarker::Hard
    }

    pub fn is_allowed_break(&self) -> bool {
        self.marker == LineBreakMarker::Allowed
    }
}

impl fmt::Display for BidiSubrange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Code points of a [`BidiSubrange`] in visual order.
#[derive(Debug, Clone)]
pub struct SubrangeChars<'a> {
    slice: &'a [char],
    reversed: bool,
    mirrored: bool,
}

impl SubrangeChars<'_> {
    fn visual_char(&self, c: char) -> char {
        if self.mirrored { mirrored_or_self(c) } else { c }
    }
}

impl Iterator for SubrangeChars<'_> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = if self.reversed {
            let (&last, rest) = self.slice.split_last()?;
            self.slice = rest;
            last
        } else {
            let (&first, rest) = self.slice.split_first()?;
            self.slice = rest;
            first
        };
        Some(self.visual_char(c))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.slice.len(), Some(self.slice.len()))
    }
}

impl DoubleEndedIterator for SubrangeChars<'_> {
    fn next_back(&mut self) -> Option<char> {
        let c = if self.reversed {
            let (&first, rest) = self.slice.split_first()?;
            self.slice = rest;
            first
        } else {
            let (&last, rest) = self.slice.split_last()?;
            self.slice = rest;
            last
        };
        Some(self.visual_char(c))
    }
}

impl ExactSizeIterator for SubrangeChars<'_> {}
impl FusedIterator for SubrangeChars<'_> {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeforeFirstParagraph,
    InParagraph,
    InLine,
    InMirrorSplit,
    Done,
}

/// Iterator over the visually ordered subranges of a text.
///
/// Paragraphs and lines come out in logical order; the subranges of each
/// line come out left to right.
pub struct BidiSubranges<'a, B: LineBreaker = HardLineBreaks> {
    text: &'a [char],
    paragraph_level: Option<u8>,
    breaker: B,
    mirroring: bool,
    state: State,

    /// Input range of the current paragraph.
    para_range: Range<usize>,
    paragraph: Option<Paragraph>,
    /// Current line, paragraph-relative.
    line_range: Range<usize>,
    line_marker: LineBreakMarker,
    /// Remaining runs of the current line, visual order, L3 applied.
    runs: VecDeque<ReorderedRun>,
    /// Unemitted part of the odd-level run being split for mirroring.
    mirror_span: Range<usize>,
    mirror_level: u8,
    /// Whether the split run is read right to left. Clusters carved out by
    /// L3 are read forwards.
    mirror_reversed: bool,
}

impl<'a> BidiSubranges<'a, HardLineBreaks> {
    /// Subranges of `text` with lines split at mandatory breaks only.
    pub fn with_hard_breaks(text: &'a [char], paragraph_level: Option<u8>) -> Result<Self> {
        Self::new(text, paragraph_level, HardLineBreaks::new())
    }
}

impl<'a, B: LineBreaker> BidiSubranges<'a, B> {
    /// Subranges of `text`, split into lines by `breaker`.
    ///
    /// `paragraph_level` applies to every paragraph; `None` detects it per
    /// paragraph (P2, P3).
    pub fn new(text: &'a [char], paragraph_level: Option<u8>, breaker: B) -> Result<Self> {
        let paragraph_level = validate_paragraph_level(paragraph_level)?;
        Ok(Self::from_parts(text, paragraph_level, breaker))
    }

    fn from_parts(text: &'a [char], paragraph_level: Option<u8>, breaker: B) -> Self {
        Self {
            text,
            paragraph_level,
            breaker,
            mirroring: true,
            state: State::BeforeFirstParagraph,
            para_range: 0..0,
            paragraph: None,
            line_range: 0..0,
            line_marker: LineBreakMarker::None,
            runs: VecDeque::new(),
            mirror_span: 0..0,
            mirror_level: 0,
            mirror_reversed: false,
        }
    }

    /// Enable or disable L4 mirroring. Enabled by default.
    pub fn with_mirroring(mut self, mirroring: bool) -> Self {
        self.mirroring = mirroring;
        self
    }

    fn paragraph_text(&self) -> &'a [char] {
        let text: &'a [char] = self.text;
        &text[self.para_range.clone()]
    }

    fn enter_paragraph(&mut self, start: usize) {
        let end = next_paragraph_boundary(self.text, start);
        self.para_range = start..end;
        let text = self.paragraph_text();
        let paragraph = Paragraph::resolve(text, self.paragraph_level);
        log::debug!(
            "paragraph {}..{} at level {}",
            start,
            end,
            paragraph.level
        );
        self.breaker.begin_paragraph(text);
        self.paragraph = Some(paragraph);
        self.line_range = 0..0;
    }

    /// Fetch the next line of the current paragraph. Returns `false` when
    /// the paragraph is exhausted.
    fn enter_line(&mut self) -> bool {
        let text = self.paragraph_text();
        let start = self.line_range.end;
        if start >= text.len() {
            return false;
        }
        let brk = self.breaker.next_line_break(text, start);
        assert!(
            brk.offset > start && brk.offset <= text.len(),
            "line breaker returned offset {} for a line starting at {} in a paragraph of {}",
            brk.offset,
            start,
            text.len()
        );
        self.line_range = start..brk.offset;
        self.line_marker = brk.kind.into();

        let Some(paragraph) = self.paragraph.as_ref() else {
            return false;
        };
        let runs = paragraph.visual_runs(self.line_range.clone(), true);
        self.runs = runs
            .iter()
            .flat_map(|run| split_graphemes(text, run))
            .collect();
        log::trace!(
            "line {:?}: {} runs, {:?}",
            self.line_range,
            self.runs.len(),
            self.line_marker
        );
        true
    }

    fn subrange(&self, range: Range<usize>, level: u8, reversed: bool, mirrored: bool) -> BidiSubrange<'a> {
        let base = self.para_range.start;
        let text = self.paragraph_text();
        BidiSubrange {
            text: &text[range.clone()],
            range: base + range.start..base + range.end,
            level,
            reversed,
            mirrored,
            marker: LineBreakMarker::None,
        }
    }

    fn has_mirrored(&self, range: &Range<usize>) -> bool {
        self.paragraph_text()[range.clone()]
            .iter()
            .any(|&c| mirror_of(c).is_some())
    }

    /// Next piece of the mirror split, taken from the visual start of the
    /// remaining span: its logical end when reversed, its start otherwise.
    fn next_mirror_piece(&mut self) -> BidiSubrange<'a> {
        let text = self.paragraph_text();
        let span = self.mirror_span.clone();
        let (level, reversed) = (self.mirror_level, self.mirror_reversed);

        if reversed {
            let last = span.end - 1;
            if mirror_of(text[last]).is_some() {
                self.mirror_span.end = last;
                return self.subrange(last..span.end, level, true, true);
            }
            let start = text[span.clone()]
                .iter()
                .rposition(|&c| mirror_of(c).is_some())
                .map_or(span.start, |p| span.start + p + 1);
            self.mirror_span.end = start;
            return self.subrange(start..span.end, level, true, false);
        }

        let first = span.start;
        if mirror_of(text[first]).is_some() {
            self.mirror_span.start = first + 1;
            return self.subrange(first..first + 1, level, false, true);
        }
        let end = text[span.clone()]
            .iter()
            .position(|&c| mirror_of(c).is_some())
            .map_or(span.end, |p| span.start + p);
        self.mirror_span.start = end;
        self.subrange(first..end, level, false, false)
    }

    fn mark_if_line_end(&self, mut subrange: BidiSubrange<'a>) -> BidiSubrange<'a> {
        if self.runs.is_empty() && self.mirror_span.is_empty() {
            subrange.marker = self.line_marker;
        }
        subrange
    }
}

impl<'a, B: LineBreaker> Iterator for BidiSubranges<'a, B> {
    type Item = BidiSubrange<'a>;

    fn next(&mut self) -> Option<BidiSubrange<'a>> {
        loop {
            match self.state {
                State::BeforeFirstParagraph => {
                    if self.text.is_empty() {
                        self.state = State::Done;
                    } else {
                        self.enter_paragraph(0);
                        self.state = State::InParagraph;
                    }
                }
                State::InParagraph => {
                    if self.enter_line() {
                        self.state = State::InLine;
                    } else if self.para_range.end < self.text.len() {
                        self.enter_paragraph(self.para_range.end);
                    } else {
                        self.paragraph = None;
                        self.state = State::Done;
                    }
                }
                State::InLine => {
                    let Some(run) = self.runs.pop_front() else {
                        self.state = State::InParagraph;
                        continue;
                    };
                    if run.level % 2 == 1 && self.mirroring && self.has_mirrored(&run.range) {
                        self.mirror_span = run.range;
                        self.mirror_level = run.level;
                        self.mirror_reversed = run.reversed;
                        self.state = State::InMirrorSplit;
                        continue;
                    }
                    let subrange = self.subrange(run.range, run.level, run.reversed, false);
                    return Some(self.mark_if_line_end(subrange));
                }
                State::InMirrorSplit => {
                    if self.mirror_span.is_empty() {
                        self.state = State::InLine;
                        continue;
                    }
                    let piece = self.next_mirror_piece();
                    return Some(self.mark_if_line_end(piece));
                }
                State::Done => return None,
            }
        }
    }
}

impl<B: LineBreaker> FusedIterator for BidiSubranges<'_, B> {}

/// Subranges of `text` with the paragraph level detected per paragraph.
pub fn bidi_subranges(text: &[char]) -> BidiSubranges<'_, HardLineBreaks> {
    BidiSubranges::from_parts(text, None, HardLineBreaks::new())
}

/// Subranges of `text` with a fixed paragraph level of 0 or 1.
pub fn bidi_subranges_with_level(text: &[char], level: u8) -> Result<BidiSubranges<'_, HardLineBreaks>> {
    BidiSubranges::with_hard_breaks(text, Some(level))
}
