use unicode_linebreak::{BreakOpportunity, linebreaks};

use crate::layout::WrapMode;
use crate::unicode::grapheme_clusters;

/// Kind of line break at a given position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineBreakKind {
    /// Required line break (e.g., explicit newline, end of paragraph).
    Hard,
    /// Optional line break opportunity taken by the breaker.
    Allowed,
}

/// A line break in a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineBreak {
    /// Code-point offset *after* the break, relative to the paragraph.
    pub offset: usize,
    /// Break kind (hard vs allowed).
    pub kind: LineBreakKind,
}

impl LineBreak {
    pub fn hard(offset: usize) -> Self {
        Self {
            offset,
            kind: LineBreakKind::Hard,
        }
    }

    pub fn allowed(offset: usize) -> Self {
        Self {
            offset,
            kind: LineBreakKind::Allowed,
        }
    }
}

/// Splits a paragraph into lines.
///
/// `next_line_break` must return an offset greater than `start` and no
/// greater than `paragraph.len()`; the emitter treats anything else as a
/// contract violation and panics.
pub trait LineBreaker {
    /// Called once before the lines of a new paragraph are requested.
    fn begin_paragraph(&mut self, _paragraph: &[char]) {}

    /// End of the line that starts at `start`.
    fn next_line_break(&mut self, paragraph: &[char], start: usize) -> LineBreak;
}

impl<F> LineBreaker for F
where
    F: FnMut(&[char], usize) -> LineBreak,
{
    fn next_line_break(&mut self, paragraph: &[char], start: usize) -> LineBreak {
        self(paragraph, start)
    }
}

/// Compute all line break opportunities in the given paragraph using
/// UAX-14 via the `unicode-linebreak` crate.
///
/// Offsets are in code points. The end of the text is always a hard break.
pub fn line_break_opportunities(paragraph: &[char]) -> Vec<LineBreak> {
    if paragraph.is_empty() {
        return Vec::new();
    }
    let text: String = paragraph.iter().collect();
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(byte_idx, _)| byte_idx)
        .chain(std::iter::once(text.len()))
        .collect();

    linebreaks(&text)
        .filter_map(|(byte_offset, opp)| {
            let offset = boundaries.binary_search(&byte_offset).ok()?;
            Some(LineBreak {
                offset,
                kind: match opp {
                    BreakOpportunity::Mandatory => LineBreakKind::Hard,
                    BreakOpportunity::Allowed => LineBreakKind::Allowed,
                },
            })
        })
        .collect()
}

/// Break opportunities of the paragraph they were computed for.
#[derive(Debug, Clone, Default)]
struct BreakCache {
    paragraph: Option<Vec<char>>,
    breaks: Vec<LineBreak>,
}

impl BreakCache {
    fn load(&mut self, paragraph: &[char]) {
        self.breaks = line_break_opportunities(paragraph);
        self.paragraph = Some(paragraph.to_vec());
    }

    /// Reload unless the cached breaks belong to exactly this paragraph.
    fn ensure(&mut self, paragraph: &[char]) {
        if self.paragraph.as_deref() != Some(paragraph) {
            self.load(paragraph);
        }
    }

    fn next_hard(&self, start: usize, len: usize) -> LineBreak {
        self.breaks
            .iter()
            .find(|b| b.kind == LineBreakKind::Hard && b.offset > start)
            .copied()
            .unwrap_or(LineBreak::hard(len))
    }
}

/// Breaks only at mandatory UAX-14 breaks and at the paragraph end.
#[derive(Debug, Clone, Default)]
pub struct HardLineBreaks {
    cache: BreakCache,
}

impl HardLineBreaks {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LineBreaker for HardLineBreaks {
    fn begin_paragraph(&mut self, paragraph: &[char]) {
        self.cache.load(paragraph);
    }

    fn next_line_break(&mut self, paragraph: &[char], start: usize) -> LineBreak {
        self.cache.ensure(paragraph);
        self.cache.next_hard(start, paragraph.len())
    }
}

/// Greedy width-constrained breaking, with the width counted in code
/// points.
///
/// Trailing whitespace does not count towards a line's width.
#[derive(Debug, Clone)]
pub struct WrappingLineBreaks {
    pub max_width: usize,
    pub mode: WrapMode,
    cache: BreakCache,
}

impl WrappingLineBreaks {
    pub fn new(max_width: usize, mode: WrapMode) -> Self {
        Self {
            max_width,
            mode,
            cache: BreakCache::default(),
        }
    }

    /// Last grapheme boundary that fits, or the end of the first cluster.
    fn grapheme_break(&self, paragraph: &[char], start: usize, end: usize, width: usize) -> LineBreak {
        let clusters = grapheme_clusters(&paragraph[start..end]);
        let fitting = clusters
            .iter()
            .take_while(|cluster| cluster.range.end <= width)
            .last()
            .or(clusters.first())
            .map_or(end, |cluster| start + cluster.range.end);
        LineBreak::allowed(fitting)
    }
}

fn visible_width(segment: &[char]) -> usize {
    let trailing = segment.iter().rev().take_while(|c| c.is_whitespace()).count();
    segment.len() - trailing
}

impl LineBreaker for WrappingLineBreaks {
    fn begin_paragraph(&mut self, paragraph: &[char]) {
        self.cache.load(paragraph);
    }

    fn next_line_break(&mut self, paragraph: &[char], start: usize) -> LineBreak {
        self.cache.ensure(paragraph);
        let hard = self.cache.next_hard(start, paragraph.len());
        let width = self.max_width.max(1);

        if self.mode == WrapMode::NoWrap || visible_width(&paragraph[start..hard.offset]) <= width {
            return hard;
        }

        if self.mode == WrapMode::BreakWord {
            let fitting = self
                .cache
                .breaks
                .iter()
                .filter(|b| b.offset > start && b.offset < hard.offset)
                .take_while(|b| visible_width(&paragraph[start..b.offset]) <= width)
                .last();
            if let Some(b) = fitting {
                return LineBreak::allowed(b.offset);
            }
        }

        // A single word wider than the line, or BreakAll.
        self.grapheme_break(paragraph, start, hard.offset, width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn lines(breaker: &mut impl LineBreaker, text: &str) -> Vec<(String, LineBreakKind)> {
        let paragraph = chars(text);
        breaker.begin_paragraph(&paragraph);
        let mut out = Vec::new();
        let mut start = 0;
        while start < paragraph.len() {
            let brk = breaker.next_line_break(&paragraph, start);
            assert!(brk.offset > start);
            out.push((paragraph[start..brk.offset].iter().collect(), brk.kind));
            start = brk.offset;
        }
        out
    }

    #[test]
    fn opportunities_are_in_code_points() {
        let breaks = line_break_opportunities(&chars("\u{05D0}\u{05D1} cd\nx"));
        assert_eq!(
            breaks,
            [LineBreak::allowed(3), LineBreak::hard(6), LineBreak::hard(7)]
        );
        assert!(line_break_opportunities(&[]).is_empty());
    }

    #[test]
    fn hard_breaks_only() {
        let mut breaker = HardLineBreaks::new();
        assert_eq!(
            lines(&mut breaker, "a b \nc"),
            [
                ("a b \n".to_string(), LineBreakKind::Hard),
                ("c".to_string(), LineBreakKind::Hard),
            ]
        );
    }

    #[test]
    fn reused_breaker_reloads_for_a_new_paragraph() {
        let first = chars("a\nb");
        let second = chars("abc");
        let mut breaker = HardLineBreaks::new();
        breaker.begin_paragraph(&first);
        assert_eq!(breaker.next_line_break(&first, 0), LineBreak::hard(2));
        // Same length, no begin_paragraph: the cached breaks must not leak.
        assert_eq!(breaker.next_line_break(&second, 0), LineBreak::hard(3));

        let mut wrapping = WrappingLineBreaks::new(10, WrapMode::BreakWord);
        assert_eq!(wrapping.next_line_break(&first, 0), LineBreak::hard(2));
        assert_eq!(wrapping.next_line_break(&second, 0), LineBreak::hard(3));
    }

    #[test]
    fn wraps_at_words() {
        let mut breaker = WrappingLineBreaks::new(5, WrapMode::BreakWord);
        assert_eq!(
            lines(&mut breaker, "hello world again"),
            [
                ("hello ".to_string(), LineBreakKind::Allowed),
                ("world ".to_string(), LineBreakKind::Allowed),
                ("again".to_string(), LineBreakKind::Hard),
            ]
        );
    }

    #[test]
    fn long_words_fall_back_to_graphemes() {
        let mut breaker = WrappingLineBreaks::new(3, WrapMode::BreakWord);
        assert_eq!(
            lines(&mut breaker, "abcdefg"),
            [
                ("abc".to_string(), LineBreakKind::Allowed),
                ("def".to_string(), LineBreakKind::Allowed),
                ("g".to_string(), LineBreakKind::Hard),
            ]
        );
    }

    #[test]
    fn break_all_ignores_words() {
        let mut breaker = WrappingLineBreaks::new(4, WrapMode::BreakAll);
        let got: Vec<String> = lines(&mut breaker, "ab cdef").into_iter().map(|(s, _)| s).collect();
        assert_eq!(got, ["ab c", "def"]);
    }

    #[test]
    fn no_wrap_keeps_long_lines() {
        let mut breaker = WrappingLineBreaks::new(2, WrapMode::NoWrap);
        assert_eq!(lines(&mut breaker, "hello world").len(), 1);
    }

    #[test]
    fn graphemes_are_never_split() {
        let mut breaker = WrappingLineBreaks::new(1, WrapMode::BreakAll);
        let got: Vec<String> = lines(&mut breaker, "a\u{0301}b").into_iter().map(|(s, _)| s).collect();
        assert_eq!(got, ["a\u{0301}", "b"]);
    }

    #[test]
    fn closures_are_line_breakers() {
        let mut every_two = |paragraph: &[char], start: usize| {
            let end = (start + 2).min(paragraph.len());
            if end == paragraph.len() {
                LineBreak::hard(end)
            } else {
                LineBreak::allowed(end)
            }
        };
        let got: Vec<String> = lines(&mut every_two, "abcde").into_iter().map(|(s, _)| s).collect();
        assert_eq!(got, ["ab", "cd", "e"]);
    }
}
