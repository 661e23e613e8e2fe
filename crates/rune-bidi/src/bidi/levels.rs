use core::ops::Range;

use super::paragraph::Paragraph;
use super::reorder::visual_positions;
use super::subranges::BidiSubranges;
use crate::error::{Result, validate_paragraph_level};
use crate::layout::{HardLineBreaks, LineBreaker};
use crate::unicode::paragraph_ranges;

/// Base direction hint for paragraph analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseDirection {
    /// Detect paragraph base direction from text (first strong char).
    #[default]
    Auto,
    /// Force overall left-to-right base direction.
    Ltr,
    /// Force overall right-to-left base direction.
    Rtl,
}

impl BaseDirection {
    pub fn to_level(self) -> Option<u8> {
        match self {
            BaseDirection::Auto => None,
            BaseDirection::Ltr => Some(0),
            BaseDirection::Rtl => Some(1),
        }
    }
}

/// Paragraph direction classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphDirection {
    Ltr,
    Rtl,
    Mixed,
}

/// BiDi information for a single paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphBidi {
    /// Code-point range of this paragraph within the original text.
    pub range: Range<usize>,
    /// Paragraph embedding level (UAX-9).
    pub level: u8,
    /// Paragraph direction (LTR/RTL/Mixed) derived from levels.
    pub direction: ParagraphDirection,
}

/// Resolve every paragraph of `text`, together with its input range.
fn resolve_paragraphs(text: &[char], level: Option<u8>) -> Vec<(Range<usize>, Paragraph)> {
    paragraph_ranges(text)
        .into_iter()
        .map(|range| {
            let paragraph = Paragraph::resolve(&text[range.clone()], level);
            (range, paragraph)
        })
        .collect()
}

/// Hard lines of a paragraph, paragraph-relative.
fn hard_lines(text: &[char]) -> Vec<Range<usize>> {
    let mut breaker = HardLineBreaks::new();
    breaker.begin_paragraph(text);
    let mut lines = Vec::new();
    let mut start = 0;
    while start < text.len() {
        let end = breaker.next_line_break(text, start).offset;
        lines.push(start..end);
        start = end;
    }
    lines
}

/// Compute paragraph-level BiDi information for the given text.
///
/// Supports explicit base-direction overrides through `BaseDirection`.
pub fn paragraph_bidi_info(text: &str, base_dir: BaseDirection) -> Vec<ParagraphBidi> {
    let chars: Vec<char> = text.chars().collect();
    resolve_paragraphs(&chars, base_dir.to_level())
        .into_iter()
        .map(|(range, paragraph)| ParagraphBidi {
            range,
            level: paragraph.level,
            direction: paragraph_direction(&paragraph),
        })
        .collect()
}

fn paragraph_direction(paragraph: &Paragraph) -> ParagraphDirection {
    let mut levels = paragraph.records.iter().map(|r| r.level % 2);
    match levels.next() {
        None if paragraph.level % 2 == 1 => ParagraphDirection::Rtl,
        None => ParagraphDirection::Ltr,
        Some(first) if levels.any(|parity| parity != first) => ParagraphDirection::Mixed,
        Some(0) => ParagraphDirection::Ltr,
        Some(_) => ParagraphDirection::Rtl,
    }
}

/// Resolved level of every code point of `text`, after L1 on hard lines.
///
/// Code points removed by X9 have no level.
pub fn bidi_levels(text: &[char], paragraph_level: Option<u8>) -> Result<Vec<Option<u8>>> {
    let level = validate_paragraph_level(paragraph_level)?;
    let mut levels = vec![None; text.len()];
    for (range, paragraph) in resolve_paragraphs(text, level) {
        for line in hard_lines(&text[range.clone()]) {
            for record in paragraph.line(line) {
                levels[range.start + record.index] = Some(record.level);
            }
        }
    }
    Ok(levels)
}

/// Logical indices of the retained code points of `text`, in visual order.
///
/// Isolate initiators and PDIs are kept; code points removed by X9 are not.
pub fn reordered_indices(text: &[char], paragraph_level: Option<u8>) -> Result<Vec<usize>> {
    let level = validate_paragraph_level(paragraph_level)?;
    let mut out = Vec::with_capacity(text.len());
    for (range, paragraph) in resolve_paragraphs(text, level) {
        for line in hard_lines(&text[range.clone()]) {
            let runs = paragraph.visual_runs(line, false);
            out.extend(visual_positions(&runs).into_iter().map(|i| range.start + i));
        }
    }
    Ok(out)
}

/// `text` in visual order, lines split at mandatory breaks only.
pub fn visual_string(text: &str, base_dir: BaseDirection) -> String {
    let chars: Vec<char> = text.chars().collect();
    BidiSubranges::new(&chars, base_dir.to_level(), HardLineBreaks::new())
        .map(|subranges| subranges.map(|s| s.to_string()).collect())
        .unwrap_or_default()
}
