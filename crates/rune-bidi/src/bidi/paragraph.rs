//! Per-paragraph resolution: everything up to and including I1/I2.

use core::ops::Range;

use super::class::{BidiClass, bidi_class};
use super::explicit::{explicit_levels, paragraph_level};
use super::implicit::resolve_implicit_levels;
use super::line::adjust_line_levels;
use super::neutral::resolve_neutral_types;
use super::record::BidiRecord;
use super::reorder::{ReorderedRun, line_runs, reorder_runs};
use super::runs::{SequenceView, find_all_runs, find_run_sequences, resolve_sos_eos};
use super::weak::resolve_weak_types;

/// A fully resolved paragraph.
///
/// Records are in logical order, one per code point that survived X9, and
/// carry their implicit levels. Line-dependent adjustment (L1) is applied
/// per line on a copy.
#[derive(Debug, Clone)]
pub struct Paragraph {
    /// Paragraph embedding level, 0 or 1.
    pub level: u8,
    /// Number of code points in the paragraph, removed ones included.
    pub len: usize,
    pub records: Vec<BidiRecord>,
}

impl Paragraph {
    /// Resolve one paragraph. `level` must be `None`, 0 or 1.
    pub fn resolve(text: &[char], level: Option<u8>) -> Self {
        debug_assert!(level.is_none_or(|l| l <= 1));

        let classes: Vec<BidiClass> = text.iter().map(|&c| bidi_class(c)).collect();
        let para_level = level.unwrap_or_else(|| paragraph_level(&classes));

        let mut records = explicit_levels(text, &classes, para_level);
        let mut runs = find_all_runs(&records);
        let mut sequences = find_run_sequences(&records, &mut runs);
        resolve_sos_eos(&mut sequences, &runs, &records, para_level);

        log::trace!(
            "paragraph of {} code points: level {}, {} records, {} runs, {} sequences",
            text.len(),
            para_level,
            records.len(),
            runs.len(),
            sequences.len()
        );

        for sequence in &sequences {
            let mut view = SequenceView::new(&mut records, &runs, sequence);
            resolve_weak_types(&mut view);
            resolve_neutral_types(&mut view);
            resolve_implicit_levels(&mut view);
        }

        Self {
            level: para_level,
            len: text.len(),
            records,
        }
    }

    /// Records of the line covering `range` (paragraph offsets), with L1
    /// applied.
    pub fn line(&self, range: Range<usize>) -> Vec<BidiRecord> {
        let start = self.records.partition_point(|r| r.index < range.start);
        let end = self.records.partition_point(|r| r.index < range.end);
        let mut line = self.records[start..end].to_vec();
        adjust_line_levels(&mut line, self.level);
        line
    }

    /// Runs of the line covering `range`, in visual order (L1, L2).
    pub fn visual_runs(&self, range: Range<usize>, drop_isolate_controls: bool) -> Vec<ReorderedRun> {
        let line = self.line(range);
        let mut runs = line_runs(&line, drop_isolate_controls);
        reorder_runs(&mut runs);
        runs
    }
}
