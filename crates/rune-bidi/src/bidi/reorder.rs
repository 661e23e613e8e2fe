//! 3.4 Reordering Resolved Levels, rules L2 and L3
//!
//! http://www.unicode.org/reports/tr9/#Reordering_Resolved_Levels

use core::ops::Range;

use super::class::is_isolate_control;
use super::record::BidiRecord;
use crate::unicode::grapheme_clusters;

/// A run of text with a single embedding level, placed in visual order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderedRun {
    /// Code-point range within the paragraph, always contiguous.
    pub range: Range<usize>,
    pub level: u8,
    /// Whether the run's code points are emitted right to left.
    pub reversed: bool,
}

impl ReorderedRun {
    pub fn new(range: Range<usize>, level: u8) -> Self {
        Self {
            range,
            level,
            reversed: false,
        }
    }
}

/// Group a line's records into runs, in logical order.
///
/// A run breaks at every level change and at every gap left by removed
/// characters. With `drop_isolate_controls`, isolate initiators and PDIs
/// are left out.
pub fn line_runs(line: &[BidiRecord], drop_isolate_controls: bool) -> Vec<ReorderedRun> {
    let mut runs: Vec<ReorderedRun> = Vec::new();
    for record in line {
        if drop_isolate_controls && is_isolate_control(record.original_class) {
            continue;
        }
        match runs.last_mut() {
            Some(run) if run.level == record.level && run.range.end == record.index => {
                run.range.end += 1;
            }
            _ => runs.push(ReorderedRun::new(record.index..record.index + 1, record.level)),
        }
    }
    runs
}

/// Rule L2: from the highest level down to the lowest odd level, reverse
/// every maximal span of runs at or above that level.
pub fn reorder_runs(runs: &mut [ReorderedRun]) {
    let (Some(max), Some(min)) = (
        runs.iter().map(|r| r.level).max(),
        runs.iter().map(|r| r.level).min(),
    ) else {
        return;
    };
    let lowest_odd = min | 1;

    for level in (lowest_odd..=max).rev() {
        let mut i = 0;
        while i < runs.len() {
            if runs[i].level < level {
                i += 1;
                continue;
            }
            let start = i;
            while i < runs.len() && runs[i].level >= level {
                i += 1;
            }
            let span = &mut runs[start..i];
            span.reverse();
            for run in span {
                run.reversed = !run.reversed;
            }
        }
    }
}

/// Rule L3: carve a reversed run into grapheme-safe pieces, in visual
/// order.
///
/// Multi-code-point clusters keep their logical order and become forward
/// runs; stretches of single-code-point clusters stay reversed. Forward
/// runs are returned unchanged.
pub fn split_graphemes(text: &[char], run: &ReorderedRun) -> Vec<ReorderedRun> {
    if !run.reversed {
        return vec![run.clone()];
    }

    let base = run.range.start;
    let mut pieces: Vec<ReorderedRun> = Vec::new();
    for cluster in grapheme_clusters(&text[run.range.clone()]) {
        let range = base + cluster.range.start..base + cluster.range.end;
        if cluster.len() > 1 {
            pieces.push(ReorderedRun {
                range,
                level: run.level,
                reversed: false,
            });
            continue;
        }
        match pieces.last_mut() {
            Some(prev) if prev.reversed => prev.range.end = range.end,
            _ => pieces.push(ReorderedRun {
                range,
                level: run.level,
                reversed: true,
            }),
        }
    }

    pieces.reverse();
    pieces
}

/// Visual order of the logical positions covered by `runs`.
pub fn visual_positions(runs: &[ReorderedRun]) -> Vec<usize> {
    let mut out = Vec::new();
    for run in runs {
        if run.reversed {
            out.extend(run.range.clone().rev());
        } else {
            out.extend(run.range.clone());
        }
    }
    out
}
