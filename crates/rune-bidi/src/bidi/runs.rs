//! 3.3.3 Preparations for Implicit Processing
//!
//! http://www.unicode.org/reports/tr9/#Preparations_for_Implicit_Processing

use core::ops::Range;
use std::cmp::max;

use super::class::{BidiClass, class_for_level, is_isolate_initiator};
use super::record::BidiRecord;

use BidiClass::*;

/// A maximal run of records sharing one embedding level (BD7).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelRun {
    /// Indices into the paragraph's record buffer.
    pub range: Range<usize>,
    /// Claimed by a run sequence.
    pub used: bool,
}

/// An isolating run sequence (BD13).
///
/// `runs` indexes into the paragraph's level runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSequence {
    pub runs: Vec<usize>,
    pub level: u8,
    /// Start-of-sequence type, `L` or `R`.
    pub sos: BidiClass,
    /// End-of-sequence type, `L` or `R`.
    pub eos: BidiClass,
}

impl RunSequence {
    /// Record indices covered by this sequence, in sequence order.
    pub fn positions(&self, runs: &[LevelRun]) -> Vec<usize> {
        self.runs
            .iter()
            .flat_map(|&run| runs[run].range.clone())
            .collect()
    }

    fn first_record(&self, runs: &[LevelRun]) -> usize {
        runs[self.runs[0]].range.start
    }

    fn last_record(&self, runs: &[LevelRun]) -> usize {
        runs[self.runs[self.runs.len() - 1]].range.end - 1
    }
}

/// Split the X9-filtered records into level runs.
pub fn find_all_runs(records: &[BidiRecord]) -> Vec<LevelRun> {
    let mut runs = Vec::new();
    let Some(first) = records.first() else {
        return runs;
    };

    let mut run_level = first.level;
    let mut run_start = 0;
    for (i, record) in records.iter().enumerate().skip(1) {
        if record.level != run_level {
            runs.push(LevelRun {
                range: run_start..i,
                used: false,
            });
            run_level = record.level;
            run_start = i;
        }
    }
    runs.push(LevelRun {
        range: run_start..records.len(),
        used: false,
    });
    runs
}

/// Record index of the PDI matching the isolate initiator at `initiator`
/// (BD9), if there is one.
pub fn matching_pdi(records: &[BidiRecord], initiator: usize) -> Option<usize> {
    debug_assert!(is_isolate_initiator(records[initiator].original_class));
    let mut depth = 1usize;
    for (i, record) in records.iter().enumerate().skip(initiator + 1) {
        match record.original_class {
            LRI | RLI | FSI => depth += 1,
            PDI => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Chain level runs into isolating run sequences (BD13).
///
/// Every run ends up in exactly one sequence. A sequence ending in an
/// isolate initiator without a matching PDI simply stops there.
pub fn find_run_sequences(records: &[BidiRecord], runs: &mut [LevelRun]) -> Vec<RunSequence> {
    let mut sequences = Vec::new();

    for start in 0..runs.len() {
        if runs[start].used {
            continue;
        }
        runs[start].used = true;
        let level = records[runs[start].range.start].level;
        let mut sequence = RunSequence {
            runs: vec![start],
            level,
            sos: L,
            eos: L,
        };

        loop {
            let last = sequence.last_record(runs);
            if !is_isolate_initiator(records[last].original_class) {
                break;
            }
            let Some(pdi) = matching_pdi(records, last) else {
                break;
            };
            match runs.binary_search_by_key(&pdi, |run| run.range.start) {
                Ok(next) if !runs[next].used => {
                    runs[next].used = true;
                    sequence.runs.push(next);
                }
                _ => break,
            }
        }

        sequences.push(sequence);
    }

    sequences
}

/// Rule X10: determine `sos` and `eos` for every sequence.
///
/// Must run before any level is changed by I1/I2.
pub fn resolve_sos_eos(
    sequences: &mut [RunSequence],
    runs: &[LevelRun],
    records: &[BidiRecord],
    para_level: u8,
) {
    for sequence in sequences.iter_mut() {
        let first = sequence.first_record(runs);
        let last = sequence.last_record(runs);

        let prev_level = if first == 0 {
            para_level
        } else {
            records[first - 1].level
        };
        let next_level = if is_isolate_initiator(records[last].original_class) {
            para_level
        } else {
            records.get(last + 1).map_or(para_level, |r| r.level)
        };

        sequence.sos = class_for_level(max(prev_level, sequence.level));
        sequence.eos = class_for_level(max(next_level, sequence.level));
    }
}

/// A run sequence's records, addressed in sequence order.
///
/// The resolution passes (W1-W7, N0-N2, I1-I2) operate on this view.
pub struct SequenceView<'a> {
    records: &'a mut [BidiRecord],
    positions: Vec<usize>,
    pub level: u8,
    pub sos: BidiClass,
    pub eos: BidiClass,
}

impl<'a> SequenceView<'a> {
    pub fn new(records: &'a mut [BidiRecord], runs: &[LevelRun], sequence: &RunSequence) -> Self {
        Self {
            records,
            positions: sequence.positions(runs),
            level: sequence.level,
            sos: sequence.sos,
            eos: sequence.eos,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn record(&self, i: usize) -> &BidiRecord {
        &self.records[self.positions[i]]
    }

    pub fn record_mut(&mut self, i: usize) -> &mut BidiRecord {
        &mut self.records[self.positions[i]]
    }

    pub fn class(&self, i: usize) -> BidiClass {
        self.record(i).class
    }

    pub fn set_class(&mut self, i: usize, class: BidiClass) {
        self.record_mut(i).class = class;
    }

    /// Record index (in the paragraph buffer) of sequence position `i`.
    pub fn position(&self, i: usize) -> usize {
        self.positions[i]
    }

    /// The strong direction of the sequence's embedding level.
    pub fn embedding_direction(&self) -> BidiClass {
        class_for_level(self.level)
    }
}
