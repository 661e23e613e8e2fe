//! 3.3.6 Resolving Implicit Levels
//!
//! http://www.unicode.org/reports/tr9/#Resolving_Implicit_Levels

use super::class::BidiClass;
use super::runs::SequenceView;

use BidiClass::*;

/// Rules I1 and I2.
pub fn resolve_implicit_levels(seq: &mut SequenceView<'_>) {
    let even = seq.level % 2 == 0;
    for i in 0..seq.len() {
        let record = seq.record_mut(i);
        let bump = match (even, record.class) {
            (true, R) => 1,
            (true, EN | AN) => 2,
            (false, L | EN | AN) => 1,
            _ => 0,
        };
        record.level += bump;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidi::record::BidiRecord;
    use crate::bidi::runs::{LevelRun, RunSequence};

    fn levels(classes: &[BidiClass], level: u8) -> Vec<u8> {
        let mut records: Vec<BidiRecord> = classes
            .iter()
            .enumerate()
            .map(|(i, &class)| BidiRecord::new(i, 'x', level, class))
            .collect();
        let runs = [LevelRun {
            range: 0..records.len(),
            used: true,
        }];
        let sequence = RunSequence {
            runs: vec![0],
            level,
            sos: L,
            eos: L,
        };
        resolve_implicit_levels(&mut SequenceView::new(&mut records, &runs, &sequence));
        records.iter().map(|r| r.level).collect()
    }

    #[test]
    fn i1_even_levels() {
        assert_eq!(levels(&[L, R, EN, AN], 0), [0, 1, 2, 2]);
        assert_eq!(levels(&[L, R, EN, AN], 2), [2, 3, 4, 4]);
    }

    #[test]
    fn i2_odd_levels() {
        assert_eq!(levels(&[L, R, EN, AN], 1), [2, 1, 2, 2]);
    }

    #[test]
    fn highest_level_stays_in_bounds() {
        assert_eq!(levels(&[L, EN], 125), [126, 126]);
        assert_eq!(levels(&[EN, R], 124), [126, 125]);
    }
}
