//! 3.4 Reordering Resolved Levels, rule L1
//!
//! http://www.unicode.org/reports/tr9/#L1

use super::class::BidiClass;
use super::record::BidiRecord;

use BidiClass::*;

/// Reset segment separators, paragraph separators, and whitespace or
/// isolate controls trailing them or the end of the line, to the
/// paragraph level.
///
/// Works on original classes; `line` holds one line's records in logical
/// order.
pub fn adjust_line_levels(line: &mut [BidiRecord], para_level: u8) {
    let mut trailing: Option<usize> = None;
    for i in 0..line.len() {
        match line[i].original_class {
            B | S => {
                let start = trailing.take().unwrap_or(i);
                for record in &mut line[start..=i] {
                    record.level = para_level;
                }
            }
            WS | FSI | LRI | RLI | PDI => {
                trailing.get_or_insert(i);
            }
            _ => trailing = None,
        }
    }
    if let Some(start) = trailing {
        for record in &mut line[start..] {
            record.level = para_level;
        }
    }
}
