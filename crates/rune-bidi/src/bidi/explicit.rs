//! 3.3.2 Explicit Levels and Directions
//!
//! http://www.unicode.org/reports/tr9/#Explicit_Levels_and_Directions

use super::class::{BidiClass, removed_by_x9};
use super::record::{BidiRecord, MAX_DEPTH};

use BidiClass::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OverrideStatus {
    Neutral,
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy)]
struct StatusEntry {
    level: u8,
    override_status: OverrideStatus,
    isolate: bool,
}

impl StatusEntry {
    /// Apply this entry's directional override to `class` (X5a, X6, X6a).
    fn override_class(self, class: BidiClass) -> BidiClass {
        match self.override_status {
            OverrideStatus::Neutral => class,
            OverrideStatus::Ltr => L,
            OverrideStatus::Rtl => R,
        }
    }

    fn next_odd_level(self) -> u8 {
        (self.level + 1) | 1
    }

    fn next_even_level(self) -> u8 {
        (self.level + 2) & !1
    }
}

/// The directional status stack of X1, bounded at `MAX_DEPTH + 2` entries.
struct DirectionalStatus {
    entries: Vec<StatusEntry>,
}

impl DirectionalStatus {
    fn new(para_level: u8) -> Self {
        let mut entries = Vec::with_capacity(MAX_DEPTH as usize + 2);
        entries.push(StatusEntry {
            level: para_level,
            override_status: OverrideStatus::Neutral,
            isolate: false,
        });
        Self { entries }
    }

    fn top(&self) -> StatusEntry {
        // The initial entry is never popped.
        self.entries[self.entries.len() - 1]
    }

    fn push(&mut self, entry: StatusEntry) {
        debug_assert!(entry.level <= MAX_DEPTH);
        debug_assert!(self.entries.len() < MAX_DEPTH as usize + 2);
        self.entries.push(entry);
    }

    fn pop(&mut self) {
        if self.entries.len() > 1 {
            self.entries.pop();
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Rules P2 and P3: the level implied by the first strong character,
/// skipping isolate initiator ... matching PDI spans.
///
/// With `stop_at_unmatched_pdi`, the scan ends at the first PDI that closes
/// an isolate opened before `classes` starts (the FSI lookahead of X5c).
pub(crate) fn first_strong_level(classes: &[BidiClass], stop_at_unmatched_pdi: bool) -> Option<u8> {
    let mut isolate_depth = 0usize;
    for &class in classes {
        match class {
            LRI | RLI | FSI => isolate_depth += 1,
            PDI if isolate_depth > 0 => isolate_depth -= 1,
            PDI if stop_at_unmatched_pdi => return None,
            L if isolate_depth == 0 => return Some(0),
            R | AL if isolate_depth == 0 => return Some(1),
            _ => {}
        }
    }
    None
}

/// Paragraph embedding level from P2/P3, defaulting to 0.
pub fn paragraph_level(classes: &[BidiClass]) -> u8 {
    first_strong_level(classes, false).unwrap_or(0)
}

/// Apply X1-X8 to one paragraph, then drop the characters removed by X9.
///
/// `classes` holds the original class of every code point in `text`.
/// Isolate initiators and PDIs are kept; they are needed for run-sequence
/// chaining and are only dropped when output is produced.
pub fn explicit_levels(text: &[char], classes: &[BidiClass], para_level: u8) -> Vec<BidiRecord> {
    assert_eq!(text.len(), classes.len());

    // X1
    let mut stack = DirectionalStatus::new(para_level);
    let mut overflow_isolates = 0usize;
    let mut overflow_embeddings = 0usize;
    let mut valid_isolates = 0usize;

    let mut records = Vec::with_capacity(text.len());

    for (index, (&cp, &class)) in text.iter().zip(classes).enumerate() {
        // Retained explicit formatting characters take the level of the
        // stack top at the point they are encountered.
        let mut record = BidiRecord::new(index, cp, stack.top().level, class);

        match class {
            // X2-X5
            RLE | LRE | RLO | LRO => {
                let top = stack.top();
                let level = if matches!(class, RLE | RLO) {
                    top.next_odd_level()
                } else {
                    top.next_even_level()
                };
                let override_status = match class {
                    RLO => OverrideStatus::Rtl,
                    LRO => OverrideStatus::Ltr,
                    _ => OverrideStatus::Neutral,
                };
                if level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embeddings == 0 {
                    stack.push(StatusEntry {
                        level,
                        override_status,
                        isolate: false,
                    });
                } else if overflow_isolates == 0 {
                    overflow_embeddings += 1;
                    log::trace!("embedding overflow at {index}");
                }
            }

            // X5a-X5c
            RLI | LRI | FSI => {
                let top = stack.top();
                record.class = top.override_class(class);
                let rtl = match class {
                    RLI => true,
                    LRI => false,
                    _ => first_strong_level(&classes[index + 1..], true) == Some(1),
                };
                let level = if rtl {
                    top.next_odd_level()
                } else {
                    top.next_even_level()
                };
                if level <= MAX_DEPTH && overflow_isolates == 0 && overflow_embeddings == 0 {
                    valid_isolates += 1;
                    stack.push(StatusEntry {
                        level,
                        override_status: OverrideStatus::Neutral,
                        isolate: true,
                    });
                } else {
                    overflow_isolates += 1;
                    log::trace!("isolate overflow at {index}");
                }
            }

            // X6a
            PDI => {
                if overflow_isolates > 0 {
                    overflow_isolates -= 1;
                } else if valid_isolates == 0 {
                    record.unmatched_pdi = true;
                } else {
                    overflow_embeddings = 0;
                    while !stack.top().isolate {
                        stack.pop();
                    }
                    stack.pop();
                    valid_isolates -= 1;
                }
                let top = stack.top();
                record.level = top.level;
                record.class = top.override_class(class);
            }

            // X7
            PDF => {
                if overflow_isolates == 0 {
                    if overflow_embeddings > 0 {
                        overflow_embeddings -= 1;
                    } else if !stack.top().isolate && stack.len() >= 2 {
                        stack.pop();
                    }
                }
                record.level = stack.top().level;
            }

            // X8
            B => record.level = para_level,

            BN => {}

            // X6
            _ => record.class = stack.top().override_class(class),
        }

        records.push(record);
    }

    // X9
    records.retain(|r| !removed_by_x9(r.original_class));
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bidi::class::bidi_class;

    fn resolve(text: &str, para_level: u8) -> Vec<BidiRecord> {
        let chars: Vec<char> = text.chars().collect();
        let classes: Vec<BidiClass> = chars.iter().map(|&c| bidi_class(c)).collect();
        explicit_levels(&chars, &classes, para_level)
    }

    fn levels(records: &[BidiRecord]) -> Vec<u8> {
        records.iter().map(|r| r.level).collect()
    }

    #[test]
    fn p2_p3_first_strong() {
        assert_eq!(paragraph_level(&[ON, L, R]), 0);
        assert_eq!(paragraph_level(&[ON, AL, L]), 1);
        assert_eq!(paragraph_level(&[EN, WS, R]), 1);
        assert_eq!(paragraph_level(&[ON, EN]), 0);
        assert_eq!(paragraph_level(&[]), 0);
    }

    #[test]
    fn p2_skips_isolates() {
        assert_eq!(paragraph_level(&[RLI, R, PDI, L]), 0);
        assert_eq!(paragraph_level(&[LRI, L, PDI, R]), 1);
        // An unmatched initiator hides everything after it.
        assert_eq!(paragraph_level(&[LRI, R]), 0);
    }

    #[test]
    fn fsi_lookahead_stops_at_matching_pdi() {
        assert_eq!(first_strong_level(&[ON, PDI, R], true), None);
        assert_eq!(first_strong_level(&[ON, PDI, R], false), Some(1));
        assert_eq!(first_strong_level(&[LRI, L, PDI, R, PDI], true), Some(1));
    }

    #[test]
    fn embedding_raises_level_and_is_removed() {
        let records = resolve("ab\u{202B}cd\u{202C}ef", 0);
        assert_eq!(records.len(), 6);
        assert_eq!(levels(&records), [0, 0, 1, 1, 0, 0]);
        assert_eq!(records[2].index, 3);
        assert!(records.iter().all(|r| !removed_by_x9(r.original_class)));
    }

    #[test]
    fn override_rewrites_classes() {
        let records = resolve("\u{202E}ab\u{202C}c", 0);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].class, R);
        assert_eq!(records[1].class, R);
        assert_eq!(records[0].original_class, L);
        assert_eq!(records[2].class, L);
        assert_eq!(levels(&records), [1, 1, 0]);
    }

    #[test]
    fn isolates_take_outer_level() {
        // a RLI b PDI c
        let records = resolve("a\u{2067}b\u{2069}c", 0);
        assert_eq!(levels(&records), [0, 0, 1, 0, 0]);
        assert!(!records[3].unmatched_pdi);
    }

    #[test]
    fn fsi_resolves_direction_from_content() {
        let rtl = resolve("\u{2068}\u{05D0}\u{2069}", 0);
        assert_eq!(levels(&rtl), [0, 1, 0]);
        let ltr = resolve("\u{2068}a\u{2069}", 1);
        assert_eq!(levels(&ltr), [1, 2, 1]);
    }

    #[test]
    fn unmatched_pdi_is_flagged() {
        let records = resolve("a\u{2069}b", 0);
        assert!(records[1].unmatched_pdi);
        assert_eq!(levels(&records), [0, 0, 0]);
    }

    #[test]
    fn pdi_closes_open_embeddings() {
        // RLI LRE a PDI b
        let records = resolve("\u{2067}\u{202A}a\u{2069}b", 0);
        assert_eq!(levels(&records), [0, 2, 0, 0]);
    }

    #[test]
    fn pdf_does_not_close_isolate() {
        // RLI a PDF b PDI
        let records = resolve("\u{2067}a\u{202C}b\u{2069}", 0);
        assert_eq!(levels(&records), [0, 1, 1, 0]);
    }

    #[test]
    fn paragraph_separator_takes_paragraph_level() {
        let records = resolve("\u{202B}a\n", 0);
        assert_eq!(levels(&records), [1, 0]);
    }

    #[test]
    fn embedding_overflow_is_silent() {
        let mut text = String::new();
        for _ in 0..130 {
            text.push('\u{202A}'); // LRE
        }
        text.push('a');
        for _ in 0..130 {
            text.push('\u{202C}'); // PDF
        }
        text.push('b');
        let records = resolve(&text, 0);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].level, 124);
        assert_eq!(records[1].level, 0);
        assert!(records.iter().all(|r| r.level <= MAX_DEPTH));
    }

    #[test]
    fn isolate_overflow_is_silent() {
        let mut text = String::new();
        for _ in 0..70 {
            text.push('\u{2067}'); // RLI
            text.push('\u{2066}'); // LRI
        }
        text.push('x');
        let records = resolve(&text, 0);
        assert!(records.iter().all(|r| r.level <= MAX_DEPTH));
        // Each initiator climbs one level until 125 is reached.
        assert_eq!(records.last().map(|r| r.level), Some(MAX_DEPTH));
    }

    #[test]
    fn resolution_is_idempotent() {
        let text = "abc \u{2067}\u{05D0}\u{05D1} 123\u{2069} (def)";
        assert_eq!(resolve(text, 0), resolve(text, 0));
    }
}
