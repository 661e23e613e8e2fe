use anyhow::Result;
use rune_bidi::bidi::class::bidi_class;
use rune_bidi::bidi::explicit::{explicit_levels, paragraph_level};
use rune_bidi::bidi::neutral::find_bracket_pairs;
use rune_bidi::bidi::paragraph::Paragraph;
use rune_bidi::bidi::reorder::{line_runs, reorder_runs};
use rune_bidi::bidi::runs::{SequenceView, find_all_runs, find_run_sequences, resolve_sos_eos};
use rune_bidi::bidi::weak::resolve_weak_types;
use rune_bidi::bidi::{BidiClass, BidiRecord};
use rune_bidi::unicode::paragraph_ranges;
use rune_bidi::{WrapMode, WrappingLineBreaks, bidi_levels, bidi_subranges, reordered_indices};
use unicode_bidi::{BidiInfo, Level};

/// Characters covering every bidi class the algorithm branches on.
const ALPHABET: &[char] = &[
    'a', 'b', '\u{05D0}', '\u{05D1}', '\u{0627}', '1', '2', '\u{0661}', '+', '-', '$', '%', ',',
    '.', ':', '\u{0301}', ' ', '\t', '(', ')', '[', ']', '!', '"', '\u{202A}', '\u{202B}',
    '\u{202D}', '\u{202E}', '\u{202C}', '\u{2066}', '\u{2067}', '\u{2068}', '\u{2069}', '\u{200D}',
    '\n',
];

/// Single-paragraph text without embedding controls, so every code point
/// keeps a level in both implementations.
const ISOLATE_ALPHABET: &[char] = &[
    'a', 'b', '\u{05D0}', '\u{05D1}', '\u{0627}', '1', '2', '\u{0661}', '+', '-', '$', ',', '.',
    '\u{0301}', ' ', '\t', '(', ')', '[', ']', '!', '\u{2066}', '\u{2067}', '\u{2068}',
    '\u{2069}',
];

/// Deterministic pseudo-random texts over `alphabet`.
fn random_texts(alphabet: &[char], count: usize, max_len: u64) -> Vec<Vec<char>> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    (0..count)
        .map(|_| {
            let len = (next() % max_len) as usize;
            (0..len)
                .map(|_| alphabet[(next() % alphabet.len() as u64) as usize])
                .collect()
        })
        .collect()
}

fn corpus() -> Vec<Vec<char>> {
    let mut texts = random_texts(ALPHABET, 300, 40);

    // Deep nesting past the embedding limit.
    let mut deep: Vec<char> = Vec::new();
    for i in 0..140 {
        deep.push(if i % 2 == 0 { '\u{202B}' } else { '\u{2066}' });
        deep.push('x');
    }
    texts.push(deep);
    texts.push("(".repeat(70).chars().chain(")".repeat(70).chars()).collect());
    texts
}

fn resolve_explicit(text: &[char]) -> (u8, Vec<BidiRecord>) {
    let classes: Vec<BidiClass> = text.iter().map(|&c| bidi_class(c)).collect();
    let level = paragraph_level(&classes);
    (level, explicit_levels(text, &classes, level))
}

fn paragraphs(text: &[char]) -> impl Iterator<Item = &[char]> {
    paragraph_ranges(text).into_iter().map(move |r| &text[r])
}

#[test]
fn resolution_is_idempotent() {
    for text in corpus() {
        for paragraph in paragraphs(&text) {
            let first = Paragraph::resolve(paragraph, None);
            let second = Paragraph::resolve(paragraph, None);
            assert_eq!(first.records, second.records, "text {text:?}");
            assert_eq!(first.level, second.level);
        }
    }
}

#[test]
fn levels_stay_in_bounds() -> Result<()> {
    for text in corpus() {
        for level in bidi_levels(&text, None)?.into_iter().flatten() {
            assert!(level <= 126, "level {level} in {text:?}");
        }
    }
    Ok(())
}

#[test]
fn run_sequences_partition_records() {
    for text in corpus() {
        for paragraph in paragraphs(&text) {
            let (_, records) = resolve_explicit(paragraph);
            let mut runs = find_all_runs(&records);
            let sequences = find_run_sequences(&records, &mut runs);
            assert!(runs.iter().all(|r| r.used));

            let mut covered: Vec<usize> = sequences.iter().flat_map(|s| s.positions(&runs)).collect();
            covered.sort_unstable();
            assert_eq!(covered, (0..records.len()).collect::<Vec<_>>(), "text {text:?}");
        }
    }
}

#[test]
fn bracket_pairs_are_well_nested() {
    for text in corpus() {
        for paragraph in paragraphs(&text) {
            let (level, mut records) = resolve_explicit(paragraph);
            let mut runs = find_all_runs(&records);
            let mut sequences = find_run_sequences(&records, &mut runs);
            resolve_sos_eos(&mut sequences, &runs, &records, level);

            for sequence in &sequences {
                let mut view = SequenceView::new(&mut records, &runs, sequence);
                resolve_weak_types(&mut view);
                let pairs = find_bracket_pairs(&view);
                assert!(pairs.len() <= 63);
                assert!(pairs.windows(2).all(|w| w[0].open < w[1].open));
                for a in &pairs {
                    assert!(a.open < a.close);
                    for b in &pairs {
                        let disjoint = a.close < b.open || b.close < a.open;
                        let nested = (a.open < b.open && b.close < a.close)
                            || (b.open < a.open && a.close < b.close);
                        assert!(a == b || disjoint || nested, "{a:?} and {b:?} in {text:?}");
                    }
                }
            }
        }
    }
}

#[test]
fn reordering_twice_restores_runs() {
    for text in corpus() {
        for paragraph in paragraphs(&text) {
            let resolved = Paragraph::resolve(paragraph, None);
            let logical = line_runs(&resolved.line(0..paragraph.len()), false);
            let mut twice = logical.clone();
            reorder_runs(&mut twice);
            reorder_runs(&mut twice);
            assert_eq!(twice, logical, "text {text:?}");
        }
    }
}

#[test]
fn visual_order_is_a_permutation_of_retained_code_points() -> Result<()> {
    for text in corpus() {
        let levels = bidi_levels(&text, None)?;
        let retained: Vec<usize> = (0..text.len()).filter(|&i| levels[i].is_some()).collect();
        let mut order = reordered_indices(&text, None)?;
        order.sort_unstable();
        assert_eq!(order, retained, "text {text:?}");
    }
    Ok(())
}

#[test]
fn subranges_cover_visible_code_points_once() {
    for text in corpus() {
        let mut covered: Vec<usize> = bidi_subranges(&text).flat_map(|s| s.range()).collect();
        covered.sort_unstable();
        let levels = bidi_levels(&text, None).unwrap_or_default();
        let expected: Vec<usize> = (0..text.len())
            .filter(|&i| {
                levels[i].is_some()
                    && !matches!(bidi_class(text[i]), BidiClass::LRI | BidiClass::RLI | BidiClass::FSI | BidiClass::PDI)
            })
            .collect();
        assert_eq!(covered, expected, "text {text:?}");
    }
}

#[test]
fn wrapped_output_has_the_same_code_points() -> Result<()> {
    for text in corpus() {
        let hard: usize = bidi_subranges(&text).map(|s| s.len()).sum();
        let wrapped = rune_bidi::BidiSubranges::new(&text, None, WrappingLineBreaks::new(7, WrapMode::BreakWord))?;
        let mut lines = 0;
        let mut total = 0;
        for sub in wrapped {
            total += sub.len();
            if sub.is_line_break() {
                lines += 1;
            }
        }
        assert_eq!(total, hard, "text {text:?}");
        assert!(total == 0 || lines > 0);
    }
    Ok(())
}

#[test]
fn levels_agree_with_unicode_bidi() -> Result<()> {
    let mut texts = random_texts(ISOLATE_ALPHABET, 2000, 32);
    texts.push(chars_of("\u{05D0}([\u{05D1}]a)"));
    texts.push(chars_of("a[(b)\u{05D1}]"));

    for text in texts {
        let string: String = text.iter().collect();
        for level in [None, Some(0), Some(1)] {
            let info = BidiInfo::new(&string, level.and_then(|l| Level::new(l).ok()));
            let Some(para) = info.paragraphs.first() else {
                continue;
            };
            let expected: Vec<u8> = info
                .reordered_levels_per_char(para, para.range.clone())
                .into_iter()
                .map(|l| l.number())
                .collect();
            let ours: Vec<u8> = bidi_levels(&text, level)?.into_iter().flatten().collect();
            assert_eq!(ours, expected, "text {text:?} at {level:?}");
        }
    }
    Ok(())
}

fn chars_of(s: &str) -> Vec<char> {
    s.chars().collect()
}
