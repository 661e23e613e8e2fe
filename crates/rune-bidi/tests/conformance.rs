use anyhow::Result;
use rune_bidi::{
    BaseDirection, BidiSubrange, bidi_levels, bidi_subranges, bidi_subranges_with_level,
    reordered_indices, visual_string,
};

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn render<'a>(subranges: impl IntoIterator<Item = BidiSubrange<'a>>) -> Vec<String> {
    subranges.into_iter().map(|s| s.to_string()).collect()
}

#[test]
fn l_on_r_keeps_visual_order() -> Result<()> {
    let text = chars("a!\u{05D0}");
    assert_eq!(bidi_levels(&text, None)?, [Some(0), Some(0), Some(1)]);
    assert_eq!(reordered_indices(&text, None)?, [0, 1, 2]);
    assert_eq!(visual_string("a!\u{05D0}", BaseDirection::Auto), "a!\u{05D0}");
    Ok(())
}

#[test]
fn embedding_is_reversed_and_controls_are_dropped() -> Result<()> {
    // abc RLE <hebrew> PDF ghi
    let text = &chars("abc\u{202B}\u{05D3}\u{05D4}\u{05D5}\u{202C}ghi");
    let out: Vec<BidiSubrange<'_>> = bidi_subranges(text).collect();
    assert_eq!(render(out.clone()), ["abc", "\u{05D5}\u{05D4}\u{05D3}", "ghi"]);
    assert!(out.iter().all(|s| !s.logical_text().contains(&'\u{202B}')));
    assert!(out.iter().all(|s| !s.logical_text().contains(&'\u{202C}')));

    let levels = bidi_levels(text, None)?;
    assert_eq!(levels[3], None);
    assert_eq!(levels[4], Some(1));
    assert_eq!(levels[7], None);
    Ok(())
}

#[test]
fn latin_inside_rle_is_raised_not_reversed() {
    // Strong L inside an RTL embedding resolves to level 2.
    let text = &chars("abc\u{202B}DEF\u{202C}ghi");
    assert_eq!(render(bidi_subranges(text)), ["abc", "DEF", "ghi"]);
    let levels = bidi_levels(text, None).unwrap_or_default();
    assert_eq!(levels[4], Some(2));
}

#[test]
fn override_reverses_latin() {
    // abc RLO DEF PDF ghi
    let text = &chars("abc\u{202E}DEF\u{202C}ghi");
    assert_eq!(render(bidi_subranges(text)), ["abc", "FED", "ghi"]);
}

#[test]
fn unmatched_isolate_does_not_panic() -> Result<()> {
    let text = chars("a\u{2067}\u{05D0}b");
    assert_eq!(bidi_levels(&text, None)?, [Some(0), Some(0), Some(1), Some(2)]);
    assert_eq!(visual_string("a\u{2067}\u{05D0}b", BaseDirection::Auto), "ab\u{05D0}");
    Ok(())
}

#[test]
fn unmatched_pdi_does_not_panic() {
    assert_eq!(visual_string("a\u{2069}b", BaseDirection::Auto), "ab");
}

#[test]
fn brackets_resolve_to_embedding_without_context() -> Result<()> {
    // RTL paragraph, L inside the brackets, R before them.
    let text = &chars("\u{05D0}(abc)");
    assert_eq!(bidi_levels(text, None)?, [Some(1), Some(1), Some(2), Some(2), Some(2), Some(1)]);
    assert_eq!(render(bidi_subranges(text)), ["(", "abc", ")", "\u{05D0}"]);
    Ok(())
}

#[test]
fn brackets_follow_established_context() -> Result<()> {
    // LTR paragraph, R inside and R before: the brackets become R.
    let text = &chars("\u{05D0}(\u{05D1})");
    assert_eq!(bidi_levels(text, Some(0))?, [Some(1); 4]);
    let out: String = bidi_subranges_with_level(text, 0)?
        .map(|s| s.to_string())
        .collect();
    assert_eq!(out, "(\u{05D1})\u{05D0}");
    Ok(())
}

#[test]
fn brackets_with_matching_content() -> Result<()> {
    // LTR paragraph, L inside: brackets stay L.
    let text = chars("\u{05D0}(abc)");
    assert_eq!(
        bidi_levels(&text, Some(0))?,
        [Some(1), Some(0), Some(0), Some(0), Some(0), Some(0)]
    );
    Ok(())
}

#[test]
fn nested_brackets_see_the_resolved_outer_pair() -> Result<()> {
    // The outer pair resolves to L, which is the context of the inner pair.
    let text = chars("\u{05D0}([\u{05D1}]a)");
    let levels: Vec<u8> = bidi_levels(&text, Some(0))?.into_iter().flatten().collect();
    assert_eq!(levels, [1, 0, 0, 1, 0, 0, 0]);
    assert_eq!(reordered_indices(&text, Some(0))?, [0, 1, 2, 3, 4, 5, 6]);

    let text = chars("a[(b)\u{05D1}]");
    let levels: Vec<u8> = bidi_levels(&text, Some(1))?.into_iter().flatten().collect();
    assert_eq!(levels, [2, 1, 1, 2, 1, 1, 1]);
    Ok(())
}

#[test]
fn bracket_with_combining_mark_is_mirrored() {
    let visual = visual_string("\u{05D0}(\u{0301}\u{05D1})", BaseDirection::Auto);
    assert_eq!(visual, "(\u{05D1})\u{0301}\u{05D0}");
    let plain = visual_string("\u{05D0}(\u{05D1})", BaseDirection::Auto);
    assert_eq!(plain, "(\u{05D1})\u{05D0}");
}

#[test]
fn combining_marks_keep_logical_order() {
    // gimel follows bet + dagesh
    let visual = visual_string("\u{05D0}\u{05D1}\u{05BC}\u{05D2}", BaseDirection::Auto);
    assert_eq!(visual, "\u{05D2}\u{05D1}\u{05BC}\u{05D0}");
}

#[test]
fn numbers_keep_their_order_in_rtl() {
    assert_eq!(
        visual_string("\u{05D0} 123 \u{05D1}", BaseDirection::Auto),
        "\u{05D1} 123 \u{05D0}"
    );
    // Arabic letters turn following European digits into AN.
    assert_eq!(
        visual_string("\u{0627}\u{0628} 45", BaseDirection::Auto),
        "45 \u{0628}\u{0627}"
    );
}

#[test]
fn nested_isolates() -> Result<()> {
    // a RLI b LRI c PDI d PDI e, with Hebrew for b and d
    let text = chars("a\u{2067}\u{05D1}\u{2066}c\u{2069}\u{05D3}\u{2069}e");
    assert_eq!(
        bidi_levels(&text, None)?,
        [Some(0), Some(0), Some(1), Some(1), Some(2), Some(1), Some(1), Some(0), Some(0)]
    );
    assert_eq!(
        visual_string("a\u{2067}\u{05D1}\u{2066}c\u{2069}\u{05D3}\u{2069}e", BaseDirection::Auto),
        "a\u{05D3}c\u{05D1}e"
    );
    Ok(())
}

#[test]
fn caller_level_applies_to_every_paragraph() -> Result<()> {
    let text = chars("ab\ncd");
    let levels = bidi_levels(&text, Some(1))?;
    assert_eq!(levels, [Some(2), Some(2), Some(1), Some(2), Some(2)]);
    Ok(())
}

#[test]
fn invalid_level_is_rejected() {
    let text = chars("abc");
    assert!(bidi_subranges_with_level(&text, 2).is_err());
    assert!(bidi_levels(&text, Some(200)).is_err());
}
