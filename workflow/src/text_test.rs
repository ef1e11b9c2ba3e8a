use super::*;

// =============================================================
// count_words
// =============================================================

#[test]
fn count_words_empty_is_zero() {
    assert_eq!(count_words(""), 0);
    assert_eq!(count_words("   \n\t "), 0);
}

#[test]
fn count_words_ignores_repeated_whitespace() {
    assert_eq!(count_words("a  b\tc\n"), 3);
}

#[test]
fn count_words_counts_numbers_and_symbols() {
    assert_eq!(count_words("n = 42 ( p < 0.05 )"), 8);
}

#[test]
fn count_words_handles_unicode_whitespace() {
    assert_eq!(count_words("alpha\u{00A0}beta\u{2003}gamma"), 3);
}

#[test]
fn count_words_is_stable_under_collapse() {
    for sample in ["", " lead", "trail ", "a \u{3000} b", "x\n\n\ny\tz", "Study of X"] {
        assert_eq!(count_words(sample), count_words(&collapse_whitespace(sample)));
    }
}

// =============================================================
// plain_text / markdown_word_count
// =============================================================

#[test]
fn plain_text_strips_markup_but_keeps_words() {
    assert_eq!(plain_text("# Intro\n\nSome **bold** text."), "Intro Some bold text.");
}

#[test]
fn inline_emphasis_does_not_split_words() {
    assert_eq!(markdown_word_count("a*b*"), 1);
}

#[test]
fn list_items_are_separate_words() {
    assert_eq!(markdown_word_count("- one\n- two\n- three"), 3);
}

// =============================================================
// render_markdown_html
// =============================================================

#[test]
fn render_drops_raw_html() {
    let html = render_markdown_html("Hello <script>alert(1)</script> world");
    assert!(!html.contains("<script>"));
    assert!(html.contains("Hello"));
}

#[test]
fn render_keeps_basic_formatting() {
    let html = render_markdown_html("**bold**");
    assert!(html.contains("<strong>bold</strong>"));
}

#[test]
fn render_empties_script_link_targets() {
    let html = render_markdown_html("[click](javascript:alert(document.cookie))");
    assert!(!html.contains("javascript:"));
    assert!(html.contains(">click</a>"));
}

#[test]
fn render_empties_obfuscated_and_image_targets() {
    for source in [
        "[x](JaVaScRiPt:alert(1))",
        "[x](javascript&#58;alert(1))",
        "<javascript:alert(1)>",
        "![img](data:text/html;base64,PHNjcmlwdD4=)",
        "[x](vbscript:msgbox)",
    ] {
        let html = render_markdown_html(source).to_ascii_lowercase();
        assert!(!html.contains(r#"href="javascript"#), "{source} -> {html}");
        assert!(!html.contains(r#"src="data:"#), "{source} -> {html}");
        assert!(!html.contains(r#"href="vbscript"#), "{source} -> {html}");
    }
}

#[test]
fn render_keeps_web_mail_and_relative_targets() {
    let html = render_markdown_html("[a](https://example.org/x) [b](mailto:ed@example.org) [c](/papers/7)");
    assert!(html.contains(r#"href="https://example.org/x""#));
    assert!(html.contains(r#"href="mailto:ed@example.org""#));
    assert!(html.contains(r#"href="/papers/7""#));
}

#[test]
fn safe_url_reads_scheme_through_whitespace() {
    assert!(!is_safe_url("java\tscript:alert(1)"));
    assert!(!is_safe_url(" javascript:alert(1)"));
    assert!(is_safe_url("HTTP://example.org"));
    assert!(is_safe_url("notes/a:b"));
    assert!(is_safe_url("#section"));
}
