//! Word counting and Markdown helpers for submission content.
//!
//! Content sections are written in Markdown. Word limits are enforced on the
//! plain text the reader sees, and previews render through a parser that drops
//! raw HTML and neutralizes link targets outside `http`, `https` and `mailto`,
//! so pasted markup never reaches the DOM.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

/// Count whitespace-separated tokens. Numbers and symbols count as words.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Collapse every run of Unicode whitespace into a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract reader-visible text from Markdown.
///
/// Block boundaries and line breaks become spaces; inline emphasis does not,
/// so `a*b*` stays one word.
pub fn plain_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new_ext(markdown, markdown_options()) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak | Event::Rule => out.push(' '),
            Event::End(tag) if !is_inline_end(&tag) => out.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&out)
}

/// Word count of a Markdown section as the reader sees it.
pub fn markdown_word_count(markdown: &str) -> usize {
    count_words(&plain_text(markdown))
}

/// Render Markdown to HTML with raw inline/block HTML removed and unsafe
/// link or image targets emptied.
pub fn render_markdown_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, markdown_options()).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Link { link_type, dest_url: safe_dest(dest_url), title, id }))
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Image { link_type, dest_url: safe_dest(dest_url), title, id }))
        }
        other => Some(other),
    });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Whether a link target may be rendered as-is.
///
/// Relative targets pass. Absolute targets need an `http`, `https` or `mailto`
/// scheme. Whitespace and control characters are ignored when reading the
/// scheme, as browsers do.
pub fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url.chars().filter(|c| !c.is_whitespace() && !c.is_control()).collect();
    let Some(colon) = cleaned.find(':') else {
        return true;
    };
    let scheme = &cleaned[..colon];
    if scheme.contains(['/', '?', '#']) {
        return true;
    }
    matches!(scheme.to_ascii_lowercase().as_str(), "http" | "https" | "mailto")
}

fn safe_dest(dest: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&dest) { dest } else { CowStr::Borrowed("") }
}

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options
}

fn is_inline_end(tag: &TagEnd) -> bool {
    matches!(tag, TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image)
}
