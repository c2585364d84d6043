//! Plain-text excerpts from Markdown bodies.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Default excerpt length in characters.
pub const EXCERPT_LENGTH: usize = 140;

/// Build a plain-text excerpt of at most `max_chars` characters.
///
/// Code blocks and raw HTML are skipped; inline code keeps its text.
/// Longer text is cut on a word boundary and ends with `…`.
pub fn excerpt(markdown: &str, max_chars: usize) -> String {
    prune(&plain_text(markdown), max_chars)
}

/// Flatten Markdown into whitespace-collapsed plain text.
fn plain_text(markdown: &str) -> String {
    let mut raw = String::with_capacity(markdown.len());
    let mut in_code_block = false;

    for event in Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text) | Event::Code(text) if !in_code_block => raw.push_str(&text),
            Event::SoftBreak | Event::HardBreak => raw.push(' '),
            Event::End(
                TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::TableCell,
            ) => raw.push(' '),
            _ => {}
        }
    }

    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to whole words fitting in `max_chars`, appending `…`.
fn prune(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut out = String::new();
    let mut len = 0;
    for word in text.split(' ') {
        let word_len = word.chars().count();
        let needed = if len == 0 { word_len } else { len + 1 + word_len };
        if needed > max_chars {
            break;
        }
        if len > 0 {
            out.push(' ');
        }
        out.push_str(word);
        len = needed;
    }

    // A single word longer than the limit
    if out.is_empty() {
        out = text.chars().take(max_chars).collect();
    }

    out.push('…');
    out
}
