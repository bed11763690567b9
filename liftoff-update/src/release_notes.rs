//! Release notes sanitizing: markdown in, plain text out.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip markdown formatting, keeping the readable text.
///
/// Paragraphs and headings are separated by blank lines, list items are
/// prefixed with `- `, and link/image targets are dropped (their text is
/// kept). Raw HTML is removed.
pub fn to_plain_text(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(markdown, options);

    let mut out = String::new();
    for event in parser {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            Event::Start(Tag::Item) => {
                ensure_line_start(&mut out);
                out.push_str("- ");
            }
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::CodeBlock) => {
                ensure_blank_line(&mut out);
            }
            Event::End(TagEnd::Item | TagEnd::TableRow | TagEnd::TableHead) => {
                ensure_line_start(&mut out);
            }
            Event::End(TagEnd::TableCell) => out.push('\t'),
            Event::End(TagEnd::List(_)) => ensure_blank_line(&mut out),
            Event::TaskListMarker(done) => out.push_str(if done { "[x] " } else { "[ ] " }),
            Event::Rule => ensure_blank_line(&mut out),
            _ => {}
        }
    }

    out.trim().to_string()
}

fn ensure_line_start(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn ensure_blank_line(out: &mut String) {
    if out.is_empty() {
        return;
    }
    ensure_line_start(out);
    if !out.ends_with("\n\n") {
        out.push('\n');
    }
}
