//! Rendering a DOM subtree to line-structured text.

use scraper::node::Node;
use scraper::ElementRef;

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "form", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table",
    "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "template", "svg", "button"];

/// Renders the text of `root` with one line per block element.
///
/// A heading opens a new section and is preceded by two blank lines, the
/// same break that closes a labeled feature block. Whitespace inside a line
/// is collapsed and runs of blank lines are capped at two.
#[must_use]
pub fn render_text(root: ElementRef<'_>) -> String {
    let mut raw = String::new();
    render_into(root, &mut raw);
    tidy_lines(&raw)
}

fn render_into(el: ElementRef<'_>, out: &mut String) {
    let name = el.value().name();
    if SKIPPED_TAGS.contains(&name) {
        return;
    }

    let heading = HEADING_TAGS.contains(&name);
    let block = heading || BLOCK_TAGS.contains(&name);
    if heading {
        break_line(out);
        out.push_str("\n\n");
    } else if block {
        break_line(out);
    }

    for child in el.children() {
        match child.value() {
            Node::Text(text) => push_inline(out, text),
            Node::Element(inner) if inner.name() == "br" => out.push('\n'),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    render_into(child_el, out);
                }
            }
            _ => {}
        }
    }

    if block {
        break_line(out);
    }
}

/// Ends the current line unless it is already ended.
fn break_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

/// Source line breaks inside text nodes are layout, not structure.
fn push_inline(out: &mut String, text: &str) {
    if text.trim().is_empty() {
        if !out.is_empty() && !out.ends_with(['\n', ' ']) {
            out.push(' ');
        }
        return;
    }
    out.extend(text.chars().map(|c| if c == '\n' || c == '\r' { ' ' } else { c }));
}

fn tidy_lines(raw: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut blank_run = 0usize;

    for line in raw.lines() {
        let collapsed = line
            .split(|c: char| c.is_whitespace() || c == '\u{00A0}')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        if collapsed.is_empty() {
            blank_run += 1;
            if blank_run <= 2 && !lines.is_empty() {
                lines.push(String::new());
            }
        } else {
            blank_run = 0;
            lines.push(collapsed);
        }
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}
