//! Documentation-comment template.
//!
//! Doc text is markup: callers escape free text (schema descriptions) with
//! [`escape_xml`] before putting it in a [`DocComment`], and may embed
//! `<see cref="..." />` references directly.
use crate::ir::DocComment;

pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

/// `///` lines of one doc comment, without indentation.
pub fn doc_lines(doc: &DocComment) -> Vec<String> {
    let mut lines = Vec::new();
    element(&mut lines, "<summary>", &doc.summary, "</summary>");
    for (name, text) in &doc.params {
        element(&mut lines, &format!("<param name=\"{name}\">"), text, "</param>");
    }
    if let Some(text) = &doc.returns {
        element(&mut lines, "<returns>", text, "</returns>");
    }
    for (cref, text) in &doc.exceptions {
        element(&mut lines, &format!("<exception cref=\"{cref}\">"), text, "</exception>");
    }
    lines
}

fn element(lines: &mut Vec<String>, open: &str, text: &str, close: &str) {
    lines.push(format!("/// {open}"));
    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            lines.push("///".to_string());
        } else {
            lines.push(format!("/// {line}"));
        }
    }
    lines.push(format!("/// {close}"));
}

/// Leading `//` lines for a free-form header (copyright notice).
pub fn header_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| match line.trim_end() {
            "" => "//".to_string(),
            line => format!("// {line}"),
        })
        .collect()
}
