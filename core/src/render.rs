//! Indented XML serialization for documents and subtrees.
//!
//! # Design
//! Walks the DOM directly: elements with no children collapse to `<name/>`,
//! text-only elements render on one line, anything else goes block-wise with
//! two-space indentation. Whitespace-only text between block children is
//! dropped. Names are emitted as local parts — namespace declarations from
//! parsed input are not re-emitted.

use sxd_document::dom::{ChildOfElement, ChildOfRoot, Document, Element};

const INDENT: &str = "  ";

/// Render a whole document: XML declaration plus the root children.
pub(crate) fn document_to_string(document: &Document<'_>) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    for child in document.root().children() {
        match child {
            ChildOfRoot::Element(element) => write_element(&mut out, &element, 0),
            ChildOfRoot::Comment(comment) => {
                out.push_str("<!--");
                out.push_str(comment.text());
                out.push_str("-->");
            }
            ChildOfRoot::ProcessingInstruction(pi) => write_pi(&mut out, pi.target(), pi.value()),
        }
        out.push('\n');
    }
    out
}

/// Render an element subtree without a declaration.
pub(crate) fn element_to_string(element: &Element<'_>) -> String {
    let mut out = String::new();
    write_element(&mut out, element, 0);
    out
}

fn write_element(out: &mut String, element: &Element<'_>, depth: usize) {
    out.push('<');
    out.push_str(element.name().local_part());
    for attribute in element.attributes() {
        out.push(' ');
        out.push_str(attribute.name().local_part());
        out.push_str("=\"");
        push_escaped(out, attribute.value(), true);
        out.push('"');
    }

    let children = element.children();
    if children.is_empty() {
        out.push_str("/>");
        return;
    }

    let text_only = children
        .iter()
        .all(|child| matches!(child, ChildOfElement::Text(_)));
    if text_only {
        out.push('>');
        for child in &children {
            if let ChildOfElement::Text(text) = child {
                push_escaped(out, text.text(), false);
            }
        }
        out.push_str("</");
        out.push_str(element.name().local_part());
        out.push('>');
        return;
    }

    out.push('>');
    for child in children {
        match child {
            ChildOfElement::Element(inner) => {
                push_line_indent(out, depth + 1);
                write_element(out, &inner, depth + 1);
            }
            ChildOfElement::Text(text) => {
                // Whitespace between block children is formatting noise.
                let trimmed = text.text().trim();
                if !trimmed.is_empty() {
                    push_line_indent(out, depth + 1);
                    push_escaped(out, trimmed, false);
                }
            }
            ChildOfElement::Comment(comment) => {
                push_line_indent(out, depth + 1);
                out.push_str("<!--");
                out.push_str(comment.text());
                out.push_str("-->");
            }
            ChildOfElement::ProcessingInstruction(pi) => {
                push_line_indent(out, depth + 1);
                write_pi(out, pi.target(), pi.value());
            }
        }
    }
    push_line_indent(out, depth);
    out.push_str("</");
    out.push_str(element.name().local_part());
    out.push('>');
}

fn write_pi(out: &mut String, target: &str, value: Option<&str>) {
    out.push_str("<?");
    out.push_str(target);
    if let Some(value) = value {
        out.push(' ');
        out.push_str(value);
    }
    out.push_str("?>");
}

fn push_line_indent(out: &mut String, depth: usize) {
    out.push('\n');
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

fn push_escaped(out: &mut String, text: &str, attribute: bool) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}
