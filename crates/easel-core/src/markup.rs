//! Markup serialization of live nodes.

use crate::document::NodeData;
use crate::{Document, NodeError, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(tag))
}

/// Serializes `node` including its own tag.
pub fn outer_html(document: &Document, node: NodeId) -> Result<String, NodeError> {
    let mut output = String::new();
    write_node(document, node, &mut output)?;
    Ok(output)
}

/// Serializes the children of `node`.
pub fn inner_html(document: &Document, node: NodeId) -> Result<String, NodeError> {
    let mut output = String::new();
    for &child in document.child_nodes(node)? {
        write_node(document, child, &mut output)?;
    }
    Ok(output)
}

fn write_node(document: &Document, node: NodeId, output: &mut String) -> Result<(), NodeError> {
    match document.node(node)? {
        NodeData::Text(content) => escape_text(content, output),
        NodeData::Element(element) => {
            output.push('<');
            output.push_str(element.tag());
            for (name, value) in element.attributes() {
                output.push(' ');
                output.push_str(name);
                output.push_str("=\"");
                escape_attribute(value, output);
                output.push('"');
            }
            output.push('>');
            if is_void(element.tag()) {
                return Ok(());
            }
            for &child in element.children() {
                write_node(document, child, output)?;
            }
            output.push_str("</");
            output.push_str(element.tag());
            output.push('>');
        }
    }
    Ok(())
}

fn escape_text(text: &str, output: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(ch),
        }
    }
}

fn escape_attribute(value: &str, output: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            '<' => output.push_str("&lt;"),
            _ => output.push(ch),
        }
    }
}

#[cfg(test)]
#[path = "tests/markup_tests.rs"]
mod tests;
