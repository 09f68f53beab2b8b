//! XML rendering for output trees

use super::Node;
use crate::util::with_stack;
use std::fmt::{self, Write as FmtWrite};

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
const INDENT: &str = "  ";
/// Nesting level past which lines are not indented any further, keeping the
/// output size linear in the depth of the tree
const MAX_INDENT_DEPTH: usize = 32;

/// An output tree rendered as a complete XML document via `Display`
pub struct XmlDocument<'a> {
    root: &'a Node,
}

impl<'a> XmlDocument<'a> {
    pub fn new(root: &'a Node) -> Self {
        XmlDocument { root }
    }

    fn write_indent(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth.min(MAX_INDENT_DEPTH) {
            f.write_str(INDENT)?;
        }
        Ok(())
    }

    fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, depth: usize) -> fmt::Result {
        Self::write_indent(f, depth)?;
        write!(f, "<{}", node.tag)?;
        for (name, value) in &node.attributes {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }

        match (&node.text, node.children.is_empty()) {
            (None, true) => writeln!(f, "/>"),
            (Some(text), true) => writeln!(f, ">{}</{}>", escape(text), node.tag),
            (text, false) => {
                f.write_char('>')?;
                if let Some(text) = text {
                    f.write_str(&escape(text))?;
                }
                writeln!(f)?;
                for child in &node.children {
                    with_stack(|| Self::write_node(f, child, depth + 1))?;
                }
                Self::write_indent(f, depth)?;
                writeln!(f, "</{}>", node.tag)
            }
        }
    }
}

impl fmt::Display for XmlDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{DECLARATION}")?;
        Self::write_node(f, self.root, 0)
    }
}

/// Escape text for use in element content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
