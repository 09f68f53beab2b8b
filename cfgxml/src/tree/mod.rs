//! Output tree
//!
//! The environment is first converted into a generic labeled tree and then
//! rendered as an XML document.

mod xml;

pub use xml::{XmlDocument, escape};

use crate::error::Result;
use crate::util::with_stack;
use crate::value::{Environment, Value, format_number};
use std::path::Path;

/// Root element name
pub const ROOT_TAG: &str = "config";
/// Element name for one binding or dictionary field
pub const ENTRY_TAG: &str = "entry";

/// Labeled tree node
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Node {
            tag: tag.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // Flatten descendants into one list so deep trees drop iteratively
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Convert the final environment into the output tree
pub fn to_tree(env: &Environment) -> Node {
    let mut root = Node::new(ROOT_TAG);
    for (name, value) in env {
        root.push(entry(name, value));
    }
    root
}

fn entry(name: &str, value: &Value) -> Node {
    let node = Node::new(ENTRY_TAG)
        .with_attribute("name", name)
        .with_attribute("type", value.type_name());

    match value {
        Value::Number(n) => node.with_text(format_number(*n)),
        Value::Mapping(map) => {
            let mut node = node;
            for (key, field) in map {
                node.push(with_stack(|| entry(key, field)));
            }
            node
        }
    }
}

/// Render a tree as an XML document with declaration header
pub fn render(root: &Node) -> String {
    XmlDocument::new(root).to_string()
}

/// Write a tree as an XML document to `path`
pub fn write_file(path: &Path, root: &Node) -> Result<()> {
    std::fs::write(path, render(root))?;
    Ok(())
}
