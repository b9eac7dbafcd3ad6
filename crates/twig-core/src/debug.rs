//! Debug utilities for inspecting the concrete tree.
//!
//! ```rust,ignore
//! use twig_core::{format_tree, log_tree};
//!
//! let stats = mount.render(&view)?;
//! log_tree(&host.document(), mount.target());
//! ```

use crate::document::{Document, NodeId, NodeKind};
use std::fmt::Write;

/// Formats the subtree under `root`, one node per line, indented by depth.
///
/// Elements print as `<tag name="value">`, texts as quoted strings.
/// Nodes with bound listeners list the event kinds after the tag.
pub fn format_tree(document: &Document, root: NodeId) -> String {
    let mut output = String::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let indent = "  ".repeat(depth);
        match document.kind(id) {
            Ok(NodeKind::Text(text)) => {
                writeln!(output, "{indent}{text:?}").ok();
            }
            Ok(NodeKind::Fragment) => {
                writeln!(output, "{indent}<#fragment>").ok();
            }
            Ok(NodeKind::Element(tag)) => {
                write!(output, "{indent}<{tag}").ok();
                if let Ok(attributes) = document.attributes(id) {
                    for (name, value) in attributes {
                        write!(output, " {name}={value:?}").ok();
                    }
                }
                write!(output, ">").ok();
                if let Some(listeners) = document.listeners(id) {
                    let kinds: Vec<&str> = listeners.keys().map(String::as_str).collect();
                    write!(output, " on[{}]", kinds.join(",")).ok();
                }
                if document.active_element() == Some(id) {
                    write!(output, " (focused)").ok();
                }
                writeln!(output).ok();
            }
            Err(err) => {
                writeln!(output, "{indent}<{err}>").ok();
                continue;
            }
        }
        if let Ok(children) = document.children(id) {
            stack.extend(children.iter().rev().map(|&child| (child, depth + 1)));
        }
    }
    output
}

/// Prints the subtree under `root` to stdout.
pub fn log_tree(document: &Document, root: NodeId) {
    println!("\n=== TREE {root} ===");
    print!("{}", format_tree(document, root));
    println!("=== END TREE ===\n");
}

#[cfg(test)]
#[path = "tests/debug_tests.rs"]
mod tests;
