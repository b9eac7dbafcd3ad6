//! Lookups over a concrete subtree, in document order.

use twig_core::{Document, NodeId, NodeKind};

fn matching(document: &Document, root: NodeId, predicate: impl Fn(NodeId) -> bool) -> Vec<NodeId> {
    document
        .descendants(root)
        .unwrap_or_default()
        .into_iter()
        .filter(|&id| predicate(id))
        .collect()
}

pub fn find_by_tag(document: &Document, root: NodeId, tag: &str) -> Vec<NodeId> {
    matching(document, root, |id| document.tag(id) == Ok(tag))
}

/// Elements whose whitespace-separated `class` list contains `class`.
pub fn find_by_class(document: &Document, root: NodeId, class: &str) -> Vec<NodeId> {
    matching(document, root, |id| {
        document
            .attribute(id, "class")
            .ok()
            .flatten()
            .is_some_and(|classes| classes.split_whitespace().any(|name| name == class))
    })
}

pub fn find_by_attribute(document: &Document, root: NodeId, name: &str, value: &str) -> Vec<NodeId> {
    matching(document, root, |id| document.attribute(id, name) == Ok(Some(value)))
}

/// Innermost element below `root` whose text content equals `text`.
pub fn find_by_text(document: &Document, root: NodeId, text: &str) -> Option<NodeId> {
    let holds = |id: NodeId| {
        matches!(document.kind(id), Ok(NodeKind::Element(_)))
            && document.text_content(id).is_ok_and(|content| content == text)
    };
    matching(document, root, |id| {
        holds(id)
            && !document
                .children(id)
                .unwrap_or_default()
                .iter()
                .any(|&child| holds(child))
    })
    .into_iter()
    .next()
}

/// Every non-empty text node below `root`.
pub fn texts(document: &Document, root: NodeId) -> Vec<String> {
    document
        .descendants(root)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|id| match document.kind(id) {
            Ok(NodeKind::Text(text)) if !text.is_empty() => Some(text.to_owned()),
            _ => None,
        })
        .collect()
}
