//! Assertion utilities for render tests
//!
//! This module provides assertion helpers specifically designed for
//! validating document state after render passes.

use twig_core::{NodeId, ReconcileStats};

/// Assert that a list contains a specific text fragment.
pub fn assert_contains_text(texts: &[String], fragment: &str, msg: &str) {
    assert!(
        texts.iter().any(|t| t.contains(fragment)),
        "{}: text '{}' not found in {:?}",
        msg,
        fragment,
        texts
    );
}

/// Assert that a list does not contain a specific text fragment.
pub fn assert_not_contains_text(texts: &[String], fragment: &str, msg: &str) {
    assert!(
        !texts.iter().any(|t| t.contains(fragment)),
        "{}: text '{}' unexpectedly found in {:?}",
        msg,
        fragment,
        texts
    );
}

/// Assert that a collection has an expected count.
pub fn assert_count<T>(items: &[T], expected: usize, msg: &str) {
    assert_eq!(
        items.len(),
        expected,
        "{}: expected {} items, got {}",
        msg,
        expected,
        items.len()
    );
}

/// Assert that a render pass changed nothing.
pub fn assert_noop(stats: &ReconcileStats, msg: &str) {
    assert!(stats.is_noop(), "{}: expected no mutations, got {:?}", msg, stats);
}

/// Assert that a node survived a render pass with the same identity.
pub fn assert_same_node(before: NodeId, after: NodeId, msg: &str) {
    assert_eq!(before, after, "{}: node {} was replaced by {}", msg, before, after);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_text() {
        let texts = vec!["Hello".to_string(), "World".to_string()];
        assert_contains_text(&texts, "Hello", "exact match");
        assert_contains_text(&texts, "Wor", "partial match");
        assert_not_contains_text(&texts, "Goodbye", "not present");
    }

    #[test]
    #[should_panic]
    fn test_contains_text_fails() {
        assert_contains_text(&["Hello".to_string()], "Bye", "should fail");
    }

    #[test]
    fn test_count() {
        let items = vec![1, 2, 3];
        assert_count(&items, 3, "correct count");
    }

    #[test]
    fn test_noop() {
        assert_noop(&ReconcileStats::default(), "fresh stats");
    }

    #[test]
    #[should_panic]
    fn test_noop_fails() {
        let stats = ReconcileStats {
            texts_updated: 1,
            ..ReconcileStats::default()
        };
        assert_noop(&stats, "should fail");
    }
}
