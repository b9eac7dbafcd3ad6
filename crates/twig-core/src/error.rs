use crate::document::NodeId;

/// Failures raised by the [`Document`](crate::Document) when a mutation cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeError {
    #[error("node {id} does not exist")]
    Missing { id: NodeId },
    #[error("node {id} cannot hold children")]
    NotAContainer { id: NodeId },
    #[error("node {id} is not an element")]
    NotAnElement { id: NodeId },
    #[error("node {id} is not a text node")]
    NotAText { id: NodeId },
    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },
    #[error("node {id} has no parent to be replaced in")]
    Detached { id: NodeId },
    #[error("cannot insert {child} into its own descendant {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
}

/// Errors that abort a render pass.
///
/// Nothing is retried and nothing is rolled back: the target may be left
/// partially updated when one of these surfaces from [`render`](crate::render).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("malformed virtual node: {0}")]
    Malformed(String),
    #[error("thunk chain did not resolve within {limit} invocations")]
    ThunkRecursion { limit: usize },
    #[error("virtual tree exceeds the nesting limit of {limit}")]
    DepthLimit { limit: usize },
    #[error("render requested while the document is already borrowed")]
    Reentrant,
    #[error(transparent)]
    Node(#[from] NodeError),
}
