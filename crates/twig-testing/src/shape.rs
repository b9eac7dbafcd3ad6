use twig_core::{Document, NodeError, NodeId, NodeKind};

/// Structural snapshot of a concrete subtree, independent of node ids.
///
/// Two subtrees with equal shapes are indistinguishable to a user: same
/// tags, attributes, properties, listener kinds and text, in the same order.
/// Attributes are sorted by name so insertion order does not matter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeShape {
    Text(String),
    Fragment(Vec<NodeShape>),
    Element {
        tag: String,
        attributes: Vec<(String, String)>,
        listeners: Vec<String>,
        value: Option<String>,
        checked: bool,
        children: Vec<NodeShape>,
    },
}

impl NodeShape {
    pub fn capture(document: &Document, id: NodeId) -> Result<Self, NodeError> {
        let children = document
            .children(id)?
            .iter()
            .map(|&child| Self::capture(document, child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(match document.kind(id)? {
            NodeKind::Text(text) => Self::Text(text.to_owned()),
            NodeKind::Fragment => Self::Fragment(children),
            NodeKind::Element(tag) => {
                let mut attributes: Vec<(String, String)> = document
                    .attributes(id)?
                    .iter()
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect();
                attributes.sort();
                let mut listeners: Vec<String> = document
                    .listeners(id)
                    .map(|map| map.keys().cloned().collect())
                    .unwrap_or_default();
                listeners.sort();
                Self::Element {
                    tag: tag.to_owned(),
                    attributes,
                    listeners,
                    value: document.value(id)?.map(str::to_owned),
                    checked: document.checked(id)?,
                    children,
                }
            }
        })
    }

    pub fn children(&self) -> &[NodeShape] {
        match self {
            Self::Text(_) => &[],
            Self::Fragment(children) | Self::Element { children, .. } => children,
        }
    }
}
