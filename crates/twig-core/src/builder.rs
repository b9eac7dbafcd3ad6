//! Element construction: tag, attributes, listeners and children.

use crate::document::NodeId;
use crate::error::RenderError;
use crate::events::event_kind;
use crate::materialize::Materializer;
use crate::vnode::{flatten, AttrValue, ElementNode};

/// Attribute that also initializes the element's live `value` property.
pub const VALUE_PROPERTY: &str = "value";
/// Attribute that also initializes the element's live `checked` property.
pub const CHECKED_PROPERTY: &str = "checked";

impl Materializer<'_> {
    /// Builds one element and its children.
    ///
    /// `Empty` children still produce an empty text node so that child
    /// positions line up with the virtual description on the next diff.
    pub(crate) fn build_element(&mut self, element: &ElementNode, depth: usize) -> Result<NodeId, RenderError> {
        if element.tag.is_empty() {
            return Err(RenderError::Malformed("element without a tag name".into()));
        }
        let id = self.document.create_element(element.tag.as_str());
        if let Err(err) = self.populate(id, element, depth) {
            self.discard(id);
            return Err(err);
        }
        Ok(id)
    }

    fn populate(&mut self, id: NodeId, element: &ElementNode, depth: usize) -> Result<(), RenderError> {
        for (key, value) in &element.attrs {
            self.apply_attribute(id, &element.tag, key, value)?;
        }
        for child in flatten(&element.children) {
            self.append_materialized(id, child, depth + 1)?;
        }
        Ok(())
    }

    fn apply_attribute(&mut self, id: NodeId, tag: &str, key: &str, value: &AttrValue) -> Result<(), RenderError> {
        if let AttrValue::Listener(listener) = value {
            let Some(kind) = event_kind(key) else {
                return Err(RenderError::Malformed(format!(
                    "listener bound to `{key}` on <{tag}>, which is not an event key"
                )));
            };
            if self
                .document
                .bind_listener(id, &kind, listener.clone())?
                .is_some()
            {
                log::trace!("<{tag}> {id}: `{key}` replaced an earlier `{kind}` listener");
            }
            return Ok(());
        }

        if let Some(text) = value.to_attribute() {
            self.document.set_attribute(id, key, text)?;
        }
        match key {
            VALUE_PROPERTY => self.document.set_value(id, value.to_attribute())?,
            CHECKED_PROPERTY => self.document.set_checked(id, value.is_truthy())?,
            _ => {}
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/builder_tests.rs"]
mod tests;
