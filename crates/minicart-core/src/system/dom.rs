use crate::view::Action;

/// Opaque handle to a node in the host's document.
pub type NodeId = u32;

/// DOM platform trait: the slice of a page the widget reads and writes.
///
/// Lookups only see nodes attached to the document; nodes removed by
/// [`Dom::clear_children`] are never returned again.
pub trait Dom {
    /// Element with the given `id` attribute, if any.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// All elements carrying `class`, in document order.
    fn elements_by_class(&self, class: &str) -> Vec<NodeId>;

    /// Parent element, or `None` for the document root and detached nodes.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Add (`on = true`) or remove `class` from the element's class list.
    fn toggle_class(&mut self, node: NodeId, class: &str, on: bool);

    fn set_disabled(&mut self, node: NodeId, disabled: bool);

    /// Replace all children of `node` with a single text node.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Detach all children of `node`, dropping their handlers.
    fn clear_children(&mut self, node: NodeId);

    /// Create a `tag` element as the last child of `parent`.
    fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId;

    /// Attach the activation handler for `node`, replacing any previous one.
    fn bind(&mut self, node: NodeId, action: Action);

    /// Nearest inclusive ancestor carrying `class`.
    fn closest(&self, node: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if self.has_class(n, class) {
                return Some(n);
            }
            current = self.parent(n);
        }
        None
    }
}
