//! In-memory arena document implementing [`Dom`].
//!
//! Hosts build one of these from their page source, hand it to the widget,
//! and feed user activations back through [`Document::activate`].

use std::collections::HashMap;

use super::dom::{Dom, NodeId};
use crate::view::Action;

#[derive(Debug, Clone)]
enum NodeKind {
    Root,
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// Arena-backed element tree. Node 0 is the document root.
///
/// Detached nodes (see [`Dom::clear_children`]) are never reclaimed: their
/// slots stay in the arena for the life of the document, so every re-render
/// grows it.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    handlers: HashMap<NodeId, Action>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Root,
            }],
            handlers: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id as usize]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id as usize]
    }

    fn push(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node {
            parent: Some(parent),
            children: Vec::new(),
            kind,
        });
        self.node_mut(parent).children.push(id);
        id
    }

    /// Append an element with the given attributes under `parent`.
    pub fn create_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: Vec<(String, String)>,
    ) -> NodeId {
        self.push(
            parent,
            NodeKind::Element {
                tag: tag.to_ascii_lowercase(),
                attrs,
            },
        )
    }

    /// Append text under `parent`, extending its last child if that is
    /// already a text node.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        if let Some(&last) = self.node(parent).children.last() {
            if let NodeKind::Text(existing) = &mut self.node_mut(last).kind {
                existing.push_str(text);
                return last;
            }
        }
        self.push(parent, NodeKind::Text(text.to_string()))
    }

    /// Tag name of an element node.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Contents of a text node.
    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Attributes of an element node in source order; empty for other nodes.
    pub fn attributes(&self, node: NodeId) -> &[(String, String)] {
        match &self.node(node).kind {
            NodeKind::Element { attrs, .. } => attrs,
            _ => &[],
        }
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.text(node) {
            out.push_str(text);
        }
        for d in self.descendants(node) {
            if let Some(text) = self.text(d) {
                out.push_str(text);
            }
        }
        out
    }

    /// Descendants of `node` in document (pre-)order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(node).children.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.node(n).children.iter().rev());
        }
        out
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.root() {
                return true;
            }
            match self.node(current).parent {
                Some(p) => current = p,
                None => return false,
            }
        }
    }

    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.attribute(node, "disabled").is_some()
    }

    /// Handler bound to `node`, regardless of its enabled state.
    pub fn handler(&self, node: NodeId) -> Option<&Action> {
        self.handlers.get(&node)
    }

    /// Simulate a user activating `node`. Returns the bound action if the
    /// node is attached, enabled and has a handler.
    pub fn activate(&self, node: NodeId) -> Option<Action> {
        if !self.is_attached(node) || self.is_disabled(node) {
            return None;
        }
        self.handlers.get(&node).cloned()
    }

    /// First attached element carrying `class` whose `attr` equals `value`.
    pub fn find_by_class_and_attr(&self, class: &str, attr: &str, value: &str) -> Option<NodeId> {
        self.elements_by_class(class)
            .into_iter()
            .find(|&n| self.attribute(n, attr).as_deref() == Some(value))
    }

    fn attrs_mut(&mut self, node: NodeId) -> Option<&mut Vec<(String, String)>> {
        match &mut self.node_mut(node).kind {
            NodeKind::Element { attrs, .. } => Some(attrs),
            _ => None,
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(attrs) = self.attrs_mut(node) {
            attrs.retain(|(k, _)| k != name);
        }
    }
}

impl Dom for Document {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&n| self.attribute(n, "id").as_deref() == Some(id))
    }

    fn elements_by_class(&self, class: &str) -> Vec<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.attributes(node)
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let Some(attrs) = self.attrs_mut(node) else {
            return;
        };
        match attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(node, "class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    fn toggle_class(&mut self, node: NodeId, class: &str, on: bool) {
        let current = self.attribute(node, "class").unwrap_or_default();
        let mut classes: Vec<&str> = current
            .split_whitespace()
            .filter(|&c| c != class)
            .collect();
        if on {
            classes.push(class);
        }
        if classes.is_empty() {
            self.remove_attribute(node, "class");
        } else {
            let joined = classes.join(" ");
            self.set_attribute(node, "class", &joined);
        }
    }

    fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if disabled {
            self.set_attribute(node, "disabled", "");
        } else {
            self.remove_attribute(node, "disabled");
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.clear_children(node);
        self.append_text(node, text);
    }

    fn clear_children(&mut self, node: NodeId) {
        for d in self.descendants(node) {
            self.handlers.remove(&d);
        }
        let children = std::mem::take(&mut self.node_mut(node).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
    }

    fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.create_element(parent, tag, Vec::new())
    }

    fn bind(&mut self, node: NodeId, action: Action) {
        self.handlers.insert(node, action);
    }
}
