//! In-memory live-node surface.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Ids are handed
//! out once and never reused, so a stale id after [`Document::release`]
//! reports [`NodeError::Missing`] instead of aliasing a newer node.

use crate::collections::OrderedMap;
use crate::events::{Event, EventHandler};
use crate::{NodeError, NodeId};

#[derive(Debug)]
pub struct ElementData {
    tag: String,
    attributes: OrderedMap<String, String>,
    children: Vec<NodeId>,
    listeners: OrderedMap<String, EventHandler>,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            attributes: OrderedMap::default(),
            children: Vec::new(),
            listeners: OrderedMap::default(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &OrderedMap<String, String> {
        &self.attributes
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

#[derive(Debug)]
pub enum NodeData {
    Element(ElementData),
    Text(String),
}

#[derive(Debug)]
struct Slot {
    parent: Option<NodeId>,
    data: NodeData,
}

#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Option<Slot>>,
}

impl Document {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(ElementData::new(tag)))
    }

    pub fn create_text(&mut self, content: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(content.into()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Some(Slot { parent: None, data }));
        id
    }

    fn slot(&self, id: NodeId) -> Result<&Slot, NodeError> {
        self.nodes
            .get(id)
            .and_then(Option::as_ref)
            .ok_or(NodeError::Missing { id })
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot, NodeError> {
        self.nodes
            .get_mut(id)
            .and_then(Option::as_mut)
            .ok_or(NodeError::Missing { id })
    }

    fn element(&self, id: NodeId) -> Result<&ElementData, NodeError> {
        match &self.slot(id)?.data {
            NodeData::Element(element) => Ok(element),
            NodeData::Text(_) => Err(NodeError::NotAnElement { id }),
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, NodeError> {
        match &mut self.slot_mut(id)?.data {
            NodeData::Element(element) => Ok(element),
            NodeData::Text(_) => Err(NodeError::NotAnElement { id }),
        }
    }

    pub fn node(&self, id: NodeId) -> Result<&NodeData, NodeError> {
        Ok(&self.slot(id)?.data)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_ok()
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_ok()
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.node(id), Ok(NodeData::Text(_)))
    }

    /// Tag of an element; `None` for text nodes and missing ids.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(ElementData::tag)
    }

    /// Content of a text node; `None` for elements and missing ids.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.node(id) {
            Ok(NodeData::Text(content)) => Some(content),
            _ => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, content: impl Into<String>) -> Result<(), NodeError> {
        match &mut self.slot_mut(id)?.data {
            NodeData::Text(text) => {
                *text = content.into();
                Ok(())
            }
            NodeData::Element(_) => Err(NodeError::NotAnElement { id }),
        }
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, NodeError> {
        Ok(self.slot(id)?.parent)
    }

    /// Children of an element; text nodes have none.
    pub fn child_nodes(&self, id: NodeId) -> Result<&[NodeId], NodeError> {
        match &self.slot(id)?.data {
            NodeData::Element(element) => Ok(&element.children),
            NodeData::Text(_) => Ok(&[]),
        }
    }

    pub fn child_at(&self, id: NodeId, index: usize) -> Result<Option<NodeId>, NodeError> {
        Ok(self.child_nodes(id)?.get(index).copied())
    }

    pub fn next_sibling(&self, id: NodeId) -> Result<Option<NodeId>, NodeError> {
        let Some(parent) = self.parent(id)? else {
            return Ok(None);
        };
        let siblings = self.child_nodes(parent)?;
        let position = siblings
            .iter()
            .position(|&child| child == id)
            .ok_or(NodeError::NotAChild { parent, child: id })?;
        Ok(siblings.get(position + 1).copied())
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match self.slot(node).ok().and_then(|slot| slot.parent) {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }

    /// Inserts `node` under `parent` before `before`, or at the end when
    /// `before` is `None`. A node that is already attached is moved.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        node: NodeId,
        before: Option<NodeId>,
    ) -> Result<(), NodeError> {
        self.element(parent)?;
        self.slot(node)?;
        if self.is_inclusive_ancestor(node, parent) {
            return Err(NodeError::Hierarchy { parent, node });
        }
        let before = match before {
            Some(reference) if reference == node => self.next_sibling(node)?,
            other => other,
        };
        if let Some(reference) = before {
            if self.slot(reference)?.parent != Some(parent) {
                return Err(NodeError::NotAChild {
                    parent,
                    child: reference,
                });
            }
        }
        if let Some(old_parent) = self.slot(node)?.parent {
            self.remove_child(old_parent, node)?;
        }
        let children = &mut self.element_mut(parent)?.children;
        let index = match before {
            Some(reference) => children
                .iter()
                .position(|&child| child == reference)
                .unwrap_or(children.len()),
            None => children.len(),
        };
        children.insert(index, node);
        self.slot_mut(node)?.parent = Some(parent);
        Ok(())
    }

    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Result<(), NodeError> {
        self.insert_before(parent, node, None)
    }

    /// Detaches `node` from `parent`. The node stays in the arena until released.
    pub fn remove_child(&mut self, parent: NodeId, node: NodeId) -> Result<(), NodeError> {
        let children = &mut self.element_mut(parent)?.children;
        let position = children
            .iter()
            .position(|&child| child == node)
            .ok_or(NodeError::NotAChild {
                parent,
                child: node,
            })?;
        children.remove(position);
        self.slot_mut(node)?.parent = None;
        Ok(())
    }

    /// Concatenated text of every descendant text node.
    pub fn text_content(&self, id: NodeId) -> Result<String, NodeError> {
        let mut output = String::new();
        self.collect_text(id, &mut output)?;
        Ok(output)
    }

    fn collect_text(&self, id: NodeId, output: &mut String) -> Result<(), NodeError> {
        match &self.slot(id)?.data {
            NodeData::Text(content) => output.push_str(content),
            NodeData::Element(element) => {
                for &child in &element.children {
                    self.collect_text(child, output)?;
                }
            }
        }
        Ok(())
    }

    /// Replaces every child of `id` with a single text node holding
    /// `content` (or with nothing when `content` is empty).
    ///
    /// Returns the detached former children; they are not released.
    pub fn set_text_content(&mut self, id: NodeId, content: &str) -> Result<Vec<NodeId>, NodeError> {
        if let NodeData::Text(text) = &mut self.slot_mut(id)?.data {
            content.clone_into(text);
            return Ok(Vec::new());
        }
        let removed = std::mem::take(&mut self.element_mut(id)?.children);
        for &child in &removed {
            self.slot_mut(child)?.parent = None;
        }
        if !content.is_empty() {
            let text = self.create_text(content);
            self.append_child(id, text)?;
        }
        Ok(removed)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)
            .ok()
            .and_then(|element| element.attributes.get(name))
            .map(String::as_str)
    }

    pub fn attributes(&self, id: NodeId) -> Result<&OrderedMap<String, String>, NodeError> {
        Ok(&self.element(id)?.attributes)
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), NodeError> {
        let value = value.into();
        let attributes = &mut self.element_mut(id)?.attributes;
        match attributes.get_mut(name) {
            Some(existing) => *existing = value,
            None => {
                attributes.insert(name.to_owned(), value);
            }
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), NodeError> {
        self.element_mut(id)?.attributes.shift_remove(name);
        Ok(())
    }

    /// Attaches `handler` for `kind`, returning the listener it replaced.
    pub fn add_event_listener(
        &mut self,
        id: NodeId,
        kind: &str,
        handler: EventHandler,
    ) -> Result<Option<EventHandler>, NodeError> {
        Ok(self
            .element_mut(id)?
            .listeners
            .insert(kind.to_owned(), handler))
    }

    pub fn remove_event_listener(
        &mut self,
        id: NodeId,
        kind: &str,
    ) -> Result<Option<EventHandler>, NodeError> {
        Ok(self.element_mut(id)?.listeners.shift_remove(kind))
    }

    pub fn has_listener(&self, id: NodeId, kind: &str) -> bool {
        self.element(id)
            .map(|element| element.listeners.contains_key(kind))
            .unwrap_or(false)
    }

    /// Delivers an event to the listener on `id`, if one is attached.
    pub fn dispatch_event(&self, id: NodeId, kind: &str) -> Result<bool, NodeError> {
        let Some(handler) = self.element(id)?.listeners.get(kind).cloned() else {
            return Ok(false);
        };
        handler.call(&Event {
            kind: kind.to_owned(),
            target: id,
        });
        Ok(true)
    }

    /// Frees a detached node and its whole subtree, returning the freed ids.
    pub fn release(&mut self, id: NodeId) -> Result<Vec<NodeId>, NodeError> {
        if self.slot(id)?.parent.is_some() {
            return Err(NodeError::StillAttached { id });
        }
        let mut freed = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(slot) = self.nodes.get_mut(current).and_then(Option::take) else {
                continue;
            };
            if let NodeData::Element(element) = slot.data {
                stack.extend(element.children);
            }
            freed.push(current);
        }
        Ok(freed)
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dump_tree(&self, root: Option<NodeId>) -> String {
        let mut output = String::new();
        if let Some(root_id) = root {
            self.dump_node(&mut output, root_id, 0);
        } else {
            output.push_str("(no root)\n");
        }
        output
    }

    fn dump_node(&self, output: &mut String, id: NodeId, depth: usize) {
        let indent = "  ".repeat(depth);
        match self.slot(id).map(|slot| &slot.data) {
            Ok(NodeData::Element(element)) => {
                output.push_str(&format!("{}[{}] <{}>", indent, id, element.tag));
                for (name, value) in &element.attributes {
                    output.push_str(&format!(" {name}={value:?}"));
                }
                output.push('\n');
                for &child in &element.children {
                    self.dump_node(output, child, depth + 1);
                }
            }
            Ok(NodeData::Text(content)) => {
                output.push_str(&format!("{}[{}] {:?}\n", indent, id, content));
            }
            Err(_) => output.push_str(&format!("{}[{}] (missing)\n", indent, id)),
        }
    }
}

#[cfg(test)]
#[path = "tests/document_tests.rs"]
mod tests;
