//! Auxiliary per-node payload store reached through the `data` attribute.

use std::any::Any;
use std::rc::Rc;

use crate::collections::map::HashMap;
use crate::{AttrValue, NodeId};

#[derive(Debug, Default)]
pub struct DataStore {
    entries: HashMap<NodeId, AttrValue>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, node: NodeId, value: AttrValue) {
        self.entries.insert(node, value);
    }

    pub fn get(&self, node: NodeId) -> Option<&AttrValue> {
        self.entries.get(&node)
    }

    /// Typed access to a value stored with [`AttrValue::payload`].
    pub fn payload<T: Any>(&self, node: NodeId) -> Option<Rc<T>> {
        match self.entries.get(&node)? {
            AttrValue::Payload(value) => Rc::clone(value).downcast::<T>().ok(),
            _ => None,
        }
    }

    pub fn remove(&mut self, node: NodeId) -> Option<AttrValue> {
        self.entries.remove(&node)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
