//! Identity-keyed side tables.
//!
//! Metadata the engine needs about a live node is kept here, keyed by
//! [`NodeId`], instead of on the node itself. Holding an entry never keeps
//! a node alive; entries for released nodes are dropped by [`NodeTables::forget`].

use crate::collections::map::{HashMap, HashSet};
use crate::{AttrValue, Attrs, Hook, LifecycleEvent, NodeId};

#[derive(Debug, Default)]
pub struct NodeTables {
    attrs: HashMap<NodeId, Attrs>,
    native: HashSet<NodeId>,
    did_mount: HashMap<NodeId, Hook>,
    did_update: HashMap<NodeId, Hook>,
    will_unmount: HashMap<NodeId, Hook>,
}

impl NodeTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last-applied attribute snapshot.
    pub fn attrs(&self, node: NodeId) -> Option<&Attrs> {
        self.attrs.get(&node)
    }

    pub fn set_attrs(&mut self, node: NodeId, attrs: Attrs) {
        self.attrs.insert(node, attrs);
    }

    pub fn record_attr(&mut self, node: NodeId, name: String, value: AttrValue) {
        self.attrs.entry(node).or_default().insert(name, value);
    }

    pub fn forget_attr(&mut self, node: NodeId, name: &str) {
        if let Some(attrs) = self.attrs.get_mut(&node) {
            attrs.shift_remove(name);
        }
    }

    pub fn is_native(&self, node: NodeId) -> bool {
        self.native.contains(&node)
    }

    pub fn set_native(&mut self, node: NodeId, native: bool) {
        if native {
            self.native.insert(node);
        } else {
            self.native.remove(&node);
        }
    }

    fn hooks(&self, event: LifecycleEvent) -> &HashMap<NodeId, Hook> {
        match event {
            LifecycleEvent::DidMount => &self.did_mount,
            LifecycleEvent::DidUpdate => &self.did_update,
            LifecycleEvent::WillUnmount => &self.will_unmount,
        }
    }

    fn hooks_mut(&mut self, event: LifecycleEvent) -> &mut HashMap<NodeId, Hook> {
        match event {
            LifecycleEvent::DidMount => &mut self.did_mount,
            LifecycleEvent::DidUpdate => &mut self.did_update,
            LifecycleEvent::WillUnmount => &mut self.will_unmount,
        }
    }

    pub fn hook(&self, event: LifecycleEvent, node: NodeId) -> Option<&Hook> {
        self.hooks(event).get(&node)
    }

    pub fn set_hook(&mut self, event: LifecycleEvent, node: NodeId, hook: Option<Hook>) {
        let hooks = self.hooks_mut(event);
        match hook {
            Some(hook) => {
                hooks.insert(node, hook);
            }
            None => {
                hooks.remove(&node);
            }
        }
    }

    /// Drops every entry for `node`.
    pub fn forget(&mut self, node: NodeId) {
        self.attrs.remove(&node);
        self.native.remove(&node);
        for event in LifecycleEvent::ALL {
            self.hooks_mut(event).remove(&node);
        }
    }

    /// Number of nodes with at least one entry.
    pub fn tracked(&self) -> usize {
        let mut nodes: HashSet<NodeId> = self.attrs.keys().copied().collect();
        nodes.extend(self.native.iter().copied());
        for event in LifecycleEvent::ALL {
            nodes.extend(self.hooks(event).keys().copied());
        }
        nodes.len()
    }
}
