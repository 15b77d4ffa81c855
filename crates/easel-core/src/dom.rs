use std::mem;

use log::{debug, trace, warn};

use crate::{DataStore, Document, NodeError, NodeId, NodeTables};

/// Mutable state a pipeline handler may touch: the live document plus
/// everything the engine keeps about its nodes.
#[derive(Debug, Default)]
pub struct Dom {
    document: Document,
    tables: NodeTables,
    data: DataStore,
    pending_release: Vec<NodeId>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn tables(&self) -> &NodeTables {
        &self.tables
    }

    pub fn tables_mut(&mut self) -> &mut NodeTables {
        &mut self.tables
    }

    pub fn data(&self) -> &DataStore {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut DataStore {
        &mut self.data
    }

    /// Queues a node the engine detached; [`Dom::sweep`] releases it if it
    /// is still detached by then.
    pub fn schedule_release(&mut self, node: NodeId) {
        self.pending_release.push(node);
    }

    /// Releases a detached subtree and drops its side-table entries.
    pub fn release(&mut self, node: NodeId) -> Result<usize, NodeError> {
        let freed = self.document.release(node)?;
        for &id in &freed {
            self.tables.forget(id);
            self.data.remove(id);
        }
        Ok(freed.len())
    }

    /// Releases every queued node that nobody re-attached.
    pub fn sweep(&mut self) {
        let pending = mem::take(&mut self.pending_release);
        if pending.is_empty() {
            return;
        }
        let mut freed = 0;
        for node in pending {
            match self.document.parent(node) {
                Ok(None) => match self.release(node) {
                    Ok(count) => freed += count,
                    Err(err) => warn!("could not release node {node}: {err}"),
                },
                Ok(Some(parent)) => trace!("node {node} was re-attached under {parent}; keeping it"),
                // Freed earlier as part of another released subtree.
                Err(NodeError::Missing { .. }) => trace!("node {node} already released"),
                Err(err) => warn!("could not inspect queued node {node}: {err}"),
            }
        }
        debug!("swept {freed} detached node(s)");
    }
}

#[cfg(test)]
#[path = "tests/dom_tests.rs"]
mod tests;
