//! Pass-through pipeline handlers and hooks that record what the engine did.

use std::cell::RefCell;
use std::rc::Rc;

use easel_core::plugins::{Mount, SetAttribute, Unmount};
use easel_core::{Declaration, Hook, NodeId, Plugins, RenderError, Renderer};

/// One primitive operation as seen by the pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Create {
        tag: String,
    },
    Mount {
        node: NodeId,
        parent: NodeId,
        before: Option<NodeId>,
    },
    Unmount {
        node: NodeId,
        parent: NodeId,
    },
    SetAttribute {
        node: NodeId,
        name: String,
        cleared: bool,
    },
}

/// Shared log of pipeline invocations.
///
/// Recording handlers are installed on top of every pipeline and always
/// pass, so whatever was installed before them still resolves the
/// operation.
#[derive(Clone, Debug, Default)]
pub struct OpLog(Rc<RefCell<Vec<Op>>>);

impl OpLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs recording handlers on `plugins`.
    pub fn record(&self, plugins: &mut Plugins) {
        let log = self.clone();
        plugins.create.add(move |_, declaration: &Declaration| {
            log.push(Op::Create {
                tag: declaration.tag.clone(),
            });
            Ok(None)
        });
        let log = self.clone();
        plugins.mount.add(move |_, mount: &Mount| {
            log.push(Op::Mount {
                node: mount.node,
                parent: mount.parent,
                before: mount.before,
            });
            Ok(None)
        });
        let log = self.clone();
        plugins.unmount.add(move |_, unmount: &Unmount| {
            log.push(Op::Unmount {
                node: unmount.node,
                parent: unmount.parent,
            });
            Ok(None)
        });
        let log = self.clone();
        plugins.set_attribute.add(move |_, set: &SetAttribute| {
            log.push(Op::SetAttribute {
                node: set.node,
                name: set.name.clone(),
                cleared: set.value.is_none(),
            });
            Ok(None)
        });
    }

    /// Creates a log and installs it on an idle renderer.
    pub fn attach(renderer: &mut Renderer) -> Result<Self, RenderError> {
        let log = Self::new();
        log.record(renderer.plugins_mut()?);
        Ok(log)
    }

    fn push(&self, op: Op) {
        log::trace!("recorded {op:?}");
        self.0.borrow_mut().push(op);
    }

    pub fn ops(&self) -> Vec<Op> {
        self.0.borrow().clone()
    }

    /// Returns everything recorded so far and starts over.
    pub fn take(&self) -> Vec<Op> {
        self.0.take()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn count(&self, predicate: impl Fn(&Op) -> bool) -> usize {
        self.0.borrow().iter().filter(|op| predicate(op)).count()
    }

    pub fn creates(&self) -> usize {
        self.count(|op| matches!(op, Op::Create { .. }))
    }

    pub fn mounts(&self) -> usize {
        self.count(|op| matches!(op, Op::Mount { .. }))
    }

    pub fn unmounts(&self) -> usize {
        self.count(|op| matches!(op, Op::Unmount { .. }))
    }

    pub fn set_attributes(&self) -> usize {
        self.count(|op| matches!(op, Op::SetAttribute { .. }))
    }

    /// Attribute names written to `node`, in order.
    pub fn attributes_set_on(&self, node: NodeId) -> Vec<String> {
        self.0
            .borrow()
            .iter()
            .filter_map(|op| match op {
                Op::SetAttribute { node: n, name, .. } if *n == node => Some(name.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Records `(label, node)` for every call of the hooks it hands out.
#[derive(Clone, Debug, Default)]
pub struct HookLog(Rc<RefCell<Vec<(String, NodeId)>>>);

impl HookLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hook(&self, label: impl Into<String>) -> Hook {
        let entries = Rc::clone(&self.0);
        let label = label.into();
        Hook::effect(move |_, node| entries.borrow_mut().push((label.clone(), node)))
    }

    pub fn entries(&self) -> Vec<(String, NodeId)> {
        self.0.borrow().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.0.borrow().iter().map(|(label, _)| label.clone()).collect()
    }

    pub fn take(&self) -> Vec<(String, NodeId)> {
        self.0.take()
    }
}
