//! Listener attach/detach boundary used by the `on*` attribute handler.
//!
//! The document keeps at most one listener per element and event type;
//! attaching a new handler for the same event replaces the old one.

use std::fmt;
use std::rc::Rc;

use crate::{Document, NodeError, NodeId};

/// An event delivered to a listener.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub kind: String,
    pub target: NodeId,
}

/// Shared event listener.
#[derive(Clone)]
pub struct EventHandler(Rc<dyn Fn(&Event)>);

impl EventHandler {
    pub fn new(handler: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(handler))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    pub fn ptr_eq(&self, other: &EventHandler) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", Rc::as_ptr(&self.0))
    }
}

pub fn add_listener(
    document: &mut Document,
    node: NodeId,
    event: &str,
    handler: EventHandler,
) -> Result<(), NodeError> {
    if document.add_event_listener(node, event, handler)?.is_some() {
        log::trace!("replaced `{event}` listener on node {node}");
    }
    Ok(())
}

pub fn remove_listener(document: &mut Document, node: NodeId, event: &str) -> Result<(), NodeError> {
    if document.remove_event_listener(node, event)?.is_none() {
        log::trace!("no `{event}` listener to remove on node {node}");
    }
    Ok(())
}
