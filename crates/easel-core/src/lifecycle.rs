use std::fmt;
use std::rc::Rc;

use crate::{Content, NodeId, RenderError, Renderer};

/// What a lifecycle hook hands back.
///
/// Returned content is *not* applied by the engine; a hook that wants it
/// rendered calls [`Renderer::render_content`] on the node itself.
pub type HookResult = Result<Option<Content>, RenderError>;

/// The three moments a hook can be attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    DidMount,
    DidUpdate,
    WillUnmount,
}

impl LifecycleEvent {
    pub const ALL: [LifecycleEvent; 3] = [
        LifecycleEvent::DidMount,
        LifecycleEvent::DidUpdate,
        LifecycleEvent::WillUnmount,
    ];
}

/// Callback fired synchronously from inside a reconciliation pass.
#[derive(Clone)]
pub struct Hook(Rc<dyn Fn(&mut Renderer, NodeId) -> HookResult>);

impl Hook {
    pub fn new(hook: impl Fn(&mut Renderer, NodeId) -> HookResult + 'static) -> Self {
        Self(Rc::new(hook))
    }

    /// Wraps a hook that never produces content and cannot fail.
    pub fn effect(effect: impl Fn(&mut Renderer, NodeId) + 'static) -> Self {
        Self::new(move |renderer, node| {
            effect(renderer, node);
            Ok(None)
        })
    }

    pub fn call(&self, renderer: &mut Renderer, node: NodeId) -> HookResult {
        (self.0)(renderer, node)
    }

    pub fn ptr_eq(&self, other: &Hook) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hook({:p})", Rc::as_ptr(&self.0))
    }
}
