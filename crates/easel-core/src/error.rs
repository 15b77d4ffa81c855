use std::fmt;

use crate::NodeId;

/// Failures raised by [`Document`](crate::Document) operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    Missing { id: NodeId },
    NotAnElement { id: NodeId },
    NotAChild { parent: NodeId, child: NodeId },
    StillAttached { id: NodeId },
    Hierarchy { parent: NodeId, node: NodeId },
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::Missing { id } => write!(f, "node {id} missing"),
            NodeError::NotAnElement { id } => write!(f, "node {id} is not an element"),
            NodeError::NotAChild { parent, child } => {
                write!(f, "node {child} is not a child of node {parent}")
            }
            NodeError::StillAttached { id } => {
                write!(f, "node {id} is still attached to a parent")
            }
            NodeError::Hierarchy { parent, node } => {
                write!(f, "inserting node {node} into node {parent} would create a cycle")
            }
        }
    }
}

impl std::error::Error for NodeError {}

/// Failures raised by a reconciliation pass.
///
/// Nothing in the engine swallows or retries these; a pass that fails
/// leaves whatever mutations it already made in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// `render` was called with something that is not an element.
    InvalidTarget { id: NodeId },
    /// A declaration breaks the one-text-child rule.
    MalformedDeclaration { tag: String, reason: &'static str },
    /// No handler in the named pipeline produced a result.
    PipelineExhausted { pipeline: &'static str },
    /// Pipelines cannot be reconfigured while a pass is running.
    PluginsInUse,
    /// Raised by a lifecycle hook.
    Hook(String),
    Node(NodeError),
}

impl RenderError {
    pub fn hook(message: impl Into<String>) -> Self {
        RenderError::Hook(message.into())
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidTarget { id } => write!(f, "wrong rendering target: node {id}"),
            RenderError::MalformedDeclaration { tag, reason } => {
                write!(f, "malformed declaration <{tag}>: {reason}")
            }
            RenderError::PipelineExhausted { pipeline } => {
                write!(f, "no handler in the `{pipeline}` pipeline produced a result")
            }
            RenderError::PluginsInUse => {
                write!(f, "pipelines cannot be modified during a reconciliation pass")
            }
            RenderError::Hook(message) => write!(f, "lifecycle hook failed: {message}"),
            RenderError::Node(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Node(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NodeError> for RenderError {
    fn from(err: NodeError) -> Self {
        RenderError::Node(err)
    }
}
