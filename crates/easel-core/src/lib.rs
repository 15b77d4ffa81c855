#![doc = r"Core of the Easel declarative renderer: declarations, operation pipelines and the reconciler."]

pub mod collections;
pub mod config;
pub mod data;
pub mod declaration;
pub mod document;
pub mod dom;
pub mod error;
pub mod events;
pub mod lifecycle;
pub mod markup;
pub mod pipeline;
pub mod plugins;
mod reconcile;
pub mod renderer;
pub mod tables;
pub mod value;
pub mod walker;

pub use config::{Extensions, RendererConfig};
pub use data::DataStore;
pub use declaration::{h, Child, Content, Declaration, Normalized};
pub use document::{Document, NodeData};
pub use dom::Dom;
pub use error::{NodeError, RenderError};
pub use events::{Event, EventHandler};
pub use lifecycle::{Hook, HookResult, LifecycleEvent};
pub use markup::{inner_html, outer_html};
pub use pipeline::{HandlerResult, Pipeline};
pub use plugins::{Mount, Plugins, SetAttribute, Unmount};
pub use renderer::Renderer;
pub use tables::NodeTables;
pub use value::{AttrValue, Attrs};
pub use walker::{walk, walk_tree, Visit, Visitor};

/// Handle of a live node inside a [`Document`].
pub type NodeId = usize;
