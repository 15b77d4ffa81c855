//! The four pipelines the reconciler drives, their baseline handlers, and
//! the set-attribute extensions for reserved attribute names.

use log::warn;

use crate::events;
use crate::pipeline::Pipeline;
use crate::{AttrValue, Declaration, NodeId, RendererConfig};

/// Input of the mount pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mount {
    pub node: NodeId,
    pub parent: NodeId,
    /// Sibling to insert before; `None` appends.
    pub before: Option<NodeId>,
}

/// Input of the unmount pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unmount {
    pub node: NodeId,
    pub parent: NodeId,
}

/// Input of the set-attribute pipeline. `value: None` clears the attribute.
#[derive(Debug, Clone)]
pub struct SetAttribute {
    pub node: NodeId,
    pub name: String,
    pub value: Option<AttrValue>,
}

pub type CreatePipeline = Pipeline<Declaration, NodeId>;
pub type MountPipeline = Pipeline<Mount, ()>;
pub type UnmountPipeline = Pipeline<Unmount, ()>;
pub type SetAttributePipeline = Pipeline<SetAttribute, ()>;

#[derive(Debug, Clone)]
pub struct Plugins {
    pub create: CreatePipeline,
    pub mount: MountPipeline,
    pub unmount: UnmountPipeline,
    pub set_attribute: SetAttributePipeline,
}

impl Plugins {
    /// Pipelines with no handlers at all.
    pub fn empty() -> Self {
        Self {
            create: Pipeline::new("create"),
            mount: Pipeline::new("mount"),
            unmount: Pipeline::new("unmount"),
            set_attribute: Pipeline::new("set-attribute"),
        }
    }

    /// Pipelines holding only the default handlers.
    pub fn baseline() -> Self {
        let mut plugins = Self::empty();
        plugins.create.add(|dom, declaration: &Declaration| {
            Ok(Some(dom.document_mut().create_element(&declaration.tag)))
        });
        plugins.mount.add(|dom, mount: &Mount| {
            dom.document_mut()
                .insert_before(mount.parent, mount.node, mount.before)?;
            Ok(Some(()))
        });
        plugins.unmount.add(|dom, unmount: &Unmount| {
            dom.document_mut()
                .remove_child(unmount.parent, unmount.node)?;
            Ok(Some(()))
        });
        plugins.set_attribute.add(|dom, set: &SetAttribute| {
            let document = dom.document_mut();
            match &set.value {
                None => document.remove_attribute(set.node, &set.name)?,
                Some(value) => document.set_attribute(set.node, &set.name, value.to_string())?,
            }
            Ok(Some(()))
        });
        plugins
    }

    /// Baseline plus the extensions enabled in `config`.
    ///
    /// Extensions are tried in the order events, native, lifecycle, data,
    /// all ahead of the baseline handler.
    pub fn with_config(config: &RendererConfig) -> Self {
        let mut plugins = Self::baseline();
        let extensions = config.extensions;
        if extensions.data {
            install_data(&mut plugins.set_attribute, config.data_attr.clone());
        }
        if extensions.lifecycle {
            install_lifecycle(&mut plugins.set_attribute, config.clone());
        }
        if extensions.native {
            install_native(&mut plugins.set_attribute, config.native_attr.clone());
        }
        if extensions.events {
            install_events(&mut plugins.set_attribute, config.event_prefix.clone());
        }
        plugins
    }
}

impl Default for Plugins {
    fn default() -> Self {
        Self::with_config(&RendererConfig::default())
    }
}

/// `on<event>` attributes attach or detach listeners instead of being rendered.
pub fn install_events(pipeline: &mut SetAttributePipeline, prefix: String) {
    pipeline.add(move |dom, set: &SetAttribute| {
        let Some(event) = set.name.strip_prefix(prefix.as_str()) else {
            return Ok(None);
        };
        if event.is_empty() {
            return Ok(None);
        }
        let document = dom.document_mut();
        match &set.value {
            Some(AttrValue::Handler(handler)) => {
                events::add_listener(document, set.node, event, handler.clone())?
            }
            _ => events::remove_listener(document, set.node, event)?,
        }
        Ok(Some(()))
    });
}

/// The native attribute toggles the native-container marker.
pub fn install_native(pipeline: &mut SetAttributePipeline, name: String) {
    pipeline.add(move |dom, set: &SetAttribute| {
        if set.name != name {
            return Ok(None);
        }
        let native = set.value.as_ref().is_some_and(AttrValue::is_truthy);
        dom.tables_mut().set_native(set.node, native);
        Ok(Some(()))
    });
}

/// Lifecycle attribute names register or drop the matching hook slot.
pub fn install_lifecycle(pipeline: &mut SetAttributePipeline, config: RendererConfig) {
    pipeline.add(move |dom, set: &SetAttribute| {
        let Some(event) = config.lifecycle_event_for(&set.name) else {
            return Ok(None);
        };
        let hook = match &set.value {
            Some(AttrValue::Hook(hook)) => Some(hook.clone()),
            Some(other) if other.is_truthy() => {
                warn!(
                    "`{}` on node {} expects a hook, got {}; clearing the slot",
                    set.name,
                    set.node,
                    other.kind()
                );
                None
            }
            _ => None,
        };
        dom.tables_mut().set_hook(event, set.node, hook);
        Ok(Some(()))
    });
}

/// The data attribute is delegated to the payload store.
pub fn install_data(pipeline: &mut SetAttributePipeline, name: String) {
    pipeline.add(move |dom, set: &SetAttribute| {
        if set.name != name {
            return Ok(None);
        }
        match &set.value {
            Some(value) => dom.data_mut().set(set.node, value.clone()),
            None => {
                dom.data_mut().remove(set.node);
            }
        }
        Ok(Some(()))
    });
}
