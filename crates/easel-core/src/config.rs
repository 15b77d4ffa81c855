//! Renderer configuration.

use crate::LifecycleEvent;

pub const DEFAULT_EVENT_PREFIX: &str = "on";
pub const DEFAULT_NATIVE_ATTR: &str = "native";
pub const DEFAULT_DATA_ATTR: &str = "data";
pub const DEFAULT_DID_MOUNT_ATTR: &str = "didmount";
pub const DEFAULT_DID_UPDATE_ATTR: &str = "didupdate";
pub const DEFAULT_WILL_UNMOUNT_ATTR: &str = "willunmount";
pub const DEFAULT_SNAPSHOT_CONTAINER: &str = "div";

/// Which set-attribute extensions [`Plugins::with_config`](crate::Plugins::with_config)
/// installs on top of the baseline handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extensions {
    pub events: bool,
    pub native: bool,
    pub lifecycle: bool,
    pub data: bool,
}

impl Extensions {
    pub const fn all() -> Self {
        Self {
            events: true,
            native: true,
            lifecycle: true,
            data: true,
        }
    }

    pub const fn none() -> Self {
        Self {
            events: false,
            native: false,
            lifecycle: false,
            data: false,
        }
    }
}

impl Default for Extensions {
    fn default() -> Self {
        Self::all()
    }
}

/// Reserved attribute names and installed extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RendererConfig {
    pub event_prefix: String,
    pub native_attr: String,
    pub data_attr: String,
    pub did_mount_attr: String,
    pub did_update_attr: String,
    pub will_unmount_attr: String,
    /// Tag of the detached container used by `render_to_string`.
    pub snapshot_container_tag: String,
    pub extensions: Extensions,
}

impl RendererConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.event_prefix = prefix.into();
        self
    }

    pub fn native_attr(mut self, name: impl Into<String>) -> Self {
        self.native_attr = name.into();
        self
    }

    pub fn data_attr(mut self, name: impl Into<String>) -> Self {
        self.data_attr = name.into();
        self
    }

    pub fn lifecycle_attr(mut self, event: LifecycleEvent, name: impl Into<String>) -> Self {
        let name = name.into();
        match event {
            LifecycleEvent::DidMount => self.did_mount_attr = name,
            LifecycleEvent::DidUpdate => self.did_update_attr = name,
            LifecycleEvent::WillUnmount => self.will_unmount_attr = name,
        }
        self
    }

    pub fn snapshot_container_tag(mut self, tag: impl Into<String>) -> Self {
        self.snapshot_container_tag = tag.into();
        self
    }

    pub fn extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn lifecycle_attr_name(&self, event: LifecycleEvent) -> &str {
        match event {
            LifecycleEvent::DidMount => &self.did_mount_attr,
            LifecycleEvent::DidUpdate => &self.did_update_attr,
            LifecycleEvent::WillUnmount => &self.will_unmount_attr,
        }
    }

    /// Maps an attribute name to the lifecycle slot it registers, if any.
    pub fn lifecycle_event_for(&self, name: &str) -> Option<LifecycleEvent> {
        LifecycleEvent::ALL
            .into_iter()
            .find(|&event| self.lifecycle_attr_name(event) == name)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            event_prefix: DEFAULT_EVENT_PREFIX.to_owned(),
            native_attr: DEFAULT_NATIVE_ATTR.to_owned(),
            data_attr: DEFAULT_DATA_ATTR.to_owned(),
            did_mount_attr: DEFAULT_DID_MOUNT_ATTR.to_owned(),
            did_update_attr: DEFAULT_DID_UPDATE_ATTR.to_owned(),
            will_unmount_attr: DEFAULT_WILL_UNMOUNT_ATTR.to_owned(),
            snapshot_container_tag: DEFAULT_SNAPSHOT_CONTAINER.to_owned(),
            extensions: Extensions::default(),
        }
    }
}
