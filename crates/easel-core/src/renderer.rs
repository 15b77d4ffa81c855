//! The renderer context: pipelines, live document and side tables behind
//! one object, so independent renderers never share state.

use std::any::Any;
use std::rc::Rc;

use log::debug;

use crate::declaration::validate_children;
use crate::markup;
use crate::reconcile::Reconciler;
use crate::walker::{walk, walk_tree};
use crate::{
    AttrValue, Attrs, Child, Content, Document, Dom, NodeId, Plugins, RenderError, RendererConfig,
};

#[derive(Debug)]
pub struct Renderer {
    plugins: Rc<Plugins>,
    dom: Dom,
    config: RendererConfig,
    depth: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::with_config(RendererConfig::default())
    }

    pub fn with_config(config: RendererConfig) -> Self {
        let plugins = Plugins::with_config(&config);
        Self::from_parts(config, plugins)
    }

    /// Uses `plugins` as-is, without installing anything from the config.
    pub fn with_plugins(plugins: Plugins) -> Self {
        Self::from_parts(RendererConfig::default(), plugins)
    }

    /// Pipelines are taken exactly as given; nothing is installed from `config`.
    pub fn from_parts(config: RendererConfig, plugins: Plugins) -> Self {
        Self {
            plugins: Rc::new(plugins),
            dom: Dom::new(),
            config,
            depth: 0,
        }
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn plugins(&self) -> &Plugins {
        &self.plugins
    }

    /// Pipelines are fixed for the duration of a pass.
    pub fn plugins_mut(&mut self) -> Result<&mut Plugins, RenderError> {
        Rc::get_mut(&mut self.plugins).ok_or(RenderError::PluginsInUse)
    }

    pub fn dom(&self) -> &Dom {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut Dom {
        &mut self.dom
    }

    pub fn document(&self) -> &Document {
        self.dom.document()
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.dom.document_mut()
    }

    /// Creates a detached element to render into.
    pub fn create_container(&mut self, tag: &str) -> NodeId {
        self.dom.document_mut().create_element(tag)
    }

    /// Whether a reconciliation pass is currently running.
    pub fn is_rendering(&self) -> bool {
        self.depth > 0
    }

    fn check_target(&self, target: NodeId) -> Result<(), RenderError> {
        if self.dom.document().is_element(target) {
            Ok(())
        } else {
            Err(RenderError::InvalidTarget { id: target })
        }
    }

    fn pass(
        &mut self,
        run: impl FnOnce(&mut Reconciler<'_>) -> Result<(), RenderError>,
    ) -> Result<(), RenderError> {
        let plugins = Rc::clone(&self.plugins);
        self.depth += 1;
        let result = {
            let mut reconciler = Reconciler::new(self, plugins);
            run(&mut reconciler)
        };
        self.depth -= 1;
        if self.depth == 0 {
            self.dom.sweep();
        }
        result
    }

    /// Reconciles `content` as the first child of `target`.
    pub fn render(&mut self, target: NodeId, content: impl Into<Child>) -> Result<(), RenderError> {
        let root = content.into();
        self.check_target(target)?;
        root.validate()?;
        debug!("render into node {target}");
        self.pass(|reconciler| walk_tree(&root, target, reconciler))
    }

    /// Reconciles `children` as the full child list of `target`, removing
    /// any live children past the end of the sequence.
    pub fn render_children(&mut self, target: NodeId, children: &[Child]) -> Result<(), RenderError> {
        self.check_target(target)?;
        let tag = self
            .dom
            .document()
            .tag_name(target)
            .unwrap_or_default()
            .to_owned();
        validate_children(&tag, children)?;
        debug!("render {} child(ren) into node {target}", children.len());
        self.pass(|reconciler| {
            for (index, child) in children.iter().enumerate() {
                walk(child, target, reconciler, index, children)?;
            }
            reconciler.prune_excess(target, children.len())
        })
    }

    /// Renders whatever a lifecycle hook produced into `target`.
    pub fn render_content(&mut self, target: NodeId, content: Content) -> Result<(), RenderError> {
        match content {
            Content::Single(child) => self.render(target, child),
            Content::Sequence(children) => self.render_children(target, &children),
        }
    }

    /// Materializes `content` into a detached container and returns its
    /// markup. The container is released afterwards.
    pub fn render_to_string(&mut self, content: impl Into<Child>) -> Result<String, RenderError> {
        let tag = self.config.snapshot_container_tag.clone();
        let container = self.create_container(&tag);
        let output = self.render(container, content).and_then(|()| {
            markup::inner_html(self.dom.document(), container).map_err(RenderError::from)
        });
        self.dom.release(container)?;
        output
    }

    /// Attributes last applied to `node` by the engine.
    pub fn attrs(&self, node: NodeId) -> Option<&Attrs> {
        self.dom.tables().attrs(node)
    }

    pub fn data(&self, node: NodeId) -> Option<&AttrValue> {
        self.dom.data().get(node)
    }

    pub fn payload<T: Any>(&self, node: NodeId) -> Option<Rc<T>> {
        self.dom.data().payload(node)
    }

    pub fn is_native(&self, node: NodeId) -> bool {
        self.dom.tables().is_native(node)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
