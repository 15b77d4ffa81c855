use easel_core::document::NodeData;
use easel_core::{
    inner_html, Child, Document, NodeError, NodeId, Plugins, RenderError, Renderer, RendererConfig,
};

use crate::recorder::OpLog;

/// Headless harness for exercising a renderer in tests.
///
/// Owns a renderer whose pipelines are wrapped by an [`OpLog`], plus a
/// detached container element that content is rendered into. Installed
/// content is kept so the same tree can be re-rendered.
pub struct RenderTestRule {
    renderer: Renderer,
    root: NodeId,
    ops: OpLog,
    content: Option<Box<dyn Fn() -> Child>>,
}

impl RenderTestRule {
    /// Create a rule backed by the default configuration.
    pub fn new() -> Self {
        Self::with_config(RendererConfig::default())
    }

    pub fn with_config(config: RendererConfig) -> Self {
        let mut plugins = Plugins::with_config(&config);
        let ops = OpLog::new();
        ops.record(&mut plugins);
        let mut renderer = Renderer::from_parts(config, plugins);
        let tag = renderer.config().snapshot_container_tag.clone();
        let root = renderer.create_container(&tag);
        Self {
            renderer,
            root,
            ops,
            content: None,
        }
    }

    /// Install `content` and perform an initial render.
    pub fn set_content(&mut self, content: impl Fn() -> Child + 'static) -> Result<(), RenderError> {
        self.content = Some(Box::new(content));
        self.rerender()
    }

    /// Render the installed content again into the same root.
    pub fn rerender(&mut self) -> Result<(), RenderError> {
        if let Some(content) = self.content.as_ref() {
            log::debug!("test rule rendering into node {}", self.root);
            self.renderer.render(self.root, content())?;
        }
        Ok(())
    }

    /// Render a one-off tree without replacing the installed content.
    pub fn render(&mut self, content: impl Into<Child>) -> Result<(), RenderError> {
        self.renderer.render(self.root, content)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The node produced for the root declaration, if any.
    pub fn root_node(&self) -> Option<NodeId> {
        self.document().child_at(self.root, 0).ok().flatten()
    }

    pub fn ops(&self) -> &OpLog {
        &self.ops
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    pub fn document(&self) -> &Document {
        self.renderer.document()
    }

    pub fn html(&self) -> Result<String, NodeError> {
        inner_html(self.document(), self.root)
    }

    /// Structure of everything under the root, ignoring attributes.
    pub fn outline(&self) -> Result<String, NodeError> {
        let mut output = String::new();
        for &child in self.document().child_nodes(self.root)? {
            outline_into(self.document(), child, &mut output)?;
        }
        Ok(output)
    }
}

impl Default for RenderTestRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Compact tree form: `ul(li("a") li("b"))`.
pub fn outline(document: &Document, node: NodeId) -> Result<String, NodeError> {
    let mut output = String::new();
    outline_into(document, node, &mut output)?;
    Ok(output)
}

fn outline_into(document: &Document, node: NodeId, output: &mut String) -> Result<(), NodeError> {
    match document.node(node)? {
        NodeData::Text(content) => output.push_str(&format!("{content:?}")),
        NodeData::Element(element) => {
            output.push_str(element.tag());
            if !element.children().is_empty() {
                output.push('(');
                for (i, &child) in element.children().iter().enumerate() {
                    if i > 0 {
                        output.push(' ');
                    }
                    outline_into(document, child, output)?;
                }
                output.push(')');
            }
        }
    }
    Ok(())
}

/// Convenience helper for tests that only need temporary access to a
/// `RenderTestRule`.
pub fn run_test_render<R>(f: impl FnOnce(&mut RenderTestRule) -> R) -> R {
    let mut rule = RenderTestRule::new();
    f(&mut rule)
}
