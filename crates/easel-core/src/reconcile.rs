//! The visitor that patches live nodes to match declarations.
//!
//! Matching is positional: the declaration at index `i` is compared with
//! the live child at index `i`, and a live node is reused only when its
//! tag matches. Moving an item inside a children sequence therefore shows
//! up as replacing everything from the first differing position on.

use std::rc::Rc;

use log::{debug, trace, warn};

use crate::plugins::{Mount, SetAttribute, Unmount};
use crate::walker::{Visit, Visitor};
use crate::{
    AttrValue, Attrs, Child, Declaration, LifecycleEvent, NodeId, Plugins, RenderError, Renderer,
};

pub(crate) struct Reconciler<'r> {
    renderer: &'r mut Renderer,
    plugins: Rc<Plugins>,
}

impl<'r> Reconciler<'r> {
    pub(crate) fn new(renderer: &'r mut Renderer, plugins: Rc<Plugins>) -> Self {
        Self { renderer, plugins }
    }

    fn fire(&mut self, event: LifecycleEvent, node: NodeId) -> Result<(), RenderError> {
        let hook = self.renderer.dom().tables().hook(event, node).cloned();
        if let Some(hook) = hook {
            trace!("{event:?} hook on node {node}");
            if hook.call(self.renderer, node)?.is_some() {
                trace!("{event:?} hook on node {node} returned content; leaving it to the caller");
            }
        }
        Ok(())
    }

    fn set_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        value: Option<AttrValue>,
    ) -> Result<(), RenderError> {
        let input = SetAttribute {
            node,
            name: name.to_owned(),
            value,
        };
        self.plugins
            .set_attribute
            .apply(self.renderer.dom_mut(), &input)
    }

    fn unmount(&mut self, node: NodeId, parent: NodeId) -> Result<(), RenderError> {
        self.plugins
            .unmount
            .apply(self.renderer.dom_mut(), &Unmount { node, parent })?;
        let dom = self.renderer.dom_mut();
        if dom.document().parent(node)? == Some(parent) {
            warn!("unmount handler left node {node} attached to {parent}");
        } else {
            dom.schedule_release(node);
        }
        Ok(())
    }

    /// Drops blank text children so positional matching is not thrown off
    /// by incidental whitespace.
    fn prune_blank_text(&mut self, parent: NodeId) -> Result<(), RenderError> {
        let dom = self.renderer.dom_mut();
        let document = dom.document();
        let blank: Vec<NodeId> = document
            .child_nodes(parent)?
            .iter()
            .rev()
            .copied()
            .filter(|&child| {
                document
                    .text(child)
                    .is_some_and(|content| content.trim().is_empty())
            })
            .collect();
        for child in blank {
            dom.document_mut().remove_child(parent, child)?;
            dom.schedule_release(child);
        }
        Ok(())
    }

    fn reconcile_text(
        &mut self,
        parent: NodeId,
        index: usize,
        text: &str,
    ) -> Result<(), RenderError> {
        if index > 0 {
            let tag = self
                .renderer
                .document()
                .tag_name(parent)
                .unwrap_or_default()
                .to_owned();
            return Err(RenderError::MalformedDeclaration {
                tag,
                reason: "only one text node is possible",
            });
        }
        let dom = self.renderer.dom_mut();
        if dom.document().text_content(parent)? != text {
            for removed in dom.document_mut().set_text_content(parent, text)? {
                dom.schedule_release(removed);
            }
        }
        Ok(())
    }

    fn reconcile_element(
        &mut self,
        parent: NodeId,
        index: usize,
        declaration: &Declaration,
    ) -> Result<NodeId, RenderError> {
        let d = declaration.normalized();
        let document = self.renderer.document();
        let existing = document.child_at(parent, index)?;
        let reusable = existing.filter(|&node| {
            document
                .tag_name(node)
                .is_some_and(|tag| tag.eq_ignore_ascii_case(d.tag))
        });
        let Some(node) = reusable else {
            return self.replace(parent, existing, declaration);
        };

        self.sync_attributes(node, &d.attrs)?;
        self.fire(LifecycleEvent::DidUpdate, node)?;

        if self.renderer.dom().tables().is_native(node) {
            trace!("node {node} is native; leaving its children alone");
            return Ok(node);
        }
        self.prune_blank_text(node)?;
        self.prune_excess(node, d.children.len())?;
        Ok(node)
    }

    /// Runs the create pipeline and applies every declared attribute.
    ///
    /// A node that fails part-way is queued for release, so a failed pass
    /// leaves nothing unreachable behind.
    fn create(&mut self, declaration: &Declaration) -> Result<NodeId, RenderError> {
        let node = self
            .plugins
            .create
            .apply(self.renderer.dom_mut(), declaration)?;
        self.renderer
            .dom_mut()
            .tables_mut()
            .set_attrs(node, Attrs::default());
        if let Err(err) = self.apply_attributes(node, declaration) {
            self.renderer.dom_mut().schedule_release(node);
            return Err(err);
        }
        Ok(node)
    }

    fn apply_attributes(&mut self, node: NodeId, declaration: &Declaration) -> Result<(), RenderError> {
        for (name, value) in declaration.normalized().attrs.iter() {
            self.set_attribute(node, name, Some(value.clone()))?;
            self.renderer
                .dom_mut()
                .tables_mut()
                .record_attr(node, name.clone(), value.clone());
        }
        Ok(())
    }

    fn replace(
        &mut self,
        parent: NodeId,
        stale: Option<NodeId>,
        declaration: &Declaration,
    ) -> Result<NodeId, RenderError> {
        let node = self.create(declaration)?;
        match stale {
            Some(stale) => debug!(
                "replacing node {stale} with <{}> node {node} under {parent}",
                declaration.tag
            ),
            None => debug!("creating <{}> node {node} under {parent}", declaration.tag),
        }
        if let Err(err) = self.swap_in(node, parent, stale) {
            // Released by the sweep unless it made it into the tree.
            self.renderer.dom_mut().schedule_release(node);
            return Err(err);
        }
        Ok(node)
    }

    /// Takes `stale` out of `parent` and mounts `node` in its place.
    fn swap_in(
        &mut self,
        node: NodeId,
        parent: NodeId,
        stale: Option<NodeId>,
    ) -> Result<(), RenderError> {
        let mut before = None;
        if let Some(stale) = stale {
            self.fire(LifecycleEvent::WillUnmount, stale)?;
            before = self.renderer.document().next_sibling(stale)?;
            self.unmount(stale, parent)?;
        }
        self.plugins.mount.apply(
            self.renderer.dom_mut(),
            &Mount {
                node,
                parent,
                before,
            },
        )?;
        self.fire(LifecycleEvent::DidMount, node)
    }

    fn sync_attributes(&mut self, node: NodeId, attrs: &Attrs) -> Result<(), RenderError> {
        let (removed, changed) = {
            let previous = self.renderer.dom().tables().attrs(node);
            let removed: Vec<String> = previous
                .into_iter()
                .flat_map(|previous| previous.keys())
                .filter(|name| !attrs.contains_key(name.as_str()))
                .cloned()
                .collect();
            let changed: Vec<(String, AttrValue)> = attrs
                .iter()
                .filter(|(name, value)| {
                    previous
                        .and_then(|previous| previous.get(name.as_str()))
                        .map_or(true, |old| !old.same_as(value))
                })
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect();
            (removed, changed)
        };

        for name in removed {
            self.set_attribute(node, &name, None)?;
            self.renderer.dom_mut().tables_mut().forget_attr(node, &name);
        }
        for (name, value) in changed {
            self.set_attribute(node, &name, Some(value.clone()))?;
            self.renderer
                .dom_mut()
                .tables_mut()
                .record_attr(node, name, value);
        }
        Ok(())
    }

    /// Removes live children of `node` past position `keep`, last first.
    pub(crate) fn prune_excess(&mut self, node: NodeId, keep: usize) -> Result<(), RenderError> {
        let children = self.renderer.document().child_nodes(node)?;
        if children.len() <= keep {
            return Ok(());
        }
        let excess: Vec<NodeId> = children[keep..].iter().rev().copied().collect();
        debug!("pruning {} trailing child(ren) of node {node}", excess.len());
        for child in excess {
            self.fire(LifecycleEvent::WillUnmount, child)?;
            self.unmount(child, node)?;
        }
        Ok(())
    }
}

impl Visitor for Reconciler<'_> {
    type Error = RenderError;

    fn visit(
        &mut self,
        child: &Child,
        parent: NodeId,
        index: usize,
        _siblings: &[Child],
    ) -> Result<Visit, RenderError> {
        trace!("visit #{index} under node {parent}");
        self.prune_blank_text(parent)?;
        match child {
            Child::Text(text) => {
                self.reconcile_text(parent, index, text)?;
                Ok(Visit::Skip)
            }
            Child::Element(declaration) => self
                .reconcile_element(parent, index, declaration)
                .map(Visit::Descend),
        }
    }

    fn is_opaque(&self, node: NodeId) -> bool {
        self.renderer.dom().tables().is_native(node)
    }
}
