//! Depth-first, parent-then-children traversal of a declaration tree.
//!
//! The walker knows nothing about diffing. It hands every declaration to a
//! [`Visitor`] together with the live node it should be reconciled under,
//! and recurses into whatever live node the visitor returns.

use std::slice;

use crate::{Child, NodeId};

/// What the walker should do after visiting a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Recurse into the declaration's children under this live node.
    Descend(NodeId),
    /// Do not recurse.
    Skip,
}

pub trait Visitor {
    type Error;

    fn visit(
        &mut self,
        child: &Child,
        parent: NodeId,
        index: usize,
        siblings: &[Child],
    ) -> Result<Visit, Self::Error>;

    /// Live nodes whose children the walker must never descend into.
    fn is_opaque(&self, _node: NodeId) -> bool {
        false
    }
}

pub fn walk<V: Visitor + ?Sized>(
    child: &Child,
    accumulator: NodeId,
    visitor: &mut V,
    index: usize,
    siblings: &[Child],
) -> Result<(), V::Error> {
    let visit = visitor.visit(child, accumulator, index, siblings)?;
    let Child::Element(declaration) = child else {
        return Ok(());
    };
    let Visit::Descend(result) = visit else {
        return Ok(());
    };
    if visitor.is_opaque(result) {
        return Ok(());
    }
    let children = declaration.children();
    for (i, c) in children.iter().enumerate() {
        walk(c, result, visitor, i, children)?;
    }
    Ok(())
}

/// Walks `root` as the only declaration under `target`.
pub fn walk_tree<V: Visitor + ?Sized>(
    root: &Child,
    target: NodeId,
    visitor: &mut V,
) -> Result<(), V::Error> {
    walk(root, target, visitor, 0, slice::from_ref(root))
}

#[cfg(test)]
#[path = "tests/walker_tests.rs"]
mod tests;
