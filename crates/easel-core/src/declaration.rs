//! Passive description of what should exist under a target.
//!
//! A [`Declaration`] is built fresh for every render call and never kept by
//! the engine. `attrs` and `children` may be left unset; they are read
//! through [`Declaration::normalized`], which treats a missing value as
//! empty, so builders do not have to fill them in.

use std::borrow::Cow;
use std::slice;

use crate::config::{
    DEFAULT_DATA_ATTR, DEFAULT_DID_MOUNT_ATTR, DEFAULT_DID_UPDATE_ATTR, DEFAULT_EVENT_PREFIX,
    DEFAULT_NATIVE_ATTR, DEFAULT_WILL_UNMOUNT_ATTR,
};
use crate::{AttrValue, Attrs, Event, EventHandler, Hook, RenderError};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Declaration {
    pub tag: String,
    pub attrs: Option<Attrs>,
    pub children: Option<Vec<Child>>,
}

/// One entry of a children sequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Child {
    Element(Declaration),
    Text(String),
}

/// What a lifecycle hook may produce for the caller to render.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Single(Child),
    Sequence(Vec<Child>),
}

/// A declaration with its defaults applied.
#[derive(Debug)]
pub struct Normalized<'a> {
    pub tag: &'a str,
    pub attrs: Cow<'a, Attrs>,
    pub children: &'a [Child],
}

impl Declaration {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: None,
            children: None,
        }
    }

    pub fn normalized(&self) -> Normalized<'_> {
        Normalized {
            tag: &self.tag,
            attrs: match &self.attrs {
                Some(attrs) => Cow::Borrowed(attrs),
                None => Cow::Owned(Attrs::default()),
            },
            children: self.children(),
        }
    }

    pub fn children(&self) -> &[Child] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn attr_value(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.as_ref().and_then(|attrs| attrs.get(name))
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs
            .get_or_insert_with(Attrs::default)
            .insert(name.into(), value.into());
        self
    }

    /// Sets the attribute only when `value` is present.
    pub fn attr_opt<V: Into<AttrValue>>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    pub fn attrs<K, V>(mut self, entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        let attrs = self.attrs.get_or_insert_with(Attrs::default);
        for (name, value) in entries {
            attrs.insert(name.into(), value.into());
        }
        self
    }

    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.get_or_insert_with(Vec::new).push(child.into());
        self
    }

    pub fn children_from<C: Into<Child>>(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children
            .get_or_insert_with(Vec::new)
            .extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(Child::Text(content.into()))
    }

    /// Binds a listener under the default `on` prefix.
    pub fn on(self, event: &str, handler: impl Fn(&Event) + 'static) -> Self {
        self.attr(
            format!("{DEFAULT_EVENT_PREFIX}{event}"),
            EventHandler::new(handler),
        )
    }

    /// Marks the produced node as a native container.
    pub fn native(self) -> Self {
        self.attr(DEFAULT_NATIVE_ATTR, true)
    }

    pub fn did_mount(self, hook: Hook) -> Self {
        self.attr(DEFAULT_DID_MOUNT_ATTR, hook)
    }

    pub fn did_update(self, hook: Hook) -> Self {
        self.attr(DEFAULT_DID_UPDATE_ATTR, hook)
    }

    pub fn will_unmount(self, hook: Hook) -> Self {
        self.attr(DEFAULT_WILL_UNMOUNT_ATTR, hook)
    }

    pub fn data(self, value: impl Into<AttrValue>) -> Self {
        self.attr(DEFAULT_DATA_ATTR, value)
    }

    /// Checks the one-text-child rule over the whole tree.
    pub fn validate(&self) -> Result<(), RenderError> {
        validate_children(&self.tag, self.children())
    }
}

/// Checks a children sequence as if it were declared under `tag`.
pub fn validate_children(tag: &str, children: &[Child]) -> Result<(), RenderError> {
    let texts = children
        .iter()
        .filter(|child| matches!(child, Child::Text(_)))
        .count();
    if texts > 1 {
        return Err(RenderError::MalformedDeclaration {
            tag: tag.to_owned(),
            reason: "only one text node is possible",
        });
    }
    if texts == 1 && children.len() > 1 {
        return Err(RenderError::MalformedDeclaration {
            tag: tag.to_owned(),
            reason: "a text node must be the only child",
        });
    }
    children.iter().try_for_each(Child::validate)
}

impl Child {
    pub fn validate(&self) -> Result<(), RenderError> {
        match self {
            Child::Element(declaration) => declaration.validate(),
            Child::Text(_) => Ok(()),
        }
    }

    pub fn as_element(&self) -> Option<&Declaration> {
        match self {
            Child::Element(declaration) => Some(declaration),
            Child::Text(_) => None,
        }
    }
}

impl Content {
    pub fn as_slice(&self) -> &[Child] {
        match self {
            Content::Single(child) => slice::from_ref(child),
            Content::Sequence(children) => children,
        }
    }
}

/// Builds a declaration from a tag, attributes and children in one call.
pub fn h<K, V, C>(
    tag: impl Into<String>,
    attrs: impl IntoIterator<Item = (K, V)>,
    children: impl IntoIterator<Item = C>,
) -> Declaration
where
    K: Into<String>,
    V: Into<AttrValue>,
    C: Into<Child>,
{
    Declaration::new(tag).attrs(attrs).children_from(children)
}

impl From<Declaration> for Child {
    fn from(declaration: Declaration) -> Self {
        Child::Element(declaration)
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_owned())
    }
}

impl From<Child> for Content {
    fn from(child: Child) -> Self {
        Content::Single(child)
    }
}

impl From<Declaration> for Content {
    fn from(declaration: Declaration) -> Self {
        Content::Single(Child::Element(declaration))
    }
}

impl From<Vec<Child>> for Content {
    fn from(children: Vec<Child>) -> Self {
        Content::Sequence(children)
    }
}

#[cfg(test)]
#[path = "tests/declaration_tests.rs"]
mod tests;
