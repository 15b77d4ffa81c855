//! Attribute values carried by declarations.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use crate::collections::OrderedMap;
use crate::events::EventHandler;
use crate::lifecycle::Hook;

/// Attribute name to value mapping, kept in declaration order.
pub type Attrs = OrderedMap<String, AttrValue>;

/// A single attribute value.
///
/// Change detection between passes is strict: scalars compare by value,
/// everything behind an `Rc` compares by pointer. Two separately built
/// groups with the same entries are *different* values.
#[derive(Clone)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// Grouped attribute such as `style`.
    Group(Rc<Attrs>),
    Handler(EventHandler),
    Hook(Hook),
    /// Opaque value for the auxiliary data store.
    Payload(Rc<dyn Any>),
}

impl AttrValue {
    pub fn group<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<AttrValue>,
    {
        let attrs: Attrs = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        AttrValue::Group(Rc::new(attrs))
    }

    pub fn payload<T: Any>(value: T) -> Self {
        AttrValue::Payload(Rc::new(value))
    }

    /// Strict equality used by the attribute diff.
    pub fn same_as(&self, other: &AttrValue) -> bool {
        match (self, other) {
            (AttrValue::Bool(a), AttrValue::Bool(b)) => a == b,
            (AttrValue::Int(a), AttrValue::Int(b)) => a == b,
            (AttrValue::Float(a), AttrValue::Float(b)) => a == b,
            (AttrValue::Str(a), AttrValue::Str(b)) => a == b,
            (AttrValue::Group(a), AttrValue::Group(b)) => Rc::ptr_eq(a, b),
            (AttrValue::Handler(a), AttrValue::Handler(b)) => a.ptr_eq(b),
            (AttrValue::Hook(a), AttrValue::Hook(b)) => a.ptr_eq(b),
            (AttrValue::Payload(a), AttrValue::Payload(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// `false`, `0`, `NaN` and the empty string are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Bool(b) => *b,
            AttrValue::Int(n) => *n != 0,
            AttrValue::Float(n) => *n != 0.0 && !n.is_nan(),
            AttrValue::Str(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AttrValue::Bool(_) => "bool",
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::Str(_) => "string",
            AttrValue::Group(_) => "group",
            AttrValue::Handler(_) => "handler",
            AttrValue::Hook(_) => "hook",
            AttrValue::Payload(_) => "payload",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl PartialEq for AttrValue {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

/// String coercion applied by the baseline attribute handler.
impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Int(n) => write!(f, "{n}"),
            AttrValue::Float(n) => write!(f, "{n}"),
            AttrValue::Str(s) => f.write_str(s),
            AttrValue::Group(entries) => {
                for (i, (name, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                Ok(())
            }
            other => write!(f, "[{}]", other.kind()),
        }
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            AttrValue::Int(n) => f.debug_tuple("Int").field(n).finish(),
            AttrValue::Float(n) => f.debug_tuple("Float").field(n).finish(),
            AttrValue::Str(s) => f.debug_tuple("Str").field(s).finish(),
            AttrValue::Group(entries) => f.debug_map().entries(entries.iter()).finish(),
            AttrValue::Handler(handler) => handler.fmt(f),
            AttrValue::Hook(hook) => hook.fmt(f),
            AttrValue::Payload(value) => write!(f, "Payload({:p})", Rc::as_ptr(value)),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Int(i64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::Float(f64::from(value))
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<EventHandler> for AttrValue {
    fn from(value: EventHandler) -> Self {
        AttrValue::Handler(value)
    }
}

impl From<Hook> for AttrValue {
    fn from(value: Hook) -> Self {
        AttrValue::Hook(value)
    }
}

#[cfg(test)]
#[path = "tests/value_tests.rs"]
mod tests;
