//! Ordered chain-of-handlers resolving one primitive operation.
//!
//! Handlers are tried from the most recently added to the first one. A
//! handler returns `Ok(None)` to pass, `Ok(Some(_))` to resolve the
//! operation, or an error to abort it. Resolution stops at the first
//! `Some`, so a newer handler shadows every older one for the inputs it
//! accepts.

use std::fmt;
use std::rc::Rc;

use crate::{Dom, RenderError};

pub type HandlerResult<O> = Result<Option<O>, RenderError>;

type Handler<I, O> = Rc<dyn Fn(&mut Dom, &I) -> HandlerResult<O>>;

pub struct Pipeline<I, O> {
    name: &'static str,
    handlers: Vec<Handler<I, O>>,
}

impl<I, O> Pipeline<I, O> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            handlers: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Adds a handler that takes precedence over every existing one.
    pub fn add(
        &mut self,
        handler: impl Fn(&mut Dom, &I) -> HandlerResult<O> + 'static,
    ) -> &mut Self {
        self.handlers.push(Rc::new(handler));
        self
    }

    /// By-value form of [`Pipeline::add`].
    pub fn with(mut self, handler: impl Fn(&mut Dom, &I) -> HandlerResult<O> + 'static) -> Self {
        self.add(handler);
        self
    }

    pub fn apply(&self, dom: &mut Dom, input: &I) -> Result<O, RenderError> {
        for (depth, handler) in self.handlers.iter().rev().enumerate() {
            if let Some(output) = handler(dom, input)? {
                log::trace!("`{}` resolved by handler #{}", self.name, depth);
                return Ok(output);
            }
        }
        Err(RenderError::PipelineExhausted {
            pipeline: self.name,
        })
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<I, O> Clone for Pipeline<I, O> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            handlers: self.handlers.clone(),
        }
    }
}

impl<I, O> fmt::Debug for Pipeline<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("name", &self.name)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/pipeline_tests.rs"]
mod tests;
