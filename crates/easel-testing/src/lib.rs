//! Testing utilities and harness for Easel

pub mod recorder;
pub mod testing;

pub use recorder::*;
pub use testing::*;

pub mod prelude {
    pub use crate::recorder::*;
    pub use crate::testing::*;
    pub use easel_core::{h, Child, Declaration, Hook, Renderer, RendererConfig};
}
