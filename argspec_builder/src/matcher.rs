mod core;
mod model;
mod registry;

pub(crate) use self::core::*;
pub(crate) use model::*;
pub(crate) use registry::{Flag, Registry, RegistryBuilder};
pub use registry::DeclarationError;
