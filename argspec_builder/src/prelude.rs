//! Traits which, typically, may be imported without concern: `use argspec::prelude::*`.

/// Behaviour for a structured-data decoder used as a [`Cast`](crate::Cast) directive.
// Needs to be imported in order to implement a custom `Loader`.
pub trait Loader: Send + Sync {
    /// The type name reported when loading fails.
    fn name(&self) -> &str;

    /// Decode the raw text into a value.
    fn load(&self, raw: &str) -> Result<crate::Value, String>;
}
