//! Builder module for `argspec`.
//! See [documentation root](https://docs.rs/argspec/latest/argspec/index.html) for full details.
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;
#[allow(missing_docs)]
pub mod prelude;

pub use api::*;
pub use matcher::DeclarationError;
pub use model::*;
pub use parser::{CommandParser, ConsoleInterface, ParseError, UserInterface};

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
