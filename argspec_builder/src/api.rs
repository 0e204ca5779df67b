mod cast;
mod core;
mod declaration;

pub use self::core::*;
pub use cast::*;
pub use declaration::*;
