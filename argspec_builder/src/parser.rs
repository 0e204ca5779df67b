mod base;
mod interface;
mod middleware;
mod printer;

pub(crate) use base::*;
pub use base::ParseError;
pub use interface::*;
pub use middleware::*;
pub(crate) use printer::*;
