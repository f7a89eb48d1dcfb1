pub mod commands;
pub mod error;
pub mod projection;
pub mod query;
pub mod validate;

pub use commands::*;
pub use error::*;
pub use query::*;
pub use validate::*;
