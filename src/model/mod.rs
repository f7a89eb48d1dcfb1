pub mod appointment;
pub mod common;
pub mod owner;
pub mod pet;
pub mod schema;
pub mod views;

pub use appointment::*;
pub use common::*;
pub use owner::*;
pub use pet::*;
pub use schema::*;
pub use views::*;
