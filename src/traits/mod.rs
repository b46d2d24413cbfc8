mod driver;
mod render;
mod schema;

pub use driver::DatabaseDriver;
pub use render::Renderable;
pub use schema::{Column, ColumnRef, Table};
