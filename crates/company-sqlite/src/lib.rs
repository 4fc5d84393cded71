mod error;
mod insert;
mod models;
mod open;
mod query;
mod schema;

pub use error::{Error, Result};
pub use models::SchemaInfo;
pub use open::Db;
pub use schema::{CURRENT_SCHEMA_VERSION, TABLE};
