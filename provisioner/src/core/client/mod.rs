pub mod database;

pub use database::{DatabaseError, SchemaAdmin};
