pub mod database;

pub use database::MongoDBParams;
