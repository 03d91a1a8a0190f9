pub mod connection;
pub mod models;
pub mod repos;
pub mod schema;
