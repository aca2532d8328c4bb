pub mod config;
pub mod fetch;
pub mod process;
pub mod query;
pub mod schema;
pub mod store;
