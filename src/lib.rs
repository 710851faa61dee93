pub mod config;
pub mod hive;
pub mod identity;
pub mod store;
pub mod swap;
pub mod sync;
