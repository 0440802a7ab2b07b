pub mod error;
pub mod persistence;
pub mod store;
