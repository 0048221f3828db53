//! Configuration module for the pxd command-line tool
//!
//! Provides types and parsing for `pxd.toml` configuration.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;
