//! Integration test utilities for the social server
//!
//! Spawns the full REST API in-process against a real PostgreSQL database
//! and drives it over HTTP.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
