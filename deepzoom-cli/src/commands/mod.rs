//! CLI command implementations.

pub mod common;
pub mod save;
pub mod tiles;
