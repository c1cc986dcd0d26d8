//! # Command Implementations
//!
//! Each submodule handles one CLI command.

pub mod segment;
pub mod show;
