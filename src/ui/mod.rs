//! # User Interface
//!
//! Colored terminal output.

pub mod log;

pub use log::{debug, error, header, info, money, print_logo, success, warn, Log};
