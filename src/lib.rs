//! # Cohort Library
//!
//! RFM customer segmentation: min-max scaled purchase metrics, K-Means with
//! K-Means++ seeding, heuristic segment names, and all-or-nothing replacement
//! of the stored segmentation.

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod processing;
pub mod storage;
pub mod ui;

pub use error::{Error, Result};
