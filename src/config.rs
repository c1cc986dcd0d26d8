//! Application configuration and constants

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::core::CustomerStatus;

static CUSTOM_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

// === Storage ===
pub const DATA_DIR: &str = ".cohort";
pub const CUSTOMERS_FILE: &str = "customers.json";
pub const SEGMENTS_FILE: &str = "segments.msgpack";
pub const DATA_DIR_ENV: &str = "COHORT_DATA_DIR";

// === Clustering Defaults ===
pub const DEFAULT_CLUSTERS: usize = 4;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const CONVERGENCE_EPSILON: f64 = 1e-4;

// === Eligibility ===
pub const ELIGIBLE_STATUSES: &[CustomerStatus] = &[CustomerStatus::Active, CustomerStatus::Customer];

// === Display Defaults ===
pub const DEFAULT_PREVIEW: usize = 5;

pub fn set_data_dir(path: PathBuf) {
	let _ = CUSTOM_DATA_DIR.set(path);
}

/// Get data directory (--data-dir, then COHORT_DATA_DIR, then ./.cohort)
pub fn data_dir() -> PathBuf {
	if let Some(custom) = CUSTOM_DATA_DIR.get() {
		crate::ui::debug(&format!("Using custom data dir: {}", custom.display()));
		return custom.clone();
	}

	if let Ok(env_path) = std::env::var(DATA_DIR_ENV) {
		if !env_path.is_empty() {
			crate::ui::debug(&format!("Using {}: {}", DATA_DIR_ENV, env_path));
			return PathBuf::from(env_path);
		}
	}

	PathBuf::from(DATA_DIR)
}
