//! Normalized feature vectors

use serde::{Deserialize, Serialize};

/// Number of behavioral features per customer
pub const FEATURE_DIM: usize = 4;

/// A point (or centroid) in normalized feature space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector(pub Vec<f64>);

impl FeatureVector {
	pub fn new(data: Vec<f64>) -> Self {
		Self(data)
	}

	pub fn zeros(dim: usize) -> Self {
		Self(vec![0.0; dim])
	}

	pub fn as_slice(&self) -> &[f64] {
		&self.0
	}

	pub fn dim(&self) -> usize {
		self.0.len()
	}
}
