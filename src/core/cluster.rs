//! Cluster data structures for K-Means clustering

use serde::{Deserialize, Serialize};

use crate::core::FeatureVector;

/// A centroid plus the indices of the points assigned to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
	/// Mean of the members in normalized space (frozen while empty)
	pub centroid: FeatureVector,
	/// Indices into the aggregate/feature list
	pub members: Vec<usize>,
}

impl Cluster {
	pub fn new(centroid: FeatureVector) -> Self {
		Self {
			centroid,
			members: Vec::new(),
		}
	}

	pub fn len(&self) -> usize {
		self.members.len()
	}

	pub fn is_empty(&self) -> bool {
		self.members.is_empty()
	}
}
