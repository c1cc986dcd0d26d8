//! Segmentation results as persisted and reported

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_CLUSTERS, DEFAULT_MAX_ITERATIONS};
use crate::core::CustomerAggregate;

/// Raw, non-normalized metrics captured at run time for reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSnapshot {
	pub total_value: f64,
	pub purchase_count: u32,
	pub avg_order_value: f64,
	pub days_since_last_purchase: f64,
}

impl From<&CustomerAggregate> for FeatureSnapshot {
	fn from(agg: &CustomerAggregate) -> Self {
		Self {
			total_value: agg.total_value,
			purchase_count: agg.purchase_count,
			avg_order_value: agg.avg_order_value,
			days_since_last_purchase: agg.days_since_last_purchase,
		}
	}
}

/// One customer's membership in the current segmentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentAssignment {
	pub customer_id: u64,
	/// 0-based, matches the cluster position
	pub segment_id: usize,
	pub segment_name: String,
	pub features: FeatureSnapshot,
}

/// Per-segment summary returned to the caller of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
	pub id: usize,
	pub name: String,
	pub size: usize,
	/// Centroid in normalized feature space
	pub centroid: Vec<f64>,
	pub avg_value: f64,
	pub avg_frequency: f64,
	pub avg_recency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentationParams {
	pub num_clusters: usize,
	pub max_iterations: usize,
	/// Fixed seed for the K-Means++ draws; `None` seeds from the OS
	pub seed: Option<u64>,
}

impl Default for SegmentationParams {
	fn default() -> Self {
		Self {
			num_clusters: DEFAULT_CLUSTERS,
			max_iterations: DEFAULT_MAX_ITERATIONS,
			seed: None,
		}
	}
}

/// Complete segmentation result, replaced as a unit on every run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDatabase {
	/// Version that created this
	pub version: String,
	/// When segmentation was performed
	pub timestamp: String,
	/// Parameters used
	pub params: SegmentationParams,
	pub segments: Vec<SegmentSummary>,
	pub assignments: Vec<SegmentAssignment>,
}

impl SegmentDatabase {
	pub fn total_customers(&self) -> usize {
		self.assignments.len()
	}

	/// Assignments belonging to one segment
	pub fn members(&self, segment_id: usize) -> impl Iterator<Item = &SegmentAssignment> {
		self.assignments.iter().filter(move |a| a.segment_id == segment_id)
	}
}
