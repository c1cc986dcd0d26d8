//! RFM-style naming of clusters

use crate::core::{Cluster, CustomerAggregate};

/// Average raw metrics of a cluster's members
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProfile {
	pub avg_value: f64,
	pub avg_frequency: f64,
	pub avg_recency: f64,
}

impl SegmentProfile {
	/// `None` for a cluster without members
	pub fn of(cluster: &Cluster, aggregates: &[CustomerAggregate]) -> Option<Self> {
		if cluster.is_empty() {
			return None;
		}

		let (mut value, mut frequency, mut recency) = (0.0, 0.0, 0.0);
		for &idx in &cluster.members {
			let agg = &aggregates[idx];
			value += agg.total_value;
			frequency += agg.purchase_count as f64;
			recency += agg.days_since_last_purchase;
		}

		let n = cluster.len() as f64;
		Some(Self {
			avg_value: value / n,
			avg_frequency: frequency / n,
			avg_recency: recency / n,
		})
	}
}

/// Name a segment from its profile; first matching rule wins
///
/// Thresholds overlap and a cluster can satisfy several rules; evaluation
/// order alone decides the name.
pub fn label_profile(profile: &SegmentProfile, position: usize) -> String {
	let SegmentProfile {
		avg_value: value,
		avg_frequency: frequency,
		avg_recency: recency,
	} = *profile;

	if value > 5000.0 && frequency > 5.0 && recency < 90.0 {
		"Champions".to_string()
	} else if value > 3000.0 && recency < 180.0 {
		"Loyal Customers".to_string()
	} else if frequency > 3.0 && recency > 180.0 {
		"At Risk".to_string()
	} else if recency < 90.0 && frequency < 3.0 {
		"New Customers".to_string()
	} else if recency > 365.0 {
		"Lost Customers".to_string()
	} else {
		fallback_name(position)
	}
}

fn fallback_name(position: usize) -> String {
	format!("Segment {}", position + 1)
}

/// One display name per cluster, in cluster order
pub fn label_segments(clusters: &[Cluster], aggregates: &[CustomerAggregate]) -> Vec<String> {
	clusters
		.iter()
		.enumerate()
		.map(|(position, cluster)| match SegmentProfile::of(cluster, aggregates) {
			Some(profile) => label_profile(&profile, position),
			None => fallback_name(position),
		})
		.collect()
}
