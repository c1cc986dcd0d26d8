//! Segmentation runs: aggregates in, labeled segments persisted out

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::core::{FeatureSnapshot, SegmentAssignment, SegmentDatabase, SegmentSummary, SegmentationParams};
use crate::error::{Error, Result};
use crate::processing::kmeans::{kmeans_plus_plus, lloyd};
use crate::processing::label::{label_segments, SegmentProfile};
use crate::processing::normalize::normalize;
use crate::storage::SegmentStore;
use crate::ui;

/// What a completed run hands back to its trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationReport {
	pub timestamp: String,
	pub summaries: Vec<SegmentSummary>,
	pub assignments_written: usize,
	pub iterations: usize,
	pub converged: bool,
	/// Within-cluster sum of squares in normalized space
	pub inertia: f64,
}

/// Run a segmentation with the RNG described by `params.seed`
pub fn run_segmentation<S: SegmentStore + ?Sized>(store: &S, params: &SegmentationParams) -> Result<SegmentationReport> {
	let mut rng = match params.seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_os_rng(),
	};
	segment_customers(store, params, &mut rng)
}

/// Cluster every eligible customer and atomically replace the stored segments
///
/// Nothing is written unless clustering and labeling succeed; if the store
/// fails during replacement the previous segmentation stays in place.
pub fn segment_customers<S, R>(store: &S, params: &SegmentationParams, rng: &mut R) -> Result<SegmentationReport>
where
	S: SegmentStore + ?Sized,
	R: Rng + ?Sized,
{
	validate(params)?;

	let aggregates = store.load_aggregates().map_err(Error::store)?;
	ui::debug(&format!("Loaded {} eligible customers", aggregates.len()));

	if aggregates.len() < params.num_clusters {
		return Err(Error::InsufficientData {
			required: params.num_clusters,
			available: aggregates.len(),
		});
	}

	let features = normalize(&aggregates);
	let initial = kmeans_plus_plus(&features, params.num_clusters, rng)?;
	let fit = lloyd(&features, initial, params.max_iterations)?;
	let inertia = fit.inertia(&features)?;

	ui::debug(&format!(
		"K-Means finished after {} iterations ({})",
		fit.iterations,
		if fit.converged { "converged" } else { "iteration cap reached" }
	));

	let names = label_segments(&fit.clusters, &aggregates);

	let mut segments = Vec::with_capacity(fit.clusters.len());
	let mut assignments = Vec::with_capacity(aggregates.len());

	for (id, (cluster, name)) in fit.clusters.iter().zip(names).enumerate() {
		let profile = SegmentProfile::of(cluster, &aggregates);

		for &idx in &cluster.members {
			let agg = &aggregates[idx];
			assignments.push(SegmentAssignment {
				customer_id: agg.customer_id,
				segment_id: id,
				segment_name: name.clone(),
				features: FeatureSnapshot::from(agg),
			});
		}

		ui::debug(&format!("Segment {} '{}': {} customers", id, name, cluster.len()));

		segments.push(SegmentSummary {
			id,
			name,
			size: cluster.len(),
			centroid: cluster.centroid.as_slice().to_vec(),
			avg_value: profile.map_or(0.0, |p| p.avg_value),
			avg_frequency: profile.map_or(0.0, |p| p.avg_frequency),
			avg_recency: profile.map_or(0.0, |p| p.avg_recency),
		});
	}

	let db = SegmentDatabase {
		version: env!("CARGO_PKG_VERSION").to_string(),
		timestamp: chrono::Utc::now().to_rfc3339(),
		params: params.clone(),
		segments,
		assignments,
	};

	store.replace_assignments(&db).map_err(Error::store)?;

	Ok(SegmentationReport {
		timestamp: db.timestamp,
		assignments_written: db.assignments.len(),
		summaries: db.segments,
		iterations: fit.iterations,
		converged: fit.converged,
		inertia,
	})
}

fn validate(params: &SegmentationParams) -> Result<()> {
	if params.num_clusters == 0 {
		return Err(Error::InvalidParameter {
			name: "num_clusters",
			message: "must be at least 1",
		});
	}
	if params.max_iterations == 0 {
		return Err(Error::InvalidParameter {
			name: "max_iterations",
			message: "must be at least 1",
		});
	}
	Ok(())
}
