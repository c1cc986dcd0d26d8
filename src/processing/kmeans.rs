//! K-Means with K-Means++ seeding and Lloyd iterations.
//!
//! Seeding picks the first centroid uniformly, then each further centroid with
//! probability proportional to its squared distance from the nearest centroid
//! chosen so far. Lloyd's algorithm then alternates:
//!
//! 1. assign every point to its nearest centroid (ties go to the lowest index)
//! 2. move every centroid to the mean of its points (empty clusters keep theirs)
//!
//! until no centroid component moves by `CONVERGENCE_EPSILON` or more, or the
//! iteration cap is hit. The result is a local optimum that depends only on the
//! input and the random draws made during seeding.

use rand::Rng;

use crate::config::CONVERGENCE_EPSILON;
use crate::core::{Cluster, FeatureVector};
use crate::error::{Error, Result};
use crate::processing::distance::{centroid_of, centroids_converged, distance, squared_distance};

/// Output of a Lloyd run
#[derive(Debug, Clone, PartialEq)]
pub struct KmeansFit {
	/// Final clusters, partitioning every input index
	pub clusters: Vec<Cluster>,
	/// Iterations actually performed
	pub iterations: usize,
	/// Whether the centroids settled before the cap
	pub converged: bool,
	/// Within-cluster sum of squares measured after each assignment step
	pub inertia_history: Vec<f64>,
}

impl KmeansFit {
	/// Label per point (cluster position)
	///
	/// Fails if a member index does not fit in `n_points`.
	pub fn labels(&self, n_points: usize) -> Result<Vec<usize>> {
		let mut labels = vec![0; n_points];
		for (k, cluster) in self.clusters.iter().enumerate() {
			for &idx in &cluster.members {
				*labels.get_mut(idx).ok_or(Error::InvalidParameter {
					name: "n_points",
					message: "smaller than the fitted point set",
				})? = k;
			}
		}
		Ok(labels)
	}

	/// Within-cluster sum of squares against the final centroids
	pub fn inertia(&self, points: &[FeatureVector]) -> Result<f64> {
		inertia(points, &self.clusters)
	}
}

/// Choose `k` well-separated starting centroids
pub fn kmeans_plus_plus<R: Rng + ?Sized>(
	points: &[FeatureVector],
	k: usize,
	rng: &mut R,
) -> Result<Vec<FeatureVector>> {
	if k == 0 {
		return Err(Error::InvalidParameter {
			name: "k",
			message: "must be at least 1",
		});
	}
	if k > points.len() {
		return Err(Error::InsufficientData {
			required: k,
			available: points.len(),
		});
	}

	let mut centroids = Vec::with_capacity(k);
	centroids.push(points[rng.random_range(0..points.len())].clone());

	// Squared distance from each point to its nearest chosen centroid
	let mut weights = points
		.iter()
		.map(|p| squared_distance(p.as_slice(), centroids[0].as_slice()))
		.collect::<Result<Vec<f64>>>()?;

	while centroids.len() < k {
		let next = weighted_pick(&weights, rng);
		let chosen = points[next].clone();

		for (w, p) in weights.iter_mut().zip(points) {
			let d = squared_distance(p.as_slice(), chosen.as_slice())?;
			if d < *w {
				*w = d;
			}
		}

		centroids.push(chosen);
	}

	Ok(centroids)
}

/// Draw an index with probability proportional to its weight
///
/// Falls back to a uniform draw when every weight is zero, which only happens
/// when all remaining points coincide with chosen centroids.
fn weighted_pick<R: Rng + ?Sized>(weights: &[f64], rng: &mut R) -> usize {
	let total: f64 = weights.iter().sum();
	if total <= 0.0 || total.is_nan() {
		return rng.random_range(0..weights.len());
	}

	let target = rng.random::<f64>() * total;
	let mut cumulative = 0.0;
	let mut last_positive = 0;

	for (i, &w) in weights.iter().enumerate() {
		if w <= 0.0 {
			continue;
		}
		cumulative += w;
		last_positive = i;
		if cumulative > target {
			return i;
		}
	}

	// Rounding can leave the running sum a hair short of `target`
	last_positive
}

/// Run Lloyd iterations from the given centroids
pub fn lloyd(points: &[FeatureVector], initial: Vec<FeatureVector>, max_iterations: usize) -> Result<KmeansFit> {
	if max_iterations == 0 {
		return Err(Error::InvalidParameter {
			name: "max_iterations",
			message: "must be at least 1",
		});
	}
	if initial.is_empty() {
		return Err(Error::InvalidParameter {
			name: "centroids",
			message: "at least one initial centroid is required",
		});
	}

	let mut centroids = initial;
	let mut labels = vec![0usize; points.len()];
	let mut inertia_history = Vec::new();
	let mut iterations = 0;
	let mut converged = false;

	while iterations < max_iterations {
		iterations += 1;

		inertia_history.push(assign(points, &centroids, &mut labels)?);
		let updated = update(points, &labels, &centroids)?;

		let settled = centroids_converged(&centroids, &updated, CONVERGENCE_EPSILON);
		centroids = updated;

		if settled {
			converged = true;
			break;
		}
	}

	let mut clusters: Vec<Cluster> = centroids.into_iter().map(Cluster::new).collect();
	for (idx, &label) in labels.iter().enumerate() {
		clusters[label].members.push(idx);
	}

	Ok(KmeansFit {
		clusters,
		iterations,
		converged,
		inertia_history,
	})
}

/// Assignment step; returns the within-cluster sum of squares it produced
fn assign(points: &[FeatureVector], centroids: &[FeatureVector], labels: &mut [usize]) -> Result<f64> {
	let mut total = 0.0;

	for (point, label) in points.iter().zip(labels.iter_mut()) {
		let mut best = 0;
		let mut best_dist = f64::INFINITY;

		for (k, centroid) in centroids.iter().enumerate() {
			let d = distance(point.as_slice(), centroid.as_slice())?;
			if d < best_dist {
				best_dist = d;
				best = k;
			}
		}

		*label = best;
		total += best_dist * best_dist;
	}

	Ok(total)
}

/// Update step; clusters with no points keep their previous centroid
fn update(points: &[FeatureVector], labels: &[usize], previous: &[FeatureVector]) -> Result<Vec<FeatureVector>> {
	let mut members: Vec<Vec<&FeatureVector>> = vec![Vec::new(); previous.len()];
	for (point, &label) in points.iter().zip(labels) {
		members[label].push(point);
	}

	members
		.iter()
		.zip(previous)
		.map(|(group, old)| {
			if group.is_empty() {
				Ok(old.clone())
			} else {
				centroid_of(group)
			}
		})
		.collect()
}

/// Sum of squared distances from each member to its cluster centroid
///
/// Fails if a member index does not refer to one of `points`.
pub fn inertia(points: &[FeatureVector], clusters: &[Cluster]) -> Result<f64> {
	let mut total = 0.0;
	for cluster in clusters {
		for &idx in &cluster.members {
			let point = points.get(idx).ok_or(Error::InvalidParameter {
				name: "points",
				message: "cluster member index out of range",
			})?;
			total += squared_distance(point.as_slice(), cluster.centroid.as_slice())?;
		}
	}
	Ok(total)
}
