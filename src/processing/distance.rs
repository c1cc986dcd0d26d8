//! Distance and centroid utilities shared by seeding and iteration

use crate::core::FeatureVector;
use crate::error::{Error, Result};

fn check_dims(a: &[f64], b: &[f64]) -> Result<()> {
	if a.len() != b.len() {
		return Err(Error::DimensionMismatch {
			expected: a.len(),
			found: b.len(),
		});
	}
	Ok(())
}

#[inline]
pub(crate) fn squared_distance(a: &[f64], b: &[f64]) -> Result<f64> {
	check_dims(a, b)?;
	Ok(a.iter()
		.zip(b.iter())
		.map(|(x, y)| {
			let d = x - y;
			d * d
		})
		.sum())
}

/// Euclidean distance between two equal-length vectors
pub fn distance(a: &[f64], b: &[f64]) -> Result<f64> {
	squared_distance(a, b).map(f64::sqrt)
}

/// Per-dimension mean of a non-empty set of points
pub fn centroid_of(points: &[&FeatureVector]) -> Result<FeatureVector> {
	let Some(first) = points.first() else {
		return Err(Error::EmptyClusterInput);
	};

	let dim = first.dim();
	let mut sums = vec![0.0; dim];

	for point in points {
		check_dims(&sums, point.as_slice())?;
		for (sum, &val) in sums.iter_mut().zip(point.as_slice()) {
			*sum += val;
		}
	}

	let n = points.len() as f64;
	Ok(FeatureVector::new(sums.into_iter().map(|s| s / n).collect()))
}

/// True iff every component of every centroid moved by strictly less than `epsilon`
pub fn centroids_converged(old: &[FeatureVector], new: &[FeatureVector], epsilon: f64) -> bool {
	if old.len() != new.len() {
		return false;
	}

	old.iter().zip(new.iter()).all(|(a, b)| {
		a.dim() == b.dim()
			&& a.as_slice()
				.iter()
				.zip(b.as_slice())
				.all(|(x, y)| (x - y).abs() < epsilon)
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::CONVERGENCE_EPSILON;

	fn fv(values: &[f64]) -> FeatureVector {
		FeatureVector::new(values.to_vec())
	}

	#[test]
	fn test_distance() {
		let d = distance(&[0.0, 0.0, 0.0, 0.0], &[3.0, 4.0, 0.0, 0.0]).unwrap();
		assert!((d - 5.0).abs() < 1e-12);
	}

	#[test]
	fn test_distance_dimension_mismatch() {
		let err = distance(&[0.0, 1.0], &[0.0, 1.0, 2.0]).unwrap_err();
		assert!(matches!(err, Error::DimensionMismatch { expected: 2, found: 3 }));
	}

	#[test]
	fn test_centroid_of_mean() {
		let a = fv(&[0.0, 0.0, 1.0, 1.0]);
		let b = fv(&[1.0, 0.5, 0.0, 1.0]);
		let c = centroid_of(&[&a, &b]).unwrap();
		assert_eq!(c.as_slice(), &[0.5, 0.25, 0.5, 1.0]);
	}

	#[test]
	fn test_centroid_of_empty() {
		assert!(matches!(centroid_of(&[]), Err(Error::EmptyClusterInput)));
	}

	#[test]
	fn test_centroid_of_mixed_dims() {
		let a = fv(&[0.0, 0.0]);
		let b = fv(&[1.0, 0.5, 0.0]);
		assert!(matches!(centroid_of(&[&a, &b]), Err(Error::DimensionMismatch { .. })));
	}

	#[test]
	fn test_converged_is_strict() {
		let old = vec![fv(&[0.0, 0.0, 0.0, 0.0])];
		let close = vec![fv(&[0.00005, 0.0, 0.0, 0.0])];
		let exact_eps = vec![fv(&[0.5, 0.0, 0.0, 0.0])];

		assert!(centroids_converged(&old, &close, CONVERGENCE_EPSILON));
		assert!(!centroids_converged(&old, &exact_eps, 0.5));
	}

	#[test]
	fn test_converged_checks_every_centroid() {
		let old = vec![fv(&[0.0; 4]), fv(&[1.0; 4])];
		let new = vec![fv(&[0.0; 4]), fv(&[1.0, 1.0, 1.0, 0.9])];
		assert!(!centroids_converged(&old, &new, CONVERGENCE_EPSILON));
	}
}
