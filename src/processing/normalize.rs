//! Min-max feature scaling

use crate::core::{CustomerAggregate, FeatureVector, FEATURE_DIM};

/// Scale each metric independently into [0, 1]
///
/// The minimum of a dimension maps to 0 and the maximum to 1. A dimension
/// where every customer has the same value maps to 0 for all of them.
pub fn normalize(aggregates: &[CustomerAggregate]) -> Vec<FeatureVector> {
	if aggregates.is_empty() {
		return Vec::new();
	}

	let mut mins = [f64::INFINITY; FEATURE_DIM];
	let mut maxs = [f64::NEG_INFINITY; FEATURE_DIM];

	for agg in aggregates {
		for (d, value) in agg.metrics().into_iter().enumerate() {
			mins[d] = mins[d].min(value);
			maxs[d] = maxs[d].max(value);
		}
	}

	aggregates
		.iter()
		.map(|agg| {
			let scaled: Vec<f64> = agg
				.metrics()
				.into_iter()
				.enumerate()
				.map(|(d, value)| {
					let range = maxs[d] - mins[d];
					if range == 0.0 {
						0.0
					} else {
						(value - mins[d]) / range
					}
				})
				.collect();
			FeatureVector::new(scaled)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn agg(value: f64, count: u32, days: f64) -> CustomerAggregate {
		CustomerAggregate::new(0, value, count, days)
	}

	#[test]
	fn test_empty_input() {
		assert!(normalize(&[]).is_empty());
	}

	#[test]
	fn test_min_max_mapping() {
		let features = normalize(&[agg(100.0, 1, 10.0), agg(300.0, 3, 30.0), agg(200.0, 2, 20.0)]);

		assert_eq!(features.len(), 3);
		assert_eq!(features[0].as_slice()[0], 0.0);
		assert_eq!(features[1].as_slice()[0], 1.0);
		assert!((features[2].as_slice()[0] - 0.5).abs() < 1e-12);
		assert_eq!(features[0].as_slice()[3], 0.0);
		assert_eq!(features[1].as_slice()[3], 1.0);
	}

	#[test]
	fn test_degenerate_dimension_maps_to_zero() {
		// Same order value (100) for everyone
		let features = normalize(&[agg(100.0, 1, 5.0), agg(200.0, 2, 9.0), agg(300.0, 3, 1.0)]);

		for f in &features {
			assert_eq!(f.as_slice()[2], 0.0);
		}
	}

	#[test]
	fn test_single_point_is_all_zero() {
		let features = normalize(&[agg(4200.0, 7, 33.0)]);
		assert_eq!(features[0].as_slice(), &[0.0, 0.0, 0.0, 0.0]);
	}
}
