use cohort::core::{CustomerAggregate, FeatureVector};
use cohort::processing::{kmeans_plus_plus, lloyd, normalize};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn aggregates() -> impl Strategy<Value = Vec<CustomerAggregate>> {
	prop::collection::vec((0.0f64..20_000.0, 1u32..40, 0.0f64..900.0), 1..40).prop_map(|rows| {
		rows.into_iter()
			.enumerate()
			.map(|(i, (value, count, days))| CustomerAggregate::new(i as u64, value, count, days))
			.collect()
	})
}

fn points() -> impl Strategy<Value = Vec<FeatureVector>> {
	prop::collection::vec(prop::collection::vec(0.0f64..1.0, 4), 1..30)
		.prop_map(|rows| rows.into_iter().map(FeatureVector::new).collect())
}

proptest! {
	#[test]
	fn prop_normalized_within_unit_range(data in aggregates()) {
		let features = normalize(&data);
		prop_assert_eq!(features.len(), data.len());

		for d in 0..4 {
			let raw: Vec<f64> = data.iter().map(|a| a.metrics()[d]).collect();
			let min = raw.iter().cloned().fold(f64::INFINITY, f64::min);
			let max = raw.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

			for (r, f) in raw.iter().zip(&features) {
				let v = f.as_slice()[d];
				prop_assert!((0.0..=1.0).contains(&v));
				if max == min {
					prop_assert_eq!(v, 0.0);
				} else if *r == max {
					prop_assert_eq!(v, 1.0);
				} else if *r == min {
					prop_assert_eq!(v, 0.0);
				}
			}
		}
	}

	#[test]
	fn prop_clusters_partition_points(data in points(), k in 1usize..6, seed in any::<u64>()) {
		prop_assume!(k <= data.len());

		let mut rng = StdRng::seed_from_u64(seed);
		let initial = kmeans_plus_plus(&data, k, &mut rng).unwrap();
		let fit = lloyd(&data, initial, 100).unwrap();

		prop_assert_eq!(fit.clusters.len(), k);
		let mut seen: Vec<usize> = fit.clusters.iter().flat_map(|c| c.members.iter().copied()).collect();
		seen.sort_unstable();
		prop_assert_eq!(seen, (0..data.len()).collect::<Vec<_>>());
	}

	#[test]
	fn prop_inertia_non_increasing(data in points(), k in 1usize..6, seed in any::<u64>()) {
		prop_assume!(k <= data.len());

		let mut rng = StdRng::seed_from_u64(seed);
		let initial = kmeans_plus_plus(&data, k, &mut rng).unwrap();
		let fit = lloyd(&data, initial, 100).unwrap();

		for pair in fit.inertia_history.windows(2) {
			prop_assert!(pair[1] <= pair[0] + 1e-9);
		}
	}

	#[test]
	fn prop_seeded_runs_are_deterministic(data in points(), k in 1usize..6, seed in any::<u64>()) {
		prop_assume!(k <= data.len());

		let run = || {
			let mut rng = StdRng::seed_from_u64(seed);
			let initial = kmeans_plus_plus(&data, k, &mut rng).unwrap();
			lloyd(&data, initial, 100).unwrap()
		};

		prop_assert_eq!(run(), run());
	}
}
