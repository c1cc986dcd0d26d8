//! Engine error taxonomy

use thiserror::Error;

/// Errors returned by the segmentation engine.
#[derive(Debug, Error)]
pub enum Error {
	/// Fewer eligible customers than requested segments.
	#[error("insufficient data: need at least {required} eligible customers, found {available}")]
	InsufficientData {
		/// Minimum number of eligible customers for the run.
		required: usize,
		/// Number of eligible customers actually found.
		available: usize,
	},

	/// Two vectors of different length reached a distance or centroid computation.
	#[error("dimension mismatch: expected {expected}, found {found}")]
	DimensionMismatch {
		/// Expected dimensionality.
		expected: usize,
		/// Found dimensionality.
		found: usize,
	},

	/// Centroid requested for an empty set of points.
	#[error("cannot compute the centroid of an empty cluster")]
	EmptyClusterInput,

	/// Invalid run parameter.
	#[error("invalid parameter {name}: {message}")]
	InvalidParameter {
		/// Parameter name.
		name: &'static str,
		/// Human-readable explanation.
		message: &'static str,
	},

	/// Failure reported by the backing store, message passed through as-is.
	#[error("{0}")]
	Store(String),
}

impl Error {
	pub(crate) fn store(err: anyhow::Error) -> Self {
		Self::Store(format!("{:#}", err))
	}
}

/// Result type used by the engine.
pub type Result<T> = std::result::Result<T, Error>;
