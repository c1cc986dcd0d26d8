//! Segmentation engine: scaling, clustering, labeling and orchestration

pub mod distance;
pub mod kmeans;
pub mod label;
pub mod normalize;
pub mod segment;

pub use distance::{centroid_of, centroids_converged, distance};
pub use kmeans::{inertia, kmeans_plus_plus, lloyd, KmeansFit};
pub use label::{label_profile, label_segments, SegmentProfile};
pub use normalize::normalize;
pub use segment::{run_segmentation, segment_customers, SegmentationReport};
