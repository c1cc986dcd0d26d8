//! Core domain types

pub mod cluster;
pub mod customer;
pub mod feature;
pub mod segment;

pub use cluster::Cluster;
pub use customer::{Customer, CustomerAggregate, CustomerStatus, Purchase, PurchaseStatus};
pub use feature::{FeatureVector, FEATURE_DIM};
pub use segment::{FeatureSnapshot, SegmentAssignment, SegmentDatabase, SegmentSummary, SegmentationParams};
