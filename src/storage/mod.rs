//! Customer ledger and segment persistence

pub mod customers;
pub mod segments;

pub use customers::{aggregate, eligible_aggregates, load_ledger, save_ledger};
pub use segments::{FileStore, MemoryStore, SegmentStore};
