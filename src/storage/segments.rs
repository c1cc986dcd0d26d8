//! Segment stores: the input/output boundary of a segmentation run

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Utc};
use tempfile::NamedTempFile;

use crate::config::{CUSTOMERS_FILE, SEGMENTS_FILE};
use crate::core::{Customer, CustomerAggregate, SegmentDatabase};
use crate::storage::customers;

/// Backing store for customer aggregates and the current segmentation
///
/// `replace_assignments` must be all-or-nothing: a reader sees either the whole
/// previous segmentation or the whole new one.
pub trait SegmentStore {
	/// Aggregates of every customer eligible for segmentation
	fn load_aggregates(&self) -> Result<Vec<CustomerAggregate>>;

	/// Delete the current assignments and insert `db` as one unit
	fn replace_assignments(&self, db: &SegmentDatabase) -> Result<()>;

	/// Current segmentation, if any run has completed
	fn load_assignments(&self) -> Result<Option<SegmentDatabase>>;
}

/// File-backed store rooted at a data directory
///
/// The ledger is `customers.json`; the segmentation is one msgpack snapshot
/// staged in a uniquely named file and swapped in with a rename.
#[derive(Debug, Clone)]
pub struct FileStore {
	dir: PathBuf,
	now: Option<DateTime<Utc>>,
}

impl FileStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self {
			dir: dir.into(),
			now: None,
		}
	}

	/// Pin the clock used for recency (defaults to the current time)
	pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
		self.now = Some(now);
		self
	}

	pub fn dir(&self) -> &Path {
		&self.dir
	}

	pub fn customers_path(&self) -> PathBuf {
		self.dir.join(CUSTOMERS_FILE)
	}

	pub fn segments_path(&self) -> PathBuf {
		self.dir.join(SEGMENTS_FILE)
	}

	pub fn load_customers(&self) -> Result<Vec<Customer>> {
		customers::load_ledger(&self.customers_path())
	}
}

impl SegmentStore for FileStore {
	fn load_aggregates(&self) -> Result<Vec<CustomerAggregate>> {
		let ledger = self.load_customers()?;
		let now = self.now.unwrap_or_else(Utc::now);
		Ok(customers::eligible_aggregates(&ledger, now))
	}

	fn replace_assignments(&self, db: &SegmentDatabase) -> Result<()> {
		fs::create_dir_all(&self.dir).context("Failed to create data directory")?;

		let path = self.segments_path();
		let bytes = rmp_serde::to_vec(db).context("Failed to serialize segments")?;

		// Unique staging file per run; the rename is the commit point
		let mut staged = NamedTempFile::new_in(&self.dir).context("Failed to create staging file")?;
		staged.write_all(&bytes).context("Failed to write staged segments")?;
		staged.as_file().sync_all().context("Failed to flush staged segments")?;
		staged
			.persist(&path)
			.map_err(|err| err.error)
			.context("Failed to swap in new segments")?;

		crate::ui::debug(&format!("Replaced segments at {}", path.display()));
		Ok(())
	}

	fn load_assignments(&self) -> Result<Option<SegmentDatabase>> {
		let path = self.segments_path();
		if !path.exists() {
			return Ok(None);
		}

		let bytes = fs::read(&path).context("Failed to read segments")?;
		let db = rmp_serde::from_slice(&bytes).context("Failed to deserialize segments")?;
		Ok(Some(db))
	}
}

/// In-memory store, mainly for tests and embedding
///
/// `fail_next_replace` makes the next replacement fail after the old
/// assignments were deleted but before the new ones were inserted; the
/// delete is rolled back.
#[derive(Debug, Default)]
pub struct MemoryStore {
	aggregates: Vec<CustomerAggregate>,
	segments: Mutex<Option<SegmentDatabase>>,
	fail_next: AtomicBool,
}

impl MemoryStore {
	pub fn new(aggregates: Vec<CustomerAggregate>) -> Self {
		Self {
			aggregates,
			..Default::default()
		}
	}

	pub fn fail_next_replace(&self) {
		self.fail_next.store(true, Ordering::SeqCst);
	}
}

impl SegmentStore for MemoryStore {
	fn load_aggregates(&self) -> Result<Vec<CustomerAggregate>> {
		Ok(self.aggregates.clone())
	}

	fn replace_assignments(&self, db: &SegmentDatabase) -> Result<()> {
		let mut committed = self.segments.lock().map_err(|_| anyhow!("segment store lock poisoned"))?;

		// The lock is held for the whole delete+insert, so readers never see the gap
		let previous = committed.take();

		if self.fail_next.swap(false, Ordering::SeqCst) {
			*committed = previous;
			bail!("simulated failure between delete and insert");
		}

		*committed = Some(db.clone());
		Ok(())
	}

	fn load_assignments(&self) -> Result<Option<SegmentDatabase>> {
		let segments = self.segments.lock().map_err(|_| anyhow!("segment store lock poisoned"))?;
		Ok(segments.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::core::{Customer, CustomerStatus, Purchase, PurchaseStatus, SegmentationParams};
	use chrono::{Duration, TimeZone};

	fn db(tag: &str) -> SegmentDatabase {
		SegmentDatabase {
			version: "test".to_string(),
			timestamp: tag.to_string(),
			params: SegmentationParams::default(),
			segments: Vec::new(),
			assignments: Vec::new(),
		}
	}

	#[test]
	fn test_memory_store_replace() {
		let store = MemoryStore::new(Vec::new());
		assert!(store.load_assignments().unwrap().is_none());

		store.replace_assignments(&db("first")).unwrap();
		store.replace_assignments(&db("second")).unwrap();
		assert_eq!(store.load_assignments().unwrap().unwrap().timestamp, "second");
	}

	#[test]
	fn test_memory_store_failure_keeps_old() {
		let store = MemoryStore::new(Vec::new());
		store.replace_assignments(&db("first")).unwrap();

		store.fail_next_replace();
		assert!(store.replace_assignments(&db("second")).is_err());
		assert_eq!(store.load_assignments().unwrap().unwrap().timestamp, "first");

		// Failure is one-shot
		store.replace_assignments(&db("third")).unwrap();
		assert_eq!(store.load_assignments().unwrap().unwrap().timestamp, "third");
	}

	#[test]
	fn test_file_store_replace_and_load() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileStore::new(dir.path().join("data"));

		assert!(store.load_assignments().unwrap().is_none());
		store.replace_assignments(&db("first")).unwrap();
		store.replace_assignments(&db("second")).unwrap();

		assert_eq!(store.load_assignments().unwrap().unwrap().timestamp, "second");
	}

	#[test]
	fn test_file_store_leaves_no_staging_files() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileStore::new(dir.path());
		store.replace_assignments(&db("first")).unwrap();
		store.replace_assignments(&db("second")).unwrap();

		let names: Vec<_> = fs::read_dir(dir.path())
			.unwrap()
			.filter_map(|e| e.ok())
			.map(|e| e.file_name())
			.collect();
		assert_eq!(names, vec![std::ffi::OsString::from(SEGMENTS_FILE)]);
	}

	#[test]
	fn test_file_store_failed_swap_cleans_up() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileStore::new(dir.path());

		// A non-empty directory squatting on the snapshot path blocks the rename
		fs::create_dir(store.segments_path()).unwrap();
		fs::write(store.segments_path().join("keep"), b"x").unwrap();

		assert!(store.replace_assignments(&db("first")).is_err());
		assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
	}

	#[test]
	fn test_file_store_concurrent_replace() {
		let dir = tempfile::tempdir().unwrap();
		let store = FileStore::new(dir.path());

		let errors: Vec<usize> = std::thread::scope(|scope| {
			let writers: Vec<_> = ["left", "right"]
				.into_iter()
				.map(|tag| {
					let store = &store;
					scope.spawn(move || {
						(0..200)
							.filter(|i| store.replace_assignments(&db(&format!("{}-{}", tag, i))).is_err())
							.count()
					})
				})
				.collect();

			writers.into_iter().map(|w| w.join().unwrap()).collect()
		});

		assert_eq!(errors, vec![0, 0]);
		let last = store.load_assignments().unwrap().unwrap().timestamp;
		assert!(last == "left-199" || last == "right-199", "unexpected snapshot {}", last);
	}

	#[test]
	fn test_file_store_aggregates() {
		let dir = tempfile::tempdir().unwrap();
		let now = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
		let store = FileStore::new(dir.path()).with_reference_time(now);

		let ledger = vec![
			Customer {
				id: 1,
				name: "Ada".to_string(),
				email: Some("ada@example.com".to_string()),
				status: CustomerStatus::Active,
				purchases: vec![Purchase {
					amount: 120.0,
					status: PurchaseStatus::Completed,
					purchased_at: now - Duration::days(30),
				}],
			},
			Customer {
				id: 2,
				name: "Bob".to_string(),
				email: None,
				status: CustomerStatus::Inactive,
				purchases: Vec::new(),
			},
		];
		customers::save_ledger(&store.customers_path(), &ledger).unwrap();

		let aggregates = store.load_aggregates().unwrap();
		assert_eq!(aggregates.len(), 1);
		assert_eq!(aggregates[0].customer_id, 1);
		assert!((aggregates[0].days_since_last_purchase - 30.0).abs() < 1e-9);
	}
}
