//! Customer ledger I/O and purchase aggregation

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::core::{Customer, CustomerAggregate, PurchaseStatus};

const MS_PER_DAY: f64 = 86_400_000.0;

/// Load the customer ledger (JSON array of customers)
pub fn load_ledger(path: &Path) -> Result<Vec<Customer>> {
	let bytes = fs::read(path).with_context(|| format!("Failed to read customer ledger {}", path.display()))?;
	serde_json::from_slice(&bytes).context("Failed to parse customer ledger")
}

/// Save the customer ledger as pretty JSON
pub fn save_ledger(path: &Path, customers: &[Customer]) -> Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).context("Failed to create data directory")?;
	}

	let json = serde_json::to_string_pretty(customers).context("Failed to serialize customer ledger")?;
	fs::write(path, json).context("Failed to write customer ledger")?;
	Ok(())
}

/// Aggregate completed purchases of one customer as of `now`
pub fn aggregate(customer: &Customer, now: DateTime<Utc>) -> CustomerAggregate {
	let mut total = 0.0;
	let mut count = 0u32;
	let mut latest: Option<DateTime<Utc>> = None;

	for purchase in customer.purchases.iter().filter(|p| p.status == PurchaseStatus::Completed) {
		total += purchase.amount;
		count += 1;
		latest = Some(latest.map_or(purchase.purchased_at, |l| l.max(purchase.purchased_at)));
	}

	let days = latest
		.map(|last| ((now - last).num_milliseconds() as f64 / MS_PER_DAY).max(0.0))
		.unwrap_or(0.0);

	CustomerAggregate::new(customer.id, total, count, days)
}

/// Aggregates for active-like customers with at least one completed purchase
pub fn eligible_aggregates(customers: &[Customer], now: DateTime<Utc>) -> Vec<CustomerAggregate> {
	customers
		.iter()
		.filter(|c| c.status.is_eligible())
		.map(|c| aggregate(c, now))
		.filter(|agg| agg.purchase_count > 0)
		.collect()
}
