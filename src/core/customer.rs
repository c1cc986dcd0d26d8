//! Customer records and the per-customer purchase aggregates fed to clustering

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ELIGIBLE_STATUSES;
use crate::core::FEATURE_DIM;

/// Lifecycle state of a contact in the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
	Lead,
	Active,
	Customer,
	Inactive,
	Archived,
}

impl CustomerStatus {
	pub fn is_eligible(self) -> bool {
		ELIGIBLE_STATUSES.contains(&self)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
	Completed,
	Pending,
	Cancelled,
	Refunded,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Purchase {
	pub amount: f64,
	pub status: PurchaseStatus,
	pub purchased_at: DateTime<Utc>,
}

/// A customer as stored in the ledger file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
	pub id: u64,
	pub name: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	pub status: CustomerStatus,
	#[serde(default)]
	pub purchases: Vec<Purchase>,
}

/// Derived purchase metrics for one customer
///
/// Read-only input to the engine. `avg_order_value` is always derived from
/// the total and count so the three can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerAggregate {
	pub customer_id: u64,
	pub total_value: f64,
	pub purchase_count: u32,
	pub avg_order_value: f64,
	pub days_since_last_purchase: f64,
}

impl CustomerAggregate {
	pub fn new(customer_id: u64, total_value: f64, purchase_count: u32, days_since_last_purchase: f64) -> Self {
		let avg_order_value = if purchase_count > 0 {
			total_value / purchase_count as f64
		} else {
			0.0
		};

		Self {
			customer_id,
			total_value,
			purchase_count,
			avg_order_value,
			days_since_last_purchase,
		}
	}

	/// Raw metrics in feature order: value, frequency, order value, recency
	pub fn metrics(&self) -> [f64; FEATURE_DIM] {
		[
			self.total_value,
			self.purchase_count as f64,
			self.avg_order_value,
			self.days_since_last_purchase,
		]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_avg_order_value_derived() {
		let agg = CustomerAggregate::new(1, 300.0, 4, 12.5);
		assert_eq!(agg.avg_order_value, 75.0);
		assert_eq!(agg.metrics(), [300.0, 4.0, 75.0, 12.5]);
	}

	#[test]
	fn test_avg_order_value_zero_purchases() {
		let agg = CustomerAggregate::new(1, 0.0, 0, 0.0);
		assert_eq!(agg.avg_order_value, 0.0);
	}

	#[test]
	fn test_status_eligibility() {
		assert!(CustomerStatus::Active.is_eligible());
		assert!(CustomerStatus::Customer.is_eligible());
		assert!(!CustomerStatus::Lead.is_eligible());
		assert!(!CustomerStatus::Archived.is_eligible());
	}

	#[test]
	fn test_status_serde_lowercase() {
		let status: CustomerStatus = serde_json::from_str("\"inactive\"").unwrap();
		assert_eq!(status, CustomerStatus::Inactive);
		assert_eq!(serde_json::to_string(&PurchaseStatus::Refunded).unwrap(), "\"refunded\"");
	}
}
