//! Show command - current segments joined back to customer records

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use colored::*;
use serde::{Deserialize, Serialize};

use crate::commands::segment::print_segment;
use crate::core::{Customer, FeatureSnapshot, SegmentDatabase};
use crate::storage::{FileStore, SegmentStore};
use crate::ui;

#[derive(Debug, Serialize, Deserialize)]
struct SegmentExport {
	timestamp: String,
	total_customers: usize,
	segments: Vec<SegmentInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
struct SegmentInfo {
	id: usize,
	name: String,
	size: usize,
	avg_value: f64,
	avg_frequency: f64,
	avg_recency: f64,
	members: Vec<MemberInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
struct MemberInfo {
	customer_id: u64,
	name: Option<String>,
	email: Option<String>,
	features: FeatureSnapshot,
}

pub fn run(store: &FileStore, preview_count: usize, export: Option<&Path>) -> Result<()> {
	let Some(db) = store.load_assignments()? else {
		ui::warn("No segmentation found. Run 'cohort segment' first");
		return Ok(());
	};

	let customers: HashMap<u64, Customer> = match store.load_customers() {
		Ok(ledger) => ledger.into_iter().map(|c| (c.id, c)).collect(),
		Err(err) => {
			ui::warn(&format!("Customer records unavailable: {:#}", err));
			HashMap::new()
		}
	};

	if let Some(export_path) = export {
		return export_segments(&db, &customers, export_path);
	}

	ui::success(&format!(
		"{} segments, {} customers",
		db.segments.len(),
		db.total_customers()
	));
	ui::debug(&format!("Segmented at: {}", db.timestamp));
	ui::header("Segments");

	for segment in &db.segments {
		print_segment(segment);

		let members: Vec<_> = db.members(segment.id).collect();
		for assignment in members.iter().take(preview_count) {
			let name = customers
				.get(&assignment.customer_id)
				.map(|c| c.name.as_str())
				.unwrap_or("(unknown)");
			println!(
				"  {} {} {}",
				format!("#{}", assignment.customer_id).dimmed(),
				name.bright_white(),
				format!(
					"{} over {} orders, {:.0}d ago",
					ui::money(assignment.features.total_value),
					assignment.features.purchase_count,
					assignment.features.days_since_last_purchase
				)
				.dimmed()
			);
		}

		if members.len() > preview_count {
			println!(
				"  {}",
				format!("... and {} more", members.len() - preview_count).dimmed()
			);
		}
	}

	Ok(())
}

fn export_segments(db: &SegmentDatabase, customers: &HashMap<u64, Customer>, export_path: &Path) -> Result<()> {
	let segments: Vec<SegmentInfo> = db
		.segments
		.iter()
		.map(|segment| SegmentInfo {
			id: segment.id,
			name: segment.name.clone(),
			size: segment.size,
			avg_value: segment.avg_value,
			avg_frequency: segment.avg_frequency,
			avg_recency: segment.avg_recency,
			members: db
				.members(segment.id)
				.map(|a| {
					let customer = customers.get(&a.customer_id);
					MemberInfo {
						customer_id: a.customer_id,
						name: customer.map(|c| c.name.clone()),
						email: customer.and_then(|c| c.email.clone()),
						features: a.features.clone(),
					}
				})
				.collect(),
		})
		.collect();

	let export_data = SegmentExport {
		timestamp: db.timestamp.clone(),
		total_customers: db.total_customers(),
		segments,
	};

	let json = serde_json::to_string_pretty(&export_data)?;

	if export_path.to_str() == Some("-") || export_path.as_os_str().is_empty() {
		println!("{}", json);
	} else {
		std::fs::write(export_path, json)?;
		ui::success(&format!("Exported to {}", export_path.display()));
	}

	Ok(())
}
