//! Segment command - cluster customers and replace the stored segmentation

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use colored::*;

use crate::core::{SegmentSummary, SegmentationParams};
use crate::error::Error;
use crate::processing::{run_segmentation, SegmentationReport};
use crate::storage::FileStore;
use crate::ui;

pub fn run(
	store: &FileStore,
	clusters: usize,
	max_iterations: usize,
	seed: Option<u64>,
	export: Option<&Path>,
) -> Result<()> {
	let start = Instant::now();

	ui::debug(&format!(
		"Starting segmentation: dir={}, k={}, max_iter={}, seed={:?}",
		store.dir().display(),
		clusters,
		max_iterations,
		seed
	));

	ui::info(&format!("Loading customers from {}", store.customers_path().display()));

	let params = SegmentationParams {
		num_clusters: clusters,
		max_iterations,
		seed,
	};

	let report = match run_segmentation(store, &params) {
		Ok(report) => report,
		Err(err @ Error::InsufficientData { .. }) => {
			ui::warn("Lower --clusters or wait for more customers with completed purchases");
			return Err(err.into());
		}
		Err(err) => return Err(err.into()),
	};

	let duration = start.elapsed();

	ui::success(&format!(
		"Saved {} assignments to {}",
		report.assignments_written,
		store.segments_path().display()
	));

	if let Some(export_path) = export {
		return export_report(&report, export_path);
	}

	print_report(&report);
	println!(
		"\n{}",
		format!("Completed in {:.2}s", duration.as_secs_f32()).dimmed()
	);

	Ok(())
}

fn print_report(report: &SegmentationReport) {
	ui::success(&format!(
		"{} segments, {} customers, {} iterations{}",
		report.summaries.len(),
		report.assignments_written,
		report.iterations,
		if report.converged { "" } else { " (not converged)" }
	));
	ui::debug(&format!("Inertia: {:.4}", report.inertia));
	ui::header("Segments");

	for segment in &report.summaries {
		print_segment(segment);
	}
}

pub(crate) fn print_segment(segment: &SegmentSummary) {
	println!(
		"\n{} {} {} ({} customers)",
		"Segment".bright_white(),
		segment.id.to_string().bright_cyan(),
		segment.name.bright_yellow().bold(),
		segment.size
	);
	println!("  {}: {}", "Avg value".dimmed(), ui::money(segment.avg_value));
	println!("  {}: {:.1}", "Avg purchases".dimmed(), segment.avg_frequency);
	println!("  {}: {:.1} days", "Avg recency".dimmed(), segment.avg_recency);

	let centroid: Vec<String> = segment.centroid.iter().map(|v| format!("{:.3}", v)).collect();
	ui::debug(&format!("Centroid: [{}]", centroid.join(", ")));
}

fn export_report(report: &SegmentationReport, export_path: &Path) -> Result<()> {
	let json = serde_json::to_string_pretty(report)?;

	if export_path.to_str() == Some("-") || export_path.as_os_str().is_empty() {
		println!("{}", json);
	} else {
		std::fs::write(export_path, json)?;
		ui::success(&format!("Exported to {}", export_path.display()));
	}

	Ok(())
}
