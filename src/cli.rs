use clap::builder::styling::{AnsiColor, Style, Styles};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::{DEFAULT_CLUSTERS, DEFAULT_MAX_ITERATIONS, DEFAULT_PREVIEW};

fn parse_clusters(s: &str) -> Result<usize, String> {
	let val: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
	if val == 0 {
		Err("cluster count must be at least 1".to_string())
	} else {
		Ok(val)
	}
}

fn styles() -> Styles {
	Styles::styled()
		.header(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.usage(Style::new().bold().fg_color(Some(AnsiColor::Blue.into())))
		.literal(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.placeholder(Style::new().fg_color(Some(AnsiColor::Yellow.into())))
		.valid(Style::new().fg_color(Some(AnsiColor::Blue.into())))
		.invalid(Style::new().fg_color(Some(AnsiColor::Red.into())))
}

#[derive(Parser, Debug)]
#[command(
	name = "cohort",
	author,
	version,
	about = "RFM customer segmentation with K-Means++",
	styles = styles(),
	disable_help_subcommand = true,
	after_help = format!(
		"{title}
  {cohort} {segment} {segment_args}       {segment_desc}
  {cohort} {segment} {export_args}  {export_desc}
  {cohort} {show}    {show_args}             {show_desc}
  {cohort} {help}    {help_args}          {help_desc}",
		title = "Examples:".bright_blue().bold(),
		cohort = "cohort".bright_blue(),
		segment = "segment".yellow(),
		segment_args = "-k 4 --seed 7",
		segment_desc = "Segment customers into 4 groups".dimmed(),
		export_args = "--export report.json",
		export_desc = "Segment and export the report".dimmed(),
		show = "show".yellow(),
		show_args = "-n 10",
		show_desc = "List current segments".dimmed(),
		help = "help".yellow(),
		help_args = "segment",
		help_desc = "Show help for segment".dimmed(),
	),
)]
pub struct Cli {
	/// Enable verbose debug output
	#[arg(short = 'v', long = "verbose", global = true)]
	pub verbose: bool,

	/// Data directory holding customers.json and segments (default: $COHORT_DATA_DIR or ./.cohort)
	#[arg(long = "data-dir", global = true, value_name = "DIR")]
	pub data_dir: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Cluster eligible customers and replace the stored segmentation
	Segment {
		/// Number of segments
		#[arg(short = 'k', long = "clusters", default_value_t = DEFAULT_CLUSTERS, value_parser = parse_clusters)]
		clusters: usize,

		/// Maximum Lloyd iterations
		#[arg(long = "max-iter", default_value_t = DEFAULT_MAX_ITERATIONS)]
		max_iterations: usize,

		/// Seed for reproducible K-Means++ seeding
		#[arg(short = 's', long = "seed")]
		seed: Option<u64>,

		/// Export the run report as JSON ("-" for stdout)
		#[arg(short = 'e', long = "export", value_name = "PATH")]
		export: Option<PathBuf>,
	},

	/// Show the current segmentation joined with customer records
	Show {
		/// Members to preview per segment
		#[arg(short = 'n', long = "members", default_value_t = DEFAULT_PREVIEW)]
		members: usize,

		/// Export segments with members as JSON ("-" for stdout)
		#[arg(short = 'e', long = "export", value_name = "PATH")]
		export: Option<PathBuf>,
	},

	/// Show help for a subcommand
	Help {
		/// Subcommand name
		subcommand: Option<String>,
	},
}
