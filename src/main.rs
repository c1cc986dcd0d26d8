//! Cohort - RFM customer segmentation
//!
//! Clusters customers by purchase behavior and keeps the latest
//! segmentation next to the customer ledger.

use anyhow::Result;
use clap::{CommandFactory, Parser};

use cohort::cli::{Cli, Command};
use cohort::commands;
use cohort::config;
use cohort::storage::FileStore;
use cohort::ui;

fn main() -> Result<()> {
	let cli = Cli::parse();

	ui::Log::set_verbose(cli.verbose);
	if let Some(dir) = cli.data_dir {
		config::set_data_dir(dir);
	}

	match cli.command {
		Command::Segment {
			clusters,
			max_iterations,
			seed,
			export,
		} => {
			if export.is_none() {
				ui::print_logo();
			}
			let store = FileStore::new(config::data_dir());
			commands::segment::run(&store, clusters, max_iterations, seed, export.as_deref())
		}
		Command::Show { members, export } => {
			let store = FileStore::new(config::data_dir());
			commands::show::run(&store, members, export.as_deref())
		}
		Command::Help { subcommand } => {
			let mut cmd = Cli::command();
			if let Some(sub) = subcommand {
				if let Some(sub_cmd) = cmd.find_subcommand_mut(&sub) {
					sub_cmd.print_help()?;
				} else {
					ui::error(&format!("Unknown subcommand: {}", sub));
					cmd.print_help()?;
				}
			} else {
				cmd.print_help()?;
			}
			Ok(())
		}
	}
}
