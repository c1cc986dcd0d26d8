//! Unified logging system

use colored::*;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

const LOGO: &str = r#"
              __               __ 
  _________  / /_  ____  _____/ /_
 / ___/ __ \/ __ \/ __ \/ ___/ __/
/ /__/ /_/ / / / / /_/ / /  / /_  
\___/\____/_/ /_/\____/_/   \__/  "#;

const SLOGANS: &[&str] = &[
	"Know your regulars",
	"Champions, loyalists and the ones that got away",
	"Recency, frequency, money. In that order-ish",
	"Lloyd would be proud",
	"Four dimensions, zero spreadsheets",
	"Your best customers called. They want a coupon",
];

pub fn random_slogan() -> &'static str {
	let idx = rand::rng().random_range(0..SLOGANS.len());
	SLOGANS[idx]
}

pub fn print_logo() {
	println!("{}", LOGO.bright_blue().bold());
	println!("{}", random_slogan().dimmed().italic());
}

pub struct Log;

impl Log {
	pub fn set_verbose(enabled: bool) {
		VERBOSE.store(enabled, Ordering::Relaxed);
	}

	pub fn is_verbose() -> bool {
		VERBOSE.load(Ordering::Relaxed)
	}
}

pub fn info(msg: &str) {
	println!("{} {}", "ℹ".bright_blue().bold(), msg.bright_white());
}

pub fn success(msg: &str) {
	println!("{} {}", "✓".bright_green().bold(), msg.bright_white());
}

pub fn warn(msg: &str) {
	println!("{} {}", "⚠".bright_yellow().bold(), msg.bright_white());
}

pub fn error(msg: &str) {
	eprintln!("{} {}", "✗".bright_red().bold(), msg.bright_white());
}

pub fn debug(msg: &str) {
	if Log::is_verbose() {
		println!("{} {}", "⚙".bright_black().bold(), msg.dimmed());
	}
}

pub fn header(text: &str) {
	println!("\n{}", text.bright_blue().bold());
}

/// Money with thousands separators, two decimals
pub fn money(amount: f64) -> String {
	let cents = (amount * 100.0).round() as i64;
	let (whole, frac) = (cents.abs() / 100, cents.abs() % 100);

	let digits = whole.to_string();
	let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(ch);
	}

	let sign = if cents < 0 { "-" } else { "" };
	format!("{}{}.{:02}", sign, grouped, frac)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_money() {
		assert_eq!(money(0.0), "0.00");
		assert_eq!(money(9000.0), "9,000.00");
		assert_eq!(money(1234567.891), "1,234,567.89");
		assert_eq!(money(-50.5), "-50.50");
	}

	#[test]
	fn test_verbose_flag() {
		Log::set_verbose(true);
		assert!(Log::is_verbose());
		Log::set_verbose(false);
		assert!(!Log::is_verbose());
	}
}
