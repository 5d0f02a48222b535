//! CLI output formatting utilities.
//!
//! Colored status lines, byte formatting and JSON output shared by the
//! subcommands.

use anyhow::Context;
use artimport_lib::execute::{CopyOutcome, CopyStatus};
use clap::ValueEnum;
use owo_colors::{OwoColorize, Stream};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Text,
  Json,
}

impl OutputFormat {
  pub fn is_json(self) -> bool {
    matches!(self, OutputFormat::Json)
  }
}

pub mod symbols {
  pub const SUCCESS: &str = "✓";
  pub const ERROR: &str = "✗";
  pub const WARNING: &str = "⚠";
  pub const INFO: &str = "•";
  pub const ADD: &str = "+";
  pub const MODIFY: &str = "~";
  pub const SAME: &str = "=";
}

pub fn format_bytes(bytes: u64) -> String {
  const KB: u64 = 1024;
  const MB: u64 = KB * 1024;
  const GB: u64 = MB * 1024;

  if bytes >= GB {
    format!("{:.1} GB", bytes as f64 / GB as f64)
  } else if bytes >= MB {
    format!("{:.1} MB", bytes as f64 / MB as f64)
  } else if bytes >= KB {
    format!("{:.1} KB", bytes as f64 / KB as f64)
  } else {
    format!("{} B", bytes)
  }
}

pub fn print_success(message: &str) {
  println!(
    "{} {}",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    message
  );
}

pub fn print_error(message: &str) {
  eprintln!(
    "{} {}",
    symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
    message.if_supports_color(Stream::Stderr, |s| s.red())
  );
}

pub fn print_warning(message: &str) {
  eprintln!(
    "{} {}",
    symbols::WARNING.if_supports_color(Stream::Stderr, |s| s.yellow()),
    message.if_supports_color(Stream::Stderr, |s| s.yellow())
  );
}

pub fn print_info(message: &str) {
  println!(
    "{} {}",
    symbols::INFO.if_supports_color(Stream::Stdout, |s| s.blue()),
    message
  );
}

pub fn print_stat(label: &str, value: &str) {
  println!(
    "  {}: {}",
    label.if_supports_color(Stream::Stdout, |s| s.dimmed()),
    value
  );
}

/// Symbol shown in front of a copied file.
pub fn copy_symbol(status: CopyStatus) -> &'static str {
  match status {
    CopyStatus::Created => symbols::ADD,
    CopyStatus::Updated => symbols::MODIFY,
    CopyStatus::Unchanged => symbols::SAME,
  }
}

/// `  + <destination> (<dependency>)`, colored by status.
pub fn print_copy(copy: &CopyOutcome) {
  let symbol = copy_symbol(copy.status);
  let symbol = match copy.status {
    CopyStatus::Created => symbol.if_supports_color(Stream::Stdout, |s| s.green()).to_string(),
    CopyStatus::Updated => symbol.if_supports_color(Stream::Stdout, |s| s.yellow()).to_string(),
    CopyStatus::Unchanged => symbol.if_supports_color(Stream::Stdout, |s| s.dimmed()).to_string(),
  };
  println!(
    "  {} {} {}",
    symbol,
    copy.op.destination.display(),
    format!("({})", copy.op.dependency).if_supports_color(Stream::Stdout, |s| s.dimmed())
  );
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
  let json = serde_json::to_string_pretty(value).context("Failed to serialize to JSON")?;
  println!("{}", json);
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_bytes() {
    assert_eq!(format_bytes(500), "500 B");
    assert_eq!(format_bytes(1024), "1.0 KB");
    assert_eq!(format_bytes(1536), "1.5 KB");
    assert_eq!(format_bytes(1048576), "1.0 MB");
    assert_eq!(format_bytes(1073741824), "1.0 GB");
  }

  #[test]
  fn copy_symbols_follow_status() {
    assert_eq!(copy_symbol(CopyStatus::Created), "+");
    assert_eq!(copy_symbol(CopyStatus::Updated), "~");
    assert_eq!(copy_symbol(CopyStatus::Unchanged), "=");
  }

  #[test]
  fn json_is_only_json() {
    assert!(OutputFormat::Json.is_json());
    assert!(!OutputFormat::Text.is_json());
  }
}
