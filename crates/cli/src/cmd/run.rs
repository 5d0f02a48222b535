//! Implementation of the `artimport run` command.
//!
//! Loads the recipe and the resolved dependency set, then copies every
//! matching shared library into the output directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use artimport_lib::plan::collisions;
use artimport_lib::{BuildConfig, DependencySet, HostFs, ImportOptions, run_imports};

use crate::output::{
  OutputFormat, format_bytes, print_copy, print_info, print_json, print_stat, print_success, print_warning,
};

#[derive(Args, Debug)]
pub struct RunArgs {
  /// Recipe file (JSON). The built-in `*.dll` / `*.dylib*` rules are used when omitted
  #[arg(short, long)]
  pub recipe: Option<PathBuf>,

  /// JSON file listing resolved dependencies and their install roots
  #[arg(long, conflicts_with = "deps_dir", required_unless_present = "deps_dir")]
  pub deps: Option<PathBuf>,

  /// Directory whose subdirectories are the resolved dependencies
  #[arg(long)]
  pub deps_dir: Option<PathBuf>,

  /// Project output directory the rules' destinations are relative to
  #[arg(long, default_value = ".")]
  pub output_dir: PathBuf,

  /// Override the `os` setting
  #[arg(long)]
  pub os: Option<String>,

  /// Override the `compiler` setting
  #[arg(long)]
  pub compiler: Option<String>,

  /// Override the `build_type` setting
  #[arg(long)]
  pub build_type: Option<String>,

  /// Override the `arch` setting
  #[arg(long)]
  pub arch: Option<String>,

  /// Show what would be copied without writing anything
  #[arg(long)]
  pub dry_run: bool,

  /// Output format
  #[arg(short = 'o', long, value_enum, default_value = "text")]
  pub output: OutputFormat,
}

pub fn cmd_run(args: RunArgs) -> Result<()> {
  let recipe = super::load_recipe(args.recipe.as_deref())?;

  let deps = match (&args.deps, &args.deps_dir) {
    (Some(path), _) => DependencySet::from_json(path)
      .with_context(|| format!("Failed to load dependencies: {}", path.display()))?,
    (None, Some(dir)) => DependencySet::from_dir(dir)
      .with_context(|| format!("Failed to discover dependencies in {}", dir.display()))?,
    (None, None) => DependencySet::default(),
  };

  let config = BuildConfig::from_env().with_overrides(args.os, args.compiler, args.build_type, args.arch);
  debug!(%config, "effective build configuration");

  let output_dir = dunce::canonicalize(&args.output_dir).unwrap_or_else(|_| args.output_dir.clone());
  let options = ImportOptions { dry_run: args.dry_run };

  let report = run_imports(config, &recipe, &deps, &output_dir, &HostFs, &options).context("Import failed")?;

  if args.output.is_json() {
    return print_json(&report);
  }

  for (dest, ops) in collisions(report.copies.iter().map(|c| &c.op)) {
    let providers: Vec<&str> = ops.iter().map(|op| op.dependency.as_str()).collect();
    print_warning(&format!(
      "{} is provided by {}; the last one wins",
      dest.display(),
      providers.join(", ")
    ));
  }

  for copy in &report.copies {
    print_copy(copy);
  }

  println!();
  if report.dry_run {
    print_info("Dry run - no changes made");
  } else if report.copies.is_empty() {
    print_info("Nothing to import");
  } else {
    print_success("Imports complete!");
  }
  print_stat("Dependencies", &deps.len().to_string());
  print_stat("Created", &report.stats.created.to_string());
  print_stat("Updated", &report.stats.updated.to_string());
  print_stat("Unchanged", &report.stats.unchanged.to_string());
  print_stat("Copied", &format_bytes(report.stats.bytes_copied));
  print_stat("Output", &report.output.display().to_string());

  Ok(())
}
