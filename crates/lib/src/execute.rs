//! Import execution.
//!
//! Carries out an [`ImportPlan`]: every destination is overwritten with its
//! source. Nothing is ever deleted from the output tree, so running again with
//! unchanged dependencies leaves it identical.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::deps::DependencySet;
use crate::fs::FileSystem;
use crate::plan::{CopyOp, ImportPlan, PlanError, plan_imports};
use crate::recipe::Recipe;
use crate::settings::BuildConfig;
use crate::util::hash::{ContentHash, hash_bytes};

#[derive(Debug, Error)]
pub enum ImportError {
  #[error(transparent)]
  Plan(#[from] PlanError),

  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to create directory {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to copy {from} to {to}: {source}")]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
  /// Classify copies without writing anything.
  pub dry_run: bool,
}

/// What a copy did to its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyStatus {
  /// Destination did not exist.
  Created,
  /// Destination existed with different contents.
  Updated,
  /// Destination already had the same contents, or is the source itself.
  Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyOutcome {
  #[serde(flatten)]
  pub op: CopyOp,
  pub status: CopyStatus,
  pub bytes: u64,
  /// Digest of the imported contents.
  pub sha256: ContentHash,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
  pub created: usize,
  pub updated: usize,
  pub unchanged: usize,
  pub bytes_copied: u64,
}

impl ImportStats {
  pub fn total(&self) -> usize {
    self.created + self.updated + self.unchanged
  }

  /// Whether the output tree differs (or would differ) after the run.
  pub fn has_changes(&self) -> bool {
    self.created + self.updated > 0
  }

  fn record(&mut self, outcome: &CopyOutcome) {
    match outcome.status {
      CopyStatus::Created => self.created += 1,
      CopyStatus::Updated => self.updated += 1,
      CopyStatus::Unchanged => self.unchanged += 1,
    }
    self.bytes_copied += outcome.bytes;
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
  pub output: PathBuf,
  pub dry_run: bool,
  pub copies: Vec<CopyOutcome>,
  pub stats: ImportStats,
}

fn read(fs: &dyn FileSystem, path: &Path) -> Result<Vec<u8>, ImportError> {
  fs.read(path).map_err(|source| ImportError::Read {
    path: path.to_path_buf(),
    source,
  })
}

fn classify(fs: &dyn FileSystem, op: &CopyOp, source: &[u8]) -> Result<CopyStatus, ImportError> {
  if !fs.exists(&op.destination) {
    return Ok(CopyStatus::Created);
  }
  let existing = read(fs, &op.destination)?;
  if existing == source {
    Ok(CopyStatus::Unchanged)
  } else {
    Ok(CopyStatus::Updated)
  }
}

/// Copy every planned file, overwriting destinations.
///
/// Stops at the first failure; copies already made stay in place.
pub fn apply_plan(plan: &ImportPlan, fs: &dyn FileSystem, options: &ImportOptions) -> Result<ImportReport, ImportError> {
  let mut copies = Vec::with_capacity(plan.len());
  let mut stats = ImportStats::default();

  for op in &plan.ops {
    let contents = read(fs, &op.source)?;
    let same_file = fs.is_same_file(&op.source, &op.destination);
    let status = if same_file {
      debug!(path = %op.source.display(), "source is its own destination, leaving it in place");
      CopyStatus::Unchanged
    } else {
      classify(fs, op, &contents)?
    };

    if !options.dry_run && !same_file {
      if let Some(parent) = op.destination.parent() {
        fs.create_dir_all(parent).map_err(|source| ImportError::CreateDir {
          path: parent.to_path_buf(),
          source,
        })?;
      }
      fs.copy(&op.source, &op.destination).map_err(|source| ImportError::Copy {
        from: op.source.clone(),
        to: op.destination.clone(),
        source,
      })?;
    }

    debug!(
      dependency = %op.dependency,
      from = %op.source.display(),
      to = %op.destination.display(),
      ?status,
      dry_run = options.dry_run,
      "imported file"
    );

    let outcome = CopyOutcome {
      op: op.clone(),
      status,
      bytes: contents.len() as u64,
      sha256: hash_bytes(&contents),
    };
    stats.record(&outcome);
    copies.push(outcome);
  }

  Ok(ImportReport {
    output: plan.output.clone(),
    dry_run: options.dry_run,
    copies,
    stats,
  })
}

/// Run the import step for one build configuration.
///
/// The configuration is only reported; dependency selection already happened
/// when the package manager resolved `deps`.
pub fn run_imports(
  config: BuildConfig,
  recipe: &Recipe,
  deps: &DependencySet,
  output: &Path,
  fs: &dyn FileSystem,
  options: &ImportOptions,
) -> Result<ImportReport, ImportError> {
  let settings = recipe
    .resolved_settings(&config)
    .iter()
    .map(|(name, value)| format!("{}={}", name, value))
    .collect::<Vec<_>>()
    .join(" ");
  info!(
    settings = %settings,
    generator = %recipe.generator,
    dependencies = deps.len(),
    rules = recipe.imports.len(),
    "running imports"
  );

  let plan = plan_imports(&recipe.imports, deps, output, fs)?;
  let report = apply_plan(&plan, fs, options)?;

  info!(
    created = report.stats.created,
    updated = report.stats.updated,
    unchanged = report.stats.unchanged,
    bytes = report.stats.bytes_copied,
    dry_run = options.dry_run,
    "imports complete"
  );

  Ok(report)
}
