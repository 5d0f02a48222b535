//! Import planning.
//!
//! [`plan_imports`] decides which files will be copied without touching the
//! destination. It only reads through a [`FileSystem`], so the whole
//! selection can be checked against an in-memory tree.
//!
//! Ordering is deterministic: rules in declaration order, then dependencies in
//! set order, then matched files sorted by path.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::deps::DependencySet;
use crate::fs::FileSystem;
use crate::rule::{ImportRule, RuleError};

#[derive(Debug, Error)]
pub enum PlanError {
  #[error("import rule {index}: {source}")]
  Rule {
    index: usize,
    #[source]
    source: RuleError,
  },

  #[error("failed to list {dir} for dependency {dependency}: {source}")]
  List {
    dependency: String,
    dir: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// A single file copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CopyOp {
  pub dependency: String,
  /// Index of the rule that selected the file.
  pub rule: usize,
  pub source: PathBuf,
  pub destination: PathBuf,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportPlan {
  pub output: PathBuf,
  pub ops: Vec<CopyOp>,
}

impl ImportPlan {
  pub fn is_empty(&self) -> bool {
    self.ops.is_empty()
  }

  pub fn len(&self) -> usize {
    self.ops.len()
  }

  /// Destinations written by more than one op. The last op in plan order wins.
  pub fn collisions(&self) -> BTreeMap<&Path, Vec<&CopyOp>> {
    collisions(&self.ops)
  }
}

/// Group `ops` by destination, keeping only destinations with several writers.
pub fn collisions<'a>(ops: impl IntoIterator<Item = &'a CopyOp>) -> BTreeMap<&'a Path, Vec<&'a CopyOp>> {
  let mut by_dest: BTreeMap<&Path, Vec<&CopyOp>> = BTreeMap::new();
  for op in ops {
    by_dest.entry(op.destination.as_path()).or_default().push(op);
  }
  by_dest.retain(|_, ops| ops.len() > 1);
  by_dest
}

/// Select the files each rule copies from each dependency into `output`.
///
/// A dependency without a rule's `src` directory contributes nothing for that
/// rule.
pub fn plan_imports(
  rules: &[ImportRule],
  deps: &DependencySet,
  output: &Path,
  fs: &dyn FileSystem,
) -> Result<ImportPlan, PlanError> {
  let compiled = rules
    .iter()
    .enumerate()
    .map(|(index, rule)| rule.compile().map_err(|source| PlanError::Rule { index, source }))
    .collect::<Result<Vec<_>, _>>()?;

  let mut ops = Vec::new();
  for (index, rule) in compiled.iter().enumerate() {
    for dep in deps {
      let src_dir = dep.root.join(&rule.rule().src);
      let files = match fs.list_files(&src_dir) {
        Ok(files) => files,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
          debug!(dependency = %dep.name, dir = %src_dir.display(), "source directory absent, skipping");
          continue;
        }
        Err(source) => {
          return Err(PlanError::List {
            dependency: dep.name.clone(),
            dir: src_dir,
            source,
          });
        }
      };

      for relative in files.iter().filter(|f| rule.is_match(f)) {
        ops.push(CopyOp {
          dependency: dep.name.clone(),
          rule: index,
          source: src_dir.join(relative),
          destination: output.join(rule.destination(relative)),
        });
      }
    }
  }

  let plan = ImportPlan {
    output: output.to_path_buf(),
    ops,
  };

  for (dest, ops) in plan.collisions() {
    let sources: Vec<&str> = ops.iter().map(|op| op.dependency.as_str()).collect();
    debug!(destination = %dest.display(), ?sources, "multiple dependencies provide the same file, last one wins");
  }

  debug!(count = plan.len(), output = %output.display(), "planned imports");
  Ok(plan)
}
