//! Resolved dependencies.
//!
//! The package manager resolves and installs dependencies before the import
//! step runs; all this module needs from it is a name and an install root per
//! package. A set can be read from a JSON listing:
//!
//! ```json
//! [
//!   { "name": "spdlog", "root": "deps/spdlog" },
//!   { "name": "docopt", "root": "/opt/pkgs/docopt/1.0" }
//! ]
//! ```
//!
//! or a `{ "dependencies": [...] }` object, or taken from the immediate
//! subdirectories of a directory.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DepsError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse dependency list {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("duplicate dependency: {0}")]
  Duplicate(String),

  #[error("dependency name must not be empty")]
  EmptyName,
}

/// One installed package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependency {
  pub name: String,
  /// Install root holding the package's `bin`, `lib`, ... subdirectories.
  pub root: PathBuf,
}

impl ResolvedDependency {
  pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
    Self {
      name: name.into(),
      root: root.into(),
    }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DepsFile {
  List(Vec<ResolvedDependency>),
  Object { dependencies: Vec<ResolvedDependency> },
}

/// Ordered set of resolved dependencies with unique names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencySet {
  deps: Vec<ResolvedDependency>,
}

impl DependencySet {
  pub fn new(deps: Vec<ResolvedDependency>) -> Result<Self, DepsError> {
    let mut seen = HashSet::new();
    for dep in &deps {
      if dep.name.is_empty() {
        return Err(DepsError::EmptyName);
      }
      if !seen.insert(dep.name.as_str()) {
        return Err(DepsError::Duplicate(dep.name.clone()));
      }
    }
    Ok(Self { deps })
  }

  /// Read a JSON dependency list. Relative roots resolve against the
  /// directory containing the file.
  pub fn from_json(path: &Path) -> Result<Self, DepsError> {
    let content = fs::read_to_string(path).map_err(|source| DepsError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let parsed: DepsFile = serde_json::from_str(&content).map_err(|source| DepsError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    let mut deps = match parsed {
      DepsFile::List(deps) => deps,
      DepsFile::Object { dependencies } => dependencies,
    };

    let base = path.parent().unwrap_or(Path::new(""));
    for dep in &mut deps {
      if dep.root.is_relative() {
        dep.root = base.join(&dep.root);
      }
    }

    debug!(path = %path.display(), count = deps.len(), "loaded dependency list");
    Self::new(deps)
  }

  /// Treat every immediate subdirectory of `dir` as one dependency, sorted by
  /// name. Plain files in `dir` are ignored.
  pub fn from_dir(dir: &Path) -> Result<Self, DepsError> {
    let read_err = |source: io::Error| DepsError::Read {
      path: dir.to_path_buf(),
      source,
    };

    let mut deps = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
      let entry = entry.map_err(read_err)?;
      let path = entry.path();
      if !path.is_dir() {
        continue;
      }
      let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        continue;
      };
      deps.push(ResolvedDependency::new(name, &path));
    }
    deps.sort_by(|a, b| a.name.cmp(&b.name));

    debug!(dir = %dir.display(), count = deps.len(), "discovered dependencies");
    Self::new(deps)
  }

  pub fn iter(&self) -> impl Iterator<Item = &ResolvedDependency> {
    self.deps.iter()
  }

  pub fn len(&self) -> usize {
    self.deps.len()
  }

  pub fn is_empty(&self) -> bool {
    self.deps.is_empty()
  }
}

impl<'a> IntoIterator for &'a DependencySet {
  type Item = &'a ResolvedDependency;
  type IntoIter = std::slice::Iter<'a, ResolvedDependency>;

  fn into_iter(self) -> Self::IntoIter {
    self.deps.iter()
  }
}
