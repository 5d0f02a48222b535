//! Import rules.
//!
//! A rule selects files below one subdirectory of every dependency and names
//! the output subdirectory they are copied to. Patterns are matched against
//! the path relative to `src`, and `*` also matches `/`, so `*.dll` picks up
//! `bin/x64/foo.dll` as well as `bin/foo.dll`.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
  #[error("invalid pattern '{pattern}': {message}")]
  InvalidPattern { pattern: String, message: String },

  #[error("rule directory must be relative: {0}")]
  AbsoluteDir(PathBuf),
}

fn default_keep_path() -> bool {
  true
}

/// Copy every file matching `pattern` under `<dependency>/<src>` into
/// `<output>/<dst>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRule {
  pub pattern: String,
  pub src: PathBuf,
  pub dst: PathBuf,
  /// Keep a match's subdirectories below `src` when placing it under `dst`.
  #[serde(default = "default_keep_path")]
  pub keep_path: bool,
}

impl ImportRule {
  pub fn new(pattern: impl Into<String>, src: impl Into<PathBuf>, dst: impl Into<PathBuf>) -> Self {
    Self {
      pattern: pattern.into(),
      src: src.into(),
      dst: dst.into(),
      keep_path: true,
    }
  }

  /// Place every match directly in `dst`.
  pub fn flatten(mut self) -> Self {
    self.keep_path = false;
    self
  }

  /// Check the rule and compile its pattern.
  pub fn compile(&self) -> Result<CompiledRule<'_>, RuleError> {
    for dir in [&self.src, &self.dst] {
      if dir.is_absolute() || dir.has_root() {
        return Err(RuleError::AbsoluteDir(dir.clone()));
      }
    }

    let matcher = Glob::new(&self.pattern)
      .map_err(|e| RuleError::InvalidPattern {
        pattern: self.pattern.clone(),
        message: e.kind().to_string(),
      })?
      .compile_matcher();

    Ok(CompiledRule { rule: self, matcher })
  }
}

impl std::fmt::Display for ImportRule {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} ({} -> {})", self.pattern, self.src.display(), self.dst.display())
  }
}

/// The two rules the build descriptor declares.
///
/// Only one of them applies on any given platform; the other matches nothing.
pub fn default_rules() -> Vec<ImportRule> {
  vec![
    ImportRule::new("*.dll", "bin", "bin"),
    ImportRule::new("*.dylib*", "lib", "bin"),
  ]
}

/// A rule with its pattern compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule<'a> {
  rule: &'a ImportRule,
  matcher: GlobMatcher,
}

impl CompiledRule<'_> {
  pub fn rule(&self) -> &ImportRule {
    self.rule
  }

  /// Whether a path relative to the rule's `src` is selected.
  pub fn is_match(&self, relative: &Path) -> bool {
    self.matcher.is_match(relative)
  }

  /// Destination of a match, relative to the project output directory.
  pub fn destination(&self, relative: &Path) -> PathBuf {
    if self.rule.keep_path {
      return self.rule.dst.join(relative);
    }
    match relative.file_name() {
      Some(name) => self.rule.dst.join(name),
      None => self.rule.dst.join(relative),
    }
  }
}
