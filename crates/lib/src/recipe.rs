//! Recipe: the declarative part of the build descriptor.
//!
//! A recipe names the settings the package manager resolves against, the
//! generator it should emit project files for, and the import rules run after
//! resolution. Recipes are stored as JSON; any field left out takes the
//! declared default.
//!
//! ```json
//! {
//!   "settings": ["os", "compiler", "build_type", "arch"],
//!   "generator": "cmake",
//!   "imports": [
//!     { "pattern": "*.dll", "src": "bin", "dst": "bin" },
//!     { "pattern": "*.dylib*", "src": "lib", "dst": "bin" }
//!   ]
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::rule::{ImportRule, RuleError, default_rules};
use crate::settings::BuildConfig;

/// Generator the descriptor selects.
pub const DEFAULT_GENERATOR: &str = "cmake";

/// Setting names the descriptor declares.
pub const DEFAULT_SETTINGS: [&str; 4] = ["os", "compiler", "build_type", "arch"];

#[derive(Debug, Error)]
pub enum RecipeError {
  #[error("failed to read recipe {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to parse recipe {path}: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("unknown setting '{0}' (expected one of os, compiler, build_type, arch)")]
  UnknownSetting(String),

  #[error("import rule {index}: {source}")]
  Rule {
    index: usize,
    #[source]
    source: RuleError,
  },
}

fn default_settings() -> Vec<String> {
  DEFAULT_SETTINGS.iter().map(|s| s.to_string()).collect()
}

fn default_generator() -> String {
  DEFAULT_GENERATOR.to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
  #[serde(default = "default_settings")]
  pub settings: Vec<String>,
  #[serde(default = "default_generator")]
  pub generator: String,
  #[serde(default = "default_rules")]
  pub imports: Vec<ImportRule>,
}

impl Default for Recipe {
  fn default() -> Self {
    Self {
      settings: default_settings(),
      generator: default_generator(),
      imports: default_rules(),
    }
  }
}

impl Recipe {
  /// Load and validate a recipe file.
  pub fn load(path: &Path) -> Result<Self, RecipeError> {
    let content = fs::read_to_string(path).map_err(|source| RecipeError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    let recipe: Recipe = serde_json::from_str(&content).map_err(|source| RecipeError::Parse {
      path: path.to_path_buf(),
      source,
    })?;
    recipe.validate()?;
    debug!(path = %path.display(), rules = recipe.imports.len(), "loaded recipe");
    Ok(recipe)
  }

  /// Check declared setting names and rule patterns.
  pub fn validate(&self) -> Result<(), RecipeError> {
    let known = BuildConfig::default();
    for name in &self.settings {
      if known.get(name).is_none() {
        return Err(RecipeError::UnknownSetting(name.clone()));
      }
    }
    for (index, rule) in self.imports.iter().enumerate() {
      rule.compile().map_err(|source| RecipeError::Rule { index, source })?;
    }
    Ok(())
  }

  /// The declared settings with their values in `config`, in declaration order.
  pub fn resolved_settings<'a>(&'a self, config: &'a BuildConfig) -> Vec<(&'a str, &'a str)> {
    self
      .settings
      .iter()
      .filter_map(|name| config.get(name).map(|value| (name.as_str(), value)))
      .collect()
  }
}
