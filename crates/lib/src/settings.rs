//! Build configuration settings.
//!
//! The `(os, compiler, build_type, arch)` tuple selects which dependency
//! binaries the package manager resolved. The import step never branches on
//! these values; they are carried through for logging and reporting.

use serde::{Deserialize, Serialize};

use crate::platform::Platform;

/// Environment variable overriding the `os` setting.
pub const ENV_OS: &str = "ARTIMPORT_OS";
/// Environment variable overriding the `compiler` setting.
pub const ENV_COMPILER: &str = "ARTIMPORT_COMPILER";
/// Environment variable overriding the `build_type` setting.
pub const ENV_BUILD_TYPE: &str = "ARTIMPORT_BUILD_TYPE";
/// Environment variable overriding the `arch` setting.
pub const ENV_ARCH: &str = "ARTIMPORT_ARCH";

const DEFAULT_BUILD_TYPE: &str = "Release";

/// One build variant. Values are opaque strings and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildConfig {
  pub os: String,
  pub compiler: String,
  pub build_type: String,
  pub arch: String,
}

impl BuildConfig {
  pub fn new(
    os: impl Into<String>,
    compiler: impl Into<String>,
    build_type: impl Into<String>,
    arch: impl Into<String>,
  ) -> Self {
    Self {
      os: os.into(),
      compiler: compiler.into(),
      build_type: build_type.into(),
      arch: arch.into(),
    }
  }

  /// Default settings for the host.
  ///
  /// `os` and `arch` are left empty on hosts the platform module does not
  /// recognise. `compiler` is always empty since no toolchain is detected.
  pub fn detect() -> Self {
    let platform = Platform::current();
    Self {
      os: platform.map(|p| p.os.to_string()).unwrap_or_default(),
      compiler: String::new(),
      build_type: DEFAULT_BUILD_TYPE.to_string(),
      arch: platform.map(|p| p.arch.to_string()).unwrap_or_default(),
    }
  }

  /// Host defaults overridden by any `ARTIMPORT_*` variables that are set.
  pub fn from_env() -> Self {
    let mut config = Self::detect();
    override_from_env(&mut config.os, ENV_OS);
    override_from_env(&mut config.compiler, ENV_COMPILER);
    override_from_env(&mut config.build_type, ENV_BUILD_TYPE);
    override_from_env(&mut config.arch, ENV_ARCH);
    config
  }

  /// Apply explicit overrides, e.g. from command line flags.
  pub fn with_overrides(
    mut self,
    os: Option<String>,
    compiler: Option<String>,
    build_type: Option<String>,
    arch: Option<String>,
  ) -> Self {
    if let Some(os) = os {
      self.os = os;
    }
    if let Some(compiler) = compiler {
      self.compiler = compiler;
    }
    if let Some(build_type) = build_type {
      self.build_type = build_type;
    }
    if let Some(arch) = arch {
      self.arch = arch;
    }
    self
  }

  /// Look up a setting by its declared name.
  pub fn get(&self, name: &str) -> Option<&str> {
    match name {
      "os" => Some(&self.os),
      "compiler" => Some(&self.compiler),
      "build_type" => Some(&self.build_type),
      "arch" => Some(&self.arch),
      _ => None,
    }
  }
}

impl std::fmt::Display for BuildConfig {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(
      f,
      "os={} compiler={} build_type={} arch={}",
      self.os, self.compiler, self.build_type, self.arch
    )
  }
}

fn override_from_env(field: &mut String, var: &str) {
  if let Ok(value) = std::env::var(var) {
    *field = value;
  }
}
