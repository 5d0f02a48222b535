//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary directory holding installed
/// dependencies under `deps/` and the project output under `build/`.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// Write a file relative to the temp directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Add a file to an installed dependency, e.g. `dep_file("zlib", "bin/zlib.dll", ..)`.
  pub fn dep_file(&self, dep: &str, relative_path: &str, content: &str) {
    self.write_file(&format!("deps/{}/{}", dep, relative_path), content);
  }

  /// Directory holding one subdirectory per dependency.
  pub fn deps_dir(&self) -> PathBuf {
    let p = self.temp.path().join("deps");
    std::fs::create_dir_all(&p).unwrap();
    p
  }

  /// Project output directory.
  pub fn output_path(&self) -> PathBuf {
    let p = self.temp.path().join("build");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Names of the files in `build/<subdir>`, sorted.
  pub fn output_files(&self, subdir: &str) -> Vec<String> {
    let dir = self.output_path().join(subdir);
    let Ok(entries) = std::fs::read_dir(&dir) else {
      return Vec::new();
    };
    let mut names: Vec<String> = entries
      .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
      .collect();
    names.sort();
    names
  }

  /// `artimport run` writing into this environment's `build/`.
  ///
  /// `ARTIMPORT_*` variables are cleared so host settings don't leak in.
  pub fn run_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("artimport");
    for var in [
      "ARTIMPORT_OS",
      "ARTIMPORT_COMPILER",
      "ARTIMPORT_BUILD_TYPE",
      "ARTIMPORT_ARCH",
      "RUST_LOG",
    ] {
      cmd.env_remove(var);
    }
    cmd.current_dir(self.temp.path());
    cmd.arg("run");
    cmd.arg("--output-dir").arg(self.output_path());
    cmd
  }
}
