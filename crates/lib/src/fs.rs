//! Filesystem view used by the planner and executor.
//!
//! Planning only reads through this trait, so it can run against the real
//! disk ([`HostFs`]) or an in-memory tree ([`MemoryFs`]).

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

pub trait FileSystem {
  /// All regular files below `dir`, relative to `dir`, sorted by path.
  ///
  /// Returns an error of kind `NotFound` when `dir` is not a directory.
  fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

  fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

  fn exists(&self, path: &Path) -> bool;

  fn create_dir_all(&self, path: &Path) -> io::Result<()>;

  /// Create or truncate `path` with `contents`.
  fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

  /// Copy `from` over `to`, replacing any existing file.
  fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
    let contents = self.read(from)?;
    self.write(to, &contents)
  }

  /// Whether `a` and `b` name the same existing file.
  fn is_same_file(&self, a: &Path, b: &Path) -> bool {
    a == b && self.exists(a)
  }
}

fn not_a_directory(dir: &Path) -> io::Error {
  io::Error::new(io::ErrorKind::NotFound, format!("not a directory: {}", dir.display()))
}

/// A link whose target is gone. `follow_links` reports these as `NotFound`.
fn is_dangling_link(err: &walkdir::Error) -> bool {
  let missing = err.io_error().is_some_and(|e| e.kind() == io::ErrorKind::NotFound);
  missing
    && err
      .path()
      .and_then(|p| fs::symlink_metadata(p).ok())
      .is_some_and(|m| m.file_type().is_symlink())
}

/// Convert a walk error, keeping `NotFound` for the missing-directory case only.
fn walk_error(err: walkdir::Error) -> io::Error {
  let kind = match err.io_error().map(io::Error::kind) {
    Some(io::ErrorKind::NotFound) | None => io::ErrorKind::Other,
    Some(kind) => kind,
  };
  io::Error::new(kind, err)
}

/// The real filesystem.
///
/// Symlinks are followed, so a versioned library link is listed and copied as
/// a regular file.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl FileSystem for HostFs {
  fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
      return Err(not_a_directory(dir));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
      let entry = match entry {
        Ok(entry) => entry,
        Err(err) if is_dangling_link(&err) => {
          let path = err.path().map(Path::to_path_buf).unwrap_or_default();
          warn!(path = %path.display(), "skipping dangling symlink");
          continue;
        }
        Err(err) => return Err(walk_error(err)),
      };
      if !entry.file_type().is_file() {
        continue;
      }
      if let Ok(relative) = entry.path().strip_prefix(dir) {
        files.push(relative.to_path_buf());
      }
    }
    files.sort();
    Ok(files)
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
  }

  fn exists(&self, path: &Path) -> bool {
    path.exists()
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
  }

  fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
    fs::write(path, contents)
  }

  fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to).map(|_| ())
  }

  fn is_same_file(&self, a: &Path, b: &Path) -> bool {
    match (dunce::canonicalize(a), dunce::canonicalize(b)) {
      (Ok(a), Ok(b)) => a == b,
      _ => false,
    }
  }
}

/// An in-memory tree. Directories exist implicitly above every file.
#[derive(Debug, Default)]
pub struct MemoryFs {
  files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
  dirs: RefCell<BTreeSet<PathBuf>>,
  unreadable: BTreeSet<PathBuf>,
}

impl MemoryFs {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add a file, creating its parents.
  pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
    let path = path.into();
    if let Some(parent) = path.parent() {
      self.dirs.borrow_mut().insert(parent.to_path_buf());
    }
    self.files.borrow_mut().insert(path, contents.into());
    self
  }

  /// Add an empty directory.
  pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
    self.dirs.borrow_mut().insert(path.into());
    self
  }

  /// Mark a directory as unlistable; `list_files` on it fails with
  /// `PermissionDenied`.
  pub fn with_unreadable_dir(mut self, path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    self.dirs.borrow_mut().insert(path.clone());
    self.unreadable.insert(path);
    self
  }

  /// A copy of every file and its contents.
  pub fn snapshot(&self) -> BTreeMap<PathBuf, Vec<u8>> {
    self.files.borrow().clone()
  }

  fn is_dir(&self, path: &Path) -> bool {
    self.dirs.borrow().iter().any(|d| d.starts_with(path))
      || self.files.borrow().keys().any(|f| f != path && f.starts_with(path))
  }
}

impl FileSystem for MemoryFs {
  fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
    if !self.is_dir(dir) {
      return Err(not_a_directory(dir));
    }
    if self.unreadable.contains(dir) {
      return Err(io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("permission denied: {}", dir.display()),
      ));
    }
    Ok(
      self
        .files
        .borrow()
        .keys()
        .filter_map(|path| path.strip_prefix(dir).ok())
        .filter(|relative| !relative.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .collect(),
    )
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    self
      .files
      .borrow()
      .get(path)
      .cloned()
      .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("no such file: {}", path.display())))
  }

  fn exists(&self, path: &Path) -> bool {
    self.files.borrow().contains_key(path) || self.is_dir(path)
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    if self.files.borrow().contains_key(path) {
      return Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("file exists: {}", path.display()),
      ));
    }
    self.dirs.borrow_mut().insert(path.to_path_buf());
    Ok(())
  }

  fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
      && !self.is_dir(parent)
    {
      return Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("parent directory missing: {}", parent.display()),
      ));
    }
    self.files.borrow_mut().insert(path.to_path_buf(), contents.to_vec());
    Ok(())
  }
}
