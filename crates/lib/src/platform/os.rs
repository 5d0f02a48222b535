use std::fmt;

/// Operating systems the import step knows how to default settings for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
  Linux,
  Macos,
  Windows,
}

impl Os {
  /// Detect the current operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::Macos),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the `os` setting value for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Linux => "Linux",
      Self::Macos => "Macos",
      Self::Windows => "Windows",
    }
  }

  /// Shared-library file pattern native to this OS
  pub fn shared_library_pattern(&self) -> &'static str {
    match self {
      Self::Linux => "*.so*",
      Self::Macos => "*.dylib*",
      Self::Windows => "*.dll",
    }
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}
