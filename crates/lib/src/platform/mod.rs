pub mod arch;
pub mod os;

use arch::Arch;
use os::Os;
use std::fmt;

/// Host platform identifier combining architecture and OS (e.g., "armv8-Macos")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
  pub arch: Arch,
  pub os: Os,
}

impl Platform {
  /// Create a new platform identifier
  pub fn new(arch: Arch, os: Os) -> Self {
    Self { arch, os }
  }

  /// Detect the current platform at runtime
  ///
  /// Returns `None` if the OS or architecture is not supported
  pub fn current() -> Option<Self> {
    Some(Self {
      arch: Arch::current()?,
      os: Os::current()?,
    })
  }

  /// Returns the platform pair as build settings spell it (e.g., "x86_64-Linux")
  pub fn pair(&self) -> String {
    format!("{}-{}", self.arch, self.os)
  }
}

impl fmt::Display for Platform {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.pair())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn platform_pair_format() {
    let platform = Platform::new(Arch::Armv8, Os::Macos);
    assert_eq!(platform.pair(), "armv8-Macos");

    let platform = Platform::new(Arch::X86_64, Os::Windows);
    assert_eq!(platform.pair(), "x86_64-Windows");
  }
}
