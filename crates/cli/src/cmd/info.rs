//! Implementation of the `artimport info` command.

use anyhow::Result;
use serde::Serialize;

use artimport_lib::BuildConfig;
use artimport_lib::platform::Platform;

use crate::output::{OutputFormat, print_info, print_json, print_stat};

#[derive(Serialize)]
struct InfoOutput {
  platform: Option<String>,
  shared_library_pattern: Option<&'static str>,
  settings: BuildConfig,
}

pub fn cmd_info(output: OutputFormat) -> Result<()> {
  let platform = Platform::current();
  let info = InfoOutput {
    platform: platform.map(|p| p.pair()),
    shared_library_pattern: platform.map(|p| p.os.shared_library_pattern()),
    settings: BuildConfig::from_env(),
  };

  if output.is_json() {
    return print_json(&info);
  }

  match &info.platform {
    Some(pair) => print_info(&format!("Platform: {}", pair)),
    None => print_info("Could not detect platform."),
  }
  if let Some(pattern) = info.shared_library_pattern {
    print_stat("Shared libraries", pattern);
  }
  println!();
  println!("Settings:");
  print_stat("os", &info.settings.os);
  print_stat("compiler", &info.settings.compiler);
  print_stat("build_type", &info.settings.build_type);
  print_stat("arch", &info.settings.arch);

  Ok(())
}
