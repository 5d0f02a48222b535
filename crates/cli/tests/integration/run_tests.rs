use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn dll_and_dylib_from_two_dependencies() {
  let env = TestEnv::new();
  env.dep_file("a", "bin/a.dll", "a");
  env.dep_file("b", "lib/b.dylib", "b");

  env
    .run_cmd()
    .arg("--deps-dir")
    .arg(env.deps_dir())
    .assert()
    .success()
    .stdout(predicate::str::contains("Imports complete"));

  assert_eq!(env.output_files("bin"), vec!["a.dll", "b.dylib"]);
}

#[test]
fn copied_file_is_byte_identical() {
  let env = TestEnv::new();
  env.dep_file("foo", "bin/foo.dll", "MZ payload");

  env.run_cmd().arg("--deps-dir").arg(env.deps_dir()).assert().success();

  let copied = std::fs::read_to_string(env.output_path().join("bin/foo.dll")).unwrap();
  assert_eq!(copied, "MZ payload");
}

#[test]
fn versioned_dylib_is_imported() {
  let env = TestEnv::new();
  env.dep_file("bar", "lib/libbar.1.2.3.dylib", "macho");

  env.run_cmd().arg("--deps-dir").arg(env.deps_dir()).assert().success();

  assert_eq!(env.output_files("bin"), vec!["libbar.1.2.3.dylib"]);
}

#[test]
fn non_matching_and_empty_dependencies_copy_nothing() {
  let env = TestEnv::new();
  env.dep_file("doc", "bin/readme.txt", "hello");
  env.dep_file("headers", "include/h.hpp", "#pragma once");

  env
    .run_cmd()
    .arg("--deps-dir")
    .arg(env.deps_dir())
    .assert()
    .success()
    .stdout(predicate::str::contains("Nothing to import"));

  assert!(env.output_files("bin").is_empty());
}

#[test]
fn second_run_reports_unchanged() {
  let env = TestEnv::new();
  env.dep_file("a", "bin/a.dll", "a");

  env.run_cmd().arg("--deps-dir").arg(env.deps_dir()).assert().success();
  let first = env.output_files("bin");

  let output = env
    .run_cmd()
    .arg("--deps-dir")
    .arg(env.deps_dir())
    .args(["-o", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());

  let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(report["stats"]["unchanged"], 1);
  assert_eq!(report["stats"]["created"], 0);
  assert_eq!(report["copies"][0]["status"], "unchanged");
  assert_eq!(env.output_files("bin"), first);
}

#[test]
fn dry_run_leaves_output_empty() {
  let env = TestEnv::new();
  env.dep_file("a", "bin/a.dll", "a");

  env
    .run_cmd()
    .arg("--deps-dir")
    .arg(env.deps_dir())
    .arg("--dry-run")
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"));

  assert!(env.output_files("bin").is_empty());
}

#[test]
fn deps_json_with_relative_roots() {
  let env = TestEnv::new();
  env.write_file("pkgs/zlib/bin/zlib1.dll", "zlib");
  env.write_file(
    "deps.json",
    r#"{ "dependencies": [{ "name": "zlib", "root": "pkgs/zlib" }] }"#,
  );

  env
    .run_cmd()
    .arg("--deps")
    .arg(env.temp.path().join("deps.json"))
    .assert()
    .success();

  assert_eq!(env.output_files("bin"), vec!["zlib1.dll"]);
}

#[test]
fn missing_deps_file_fails_with_context() {
  let env = TestEnv::new();

  env
    .run_cmd()
    .arg("--deps")
    .arg(env.temp.path().join("absent.json"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load dependencies"));
}

#[test]
fn collision_prints_warning() {
  let env = TestEnv::new();
  env.dep_file("a", "bin/shared.dll", "from a");
  env.dep_file("b", "bin/shared.dll", "from b");

  env
    .run_cmd()
    .arg("--deps-dir")
    .arg(env.deps_dir())
    .assert()
    .success()
    .stderr(predicate::str::contains("the last one wins"));

  let copied = std::fs::read_to_string(env.output_path().join("bin/shared.dll")).unwrap();
  assert_eq!(copied, "from b");
}

#[test]
fn collision_is_reported_once() {
  let env = TestEnv::new();
  env.dep_file("a", "bin/shared.dll", "from a");
  env.dep_file("b", "bin/shared.dll", "from b");

  let output = env.run_cmd().arg("--deps-dir").arg(env.deps_dir()).output().unwrap();
  assert!(output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert_eq!(stderr.matches("shared.dll").count(), 1, "stderr: {}", stderr);
}

#[cfg(unix)]
#[test]
fn dangling_library_link_is_skipped() {
  let env = TestEnv::new();
  env.dep_file("bar", "lib/libbar.1.dylib", "macho");
  std::os::unix::fs::symlink("missing.dylib", env.temp.path().join("deps/bar/lib/libbar.dylib")).unwrap();

  env
    .run_cmd()
    .arg("--deps-dir")
    .arg(env.deps_dir())
    .assert()
    .success()
    .stderr(predicate::str::contains("skipping dangling symlink"));

  assert_eq!(env.output_files("bin"), vec!["libbar.1.dylib"]);
}

#[test]
fn settings_flags_reach_the_log() {
  let env = TestEnv::new();
  env.dep_file("a", "bin/a.dll", "a");

  env
    .run_cmd()
    .arg("-v")
    .arg("--deps-dir")
    .arg(env.deps_dir())
    .args(["--os", "Windows", "--build-type", "Debug"])
    .assert()
    .success()
    .stderr(predicate::str::contains("os=Windows"))
    .stderr(predicate::str::contains("build_type=Debug"));
}
