use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn custom_recipe_rules_are_used() {
  let env = TestEnv::new();
  env.dep_file("zlib", "lib/libz.so.1", "elf");
  env.dep_file("zlib", "bin/zlib1.dll", "pe");
  env.write_file(
    "recipe.json",
    r#"{ "imports": [{ "pattern": "*.so*", "src": "lib", "dst": "lib" }] }"#,
  );

  env
    .run_cmd()
    .arg("--recipe")
    .arg(env.temp.path().join("recipe.json"))
    .arg("--deps-dir")
    .arg(env.deps_dir())
    .assert()
    .success();

  assert_eq!(env.output_files("lib"), vec!["libz.so.1"]);
  assert!(env.output_files("bin").is_empty());
}

#[test]
fn flattened_rule_drops_subdirectories() {
  let env = TestEnv::new();
  env.dep_file("qt", "bin/platforms/qwindows.dll", "plugin");
  env.write_file(
    "recipe.json",
    r#"{ "imports": [{ "pattern": "*.dll", "src": "bin", "dst": "bin", "keep_path": false }] }"#,
  );

  env
    .run_cmd()
    .arg("--recipe")
    .arg(env.temp.path().join("recipe.json"))
    .arg("--deps-dir")
    .arg(env.deps_dir())
    .assert()
    .success();

  assert_eq!(env.output_files("bin"), vec!["qwindows.dll"]);
}

#[test]
fn invalid_recipe_pattern_fails() {
  let env = TestEnv::new();
  env.write_file(
    "recipe.json",
    r#"{ "imports": [{ "pattern": "[*.dll", "src": "bin", "dst": "bin" }] }"#,
  );

  env
    .run_cmd()
    .arg("--recipe")
    .arg(env.temp.path().join("recipe.json"))
    .arg("--deps-dir")
    .arg(env.deps_dir())
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to load recipe"));
}

#[test]
fn rules_command_shows_recipe_generator() {
  let env = TestEnv::new();
  env.write_file("recipe.json", r#"{ "generator": "cmake_multi" }"#);

  let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("artimport");
  cmd
    .arg("rules")
    .arg("--recipe")
    .arg(env.temp.path().join("recipe.json"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Generator: cmake_multi"))
    .stdout(predicate::str::contains("*.dll"));
}
