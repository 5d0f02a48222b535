//! Implementation of the `artimport rules` command.

use std::path::Path;

use anyhow::Result;

use crate::output::{OutputFormat, print_json, print_stat};

pub fn cmd_rules(recipe: Option<&Path>, output: OutputFormat) -> Result<()> {
  let recipe = super::load_recipe(recipe)?;

  if output.is_json() {
    return print_json(&recipe);
  }

  println!("Generator: {}", recipe.generator);
  println!("Settings: {}", recipe.settings.join(", "));
  println!("Imports:");
  for (index, rule) in recipe.imports.iter().enumerate() {
    let layout = if rule.keep_path { "keep path" } else { "flatten" };
    print_stat(&index.to_string(), &format!("{} [{}]", rule, layout));
  }

  Ok(())
}
