mod info;
mod rules;
mod run;

pub use info::cmd_info;
pub use rules::cmd_rules;
pub use run::{RunArgs, cmd_run};

use std::path::Path;

use anyhow::{Context, Result};
use artimport_lib::Recipe;

/// The recipe at `path`, or the built-in one when no path is given.
fn load_recipe(path: Option<&Path>) -> Result<Recipe> {
  match path {
    Some(path) => Recipe::load(path).with_context(|| format!("Failed to load recipe: {}", path.display())),
    None => Ok(Recipe::default()),
  }
}
