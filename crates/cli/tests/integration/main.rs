//! CLI integration tests.

mod common;
mod recipe_tests;
mod run_tests;
