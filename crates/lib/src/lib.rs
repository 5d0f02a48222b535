//! artimport-lib: dependency artifact import
//!
//! After a package manager resolves and installs dependencies, shared
//! libraries have to be copied next to the executable that loads them. This
//! crate provides:
//! - `BuildConfig`: the `(os, compiler, build_type, arch)` build variant
//! - `ImportRule`: a glob pattern plus source and destination subdirectories
//! - `Recipe`: declared settings, generator and import rules
//! - `plan_imports` / `apply_plan`: pure selection and the copy pass
//! - `FileSystem`: the filesystem view, real or in-memory

pub mod deps;
pub mod execute;
pub mod fs;
pub mod plan;
pub mod platform;
pub mod recipe;
pub mod rule;
pub mod settings;
pub mod util;

pub use deps::{DependencySet, ResolvedDependency};
pub use execute::{CopyStatus, ImportOptions, ImportReport, apply_plan, run_imports};
pub use fs::{FileSystem, HostFs, MemoryFs};
pub use plan::{ImportPlan, plan_imports};
pub use recipe::Recipe;
pub use rule::{ImportRule, default_rules};
pub use settings::BuildConfig;
