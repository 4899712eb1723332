pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::package::PackageRecipe;
pub use config::TreeConfig;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{
    engine::TreeEngine,
    generator::{generate_in_background, FileTreeGenerator},
    packager::{CargoCompiler, Packager},
};
pub use domain::model::{OutputFormat, PackageMode};
pub use utils::error::{FileTreerError, Result};
