use crate::config::package::PackageRecipe;
use crate::domain::model::{CompileOutput, TreeEntry};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
}

/// Turns a scanned entry list into text.
pub trait TreeRenderer: Send + Sync {
    fn render(&self, root_name: &str, entries: &[TreeEntry]) -> String;
}

#[async_trait]
pub trait Compiler: Send + Sync {
    /// Runs one build and waits for it to exit. A non-zero exit is reported
    /// through `CompileOutput::success`, not as an error.
    async fn compile(&self, recipe: &PackageRecipe) -> Result<CompileOutput>;
}
