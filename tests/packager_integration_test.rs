use async_trait::async_trait;
use filetreer::config::tree_config::CONFIG_FILE_NAME;
use filetreer::core::packager::BUILD_INFO_FILE;
use filetreer::domain::model::CompileOutput;
use filetreer::domain::ports::Compiler;
use filetreer::{FileTreerError, PackageMode, PackageRecipe, Packager, Result};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// 不真的編譯，只在 target 位置寫出假的執行檔
#[derive(Clone)]
struct FakeCompiler {
    payload: Vec<u8>,
    succeed: bool,
    calls: Arc<AtomicUsize>,
}

impl FakeCompiler {
    fn new(succeed: bool) -> Self {
        Self {
            payload: vec![0x4d; 64 * 1024],
            succeed,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl Compiler for FakeCompiler {
    async fn compile(&self, recipe: &PackageRecipe) -> Result<CompileOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let artifact = recipe.build_artifact();

        if self.succeed {
            fs::create_dir_all(artifact.parent().unwrap())?;
            fs::write(&artifact, &self.payload)?;
        }

        Ok(CompileOutput {
            success: self.succeed,
            code: Some(if self.succeed { 0 } else { 1 }),
            artifact,
        })
    }
}

fn recipe_in(dir: &TempDir) -> PackageRecipe {
    PackageRecipe {
        manifest_dir: dir.path().join("workspace"),
        target_dir: Some(dir.path().join("target")),
        output_dir: dir.path().join("dist"),
        ..PackageRecipe::default()
    }
}

#[tokio::test]
async fn test_standalone_layout() {
    let temp_dir = TempDir::new().unwrap();
    let recipe = recipe_in(&temp_dir);
    let compiler = FakeCompiler::new(true);

    let report = Packager::new(compiler.clone(), recipe.clone())
        .run(PackageMode::Standalone)
        .await
        .unwrap();

    let exe_name = format!("FileTreer{}", std::env::consts::EXE_SUFFIX);
    let dist_dir = temp_dir.path().join("dist").join("main.dist");

    assert_eq!(compiler.calls.load(Ordering::SeqCst), 1);
    assert_eq!(report.mode, PackageMode::Standalone);
    assert_eq!(report.executable, dist_dir.join(&exe_name));
    assert!(report.executable.is_file());
    assert!(dist_dir.join(CONFIG_FILE_NAME).is_file());

    let info: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dist_dir.join(BUILD_INFO_FILE)).unwrap())
            .unwrap();
    assert_eq!(info["mode"], "standalone");
    assert_eq!(info["features"], serde_json::json!(["cli"]));
    assert_eq!(report.files.len(), 3);
}

#[tokio::test]
async fn test_onefile_layout() {
    let temp_dir = TempDir::new().unwrap();
    let recipe = recipe_in(&temp_dir);

    let report = Packager::new(FakeCompiler::new(true), recipe)
        .run(PackageMode::OneFile)
        .await
        .unwrap();

    let exe_name = format!("FileTreer{}", std::env::consts::EXE_SUFFIX);
    assert_eq!(report.executable, temp_dir.path().join("dist").join(exe_name));
    assert!(report.executable.is_file());
    assert!(!temp_dir.path().join("dist").join("main.dist").exists());
    assert_eq!(report.files, vec![report.executable.clone()]);
}

#[tokio::test]
async fn test_onefile_executable_is_largest_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let recipe = recipe_in(&temp_dir);
    let packager = Packager::new(FakeCompiler::new(true), recipe);

    let standalone = packager.run(PackageMode::Standalone).await.unwrap();
    let sizes: Vec<u64> = standalone
        .files
        .iter()
        .map(|f| fs::metadata(f).unwrap().len())
        .collect();

    let onefile = packager.run(PackageMode::OneFile).await.unwrap();
    let onefile_size = fs::metadata(&onefile.executable).unwrap().len();

    assert!(sizes.iter().all(|&size| onefile_size >= size));
}

#[tokio::test]
async fn test_rerun_is_idempotent_and_drops_stale_layout() {
    let temp_dir = TempDir::new().unwrap();
    let recipe = recipe_in(&temp_dir);
    let packager = Packager::new(FakeCompiler::new(true), recipe.clone());

    packager.run(PackageMode::Standalone).await.unwrap();
    fs::write(recipe.standalone_path().join("stale.tmp"), "old").unwrap();
    packager.run(PackageMode::Standalone).await.unwrap();
    assert!(!recipe.standalone_path().join("stale.tmp").exists());

    packager.run(PackageMode::OneFile).await.unwrap();
    packager.run(PackageMode::OneFile).await.unwrap();

    let mut entries: Vec<String> = fs::read_dir(&recipe.output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    entries.sort();
    assert_eq!(entries, vec![recipe.executable_name()]);

    packager.run(PackageMode::Standalone).await.unwrap();
    assert!(!recipe.executable_path(PackageMode::OneFile).exists());
    assert!(recipe.executable_path(PackageMode::Standalone).is_file());
}

#[tokio::test]
async fn test_compiler_failure_produces_no_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let recipe = recipe_in(&temp_dir);

    for mode in [PackageMode::Standalone, PackageMode::OneFile] {
        let err = Packager::new(FakeCompiler::new(false), recipe.clone())
            .run(mode)
            .await
            .unwrap_err();

        assert!(matches!(err, FileTreerError::CompilerFailed { code: Some(1) }));
        assert_ne!(err.exit_code(), 0);
        assert!(!recipe.executable_path(mode).exists());
    }
}

#[tokio::test]
async fn test_failed_rebuild_keeps_previous_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let recipe = recipe_in(&temp_dir);

    Packager::new(FakeCompiler::new(true), recipe.clone())
        .run(PackageMode::OneFile)
        .await
        .unwrap();

    let result = Packager::new(FakeCompiler::new(false), recipe.clone())
        .run(PackageMode::OneFile)
        .await;

    assert!(result.is_err());
    assert!(recipe.executable_path(PackageMode::OneFile).is_file());
}
