use clap::Parser;
use filetreer::utils::{logger, prompt};
use filetreer::{CargoCompiler, PackageMode, PackageRecipe, Packager};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "filetreer-package")]
#[command(about = "Build FileTreer into a distributable executable under dist/")]
struct Args {
    /// Produce one self-contained executable instead of the dist/main.dist/ directory
    #[arg(long)]
    onefile: bool,

    /// TOML file overriding fields of the built-in recipe
    #[arg(long)]
    recipe: Option<PathBuf>,

    /// Exit immediately on failure instead of waiting for Enter
    #[arg(long)]
    no_pause: bool,

    /// Emit logs as JSON (for CI)
    #[arg(long)]
    json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if args.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let recipe = match &args.recipe {
        Some(path) => match PackageRecipe::from_file(path) {
            Ok(recipe) => recipe,
            Err(e) => {
                eprintln!("❌ Failed to load recipe '{}': {}", path.display(), e);
                eprintln!("💡 {}", e.recovery_suggestion());
                fail(&args, e.exit_code());
            }
        },
        None => PackageRecipe::default(),
    };

    let mode = if args.onefile {
        PackageMode::OneFile
    } else {
        PackageMode::Standalone
    };

    match mode {
        PackageMode::Standalone => println!("Packaging FileTreer (standalone directory)..."),
        PackageMode::OneFile => println!("Packaging FileTreer (single file)..."),
    }

    let packager = Packager::new(CargoCompiler, recipe);
    match packager.run(mode).await {
        Ok(report) => {
            println!();
            println!("✅ Packaging succeeded!");
            match report.mode {
                PackageMode::Standalone => println!(
                    "📁 Executable is in {}",
                    packager.recipe().standalone_path().display()
                ),
                PackageMode::OneFile => {
                    println!("📁 Single-file executable: {}", report.executable.display())
                }
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Packaging failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            println!();
            eprintln!("❌ {}: {}", e.user_friendly_message(), e);
            eprintln!("💡 {}", e.recovery_suggestion());
            fail(&args, e.exit_code().max(1));
        }
    }
}

fn fail(args: &Args, code: i32) -> ! {
    if !args.no_pause {
        prompt::pause("Press Enter to exit...");
    }
    std::process::exit(code)
}
