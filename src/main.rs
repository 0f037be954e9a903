use clap::Parser;
use notepress::config::AppConfig;
use notepress::pipeline::{Pipeline, RunOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "notepress",
    version,
    about = "Convert a personal note into a published post"
)]
struct Cli {
    /// Note file to convert (.md, .txt or .notes)
    note_file: PathBuf,
    /// Push and trigger the site deployment after processing
    #[arg(long)]
    deploy: bool,
    /// Generate the post but write nothing and skip git operations
    #[arg(long)]
    dry_run: bool,
    /// Config file path (defaults to ./notepress.yml when present)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = notepress::init_tracing(&notepress::default_log_dir()) {
        eprintln!("notepress: failed to initialize logging: {error}");
    }

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("notepress: {error}");
            return ExitCode::FAILURE;
        }
    };

    let pipeline = Pipeline::new(config);
    let options = RunOptions {
        deploy: cli.deploy,
        dry_run: cli.dry_run,
    };

    match pipeline.run(&cli.note_file, &options) {
        Ok(report) => {
            println!("✓ processed {}: {}", report.note_file, report.post_title);
            if let Some(path) = &report.page_path {
                println!("  page: {path}");
            }
            if let Some(path) = &report.archive_path {
                println!("  archive: {path}");
            }
            if let Some(outcome) = &report.index_sync {
                if outcome.succeeded() {
                    println!("  index: updated");
                } else {
                    println!(
                        "  index: {} ({})",
                        outcome.status.as_str(),
                        outcome.message.as_deref().unwrap_or("see logs")
                    );
                }
            }
            if report.dry_run {
                println!("  dry run: no files written");
            }
            if report.deployed {
                println!("✓ deployed to website");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("notepress: {error}");
            ExitCode::FAILURE
        }
    }
}
