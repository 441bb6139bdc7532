use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use cli::{report, selection};
use organizer_core::config;
use organizer_core::organizer::Organizer;
use organizer_core::taxonomy;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Commands::Analyze { json } => {
            let organizer = Organizer::new(&cfg);
            let analysis = organizer.analyze_all_projects()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print!("{}", report::render_analysis(&analysis));
            }
            Ok(())
        }
        Commands::Organize {
            mode,
            execute,
            target_root,
            include_review,
            json,
            verbose,
        } => {
            let mut organizer = Organizer::new(&cfg);
            if let Some(root) = target_root {
                organizer = organizer.with_target_root(root);
            }
            if execute {
                organizer = organizer.with_dry_run(false);
            }
            run_organize(organizer, mode, include_review, json, verbose)
        }
        Commands::Init { target_root } => {
            let root = target_root
                .map(std::path::PathBuf::from)
                .unwrap_or_else(|| cfg.organize.target_root());
            let created = taxonomy::create_folder_structure(&root)?;
            println!("{} folder(s) created under {}", created.len(), root.display());
            Ok(())
        }
    }
}

#[derive(Parser)]
#[command(name = "sadact-organizer")]
#[command(about = "Music project organizer", long_about = None)]
struct Cli {
    /// Path to config TOML
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Accept every confident suggestion
    Quick,
    /// Confirm each project
    Interactive,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan and classify projects without moving anything
    Analyze {
        /// Output JSON
        #[arg(long)]
        json: bool,
    },
    /// Move projects into the folder taxonomy (dry run unless --execute)
    Organize {
        /// How projects are selected
        #[arg(long, value_enum, default_value_t = Mode::Quick)]
        mode: Mode,
        /// Actually move files; without this only a dry run is performed
        #[arg(long, default_value_t = false)]
        execute: bool,
        /// Override the destination root
        #[arg(long)]
        target_root: Option<String>,
        /// In quick mode, also move projects flagged for review
        #[arg(long, default_value_t = false)]
        include_review: bool,
        /// Output JSON
        #[arg(long)]
        json: bool,
        /// Per-project output (non-JSON)
        #[arg(long, default_value_t = false)]
        verbose: bool,
    },
    /// Create the destination folder taxonomy
    Init {
        /// Override the destination root
        #[arg(long)]
        target_root: Option<String>,
    },
}

fn run_organize(
    organizer: Organizer,
    mode: Mode,
    include_review: bool,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let analysis = organizer.analyze_all_projects()?;
    let selections = match mode {
        Mode::Quick => selection::quick_selections(&analysis, include_review),
        Mode::Interactive => {
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let mut output = io::stdout();
            selection::interactive_selections(&analysis, &mut input, &mut output)?
        }
    };
    if selections.is_empty() {
        println!("nothing selected");
        return Ok(());
    }

    let batch = organizer.organize_selected_projects(&selections);
    if json {
        let summary = serde_json::json!({
            "dry_run": organizer.is_dry_run(),
            "target_root": organizer.target_root(),
            "moved": batch.succeeded(),
            "failed": batch.failed(),
            "dry_run_count": batch.dry_run(),
            "backup_failures": batch.backup_failures(),
            "log": batch.log_path,
            "results": batch.results,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", report::render_batch(&batch, verbose || organizer.is_dry_run()));
        if organizer.is_dry_run() {
            println!("dry run: re-run with --execute to move projects");
        }
    }
    Ok(())
}
