mod config;
mod engine;
mod game;
mod goal;
mod levels;
mod progress;
mod view;

use anyhow::Context;
use clap::Parser;
use config::RcLoader;
use game::{GameSession, Runner};
use levels::Catalogue;
use progress::{PlayerProgress, ProgressStore};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vim-dojo", version, about = "Learn vim motions one level at a time")]
struct Cli {
    /// Start at a specific level instead of resuming
    #[arg(short, long)]
    level: Option<u32>,

    /// List all levels and exit
    #[arg(long)]
    list_levels: bool,

    /// Delete saved progress and exit
    #[arg(long)]
    reset_progress: bool,

    /// Override the configured player name
    #[arg(long)]
    player_name: Option<String>,

    /// Print a sample .vimdojorc and exit
    #[arg(long)]
    sample_rc: bool,
}

fn main() -> anyhow::Result<()> {
    // Log to stderr so raw-mode stdout stays clean; silent unless RUST_LOG asks.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let catalogue = Catalogue::builtin().context("loading built-in levels")?;

    if cli.list_levels {
        list_levels(&catalogue);
        return Ok(());
    }

    if cli.sample_rc {
        print!("{}", RcLoader::generate_sample_rc());
        return Ok(());
    }

    let store = ProgressStore::default_path().map(ProgressStore::new);

    if cli.reset_progress {
        if let Some(store) = &store {
            store.clear().context("clearing progress")?;
            println!("Progress cleared.");
        } else {
            println!("No progress file to clear (HOME is not set).");
        }
        return Ok(());
    }

    let mut config = RcLoader::load_config();
    if let Some(name) = cli.player_name {
        config.player_name = name;
    }

    let progress = store
        .as_ref()
        .map(|s| s.load())
        .unwrap_or_else(PlayerProgress::default);

    let session = GameSession::new(catalogue, progress, store, cli.level)?;
    Runner::new(session, config).run()
}

fn list_levels(catalogue: &Catalogue) {
    for chapter in catalogue.chapters() {
        println!("{} ({})", chapter.title, chapter.id);
        for level in &chapter.levels {
            println!("  {:>3}  {}  [{} xp]", level.id, level.title, level.xp);
        }
    }
}
