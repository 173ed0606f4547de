/// Melodify Player - drive the playback engine from a command script
use anyhow::Context;
use clap::{Parser, Subcommand};
use melodify_core::Catalog;
use melodify_player::{render, run_script, PlayerSettings, Session};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "melodify-player")]
#[command(about = "Melodify playback engine on a simulated audio device", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./melodify.toml if present)
    #[arg(short, long, global = true, env = "MELODIFY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run player commands from a script (or stdin)
    Run {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Script file, one command per line
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Print JSON snapshots instead of status lines
        #[arg(long)]
        json: bool,
    },
    /// List catalog contents
    Catalog {
        /// Catalog JSON file
        #[arg(long)]
        catalog: PathBuf,

        /// Only show matches for this query
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Print effective configuration as TOML
    Config,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries status output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "melodify_player=info,melodify_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    let settings = PlayerSettings::load(cli.config.as_deref())?;
    settings.validate()?;

    match cli.command {
        Commands::Run {
            catalog,
            script,
            json,
        } => {
            run(&settings, &catalog, script, json || settings.output.json)?;
        }
        Commands::Catalog { catalog, search } => {
            let catalog = load_catalog(&catalog)?;
            print!("{}", render::catalog_listing(&catalog, search.as_deref()));
        }
        Commands::Config => {
            print!("{}", settings.to_toml()?);
        }
    }

    Ok(())
}

fn run(
    settings: &PlayerSettings,
    catalog: &Path,
    script: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let catalog = load_catalog(catalog)?;
    let mut session = Session::new(settings, catalog);

    let input: Box<dyn BufRead> = match script {
        Some(path) => Box::new(BufReader::new(
            File::open(&path).with_context(|| format!("opening script {}", path.display()))?,
        )),
        None => Box::new(io::stdin().lock()),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = run_script(&mut session, input, &mut out, json);
    session.shutdown();

    result?;
    tracing::info!("Script finished");
    Ok(())
}

fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    Catalog::from_path(path).with_context(|| format!("loading catalog {}", path.display()))
}
