use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use groupie_tracker::{cli, config, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the caching HTTP service
    Serve(ServeOptions),

    /// Fetch the upstream collections once and write the snapshot
    Refresh(SnapshotOptions),

    /// Search the on-disk snapshot
    Search(SearchOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ServeOptions {
    /// Address to listen on, e.g. 127.0.0.1:8080
    #[clap(long)]
    pub addr: Option<String>,

    /// Directory holding the snapshot files
    #[clap(long)]
    pub snapshot_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct SnapshotOptions {
    /// Directory holding the snapshot files
    #[clap(long)]
    pub snapshot_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    /// Name, member, first album, creation year or location
    pub query: String,

    /// Directory holding the snapshot files
    #[clap(long)]
    pub snapshot_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn init_tracing() {
    let result = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init();

    if let Err(e) = result {
        warning!("Cannot initialize logging. Err: {}", e);
    }
}

fn load_settings(snapshot_dir: Option<PathBuf>) -> config::Settings {
    let mut settings = match config::Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => error!("Invalid configuration. Err: {}", e),
    };
    if let Some(dir) = snapshot_dir {
        settings.snapshot_dir = dir;
    }
    settings
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env() {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Serve(opt) => {
            let mut settings = load_settings(opt.snapshot_dir);
            if let Some(addr) = opt.addr {
                settings.server_address = addr;
            }
            cli::serve(settings).await
        }
        Command::Refresh(opt) => cli::refresh(load_settings(opt.snapshot_dir)).await,
        Command::Search(opt) => cli::search(load_settings(opt.snapshot_dir), opt.query).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
