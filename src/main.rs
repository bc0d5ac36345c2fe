use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotharvest::{cli, config, error};

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
    /// Collect artists and top tracks for a single genre
    Collect(CollectOptions),

    /// Collect a rotating batch of genres
    Batch(BatchOptions),

    /// List the available genre seeds
    Genres,

    /// Show rotation position and per-genre checkpoint counts
    Status(StatusOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CollectOptions {
    /// Genre to collect (default from SPOTIFY_GENRE, e.g. rock)
    #[clap(long, short = 'g')]
    pub genre: Option<String>,

    /// Number of artists to collect
    #[clap(long, short = 'n')]
    pub quantity: Option<usize>,

    /// Market for top-track lookups (e.g. BR)
    #[clap(long, short = 'm')]
    pub market: Option<String>,

    /// Back up the checkpoint and reprocess everything
    #[clap(long)]
    pub force: bool,

    /// Serve prometheus metrics on this port for the run
    #[clap(long)]
    pub metrics_port: Option<u16>,
}

#[derive(Parser, Debug, Clone)]
pub struct BatchOptions {
    /// Number of genres to process this invocation
    #[clap(long, default_value_t = 1)]
    pub size: usize,

    /// File holding the genre rotation state
    #[clap(long)]
    pub rotation_file: Option<PathBuf>,

    /// Number of artists to collect per genre
    #[clap(long, short = 'n')]
    pub quantity: Option<usize>,

    /// Market for top-track lookups (e.g. BR)
    #[clap(long, short = 'm')]
    pub market: Option<String>,

    /// Serve prometheus metrics on this port for the run
    #[clap(long)]
    pub metrics_port: Option<u16>,
}

#[derive(Parser, Debug, Clone)]
pub struct StatusOptions {
    /// File holding the genre rotation state
    #[clap(long)]
    pub rotation_file: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Collect(opt) => {
            cli::collect(
                opt.genre,
                opt.quantity,
                opt.market,
                opt.force,
                opt.metrics_port,
            )
            .await
        }
        Command::Batch(opt) => {
            cli::batch(
                opt.size,
                opt.rotation_file,
                opt.quantity,
                opt.market,
                opt.metrics_port,
            )
            .await
        }
        Command::Genres => cli::genres().await,
        Command::Status(opt) => cli::status(opt.rotation_file).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
