use std::io;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{Level, event};

use prime_bot::{PenaltyParams, PrimePlayer};
use prime_client::config::ClientConfig;
use prime_client::logging::init_logging;
use prime_client::session::Session;
use prime_core::AppInfo;

/// Prime Daihinmin player speaking line-delimited JSON over stdin/stdout.
#[derive(Debug, Parser)]
#[command(
    name = "prime-client",
    author,
    version,
    about = "Autonomous Prime Daihinmin player"
)]
struct Cli {
    /// Seed for the player's random choices (entropy when omitted).
    #[arg(value_name = "SEED")]
    seed: Option<u64>,

    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JSON penalty parameters; replaces the `params` section of the config.
    #[arg(long, value_name = "FILE")]
    params: Option<PathBuf>,

    /// Log at debug level to stderr (or the configured file) regardless of config.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_path(path)?,
        None => ClientConfig::default(),
    };

    if let Some(path) = &cli.params {
        config.params = PenaltyParams::from_file(path)?;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    config.validate()?;

    let _logging_guard = init_logging(&config.logging, cli.verbose)?;
    let limits = config
        .search
        .limits()
        .overridden_by(|key| std::env::var(key).ok());
    event!(
        target: "prime_client::session",
        Level::INFO,
        app = AppInfo::name(),
        version = AppInfo::version(),
        seed = ?config.seed,
        win_node_limit = limits.win_node_limit,
        shuffle_budget = limits.shuffle_budget,
        params = ?config.params,
        "player configured"
    );

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(PrimePlayer::new(config.params, limits, rng));
    let stats = session.run(io::stdin().lock(), io::stdout().lock())?;
    event!(
        target: "prime_client::session",
        Level::INFO,
        numbers = stats.numbers,
        passes = stats.passes,
        errors = stats.errors,
        quit = stats.quit,
        "session finished"
    );
    Ok(())
}
