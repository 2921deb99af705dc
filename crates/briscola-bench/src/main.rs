use std::path::PathBuf;

use clap::Parser;

use briscola_bench::config::MatchConfig;
use briscola_bench::logging::init_logging;
use briscola_bench::runner::MatchRunner;
use briscola_bot::player::{HumanPlayer, RandomPlayer};
use briscola_bot::session::GameSession;
use briscola_core::game::state::GameState;
use briscola_core::model::player::Seat;

/// Match harness for the Briscola engine.
#[derive(Debug, Parser)]
#[command(
    name = "briscola-bench",
    author,
    version,
    about = "Deterministic Briscola match harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "COUNT")]
    games: Option<usize>,

    /// Override the RNG seed for game generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no games are run).
    #[arg(long)]
    validate_only: bool,

    /// Play one hand against the random bot on this terminal instead of
    /// running the configured match.
    #[arg(long)]
    interactive: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.interactive {
        return play_interactive();
    }

    let mut config = MatchConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    config.validate()?;
    let outputs = config.resolved_outputs();

    if cli.validate_only {
        println!("configuration OK");
        return Ok(());
    }

    let _logging = init_logging(&config.logging, &outputs)?;

    let runner = MatchRunner::new(config, outputs);
    let summary = runner.run()?;

    println!(
        "played {} games ({} rows): {} - {} with {} draws",
        summary.games_played,
        summary.rows_written,
        summary.wins[0],
        summary.wins[1],
        summary.draws
    );
    println!("results: {}", summary.jsonl_path.display());
    println!("summary: {}", summary.summary_path.display());
    Ok(())
}

fn play_interactive() -> anyhow::Result<()> {
    let mut session = GameSession::new(
        GameState::new(),
        Box::new(HumanPlayer::from_stdio()),
        Box::new(RandomPlayer::new()),
    );
    let outcome = session.run_to_completion()?;
    let state = session.state();
    println!(
        "final score {} - {}: {}",
        state.scores().score(Seat::North),
        state.scores().score(Seat::South),
        outcome
    );
    Ok(())
}
