use anyhow::Context;
use clap::{Parser, Subcommand};
use skirmish_arena::config::ArenaConfig;
use skirmish_arena::game_runner::{load_board, GameRunner};
use skirmish_arena::json_output;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skirmish-arena")]
#[command(about = "Runs skirmish games between bot strategies")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game between the configured bots
    Play {
        /// Path to the arena configuration; `arena.toml` if omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Snapshot JSON to start from, overriding the config
        #[arg(short, long)]
        state: Option<PathBuf>,
        /// Decision limit, overriding the config
        #[arg(short, long)]
        max_turns: Option<u32>,
        /// Bot seed, overriding the config
        #[arg(long)]
        seed: Option<u64>,
        /// Write the game record to this JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print a board and its turn state
    Show {
        /// Snapshot JSON to show; the standard setup if omitted
        #[arg(short, long)]
        state: Option<PathBuf>,
    },
}

/// Reads the arena configuration from `path`, or from the default location.
fn load_config(path: Option<&Path>) -> anyhow::Result<ArenaConfig> {
    match path {
        Some(path) => ArenaConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display())),
        None => ArenaConfig::load()
            .with_context(|| format!("loading {}", ArenaConfig::config_path().display())),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            config,
            state,
            max_turns,
            seed,
            output,
        } => {
            let mut arena = load_config(config.as_deref())?;
            if let Some(state) = state {
                arena.state = Some(state);
            }
            if let Some(max_turns) = max_turns {
                arena.max_turns = max_turns;
            }
            if let Some(seed) = seed {
                arena.seed = seed;
            }

            let board = load_board(arena.state.as_deref())?;
            let mut runner = GameRunner::from_config(&arena, board)?;
            let record = runner.play_game()?;

            for (faction, bot) in &record.bots {
                println!("{faction}: {bot}");
            }
            for mov in &record.moves {
                println!("{:>4}  {}", mov.turn, mov.description);
            }
            println!("\n{}", runner.board());
            println!("Result: {:?} after {} turns", record.end, record.turns);

            if let Some(output) = output {
                json_output::write_json(&output, arena.seed, &record)
                    .with_context(|| format!("writing {}", output.display()))?;
                println!("Game saved to {}", output.display());
            }
        }
        Commands::Show { state } => {
            let board = load_board(state.as_deref())?;
            print!("{board}");
            println!("Turn {}: {} to move", board.turn(), board.current_turn());
            for faction in board.turn_order() {
                println!("{faction} leadership: {}", board.leadership(*faction)?);
            }
            for check in board.checks() {
                println!("Check: {}", check.outcome);
            }
        }
    }
    Ok(())
}
