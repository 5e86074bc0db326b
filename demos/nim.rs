//! Plays Nim with the search engine on both sides.
//!
//! ```text
//! cargo run --example nim -- --ucbc 1.0 --chips 10
//! ```

use clap::Parser;
use tracing::info;
use uct_search::games::nim::NimState;
use uct_search::random::{CustomNumberGenerator, StandardRandomGenerator};
use uct_search::{search, GameState, MctsError, RandomGenerator, SearchConfig};

#[derive(Parser, Debug)]
#[command(about = "Nim played by UCT search against itself")]
struct Args {
    /// The constant biasing exploitation vs exploration
    #[arg(long, default_value_t = 1.0)]
    ucbc: f64,

    /// The number of chips in the starting state
    #[arg(long, default_value_t = 100)]
    chips: u64,

    /// Search iterations per move
    #[arg(long, default_value_t = 1000)]
    iterations: u32,

    /// Maximum rollout length per iteration
    #[arg(long, default_value_t = 100)]
    simulations: u32,

    /// Seed for a reproducible game; seeded from the OS when omitted
    #[arg(long)]
    seed: Option<i64>,
}

fn play<R: RandomGenerator>(
    mut state: NimState,
    config: &SearchConfig,
    random: &mut R,
) -> Result<NimState, MctsError> {
    // Play until the game is over (no more available moves).
    while !state.is_terminal() {
        info!(chips = state.chips(), "pile");
        let best_move = search(state.clone(), config.clone(), random)?;
        state.apply(&best_move)?;
        info!("{best_move}");
    }
    Ok(state)
}

fn main() -> Result<(), MctsError> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();
    info!(experiment = %std::env::args().next().unwrap_or_default(), "experiment game");

    let config = SearchConfig::default()
        .with_iterations(args.iterations)
        .with_simulations_per_iteration(args.simulations)
        .with_exploration_constant(args.ucbc);
    let state = NimState::new(args.chips);

    let finished = match args.seed {
        Some(seed) => play(state, &config, &mut CustomNumberGenerator::new(seed))?,
        None => play(state, &config, &mut StandardRandomGenerator::default())?,
    };

    if let Some(winner) = finished.winner() {
        info!("PLAYER {winner} WINS!");
    }
    info!("experiment complete");
    Ok(())
}
