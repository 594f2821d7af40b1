//! Pit two advisor configurations against each other.
//!
//! Plays a series of local games and prints the tally. Ctrl-C stops after
//! the current move and still prints the summary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use pylos_advisor::{advise, AdvisorConfig, AvoidList, SearchStats, Strategy};
use pylos_core::{GameState, Player};

#[derive(Parser)]
#[command(name = "pylos-selfplay", about = "Play Pylos advisors against each other")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Strategy for Light (player 0)
    #[arg(long, value_enum, default_value_t = Strategy::Heuristic)]
    light: Strategy,

    /// Strategy for Dark (player 1)
    #[arg(long, value_enum, default_value_t = Strategy::Minimax)]
    dark: Strategy,

    /// Search depth for both sides
    #[arg(long, default_value_t = 2)]
    depth: usize,

    /// Stop a game as unfinished after this many turns
    #[arg(long, default_value_t = 200)]
    max_turns: usize,

    /// Disable alpha-beta pruning for minimax
    #[arg(long)]
    no_prune: bool,

    /// Print every board
    #[arg(long)]
    verbose: bool,
}

#[derive(Default)]
struct Tally {
    wins: [u64; 2],
    unfinished: u64,
    turns: u64,
    stats: [SearchStats; 2],
}

enum Outcome {
    Winner(Player),
    Unfinished,
    Interrupted,
}

fn play_game(
    configs: &[AdvisorConfig; 2],
    cli: &Cli,
    running: &AtomicBool,
    tally: &mut Tally,
) -> Result<Outcome> {
    let mut state = GameState::new();
    let mut avoid = [AvoidList::new(), AvoidList::new()];

    for _ in 0..cli.max_turns {
        if let Some(winner) = state.winner() {
            return Ok(Outcome::Winner(winner));
        }
        if !running.load(Ordering::SeqCst) {
            return Ok(Outcome::Interrupted);
        }

        let player = state.turn();
        let advice = advise(&state, &mut avoid[player.index()], &configs[player.index()])
            .with_context(|| format!("{} found no move in\n{}", player, state))?;
        state
            .update(&advice.mov, player)
            .with_context(|| format!("{} played an illegal move {}", player, advice.mov))?;

        tally.turns += 1;
        tally.stats[player.index()].merge(&advice.stats);
        if cli.verbose {
            println!("{} plays {}\n{}\n", player, advice.mov, state);
        }
    }

    Ok(state.winner().map_or(Outcome::Unfinished, Outcome::Winner))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(if cli.verbose {
        "debug"
    } else {
        "warn"
    }))
    .init();

    let configs = [cli.light, cli.dark].map(|strategy| AdvisorConfig {
        depth: cli.depth,
        strategy,
        prune: !cli.no_prune,
    });
    for config in &configs {
        config.validate().context("invalid advisor settings")?;
    }

    println!("Pylos Self-Play");
    println!("===============");
    println!("Light: {} | Dark: {} | depth {}", cli.light, cli.dark, cli.depth);
    println!();

    // Set up SIGINT handler for graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        println!("\n\nInterrupt received, finishing...");
        r.store(false, Ordering::SeqCst);
    })
    .context("setting Ctrl-C handler")?;

    let start = Instant::now();
    let mut tally = Tally::default();
    let mut played = 0;

    for game in 1..=cli.games {
        match play_game(&configs, &cli, &running, &mut tally)? {
            Outcome::Winner(winner) => {
                tally.wins[winner.index()] += 1;
                println!("Game {}: {} wins", game, winner);
            }
            Outcome::Unfinished => {
                tally.unfinished += 1;
                println!("Game {}: unfinished after {} turns", game, cli.max_turns);
            }
            Outcome::Interrupted => break,
        }
        played += 1;
    }

    println!("\n===============");
    println!("Games played: {}", played);
    println!("Light ({}) wins: {}", cli.light, tally.wins[0]);
    println!("Dark ({}) wins: {}", cli.dark, tally.wins[1]);
    println!("Unfinished: {}", tally.unfinished);
    if played > 0 {
        println!("Average turns: {:.1}", tally.turns as f64 / played as f64);
    }
    println!("Time: {:.2}s", start.elapsed().as_secs_f64());
    for player in Player::both() {
        println!("\n{} search totals:", player);
        tally.stats[player.index()].print_summary();
    }

    Ok(())
}
