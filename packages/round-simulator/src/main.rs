//! Round simulator CLI - plays whole games in memory through the score engine.
//!
//! Useful for eyeballing score distributions under different bidding habits
//! and for shaking out scoring regressions at volume.

mod metrics;
mod output;
mod simulator;
mod types;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use metrics::{build_game_metrics, GameConfig};
use output::OutputWriter;
use scorekeeper::{EngineConfig, Player};
use simulator::{GameResult, Simulator};
use tracing::{info, warn};
use types::{BidStyle, MetricsLevel, OutputFormat};

#[derive(Parser)]
#[command(name = "round-simulator")]
#[command(about = "In-memory game simulator for the score engine")]
struct Args {
    /// Number of games to simulate
    #[arg(short, long, default_value = "1")]
    games: u32,

    /// Players seated at the table
    #[arg(short, long, default_value = "4")]
    players: usize,

    /// Rounds per game (defaults to SCOREKEEPER_TOTAL_ROUNDS, then 10)
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Bidding habit used by every seat
    #[arg(long, default_value = "random")]
    style: BidStyle,

    /// Base seed; game N uses seed + N
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Show output summary and file paths
    #[arg(long)]
    show_output: bool,

    /// Output directory for results
    #[arg(long, default_value = "./simulation-results")]
    output_dir: PathBuf,

    /// Output format
    #[arg(long, default_value = "jsonl")]
    output_format: OutputFormat,

    /// Compress output files
    #[arg(long)]
    compress: bool,

    /// Metrics detail level
    #[arg(long, default_value = "detailed")]
    metrics_level: MetricsLevel,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Silent by default, only warnings and errors
    let filter = if args.verbose {
        "debug"
    } else if args.show_output {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let total_rounds = match args.rounds {
        Some(rounds) => rounds,
        None => EngineConfig::from_env()?.total_rounds,
    };

    if args.show_output {
        info!(
            games = args.games,
            players = args.players,
            total_rounds,
            style = ?args.style,
            "Starting round simulator"
        );
    }

    let mut output_writer =
        OutputWriter::new(&args.output_dir, &args.output_format, args.compress)?;
    if args.show_output {
        info!("Output directory: {}", args.output_dir.display());
    }

    let start = Instant::now();
    let mut results = Vec::new();
    let mut seats: Vec<Player> = Vec::new();
    let mut errors = 0;

    for game_num in 1..=args.games {
        let game_start = Instant::now();
        let game_seed = match args.seed {
            Some(s) => s.wrapping_add(u64::from(game_num)),
            None => rand::random(),
        };

        let mut simulator = Simulator::new(game_seed, args.players, total_rounds, args.style);
        if seats.is_empty() {
            seats = simulator.players().to_vec();
        }

        match simulator.simulate_game() {
            Ok(result) => {
                let duration_ms = game_start.elapsed().as_secs_f64() * 1000.0;
                let config = GameConfig {
                    players: args.players,
                    total_rounds,
                    bid_style: args.style,
                    total_games: args.games,
                };
                let metrics = build_game_metrics(
                    game_num,
                    game_seed,
                    config,
                    &args.metrics_level,
                    &result,
                    duration_ms,
                );

                if let Err(e) = output_writer.write_game(&metrics) {
                    warn!("Failed to write metrics for game {}: {}", game_num, e);
                }

                if args.verbose {
                    info!(
                        game = game_num,
                        leaders = ?metrics.result.leaders,
                        "Game completed"
                    );
                }
                results.push(result);
            }
            Err(e) => {
                errors += 1;
                warn!("Game {} failed: {}", game_num, e);
            }
        }
    }

    let elapsed = start.elapsed();

    let (jsonl_path, csv_path) = output_writer.output_paths();
    let jsonl_path = jsonl_path.cloned();
    let csv_path = csv_path.clone();

    output_writer.finish()?;

    if args.show_output {
        if let Some(path) = jsonl_path {
            info!("Detailed results written to: {}", path.display());
        }
        info!("Summary CSV written to: {}", csv_path.display());

        print_summary(&results, &seats, errors, elapsed, args.games);
    }

    Ok(())
}

fn print_summary(
    results: &[GameResult],
    seats: &[Player],
    errors: u32,
    elapsed: std::time::Duration,
    total: u32,
) {
    println!("\n=== Simulation Summary ===");
    println!("Games completed: {}/{}", results.len(), total);
    if errors > 0 {
        println!("Errors: {}", errors);
    }
    println!("Total time: {:?}", elapsed);

    if results.is_empty() {
        return;
    }
    println!(
        "Average time per game: {:?}",
        elapsed / results.len() as u32
    );

    let mut wins = vec![0u32; seats.len()];
    let mut total_scores = vec![0i64; seats.len()];
    let mut max_scores = vec![i64::MIN; seats.len()];
    let mut min_scores = vec![i64::MAX; seats.len()];
    let mut exact_bids = vec![0u32; seats.len()];
    let mut bids = vec![0u32; seats.len()];

    for result in results {
        for (seat, player) in seats.iter().enumerate() {
            let Some(standing) = result.standings.iter().find(|s| s.player_id == player.id)
            else {
                continue;
            };
            total_scores[seat] += standing.total_score;
            max_scores[seat] = max_scores[seat].max(standing.total_score);
            min_scores[seat] = min_scores[seat].min(standing.total_score);
            // Shared first place counts as a win for everyone tied
            if standing.is_leader {
                wins[seat] += 1;
            }
        }
        for record in &result.history {
            for (seat, player) in seats.iter().enumerate() {
                if let Some(r) = record.result_for(&player.id) {
                    bids[seat] += 1;
                    if r.bid_met() {
                        exact_bids[seat] += 1;
                    }
                }
            }
        }
    }

    println!("\n=== Results by Seat ===");
    let games = results.len() as f64;
    for (seat, player) in seats.iter().enumerate() {
        let avg_score = total_scores[seat] as f64 / games;
        let win_rate = (wins[seat] as f64 / games) * 100.0;
        let exact_pct = if bids[seat] > 0 {
            (exact_bids[seat] as f64 / bids[seat] as f64) * 100.0
        } else {
            0.0
        };
        println!(
            "{}: avg={:.1}, min={}, max={}, wins={} ({:.1}%), exact bids={:.1}%",
            player.name,
            avg_score,
            min_scores[seat],
            max_scores[seat],
            wins[seat],
            win_rate,
            exact_pct
        );
    }
}
