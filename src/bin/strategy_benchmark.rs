use clap::Parser;
use log::{info, warn, LevelFilter};
use std::collections::HashMap;
use water_sort_solver::config::PuzzleConfig;
use water_sort_solver::engine::new_puzzle_with_seed;
use water_sort_solver::solver::{solve_all, SearchStatistics, Strategy};
use water_sort_solver::SolveError;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare BFS, DFS and A* over seeded puzzles", long_about = None)]
struct Args {
    /// Number of puzzles to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first puzzle; the following puzzles use consecutive seeds
    #[clap(long, default_value_t = 0)]
    start_seed: u64,

    /// Number of containers
    #[clap(short = 'n', long, default_value_t = 5)]
    containers: usize,

    /// Number of colors
    #[clap(short = 'k', long, default_value_t = 3)]
    colors: usize,

    /// Units per container
    #[clap(short = 'm', long, default_value_t = 4)]
    capacity: usize,

    /// Enable debug messages
    #[clap(short, long, default_value_t = false)]
    debug: bool,
}

/// Running totals for one strategy.
#[derive(Default)]
struct Tally {
    runs: usize,
    solved: usize,
    explored: usize,
    peak_frontier: usize,
    millis: f64,
    moves: usize,
}

impl Tally {
    fn record(&mut self, stats: &SearchStatistics) {
        self.runs += 1;
        self.explored += stats.states_explored;
        self.peak_frontier += stats.peak_frontier;
        self.millis += stats.duration.as_secs_f64() * 1000.0;
        if let Some(moves) = stats.path_length {
            self.solved += 1;
            self.moves += moves;
        }
    }

    fn average(total: f64, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            total / count as f64
        }
    }
}

fn main() {
    let args = Args::parse();
    let mut builder = env_logger::Builder::from_default_env();
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    let config = match PuzzleConfig::new(args.containers, args.colors, args.capacity)
        .and_then(|c| c.check_feasibility().map(|_| c))
    {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {}", err);
            std::process::exit(1);
        }
    };

    let mut tallies: HashMap<Strategy, Tally> = HashMap::new();

    println!(
        "Starting strategy evaluation for {} puzzles ({} containers, {} colors, capacity {})...",
        args.boards,
        config.containers(),
        config.colors(),
        config.capacity()
    );

    for board_idx in 0..args.boards {
        let seed = args.start_seed + board_idx as u64;
        let initial = match new_puzzle_with_seed(
            config.containers(),
            config.colors(),
            config.capacity(),
            seed,
        ) {
            Ok(state) => state,
            Err(err) => {
                warn!("Skipping seed {}: {}", seed, err);
                continue;
            }
        };

        println!("\nEvaluating Puzzle {} (Seed: {})", board_idx, seed);

        for (strategy, result) in solve_all(&initial, &config) {
            let stats = match &result {
                Ok(solution) => &solution.stats,
                Err(SolveError::NoSolutionFound { stats }) => stats,
                Err(err) => {
                    warn!("{} failed on seed {}: {}", strategy, seed, err);
                    continue;
                }
            };
            println!(
                "  Strategy: {:<4}, Moves: {:<6}, Explored: {:<8}, Peak frontier: {}",
                strategy.name(),
                stats
                    .path_length
                    .map_or_else(|| "none".to_string(), |m| m.to_string()),
                stats.states_explored,
                stats.peak_frontier
            );
            tallies.entry(strategy).or_default().record(stats);
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of puzzles evaluated: {}", args.boards);
    println!(
        "Strategies evaluated: {}",
        Strategy::ALL
            .iter()
            .map(Strategy::name)
            .collect::<Vec<&str>>()
            .join(", ")
    );
    println!("\n--- Averages ---");

    let mut rows: Vec<(Strategy, &Tally)> = tallies.iter().map(|(s, t)| (*s, t)).collect();
    // Fewest explored states first
    rows.sort_by(|a, b| {
        let left = Tally::average(a.1.explored as f64, a.1.runs);
        let right = Tally::average(b.1.explored as f64, b.1.runs);
        left.partial_cmp(&right).unwrap_or(std::cmp::Ordering::Equal)
    });

    for (strategy, tally) in rows {
        println!(
            "Strategy {:<4}: solved {}/{}, explored = {:.1}, peak frontier = {:.1}, time = {:.3} ms, moves = {:.2}",
            strategy.name(),
            tally.solved,
            tally.runs,
            Tally::average(tally.explored as f64, tally.runs),
            Tally::average(tally.peak_frontier as f64, tally.runs),
            Tally::average(tally.millis, tally.runs),
            Tally::average(tally.moves as f64, tally.solved)
        );
    }
    info!("Benchmark finished");
}
