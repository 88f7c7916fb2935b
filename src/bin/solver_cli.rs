use clap::Parser;
use log::{debug, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;
use water_sort_solver::config::PuzzleConfig;
use water_sort_solver::engine::{new_puzzle, new_puzzle_with_seed, PuzzleState};
use water_sort_solver::solver::{
    solve_all_with_options, solve_with_options, Progress, Solution, SolveOptions, Strategy,
};
use water_sort_solver::utils::puzzle_from_file;
use water_sort_solver::SolveError;

const DEFAULT_CAPACITY: usize = 4;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solve a water sort puzzle with BFS, DFS or A*", long_about = None)]
struct Args {
    /// Number of containers in a generated puzzle
    #[clap(short = 'n', long, default_value_t = 6)]
    containers: usize,

    /// Number of colors in a generated puzzle
    #[clap(short = 'k', long, default_value_t = 4)]
    colors: usize,

    /// Units per container [default: 4, or the longest row of a puzzle file]
    #[clap(short = 'm', long)]
    capacity: Option<usize>,

    /// Seed for puzzle generation; a random puzzle is drawn when omitted
    #[clap(long)]
    seed: Option<u64>,

    /// Search strategy
    #[clap(short, long, value_enum, default_value_t = Strategy::AStar)]
    strategy: Strategy,

    /// Run all three strategies and compare them
    #[clap(long, default_value_t = false)]
    compare: bool,

    /// Report search progress on stderr every this many states (0 disables)
    #[clap(long, default_value_t = 0)]
    progress: usize,

    /// Enable debug messages
    #[clap(short, long, default_value_t = false)]
    debug: bool,

    /// Path to a puzzle file (one container per line, bottom unit first)
    puzzle_file: Option<PathBuf>,
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn load_puzzle(args: &Args) -> Result<(PuzzleState, PuzzleConfig), String> {
    if let Some(path) = &args.puzzle_file {
        let state = puzzle_from_file(path, args.capacity)?;
        println!("Loaded puzzle from {}\n", path.display());
        let config = PuzzleConfig::from_state(&state);
        return Ok((state, config));
    }

    // Parameters below one are raised to one, as in the puzzle setup screen.
    let (n, k, m) = (
        args.containers.max(1),
        args.colors.max(1),
        args.capacity.unwrap_or(DEFAULT_CAPACITY).max(1),
    );
    let state = match args.seed {
        Some(seed) => new_puzzle_with_seed(n, k, m, seed),
        None => new_puzzle(n, k, m, &mut rand::thread_rng()),
    }
    .map_err(|e| e.to_string())?;
    let config = PuzzleConfig::new(n, k, m).map_err(|e| e.to_string())?;
    println!(
        "Generated puzzle: {} containers, {} colors, capacity {}{}\n",
        n,
        k,
        m,
        args.seed.map(|s| format!(", seed {}", s)).unwrap_or_default()
    );
    Ok((state, config))
}

fn print_solution(solution: &Solution) {
    println!("Moves ({}):", solution.len());
    if solution.is_empty() {
        println!("  Already solved, no moves needed.");
    }
    for (i, mv) in solution.moves().iter().enumerate() {
        println!("  Move {}: {}", i + 1, mv);
    }
    if let Some(last) = solution.final_state() {
        println!("\nFinal state:\n{}\n", last);
    }
}

fn print_outcome(strategy: Strategy, result: &Result<Solution, SolveError>, show_moves: bool) {
    println!("=== {} ===", strategy);
    match result {
        Ok(solution) => {
            if show_moves {
                print_solution(solution);
            }
            println!("{}\n", solution.stats);
        }
        Err(err) => {
            println!("{}", err);
            if let Some(stats) = err.statistics() {
                println!("{}", stats);
            }
            println!();
        }
    }
}

fn run(args: &Args) -> Result<(), String> {
    let (initial, config) = load_puzzle(args)?;
    config.check_feasibility().map_err(|e| format!("Unsolvable: {}", e))?;
    println!("Initial state:\n{}\n", initial);
    debug!("Initial state as text:\n{}", initial.to_plain_string());

    let mut options = SolveOptions::default();
    if args.progress > 0 {
        options = options.with_progress(args.progress, |p: &Progress| {
            eprintln!(
                "  {} explored {} states, frontier {}",
                p.strategy, p.states_explored, p.frontier_len
            );
        });
    }

    if args.compare {
        let results = solve_all_with_options(&initial, &config, &mut options);
        for (strategy, result) in &results {
            print_outcome(*strategy, result, false);
        }
        println!("{:<6} {:>8} {:>10} {:>10} {:>10}", "", "moves", "explored", "frontier", "ms");
        for (strategy, result) in &results {
            let stats = match result {
                Ok(solution) => Some(&solution.stats),
                Err(err) => err.statistics(),
            };
            if let Some(stats) = stats {
                println!(
                    "{:<6} {:>8} {:>10} {:>10} {:>10.3}",
                    strategy.name(),
                    stats
                        .path_length
                        .map_or_else(|| "-".to_string(), |l| l.to_string()),
                    stats.states_explored,
                    stats.peak_frontier,
                    stats.duration.as_secs_f64() * 1000.0
                );
            }
        }
        if results.iter().any(|(_, r)| r.is_ok()) {
            return Ok(());
        }
        return Err("No strategy found a solution".to_string());
    }

    println!("Searching with {}...\n", args.strategy);
    let result = solve_with_options(args.strategy, &initial, &config, &mut options);
    print_outcome(args.strategy, &result, true);
    result.map(|_| ()).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        }
    }
}
