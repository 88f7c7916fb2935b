use clap::Parser;
use log::{debug, LevelFilter};
use std::io::{self, Write};
use std::path::PathBuf;
use water_sort_solver::config::PuzzleConfig;
use water_sort_solver::engine::{new_puzzle, new_puzzle_with_seed, Container, PuzzleState};
use water_sort_solver::solver::{solve, Strategy};
use water_sort_solver::utils::puzzle_from_file;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play water sort in the terminal", long_about = None)]
struct Args {
    /// Number of containers
    #[clap(short = 'n', long, default_value_t = 6)]
    containers: usize,

    /// Number of colors
    #[clap(short = 'k', long, default_value_t = 4)]
    colors: usize,

    /// Units per container
    #[clap(short = 'm', long, default_value_t = 4)]
    capacity: usize,

    /// Seed for puzzle generation
    #[clap(long)]
    seed: Option<u64>,

    /// Enable debug messages
    #[clap(short, long, default_value_t = false)]
    debug: bool,

    /// Play a puzzle read from a file instead of a generated one
    puzzle_file: Option<PathBuf>,
}

/// One game in progress: every state reached so far, the initial state first.
struct Session {
    config: PuzzleConfig,
    history: Vec<PuzzleState>,
    selected: Option<usize>,
}

impl Session {
    fn new(initial: PuzzleState, config: PuzzleConfig) -> Self {
        Session {
            config,
            history: vec![initial],
            selected: None,
        }
    }

    fn current(&self) -> &PuzzleState {
        // history always holds the initial state
        &self.history[self.history.len() - 1]
    }

    fn moves(&self) -> usize {
        self.history.len() - 1
    }

    fn is_won(&self) -> bool {
        self.current().is_goal(self.config.initial_empty())
    }

    fn pour(&mut self, from: usize, to: usize) {
        match self.current().apply_move(from, to) {
            Ok(next) => {
                if let Some(mv) = next.last_move() {
                    println!("Poured {} unit(s) of {}.", mv.amount, mv.color);
                }
                self.history.push(next);
            }
            Err(err) => println!("Invalid move: {}.", err),
        }
    }

    /// A container number on its own selects it; a second one pours into it.
    /// Empty containers cannot be selected.
    fn select(&mut self, index: usize) {
        match self.selected.take() {
            None => {
                if self.current().container(index).map_or(true, Container::is_empty) {
                    println!("Container {} is empty, nothing to pour.", index + 1);
                    return;
                }
                self.selected = Some(index);
                let targets = self.current().pour_targets(index);
                if targets.is_empty() {
                    println!("No container can take that liquid right now.");
                } else {
                    let names: Vec<String> =
                        targets.iter().map(|t| (t + 1).to_string()).collect();
                    println!("Can pour into: {}", names.join(", "));
                }
            }
            Some(from) if from == index => println!("Selection cleared."),
            Some(from) => self.pour(from, index),
        }
    }

    fn undo(&mut self) {
        self.selected = None;
        if self.history.len() > 1 {
            self.history.pop();
            println!("Move undone.");
        } else {
            println!("Cannot undo further (already at initial state).");
        }
    }

    fn restart(&mut self) {
        self.selected = None;
        self.history.truncate(1);
        println!("Puzzle restarted.");
    }

    fn hint(&self) {
        match solve(Strategy::AStar, self.current(), &self.config) {
            Ok(solution) => match solution.moves().first() {
                Some(mv) => println!(
                    "Hint: {} ({} moves left on the shortest path).",
                    mv,
                    solution.len()
                ),
                None => println!("Hint: the puzzle is already solved."),
            },
            Err(err) => println!("No hint available: {}.", err),
        }
    }
}

fn parse_container(token: &str, count: usize) -> Option<usize> {
    token
        .parse::<usize>()
        .ok()
        .filter(|&i| (1..=count).contains(&i))
        .map(|i| i - 1)
}

fn load_puzzle(args: &Args) -> Result<(PuzzleState, PuzzleConfig), String> {
    if let Some(path) = &args.puzzle_file {
        let state = puzzle_from_file(path, None)?;
        let config = PuzzleConfig::from_state(&state);
        config.check_feasibility().map_err(|e| e.to_string())?;
        return Ok((state, config));
    }
    let (n, k, m) = (
        args.containers.max(1),
        args.colors.max(1),
        args.capacity.max(1),
    );
    let state = match args.seed {
        Some(seed) => new_puzzle_with_seed(n, k, m, seed),
        None => new_puzzle(n, k, m, &mut rand::thread_rng()),
    }
    .map_err(|e| e.to_string())?;
    let config = PuzzleConfig::new(n, k, m).map_err(|e| e.to_string())?;
    Ok((state, config))
}

fn main() {
    let args = Args::parse();
    let mut builder = env_logger::Builder::from_default_env();
    if args.debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();

    let (initial, config) = match load_puzzle(&args) {
        Ok(loaded) => loaded,
        Err(message) => {
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    };
    debug!("Starting puzzle:\n{}", initial.to_plain_string());

    let mut session = Session::new(initial, config);
    println!("Welcome to Water Sort!");

    loop {
        println!("---------------------");
        println!("Moves: {}", session.moves());
        println!("{}", session.current().to_string_with_highlight(session.selected));

        if session.is_won() {
            println!();
            println!("---------------------");
            println!("🎉 SOLVED! 🎉");
            println!("Total Moves: {}", session.moves());
            println!("---------------------");
            break;
        }

        print!("Enter 'from to' (or one container at a time), 'u' undo, 'h' hint, 'r' restart, 'q' quit: ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        let count = session.current().len();
        let parts: Vec<&str> = input.split_whitespace().collect();
        match parts.as_slice() {
            ["q"] => {
                println!("Thanks for playing!");
                break;
            }
            ["u"] => session.undo(),
            ["r"] => session.restart(),
            ["h"] => session.hint(),
            [one] => match parse_container(one, count) {
                Some(index) => session.select(index),
                None => println!("Invalid container: enter a number between 1 and {}.", count),
            },
            [from, to] => match (parse_container(from, count), parse_container(to, count)) {
                (Some(from), Some(to)) => {
                    session.selected = None;
                    session.pour(from, to);
                }
                _ => println!("Invalid containers: enter numbers between 1 and {}.", count),
            },
            _ => println!("Invalid input format. Use 'from to', 'u', 'h', 'r', or 'q'."),
        }
    }
}
