//! # Water Sort Solver Library
//!
//! This library provides the rules of the water sort puzzle and three search strategies
//! (BFS, DFS and A*) that find a sequence of pours sorting every color into a container
//! of its own.
//!
//! It is used by three binaries:
//! - `solver_cli`: Generates or reads a puzzle, solves it with one or all strategies and
//!   prints the moves and search statistics.
//! - `manual_player`: Interactive play on the command line, with undo and A* hints.
//! - `strategy_benchmark`: Compares the strategies over a batch of seeded puzzles.
//!
//! ## Modules
//! - `engine`: Colors, containers, states, the pour rule, successor generation, the goal
//!   test and puzzle generation.
//! - `heuristics`: The admissible move estimate used by A*.
//! - `solver`: The search engine, statistics and solution paths.
//! - `config`: Puzzle configuration and the feasibility pre-check.
//! - `error`: The error type shared by all of the above.
//! - `utils`: Parsing puzzles from text.

pub mod config;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod solver;
pub mod utils;

pub use config::PuzzleConfig;
pub use engine::{is_goal, legal_moves, new_puzzle, new_puzzle_with_seed, Move, PuzzleState};
pub use error::SolveError;
pub use solver::{
    solve, solve_all, solve_all_with_options, solve_with_options, Solution, Strategy,
};
