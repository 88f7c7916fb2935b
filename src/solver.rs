//! State-space search over water sort puzzles.
//!
//! Three strategies share one driver:
//! - `Strategy::Bfs`: FIFO frontier, stops at the first goal, always move-optimal.
//! - `Strategy::Dfs`: LIFO frontier, exhausts the reachable space and keeps the shortest goal
//!   it met along the way.
//! - `Strategy::AStar`: best-first on `f = g + h` with lazy removal of stale entries.
//!
//! Every state discovered during a run lives in an index arena; parent links are arena
//! indices. The solution path is copied out by value and the arena is dropped with the run.
use clap::ValueEnum;
use log::{debug, info, trace};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::fmt;
use std::sync::atomic::{self, AtomicBool};
use std::time::{Duration, Instant};

use crate::config::PuzzleConfig;
use crate::engine::{Move, PuzzleState, StateKey};
use crate::error::SolveError;

/// Default number of pops between two progress reports.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 100;

/// The available search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, ValueEnum)]
pub enum Strategy {
    /// Breadth-first search.
    Bfs,
    /// Exhaustive depth-first search with best-solution tracking.
    Dfs,
    /// A* best-first search.
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Bfs, Strategy::Dfs, Strategy::AStar];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::AStar => "A*",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Figures collected for one search run.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchStatistics {
    pub strategy: Strategy,
    /// States popped from the frontier, stale A* entries included.
    pub states_explored: usize,
    /// Largest frontier size seen, measured before each pop.
    pub peak_frontier: usize,
    pub duration: Duration,
    /// Number of moves in the solution, `None` when no solution was found.
    pub path_length: Option<usize>,
}

impl SearchStatistics {
    pub fn is_solved(&self) -> bool {
        self.path_length.is_some()
    }
}

impl fmt::Display for SearchStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Strategy:        {}", self.strategy)?;
        writeln!(f, "  States explored: {}", self.states_explored)?;
        writeln!(f, "  Peak frontier:   {}", self.peak_frontier)?;
        writeln!(
            f,
            "  Solving time:    {:.3} ms",
            self.duration.as_secs_f64() * 1000.0
        )?;
        match self.path_length {
            Some(moves) => write!(f, "  Solution length: {} moves", moves),
            None => write!(f, "  Solution length: no solution"),
        }
    }
}

/// Liveness snapshot handed to the progress callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub strategy: Strategy,
    pub states_explored: usize,
    pub frontier_len: usize,
}

/// Optional hooks for a search run.
///
/// Neither hook influences the algorithm: the callback only observes, and the cancellation
/// flag is polled once per pop.
pub struct SolveOptions<'a> {
    progress_interval: usize,
    on_progress: Option<Box<dyn FnMut(&Progress) + 'a>>,
    cancel: Option<&'a AtomicBool>,
}

impl Default for SolveOptions<'_> {
    fn default() -> Self {
        SolveOptions {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            on_progress: None,
            cancel: None,
        }
    }
}

impl<'a> SolveOptions<'a> {
    /// Calls `callback` every `interval` pops. An interval of zero is treated as one.
    pub fn with_progress<F>(mut self, interval: usize, callback: F) -> Self
    where
        F: FnMut(&Progress) + 'a,
    {
        self.progress_interval = interval.max(1);
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Ends the run with `SolveError::Cancelled` once `flag` becomes true.
    pub fn with_cancel_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancel = Some(flag);
        self
    }
}

/// A solution path from the initial state to a goal, plus the run's statistics.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Initial state first, goal state last.
    pub states: Vec<PuzzleState>,
    pub stats: SearchStatistics,
}

impl Solution {
    /// Number of moves.
    pub fn len(&self) -> usize {
        self.states.len().saturating_sub(1)
    }

    /// True when the initial state was already a goal.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn moves(&self) -> Vec<Move> {
        self.states.iter().filter_map(PuzzleState::last_move).collect()
    }

    pub fn initial_state(&self) -> Option<&PuzzleState> {
        self.states.first()
    }

    pub fn final_state(&self) -> Option<&PuzzleState> {
        self.states.last()
    }
}

struct Node {
    state: PuzzleState,
    parent: Option<usize>,
}

/// Priority-queue entry; `BinaryHeap` is a max-heap, so the ordering is reversed to pop
/// the smallest `f`, then the smallest `h`, then the oldest entry.
#[derive(Debug, PartialEq, Eq)]
struct OpenEntry {
    f: u32,
    h: u32,
    id: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

struct SearchRun<'o, 'a> {
    strategy: Strategy,
    initial_empty: usize,
    nodes: Vec<Node>,
    states_explored: usize,
    peak_frontier: usize,
    started: Instant,
    options: &'o mut SolveOptions<'a>,
}

impl<'o, 'a> SearchRun<'o, 'a> {
    fn new(
        strategy: Strategy,
        initial: &PuzzleState,
        config: &PuzzleConfig,
        options: &'o mut SolveOptions<'a>,
    ) -> Self {
        SearchRun {
            strategy,
            initial_empty: config.initial_empty(),
            nodes: vec![Node {
                state: initial.as_root(),
                parent: None,
            }],
            states_explored: 0,
            peak_frontier: 0,
            started: Instant::now(),
            options,
        }
    }

    const ROOT: usize = 0;

    fn state(&self, id: usize) -> &PuzzleState {
        &self.nodes[id].state
    }

    fn is_goal(&self, id: usize) -> bool {
        self.state(id).is_goal(self.initial_empty)
    }

    fn push(&mut self, state: PuzzleState, parent: usize) -> usize {
        self.nodes.push(Node {
            state,
            parent: Some(parent),
        });
        self.nodes.len() - 1
    }

    fn stats(&self, path_length: Option<usize>) -> SearchStatistics {
        SearchStatistics {
            strategy: self.strategy,
            states_explored: self.states_explored,
            peak_frontier: self.peak_frontier,
            duration: self.started.elapsed(),
            path_length,
        }
    }

    /// Bookkeeping for one pop. `frontier_len` is the size before the pop.
    fn tick(&mut self, frontier_len: usize) -> Result<(), SolveError> {
        if self
            .options
            .cancel
            .is_some_and(|flag| flag.load(atomic::Ordering::Relaxed))
        {
            debug!(
                "{} search cancelled after {} states",
                self.strategy, self.states_explored
            );
            return Err(SolveError::Cancelled {
                stats: self.stats(None),
            });
        }

        self.peak_frontier = self.peak_frontier.max(frontier_len);
        self.states_explored += 1;

        if self.states_explored % self.options.progress_interval == 0 {
            debug!(
                "{} searching... explored {} states, frontier {}",
                self.strategy, self.states_explored, frontier_len
            );
            let progress = Progress {
                strategy: self.strategy,
                states_explored: self.states_explored,
                frontier_len,
            };
            if let Some(callback) = self.options.on_progress.as_mut() {
                callback(&progress);
            }
        }
        Ok(())
    }

    fn bfs(&mut self) -> Result<Option<usize>, SolveError> {
        let mut visited: HashSet<StateKey> = HashSet::new();
        visited.insert(self.state(Self::ROOT).key());
        let mut queue = VecDeque::from([Self::ROOT]);

        while let Some(id) = queue.pop_front() {
            self.tick(queue.len() + 1)?;

            if self.is_goal(id) {
                return Ok(Some(id));
            }

            let successors = self.state(id).successors();
            for next in successors {
                if visited.insert(next.key()) {
                    let child = self.push(next, id);
                    queue.push_back(child);
                }
            }
        }
        Ok(None)
    }

    fn dfs(&mut self) -> Result<Option<usize>, SolveError> {
        let mut visited: HashSet<StateKey> = HashSet::new();
        visited.insert(self.state(Self::ROOT).key());
        let mut stack = vec![Self::ROOT];
        let mut best: Option<usize> = None;

        // Runs until the stack is empty: a LIFO order gives no optimality guarantee, so
        // every goal met is only a candidate.
        while let Some(id) = stack.pop() {
            self.tick(stack.len() + 1)?;

            if self.is_goal(id) {
                let g = self.state(id).g();
                if best.map_or(true, |b| g < self.state(b).g()) {
                    debug!("DFS found a candidate solution of {} moves", g);
                    best = Some(id);
                }
                continue;
            }

            let successors = self.state(id).successors();
            for next in successors {
                if visited.insert(next.key()) {
                    let child = self.push(next, id);
                    stack.push(child);
                }
            }
        }
        Ok(best)
    }

    fn a_star(&mut self) -> Result<Option<usize>, SolveError> {
        let mut best_g: HashMap<StateKey, u32> = HashMap::new();
        let mut open = BinaryHeap::new();

        let root = self.state(Self::ROOT);
        best_g.insert(root.key(), root.g());
        open.push(OpenEntry {
            f: root.f(),
            h: root.h(),
            id: Self::ROOT,
        });

        while let Some(entry) = open.pop() {
            self.tick(open.len() + 1)?;

            let current = self.state(entry.id);
            let current_g = current.g();
            if best_g
                .get(&current.key())
                .is_some_and(|&recorded| current_g > recorded)
            {
                trace!("Skipping stale entry at g={}", current_g);
                continue;
            }

            if self.is_goal(entry.id) {
                return Ok(Some(entry.id));
            }

            let successors = current.successors();
            for next in successors {
                let key = next.key();
                let new_g = current_g + 1;
                if best_g.get(&key).is_some_and(|&recorded| new_g >= recorded) {
                    continue;
                }
                best_g.insert(key, new_g);
                let (f, h) = (next.f(), next.h());
                let id = self.push(next, entry.id);
                open.push(OpenEntry { f, h, id });
            }
        }
        Ok(None)
    }

    /// Follows parent links from `goal` to the root and returns the states root first.
    fn reconstruct_path(&self, goal: usize) -> Vec<PuzzleState> {
        let mut path = Vec::new();
        let mut cursor = Some(goal);
        while let Some(id) = cursor {
            let node = &self.nodes[id];
            path.push(node.state.clone());
            cursor = node.parent;
        }
        path.reverse();
        path
    }

    fn finish(self, goal: Option<usize>) -> Result<Solution, SolveError> {
        match goal {
            Some(id) => {
                let states = self.reconstruct_path(id);
                let stats = self.stats(Some(states.len() - 1));
                info!(
                    "{} solved in {} moves ({} states explored, {} arena nodes)",
                    self.strategy,
                    states.len() - 1,
                    stats.states_explored,
                    self.nodes.len()
                );
                Ok(Solution { states, stats })
            }
            None => {
                let stats = self.stats(None);
                info!(
                    "{} exhausted {} states without reaching a goal",
                    self.strategy, stats.states_explored
                );
                Err(SolveError::NoSolutionFound { stats })
            }
        }
    }
}

/// Solves `initial` with `strategy`.
///
/// The feasibility pre-check runs first. `initial` is treated as a root: its move metadata
/// and cost are ignored.
///
/// # Errors
/// `ConfigurationInfeasible` from the pre-check, or `NoSolutionFound` carrying the run's
/// statistics when the reachable state space holds no goal.
///
/// # Examples
/// ```
/// use water_sort_solver::config::PuzzleConfig;
/// use water_sort_solver::engine::PuzzleState;
/// use water_sort_solver::solver::{solve, Strategy};
///
/// let start = PuzzleState::from_ids(2, &[&[1, 2], &[2, 1], &[]]).unwrap();
/// let config = PuzzleConfig::from_state(&start);
/// let solution = solve(Strategy::Bfs, &start, &config).unwrap();
/// assert_eq!(solution.len(), 3);
/// assert!(solution.final_state().unwrap().is_goal(config.initial_empty()));
/// ```
pub fn solve(
    strategy: Strategy,
    initial: &PuzzleState,
    config: &PuzzleConfig,
) -> Result<Solution, SolveError> {
    solve_with_options(strategy, initial, config, &mut SolveOptions::default())
}

/// [`solve`] with progress reporting and cooperative cancellation.
///
/// # Errors
/// As [`solve`], plus `Cancelled` when the options' flag is raised.
pub fn solve_with_options(
    strategy: Strategy,
    initial: &PuzzleState,
    config: &PuzzleConfig,
    options: &mut SolveOptions<'_>,
) -> Result<Solution, SolveError> {
    config.check_feasibility()?;
    debug!(
        "{} search starting: {} containers, {} colors, {} initially empty",
        strategy,
        config.containers(),
        config.colors(),
        config.initial_empty()
    );

    let mut run = SearchRun::new(strategy, initial, config, options);
    let goal = match strategy {
        Strategy::Bfs => run.bfs(),
        Strategy::Dfs => run.dfs(),
        Strategy::AStar => run.a_star(),
    }?;
    run.finish(goal)
}

/// Runs every strategy on the same puzzle, in `Strategy::ALL` order.
pub fn solve_all(
    initial: &PuzzleState,
    config: &PuzzleConfig,
) -> Vec<(Strategy, Result<Solution, SolveError>)> {
    solve_all_with_options(initial, config, &mut SolveOptions::default())
}

/// [`solve_all`] sharing one set of options across the runs. A raised cancellation flag
/// cancels every run that has not finished yet.
pub fn solve_all_with_options(
    initial: &PuzzleState,
    config: &PuzzleConfig,
    options: &mut SolveOptions<'_>,
) -> Vec<(Strategy, Result<Solution, SolveError>)> {
    Strategy::ALL
        .iter()
        .map(|&strategy| {
            (
                strategy,
                solve_with_options(strategy, initial, config, options),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::new_puzzle_with_seed;
    use proptest::prelude::{any, prop_assert, prop_assert_eq, proptest, Just, ProptestConfig};
    use proptest::strategy::Strategy as ValueStrategy;

    fn state(capacity: usize, containers: &[&[u8]]) -> PuzzleState {
        PuzzleState::from_ids(capacity, containers).unwrap()
    }

    fn assert_valid_path(solution: &Solution, config: &PuzzleConfig) {
        let states = &solution.states;
        assert!(!states.is_empty());
        assert_eq!(states[0].g(), 0);
        assert_eq!(states[0].last_move(), None);
        for pair in states.windows(2) {
            let mv = pair[1].last_move().expect("non-root states record their move");
            let replayed = pair[0].apply_move(mv.from, mv.to).unwrap();
            assert_eq!(replayed.key(), pair[1].key());
            assert_eq!(pair[1].g(), pair[0].g() + 1);
        }
        assert!(states.last().unwrap().is_goal(config.initial_empty()));
        assert_eq!(solution.moves().len(), solution.len());
        assert_eq!(solution.stats.path_length, Some(solution.len()));
    }

    #[test]
    fn test_already_solved_is_zero_length_for_every_strategy() {
        let start = state(2, &[&[1, 1], &[2, 2], &[], &[]]);
        let config = PuzzleConfig::new(4, 2, 2).unwrap();
        for (strategy, result) in solve_all(&start, &config) {
            let solution = result.unwrap();
            assert!(solution.is_empty(), "{} should not move", strategy);
            assert_eq!(solution.states.len(), 1);
            assert_eq!(solution.stats.states_explored, 1);
            assert_eq!(solution.stats.strategy, strategy);
        }
    }

    #[test]
    fn test_two_color_swap_is_solved_optimally() {
        let start = state(2, &[&[1, 2], &[2, 1], &[]]);
        let config = PuzzleConfig::from_state(&start);
        assert_eq!(config.initial_empty(), 1);

        let bfs = solve(Strategy::Bfs, &start, &config).unwrap();
        let a_star = solve(Strategy::AStar, &start, &config).unwrap();
        let dfs = solve(Strategy::Dfs, &start, &config).unwrap();

        // Split into the spare, merge onto the first container, consolidate.
        assert_eq!(bfs.len(), 3);
        assert_eq!(a_star.len(), 3);
        assert!(dfs.len() >= bfs.len());
        for solution in [&bfs, &a_star, &dfs] {
            assert_valid_path(solution, &config);
        }
    }

    #[test]
    fn test_infeasible_configuration_is_rejected_before_search() {
        let start = state(4, &[&[1, 2, 1, 2]]);
        let config = PuzzleConfig::new(1, 2, 4).unwrap();
        for strategy in Strategy::ALL {
            let err = solve(strategy, &start, &config).unwrap_err();
            assert!(err.to_string().contains("container count below color count"));
            assert!(err.statistics().is_none());
        }
    }

    #[test]
    fn test_dead_end_reports_no_solution() {
        // Both containers full, nothing can move.
        let start = state(2, &[&[1, 2], &[2, 1]]);
        let config = PuzzleConfig::from_state(&start);
        for strategy in Strategy::ALL {
            match solve(strategy, &start, &config) {
                Err(SolveError::NoSolutionFound { stats }) => {
                    assert_eq!(stats.states_explored, 1);
                    assert!(!stats.is_solved());
                    assert_eq!(stats.strategy, strategy);
                }
                other => panic!("{}: expected no solution, got {:?}", strategy, other),
            }
        }
    }

    #[test]
    fn test_unreachable_empty_count_exhausts_search() {
        // Four units in two-unit containers can never leave two of three containers empty.
        let start = state(2, &[&[1, 2], &[2, 1], &[]]);
        let config = PuzzleConfig::from_state(&start).with_initial_empty(2);
        let mut explored = Vec::new();
        for strategy in Strategy::ALL {
            let err = solve(strategy, &start, &config).unwrap_err();
            let stats = err.statistics().cloned().unwrap();
            assert!(stats.states_explored > 1);
            explored.push(stats.states_explored);
        }
        // BFS and DFS expand each distinct state exactly once.
        assert_eq!(explored[0], explored[1]);
    }

    #[test]
    fn test_solving_from_a_mid_game_state_restarts_costs() {
        let start = state(2, &[&[1, 2], &[2, 1], &[]]);
        let config = PuzzleConfig::from_state(&start);
        let midway = start.apply_move(0, 2).unwrap();
        assert_eq!(midway.g(), 1);
        let solution = solve(Strategy::AStar, &midway, &config).unwrap();
        assert_eq!(solution.states[0].g(), 0);
        assert_valid_path(&solution, &config);
    }

    #[test]
    fn test_strategies_agree_on_generated_puzzles() {
        for seed in 0..6 {
            let start = new_puzzle_with_seed(5, 3, 3, seed).unwrap();
            let config = PuzzleConfig::new(5, 3, 3).unwrap();
            let results = solve_all(&start, &config);
            match &results[0].1 {
                Ok(bfs) => {
                    assert_valid_path(bfs, &config);
                    let dfs = results[1].1.as_ref().unwrap();
                    let a_star = results[2].1.as_ref().unwrap();
                    assert_valid_path(dfs, &config);
                    assert_valid_path(a_star, &config);
                    assert!(bfs.len() <= dfs.len(), "seed {}", seed);
                    assert_eq!(bfs.len(), a_star.len(), "seed {}", seed);
                }
                Err(_) => {
                    assert!(results.iter().all(|(_, r)| r.is_err()), "seed {}", seed);
                }
            }
        }
    }

    #[test]
    fn test_rerun_yields_same_length() {
        let start = new_puzzle_with_seed(5, 3, 3, 42).unwrap();
        let config = PuzzleConfig::new(5, 3, 3).unwrap();
        for strategy in Strategy::ALL {
            let first = solve(strategy, &start, &config).map(|s| s.len()).ok();
            let second = solve(strategy, &start, &config).map(|s| s.len()).ok();
            assert_eq!(first, second, "{}", strategy);
        }
    }

    #[test]
    fn test_cancel_flag_stops_the_run() {
        let start = new_puzzle_with_seed(6, 4, 4, 3).unwrap();
        let config = PuzzleConfig::new(6, 4, 4).unwrap();
        let flag = AtomicBool::new(true);
        let mut options = SolveOptions::default().with_cancel_flag(&flag);
        match solve_with_options(Strategy::Dfs, &start, &config, &mut options) {
            Err(SolveError::Cancelled { stats }) => assert_eq!(stats.states_explored, 0),
            other => panic!("expected cancellation, got {:?}", other),
        }
    }

    #[test]
    fn test_cancel_flag_raised_mid_run() {
        let start = new_puzzle_with_seed(6, 4, 4, 3).unwrap();
        let config = PuzzleConfig::new(6, 4, 4).unwrap();
        let flag = AtomicBool::new(false);
        let mut options = SolveOptions::default()
            .with_progress(1, |p: &Progress| {
                if p.states_explored == 5 {
                    flag.store(true, atomic::Ordering::Relaxed);
                }
            })
            .with_cancel_flag(&flag);
        match solve_with_options(Strategy::Dfs, &start, &config, &mut options) {
            Err(SolveError::Cancelled { stats }) => {
                assert_eq!(stats.states_explored, 5);
                assert!(stats.peak_frontier >= 1);
                assert!(!stats.is_solved());
            }
            other => panic!("expected cancellation, got {:?}", other),
        }
    }

    #[test]
    fn test_solve_all_with_options_reports_every_strategy() {
        let start = state(2, &[&[1, 2], &[2, 1], &[]]);
        let config = PuzzleConfig::from_state(&start);
        let mut seen = Vec::new();
        let results = {
            let mut options =
                SolveOptions::default().with_progress(1, |p: &Progress| seen.push(p.strategy));
            solve_all_with_options(&start, &config, &mut options)
        };
        assert!(results.iter().all(|(_, r)| r.is_ok()));
        for strategy in Strategy::ALL {
            assert!(seen.contains(&strategy), "no progress from {}", strategy);
        }
    }

    #[test]
    fn test_progress_callback_cadence() {
        let start = state(2, &[&[1, 2], &[2, 1], &[]]);
        let config = PuzzleConfig::from_state(&start);
        let mut reports = Vec::new();
        let explored = {
            let mut options =
                SolveOptions::default().with_progress(2, |p: &Progress| reports.push(*p));
            solve_with_options(Strategy::Bfs, &start, &config, &mut options)
                .unwrap()
                .stats
                .states_explored
        };
        assert_eq!(reports.len(), explored / 2);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.states_explored, (i + 1) * 2);
            assert_eq!(report.strategy, Strategy::Bfs);
            assert!(report.frontier_len >= 1);
        }
    }

    #[test]
    fn test_open_entry_ordering() {
        let mut heap = BinaryHeap::new();
        heap.push(OpenEntry { f: 5, h: 1, id: 0 });
        heap.push(OpenEntry { f: 4, h: 3, id: 1 });
        heap.push(OpenEntry { f: 4, h: 2, id: 2 });
        heap.push(OpenEntry { f: 4, h: 2, id: 3 });
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|e| e.id)).collect();
        assert_eq!(order, vec![2, 3, 1, 0]);
    }

    #[test]
    fn test_statistics_display() {
        let stats = SearchStatistics {
            strategy: Strategy::AStar,
            states_explored: 12,
            peak_frontier: 5,
            duration: Duration::from_millis(3),
            path_length: None,
        };
        let text = stats.to_string();
        assert!(text.contains("A*"));
        assert!(text.contains("States explored: 12"));
        assert!(text.contains("no solution"));
    }

    #[test]
    fn test_strategy_parses_from_command_line_names() {
        assert_eq!(Strategy::from_str("bfs", true).unwrap(), Strategy::Bfs);
        assert_eq!(Strategy::from_str("dfs", true).unwrap(), Strategy::Dfs);
        assert_eq!(Strategy::from_str("a-star", true).unwrap(), Strategy::AStar);
    }

    fn puzzle_params() -> impl ValueStrategy<Value = (usize, usize, usize, u64)> {
        (1usize..=5).prop_flat_map(|n| (Just(n), 1usize..=n.min(3), 1usize..=3, any::<u64>()))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn bfs_and_a_star_agree_and_bound_dfs((n, k, m, seed) in puzzle_params()) {
            let start = new_puzzle_with_seed(n, k, m, seed).unwrap();
            let config = PuzzleConfig::new(n, k, m).unwrap();
            let results = solve_all(&start, &config);
            let lengths: Vec<Option<usize>> =
                results.iter().map(|(_, r)| r.as_ref().ok().map(Solution::len)).collect();
            match lengths[0] {
                Some(bfs) => {
                    prop_assert_eq!(lengths[2], Some(bfs));
                    prop_assert!(lengths[1].is_some_and(|dfs| dfs >= bfs));
                }
                None => prop_assert!(lengths.iter().all(Option::is_none)),
            }
        }
    }
}
