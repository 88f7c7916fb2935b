//! Core puzzle model for the water sort game.
//!
//! This module defines the game's fundamental components:
//! - `Color`: a non-zero liquid color identifier.
//! - `Container`: a capacity-bounded stack of colored units (the "tube").
//! - `PuzzleState`: an immutable snapshot of all containers plus move and cost metadata,
//!   which is the node type of the search graph.
//! - The transition generator (`PuzzleState::successors`), the single-move
//!   `PuzzleState::apply_move` used for manual play, and the goal test.
//! - Random puzzle generation (`new_puzzle`, `new_puzzle_with_seed`).
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::num::NonZeroU8;

use crate::config::PuzzleConfig;
use crate::error::{MoveRejection, SolveError};
use crate::heuristics;

/// Display table: (name, label, ANSI background code).
const COLOR_TABLE: [(&str, char, &str); 11] = [
    ("red", 'R', "41"),
    ("green", 'G', "42"),
    ("blue", 'B', "44"),
    ("yellow", 'Y', "43"),
    ("purple", 'P', "45"),
    ("cyan", 'C', "46"),
    ("orange", 'O', "48;5;208"),
    ("gray", 'A', "48;5;245"),
    ("pink", 'K', "48;5;218"),
    ("mint", 'M', "48;5;121"),
    ("lavender", 'L', "48;5;183"),
];

/// A liquid color. Identifier `0` means "no liquid" and can never be a `Color`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(NonZeroU8);

impl Color {
    /// Creates a color from its identifier, or `None` for the reserved identifier `0`.
    ///
    /// # Examples
    /// ```
    /// use water_sort_solver::engine::Color;
    /// assert!(Color::new(0).is_none());
    /// assert_eq!(Color::new(3).unwrap().id(), 3);
    /// ```
    pub fn new(id: u8) -> Option<Self> {
        NonZeroU8::new(id).map(Color)
    }

    pub fn id(&self) -> u8 {
        self.0.get()
    }

    fn table_entry(&self) -> (&'static str, char, &'static str) {
        COLOR_TABLE[(self.id() as usize - 1) % COLOR_TABLE.len()]
    }

    /// Human-readable name. Identifiers past the table wrap around.
    pub fn name(&self) -> &'static str {
        self.table_entry().0
    }

    /// Single-character label used in terminal rendering.
    pub fn to_char(&self) -> char {
        self.table_entry().1
    }

    fn to_ansi_color_code(&self) -> &'static str {
        self.table_entry().2
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A fixed-capacity stack of colored units, stored bottom to top.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Container {
    units: Vec<Color>,
    capacity: usize,
}

impl Container {
    /// Creates an empty container.
    pub fn new(capacity: usize) -> Self {
        Container {
            units: Vec::new(),
            capacity,
        }
    }

    /// Creates a container holding `units` (bottom to top).
    ///
    /// No capacity check is made, so this can build an over-capacity container for
    /// diagnostics. See [`Container::is_over_capacity`].
    pub fn with_units(capacity: usize, units: Vec<Color>) -> Self {
        Container { units, capacity }
    }

    /// Creates a container from raw color identifiers. Returns `None` if any identifier is `0`.
    pub fn from_ids(capacity: usize, ids: &[u8]) -> Option<Self> {
        let units = ids.iter().map(|&id| Color::new(id)).collect::<Option<Vec<_>>>()?;
        Some(Container::with_units(capacity, units))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn units(&self) -> &[Color] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.units.len() >= self.capacity
    }

    pub fn free_space(&self) -> usize {
        self.capacity.saturating_sub(self.units.len())
    }

    pub fn top_color(&self) -> Option<Color> {
        self.units.last().copied()
    }

    /// Length of the run of equal color at the top. Zero only for an empty container.
    pub fn top_segment_size(&self) -> usize {
        match self.top_color() {
            None => 0,
            Some(top) => self.units.iter().rev().take_while(|&&c| c == top).count(),
        }
    }

    /// True if `color` may be poured in: the container is empty, or it has room and its
    /// top color matches.
    pub fn can_accept(&self, color: Color) -> bool {
        if self.is_full() {
            return false;
        }
        self.is_empty() || self.top_color() == Some(color)
    }

    /// Appends `amount` units of `color`. The caller guarantees `amount <= free_space()`.
    pub fn pour_in(&mut self, color: Color, amount: usize) {
        debug_assert!(amount <= self.free_space(), "pour_in past capacity");
        self.units.extend(std::iter::repeat(color).take(amount));
    }

    /// Removes `amount` units from the top. The caller guarantees `amount <= len()`.
    pub fn pour_out(&mut self, amount: usize) {
        debug_assert!(amount <= self.units.len(), "pour_out more than held");
        let keep = self.units.len().saturating_sub(amount);
        self.units.truncate(keep);
    }

    /// True if empty or every unit shares one color.
    pub fn is_monochrome(&self) -> bool {
        match self.units.first() {
            None => true,
            Some(first) => self.units.iter().all(|c| c == first),
        }
    }

    /// Diagnostic only; the transition generator never produces such a container.
    pub fn is_over_capacity(&self) -> bool {
        self.units.len() > self.capacity
    }

    /// Number of adjacent positions whose colors differ.
    pub fn color_boundaries(&self) -> usize {
        self.units.windows(2).filter(|w| w[0] != w[1]).count()
    }
}

/// A single pour: `amount` units of `color` from container `from` into container `to`.
///
/// Indices are 0-based; `Display` shows them 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: usize,
    pub to: usize,
    pub amount: usize,
    pub color: Color,
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pour {} x {} from container {} into container {}",
            self.amount,
            self.color,
            self.from + 1,
            self.to + 1
        )
    }
}

/// A pour the transition generator refused. Only the presentation layer consumes these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RejectedMove {
    pub from: usize,
    pub to: usize,
    pub reason: MoveRejection,
}

/// Canonical serialization of the ordered container list, used for deduplication.
///
/// Each container contributes its color identifiers followed by a `0` separator, so two
/// keys are equal exactly when the container lists are equal slot for slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey(Box<[u8]>);

/// A snapshot of every container plus the move and cost that led to it.
///
/// States are never mutated once built: every pour produces a new state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleState {
    containers: Vec<Container>,
    last_move: Option<Move>,
    g: u32,
    h: u32,
}

impl PuzzleState {
    /// Creates a root state (no producing move, `g = 0`).
    pub fn new(containers: Vec<Container>) -> Self {
        let h = heuristics::estimate_remaining_moves(&containers);
        PuzzleState {
            containers,
            last_move: None,
            g: 0,
            h,
        }
    }

    /// Builds a root state from raw identifiers, one slice per container.
    /// Returns `None` if any identifier is `0`.
    ///
    /// # Examples
    /// ```
    /// use water_sort_solver::engine::PuzzleState;
    /// let state = PuzzleState::from_ids(2, &[&[1, 2], &[2, 1], &[]]).unwrap();
    /// assert_eq!(state.len(), 3);
    /// assert_eq!(state.empty_count(), 1);
    /// ```
    pub fn from_ids(capacity: usize, containers: &[&[u8]]) -> Option<Self> {
        let containers = containers
            .iter()
            .map(|ids| Container::from_ids(capacity, ids))
            .collect::<Option<Vec<_>>>()?;
        Some(PuzzleState::new(containers))
    }

    /// The same containers, re-rooted: no producing move and `g = 0`.
    pub fn as_root(&self) -> Self {
        PuzzleState::new(self.containers.clone())
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn container(&self, index: usize) -> Option<&Container> {
        self.containers.get(index)
    }

    /// Number of containers.
    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// The move that produced this state, `None` for a root.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Moves made since the root.
    pub fn g(&self) -> u32 {
        self.g
    }

    /// Heuristic estimate of the moves still needed.
    pub fn h(&self) -> u32 {
        self.h
    }

    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    pub fn key(&self) -> StateKey {
        let total: usize = self.containers.iter().map(|c| c.len() + 1).sum();
        let mut bytes = Vec::with_capacity(total);
        for container in &self.containers {
            bytes.extend(container.units().iter().map(Color::id));
            bytes.push(0);
        }
        StateKey(bytes.into_boxed_slice())
    }

    pub fn empty_count(&self) -> usize {
        self.containers.iter().filter(|c| c.is_empty()).count()
    }

    /// Total units of each color across all containers.
    pub fn color_counts(&self) -> BTreeMap<Color, usize> {
        let mut counts = BTreeMap::new();
        for color in self.containers.iter().flat_map(|c| c.units()) {
            *counts.entry(*color).or_insert(0) += 1;
        }
        counts
    }

    pub fn has_over_capacity_container(&self) -> bool {
        self.containers.iter().any(Container::is_over_capacity)
    }

    /// All legal successor states, ordered by source index then destination index.
    pub fn successors(&self) -> Vec<PuzzleState> {
        self.expand(None)
    }

    /// Legal successors plus a record of every refused (source, destination) pair.
    pub fn successors_with_rejections(&self) -> (Vec<PuzzleState>, Vec<RejectedMove>) {
        let mut rejected = Vec::new();
        let successors = self.expand(Some(&mut rejected));
        (successors, rejected)
    }

    fn expand(&self, mut rejected: Option<&mut Vec<RejectedMove>>) -> Vec<PuzzleState> {
        let mut next_states = Vec::new();
        let n = self.containers.len();

        for from in 0..n {
            let source = &self.containers[from];
            let Some(color) = source.top_color() else {
                continue;
            };
            let segment = source.top_segment_size();

            for to in 0..n {
                if from == to {
                    continue;
                }
                let destination = &self.containers[to];

                let reason = if destination.is_full() {
                    Some(MoveRejection::DestinationFull)
                } else if !destination.is_empty() && destination.top_color() != Some(color) {
                    Some(MoveRejection::ColorMismatch)
                } else {
                    None
                };

                match reason {
                    Some(reason) => {
                        if let Some(rejected) = rejected.as_deref_mut() {
                            rejected.push(RejectedMove { from, to, reason });
                        }
                    }
                    None => {
                        let amount = segment.min(destination.free_space());
                        if amount == 0 {
                            continue;
                        }
                        next_states.push(self.child(Move {
                            from,
                            to,
                            amount,
                            color,
                        }));
                    }
                }
            }
        }

        next_states
    }

    fn child(&self, mv: Move) -> PuzzleState {
        let mut containers = self.containers.clone();
        containers[mv.from].pour_out(mv.amount);
        containers[mv.to].pour_in(mv.color, mv.amount);
        let h = heuristics::estimate_remaining_moves(&containers);
        PuzzleState {
            containers,
            last_move: Some(mv),
            g: self.g + 1,
            h,
        }
    }

    /// Pours the top segment of `from` into `to` as far as it fits.
    ///
    /// # Errors
    /// `SolveError::InvalidMoveRequested` if the indices are equal or out of range, the
    /// source is empty, the destination is full, or the top colors differ. `self` is not
    /// modified either way.
    ///
    /// # Examples
    /// ```
    /// use water_sort_solver::engine::PuzzleState;
    /// let state = PuzzleState::from_ids(2, &[&[1, 2], &[2, 1], &[]]).unwrap();
    /// let next = state.apply_move(0, 2).unwrap();
    /// assert_eq!(next.container(2).unwrap().len(), 1);
    /// assert!(state.apply_move(2, 0).is_err());
    /// ```
    pub fn apply_move(&self, from: usize, to: usize) -> Result<PuzzleState, SolveError> {
        let reject = |reason| SolveError::InvalidMoveRequested { from, to, reason };

        if from == to {
            return Err(reject(MoveRejection::SameContainer));
        }
        let (Some(source), Some(destination)) = (self.container(from), self.container(to)) else {
            return Err(reject(MoveRejection::OutOfRange));
        };
        let Some(color) = source.top_color() else {
            return Err(reject(MoveRejection::SourceEmpty));
        };
        if destination.is_full() {
            return Err(reject(MoveRejection::DestinationFull));
        }
        if !destination.can_accept(color) {
            return Err(reject(MoveRejection::ColorMismatch));
        }

        let amount = source.top_segment_size().min(destination.free_space());
        Ok(self.child(Move {
            from,
            to,
            amount,
            color,
        }))
    }

    /// Containers that [`PuzzleState::apply_move`] would accept as a destination for
    /// `from`. Empty when `from` is empty or out of range.
    pub fn pour_targets(&self, from: usize) -> Vec<usize> {
        let Some(color) = self.container(from).and_then(Container::top_color) else {
            return Vec::new();
        };
        self.containers
            .iter()
            .enumerate()
            .filter(|&(to, destination)| to != from && destination.can_accept(color))
            .map(|(to, _)| to)
            .collect()
    }

    /// Win condition: every non-empty container is monochrome, no color occupies two
    /// containers, and the number of empty containers equals `initial_empty`.
    pub fn is_goal(&self, initial_empty: usize) -> bool {
        let mut seen = HashSet::new();
        for container in &self.containers {
            let Some(color) = container.top_color() else {
                continue;
            };
            if !container.is_monochrome() || !seen.insert(color) {
                return false;
            }
        }
        self.empty_count() == initial_empty
    }

    /// Plain text, one container per line in the format read by
    /// [`crate::utils::puzzle_from_str_array`].
    pub fn to_plain_string(&self) -> String {
        self.containers
            .iter()
            .map(|c| {
                if c.is_empty() {
                    ".".to_string()
                } else {
                    c.units()
                        .iter()
                        .map(|color| color.id().to_string())
                        .collect::<Vec<_>>()
                        .join(" ")
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Terminal rendering with ANSI colors, one container per line, bottom unit first.
    /// The container at `selected`, if any, is marked with `>`.
    pub fn to_string_with_highlight(&self, selected: Option<usize>) -> String {
        let mut output = String::new();
        for (i, container) in self.containers.iter().enumerate() {
            let marker = if selected == Some(i) { '>' } else { ' ' };
            output.push_str(&format!("{}{:>2} |", marker, i + 1));
            for slot in 0..container.capacity().max(container.len()) {
                match container.units().get(slot) {
                    Some(color) => output.push_str(&format!(
                        "\x1b[1;{}m {} \x1b[m",
                        color.to_ansi_color_code(),
                        color.to_char()
                    )),
                    None => output.push_str(" . "),
                }
            }
            output.push('|');
            if i + 1 < self.containers.len() {
                output.push('\n');
            }
        }
        output
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

/// Standalone form of [`PuzzleState::successors`].
pub fn legal_moves(state: &PuzzleState) -> Vec<PuzzleState> {
    state.successors()
}

/// Standalone form of [`PuzzleState::is_goal`].
pub fn is_goal(state: &PuzzleState, initial_empty: usize) -> bool {
    state.is_goal(initial_empty)
}

/// Generates a puzzle with `containers` tubes, `colors` colors and `capacity` units per tube.
///
/// The pool of `colors * capacity` units is shuffled with `rng` and poured into the first
/// `colors` containers; the rest start empty.
///
/// # Errors
/// `ConfigurationInfeasible` when `containers < colors`, `InvalidParameters` when the
/// colors do not fit in a byte identifier.
pub fn new_puzzle<R: Rng + ?Sized>(
    containers: usize,
    colors: usize,
    capacity: usize,
    rng: &mut R,
) -> Result<PuzzleState, SolveError> {
    let config = PuzzleConfig::new(containers, colors, capacity)?;
    config.check_feasibility()?;

    let mut pool: Vec<Color> = (1..=colors)
        .filter_map(|id| u8::try_from(id).ok().and_then(Color::new))
        .flat_map(|color| std::iter::repeat(color).take(capacity))
        .collect();
    pool.shuffle(rng);

    let mut chunks = pool.chunks(capacity.max(1));
    let tubes = (0..containers)
        .map(|i| match chunks.next() {
            Some(chunk) if i < colors => Container::with_units(capacity, chunk.to_vec()),
            _ => Container::new(capacity),
        })
        .collect();
    Ok(PuzzleState::new(tubes))
}

/// Reproducible variant of [`new_puzzle`]: the same seed always yields the same puzzle.
pub fn new_puzzle_with_seed(
    containers: usize,
    colors: usize,
    capacity: usize,
    seed: u64,
) -> Result<PuzzleState, SolveError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    new_puzzle(containers, colors, capacity, &mut rng)
}
