//! Puzzle configuration and the feasibility pre-check.
//!
//! The number of containers that started empty belongs to the puzzle instance, not to any
//! single state, so it travels in a [`PuzzleConfig`] passed explicitly to the goal test and
//! the search engine.

use log::debug;

use crate::engine::PuzzleState;
use crate::error::SolveError;
use crate::heuristics::count_unique_colors;

/// Colors are stored as byte identifiers with `0` reserved.
pub const MAX_COLORS: usize = u8::MAX as usize;

/// Upper bound on the number of containers; setup fields take at most three digits.
pub const MAX_CONTAINERS: usize = 999;

/// Upper bound on the units a single container holds.
pub const MAX_CAPACITY: usize = 999;

/// Upper bound on `colors * capacity`, the liquid a generated puzzle holds in total.
pub const MAX_TOTAL_UNITS: usize = 65_536;

/// Immutable description of a puzzle instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PuzzleConfig {
    containers: usize,
    colors: usize,
    capacity: usize,
    initial_empty: usize,
}

impl PuzzleConfig {
    /// Configuration of a generated puzzle: `containers` tubes of `capacity` units, `colors`
    /// of them filled, the others empty.
    ///
    /// Feasibility is not checked here; see [`PuzzleConfig::check_feasibility`].
    ///
    /// # Errors
    /// `InvalidParameters` if `capacity` is zero, or if `containers`, `colors`, `capacity`
    /// or `colors * capacity` exceed [`MAX_CONTAINERS`], [`MAX_COLORS`], [`MAX_CAPACITY`]
    /// or [`MAX_TOTAL_UNITS`].
    pub fn new(containers: usize, colors: usize, capacity: usize) -> Result<Self, SolveError> {
        if capacity == 0 {
            return Err(SolveError::InvalidParameters(
                "container capacity must be at least 1".to_string(),
            ));
        }
        if capacity > MAX_CAPACITY {
            return Err(SolveError::InvalidParameters(format!(
                "container capacity is at most {MAX_CAPACITY}, got {capacity}"
            )));
        }
        if containers > MAX_CONTAINERS {
            return Err(SolveError::InvalidParameters(format!(
                "at most {MAX_CONTAINERS} containers are supported, got {containers}"
            )));
        }
        if colors > MAX_COLORS {
            return Err(SolveError::InvalidParameters(format!(
                "at most {MAX_COLORS} colors are supported, got {colors}"
            )));
        }
        match colors.checked_mul(capacity) {
            Some(units) if units <= MAX_TOTAL_UNITS => {}
            _ => {
                return Err(SolveError::InvalidParameters(format!(
                    "{colors} colors of {capacity} units exceed {MAX_TOTAL_UNITS} units in total"
                )))
            }
        }
        Ok(PuzzleConfig {
            containers,
            colors,
            capacity,
            initial_empty: containers.saturating_sub(colors),
        })
    }

    /// Derives the configuration from a concrete initial state, e.g. one read from a file.
    ///
    /// The empty-container count is taken from `state` as it is now.
    ///
    /// # Examples
    /// ```
    /// use water_sort_solver::config::PuzzleConfig;
    /// use water_sort_solver::engine::PuzzleState;
    ///
    /// let state = PuzzleState::from_ids(2, &[&[1, 2], &[2, 1], &[]]).unwrap();
    /// let config = PuzzleConfig::from_state(&state);
    /// assert_eq!(config.containers(), 3);
    /// assert_eq!(config.colors(), 2);
    /// assert_eq!(config.initial_empty(), 1);
    /// ```
    pub fn from_state(state: &PuzzleState) -> Self {
        PuzzleConfig {
            containers: state.len(),
            colors: count_unique_colors(state),
            capacity: state
                .containers()
                .iter()
                .map(|c| c.capacity())
                .max()
                .unwrap_or(0),
            initial_empty: state.empty_count(),
        }
    }

    /// Overrides the number of containers that must end up empty.
    pub fn with_initial_empty(mut self, initial_empty: usize) -> Self {
        self.initial_empty = initial_empty;
        self
    }

    pub fn containers(&self) -> usize {
        self.containers
    }

    pub fn colors(&self) -> usize {
        self.colors
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn initial_empty(&self) -> usize {
        self.initial_empty
    }

    /// Rejects configurations that are structurally unsolvable before any search runs.
    ///
    /// With fewer containers than colors some color can never get a container of its own.
    /// Passing this check does not prove a puzzle solvable; only an exhaustive search can.
    ///
    /// # Errors
    /// `SolveError::ConfigurationInfeasible` when `containers < colors`.
    pub fn check_feasibility(&self) -> Result<(), SolveError> {
        if self.containers < self.colors {
            debug!(
                "Rejecting configuration: {} containers for {} colors",
                self.containers, self.colors
            );
            return Err(SolveError::ConfigurationInfeasible {
                containers: self.containers,
                colors: self.colors,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_counts_empty_containers() {
        let config = PuzzleConfig::new(6, 4, 4).unwrap();
        assert_eq!(config.initial_empty(), 2);
        let tight = PuzzleConfig::new(4, 4, 4).unwrap();
        assert_eq!(tight.initial_empty(), 0);
    }

    #[test]
    fn test_new_rejects_unrepresentable_parameters() {
        assert!(matches!(
            PuzzleConfig::new(3, 2, 0),
            Err(SolveError::InvalidParameters(_))
        ));
        assert!(matches!(
            PuzzleConfig::new(300, 256, 4),
            Err(SolveError::InvalidParameters(_))
        ));
        assert!(PuzzleConfig::new(300, 255, 4).is_ok());
    }

    #[test]
    fn test_new_rejects_oversized_parameters() {
        for (n, k, m) in [
            (2, 1, usize::MAX),
            (2, 1, MAX_CAPACITY + 1),
            (MAX_CONTAINERS + 1, 1, 4),
            (usize::MAX, 1, 4),
            (255, 255, 999),
        ] {
            assert!(
                matches!(
                    PuzzleConfig::new(n, k, m),
                    Err(SolveError::InvalidParameters(_))
                ),
                "n={} k={} m={}",
                n,
                k,
                m
            );
        }
        assert!(PuzzleConfig::new(MAX_CONTAINERS, 64, MAX_CAPACITY).is_ok());
    }

    #[test]
    fn test_feasibility_rejects_fewer_containers_than_colors() {
        let config = PuzzleConfig::new(1, 2, 4).unwrap();
        let err = config.check_feasibility().unwrap_err();
        assert!(err.to_string().contains("container count below color count"));
        assert_eq!(
            err,
            SolveError::ConfigurationInfeasible {
                containers: 1,
                colors: 2
            }
        );
    }

    #[test]
    fn test_feasibility_boundary() {
        for n in 0..8 {
            for k in 0..8 {
                let result = PuzzleConfig::new(n, k, 3).unwrap().check_feasibility();
                assert_eq!(result.is_ok(), n >= k, "n={} k={}", n, k);
            }
        }
    }

    #[test]
    fn test_from_state_and_override() {
        let state = PuzzleState::from_ids(3, &[&[1, 2, 3], &[3], &[], &[]]).unwrap();
        let config = PuzzleConfig::from_state(&state);
        assert_eq!(config.containers(), 4);
        assert_eq!(config.colors(), 3);
        assert_eq!(config.capacity(), 3);
        assert_eq!(config.initial_empty(), 2);
        assert_eq!(config.with_initial_empty(1).initial_empty(), 1);
        assert!(config.check_feasibility().is_ok());
    }
}
