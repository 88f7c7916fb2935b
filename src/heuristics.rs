use crate::engine::{Container, PuzzleState};
use std::collections::HashSet;

/// Calculates the number of unique colors currently present in a state.
///
/// Empty containers contribute nothing.
///
/// # Arguments
/// * `state`: A reference to the `PuzzleState` to analyze.
///
/// # Returns
/// The count of distinct colors as `usize`.
pub fn count_unique_colors(state: &PuzzleState) -> usize {
    state
        .containers()
        .iter()
        .flat_map(|c| c.units())
        .collect::<HashSet<_>>()
        .len()
}

/// Sums the internal color boundaries of every container.
///
/// A boundary is a pair of adjacent units with different colors. Every boundary has to be
/// removed by at least one future pour before the puzzle can be solved.
pub fn total_color_boundaries(containers: &[Container]) -> usize {
    containers
        .iter()
        .filter(|c| !c.is_empty())
        .map(Container::color_boundaries)
        .sum()
}

/// Admissible lower bound on the number of pours still needed.
///
/// Half the total boundary count, rounded down. A pour removes at most one boundary from
/// its source and never creates one at its destination, so the estimate never exceeds
/// the true remaining move count. The bound is weak, which is acceptable for the small
/// state spaces this solver targets.
///
/// # Examples
/// ```
/// use water_sort_solver::engine::PuzzleState;
/// use water_sort_solver::heuristics::estimate_remaining_moves;
///
/// let state = PuzzleState::from_ids(4, &[&[1, 2, 1, 2], &[2, 1], &[]]).unwrap();
/// // 3 + 1 boundaries
/// assert_eq!(estimate_remaining_moves(state.containers()), 2);
/// ```
pub fn estimate_remaining_moves(containers: &[Container]) -> u32 {
    (total_color_boundaries(containers) / 2) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(capacity: usize, containers: &[&[u8]]) -> PuzzleState {
        PuzzleState::from_ids(capacity, containers).unwrap()
    }

    #[test]
    fn test_count_unique_colors() {
        assert_eq!(count_unique_colors(&state(2, &[&[], &[]])), 0);
        assert_eq!(count_unique_colors(&state(3, &[&[1, 2, 1], &[3], &[]])), 3);
        assert_eq!(count_unique_colors(&state(2, &[&[4, 4], &[4]])), 1);
    }

    #[test]
    fn test_heuristic_calculation() {
        assert_eq!(
            estimate_remaining_moves(state(2, &[&[1, 1], &[2, 2], &[]]).containers()),
            0,
            "Solved state"
        );
        assert_eq!(
            estimate_remaining_moves(state(2, &[&[1, 2], &[2, 1], &[]]).containers()),
            1,
            "Two boundaries"
        );
        assert_eq!(
            estimate_remaining_moves(state(4, &[&[1, 2, 3, 4]]).containers()),
            1,
            "Three boundaries round down"
        );
        assert_eq!(
            estimate_remaining_moves(state(4, &[&[1, 1, 2, 2], &[3]]).containers()),
            0,
            "Single boundary rounds down to zero"
        );
    }

    #[test]
    fn test_heuristic_is_stored_on_new_states() {
        let s = state(2, &[&[1, 2], &[2, 1], &[]]);
        assert_eq!(s.h(), 1);
        for next in s.successors() {
            assert_eq!(next.h(), estimate_remaining_moves(next.containers()));
        }
    }

    #[test]
    fn test_pour_removes_at_most_one_boundary() {
        let s = state(4, &[&[1, 2, 3, 1], &[2, 3, 3], &[1, 2], &[], &[3, 2, 1]]);
        let before = total_color_boundaries(s.containers());
        for next in s.successors() {
            let after = total_color_boundaries(next.containers());
            assert!(after <= before, "a pour must not add boundaries");
            assert!(before - after <= 1, "a pour removes at most one boundary");
        }
    }
}
