use std::fs;
use std::path::Path;

use crate::engine::{Color, Container, PuzzleState};

/// Parses an array of string slices into a `PuzzleState`.
///
/// Each string slice describes one container, listing its units from the bottom up as
/// decimal color ids separated by whitespace or commas. A row consisting of `.` or `-`
/// is an empty container. Blank rows and rows starting with `#` are skipped.
///
/// # Arguments
/// * `rows`: A slice of string slices (`&[&str]`), one per container, first container first.
/// * `capacity`: The capacity shared by every container. When `None`, the length of the
///   longest row is used.
///
/// # Returns
/// * `Ok(PuzzleState)` if parsing is successful. The state is a root (no move, `g = 0`).
/// * `Err(String)` if:
///     - A token is not a color id in `1..=255`, or is `0`.
///     - A row holds more units than the capacity.
///     - No container rows were found, or the inferred capacity is zero.
///
/// # Examples
/// ```
/// use water_sort_solver::utils::puzzle_from_str_array;
///
/// let rows = [
///     "# two colors, one spare",
///     "1 2",
///     "2,1",
///     ".",
/// ];
/// let state = puzzle_from_str_array(&rows, None).unwrap();
/// assert_eq!(state.len(), 3);
/// assert_eq!(state.container(0).unwrap().capacity(), 2);
/// assert_eq!(state.empty_count(), 1);
///
/// assert!(puzzle_from_str_array(&["1 x"], None).is_err());
/// assert!(puzzle_from_str_array(&["1 1 1"], Some(2)).is_err());
/// ```
pub fn puzzle_from_str_array(
    rows: &[&str],
    capacity: Option<usize>,
) -> Result<PuzzleState, String> {
    let mut parsed: Vec<Vec<Color>> = Vec::new();

    for (line, row) in rows.iter().enumerate() {
        let row = row.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }
        if row == "." || row == "-" {
            parsed.push(Vec::new());
            continue;
        }

        let mut units = Vec::new();
        for token in row.split(|c: char| c.is_whitespace() || c == ',') {
            if token.is_empty() {
                continue;
            }
            let color = token
                .parse::<u8>()
                .ok()
                .and_then(Color::new)
                .ok_or_else(|| {
                    format!(
                        "Unrecognized color '{}' on line {}; expected an id in 1..=255",
                        token,
                        line + 1
                    )
                })?;
            units.push(color);
        }
        parsed.push(units);
    }

    if parsed.is_empty() {
        return Err("No containers found".to_string());
    }

    let longest = parsed.iter().map(Vec::len).max().unwrap_or(0);
    let capacity = capacity.unwrap_or(longest);
    if capacity == 0 {
        return Err("Container capacity must be at least 1".to_string());
    }

    if let Some((index, units)) = parsed.iter().enumerate().find(|(_, u)| u.len() > capacity) {
        return Err(format!(
            "Container {} is too long. Expected at most {} units, found {}",
            index + 1,
            capacity,
            units.len()
        ));
    }

    Ok(PuzzleState::new(
        parsed
            .into_iter()
            .map(|units| Container::with_units(capacity, units))
            .collect(),
    ))
}

/// Reads a puzzle file in the format accepted by [`puzzle_from_str_array`].
pub fn puzzle_from_file(path: &Path, capacity: Option<usize>) -> Result<PuzzleState, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let rows: Vec<&str> = content.lines().collect();
    puzzle_from_str_array(&rows, capacity)
        .map_err(|e| format!("Invalid puzzle in {}: {}", path.display(), e))
}
