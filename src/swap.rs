use crate::error::SwapError;
use crate::matcher::find_matches;
use crate::model::{Board, Cell, MatchSet};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SwapOutcome {
    /// The swap stays; these cells go to the cascade.
    Accepted(MatchSet),
    /// Nothing matched and the swap was undone.
    Rejected,
}

/// Tries a swap between two neighbouring cells. Invalid proposals return an
/// error before the board is touched; a swap that creates no run is reverted.
pub fn attempt_swap(board: &mut Board, a: Cell, b: Cell) -> Result<SwapOutcome, SwapError> {
    for cell in [a, b] {
        if !board.in_bounds(cell) {
            return Err(SwapError::OutOfBounds(cell));
        }
    }
    if !a.is_adjacent(b) {
        return Err(SwapError::NotAdjacent { a, b });
    }
    board.swap(a, b);
    let matches = find_matches(board);
    if matches.is_empty() {
        board.swap(a, b);
        return Ok(SwapOutcome::Rejected);
    }
    Ok(SwapOutcome::Accepted(matches))
}
