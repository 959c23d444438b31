use crate::model::{Board, Cell, MatchSet};

/// Every cell that belongs to a horizontal or vertical run of three or more
/// equal, non-empty tiles. Runs are collected in full, and a cell shared by a
/// row run and a column run is reported once.
pub fn find_matches(board: &Board) -> MatchSet {
    let mut matches = MatchSet::new();
    for r in 0..board.rows() {
        collect_runs(board.cols(), |c| Cell::new(r, c), board, &mut matches);
    }
    for c in 0..board.cols() {
        collect_runs(board.rows(), |r| Cell::new(r, c), board, &mut matches);
    }
    matches
}

// Walks one line of `len` cells and records each maximal run of length >= 3.
fn collect_runs(len: usize, at: impl Fn(usize) -> Cell, board: &Board, out: &mut MatchSet) {
    let mut start = 0;
    while start < len {
        let color = board.get(at(start));
        let mut end = start + 1;
        while end < len && board.get(at(end)) == color {
            end += 1;
        }
        if color.is_some() && end - start >= 3 {
            out.extend((start..end).map(&at));
        }
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(list: &[(usize, usize)]) -> MatchSet {
        list.iter().map(|&(r, c)| Cell::new(r, c)).collect()
    }

    #[test]
    fn test_run_of_four_reported_in_full() {
        let board = Board::from_rows(&["AAAAB"]);
        assert_eq!(find_matches(&board), cells(&[(0, 0), (0, 1), (0, 2), (0, 3)]));
    }

    #[test]
    fn test_run_of_five_vertical() {
        let board = Board::from_rows(&["AB", "AC", "AB", "AC", "AB"]);
        assert_eq!(find_matches(&board).len(), 5);
    }

    #[test]
    fn test_pairs_do_not_match() {
        let board = Board::from_rows(&["AABBA", "BBAAB", "AABBA"]);
        assert!(find_matches(&board).is_empty());
    }

    #[test]
    fn test_cross_counts_shared_cell_once() {
        let board = Board::from_rows(&["BAB", "AAA", "BAB"]);
        assert_eq!(
            find_matches(&board),
            cells(&[(0, 1), (1, 0), (1, 1), (1, 2), (2, 1)])
        );
    }

    #[test]
    fn test_empty_cells_never_match() {
        let board = Board::from_rows(&["...", "ABA", "..."]);
        assert!(find_matches(&board).is_empty());
    }

    #[test]
    fn test_two_runs_in_one_row() {
        let board = Board::from_rows(&["AAABBBA"]);
        assert_eq!(find_matches(&board).len(), 6);
    }
}
