//! Clear → gravity/refill → re-detect, repeated until the board is stable.
//!
//! [`Cascade::step`] runs exactly one iteration so the browser can pace steps
//! with a timer; [`resolve`] is the plain loop used when no pacing is wanted.

use rand::Rng;

use crate::matcher::find_matches;
use crate::model::{Board, Cell, Color, MatchSet, Palette};

pub const POINTS_PER_TILE: u32 = 10;

/// Receives the outward reports of a cascade. Only `on_score_delta` is
/// required; effects and render hooks are advisory.
pub trait CascadeObserver {
    fn on_score_delta(&mut self, points: u32);

    fn on_match_cleared(&mut self, _cleared: &[(Cell, Color)]) {}

    /// Called once the board has been compacted and refilled.
    fn on_settled(&mut self, _board: &Board, _highlighted: &MatchSet) {}
}

/// Suspension between two cascade iterations.
pub trait Pacing {
    fn pause(&mut self);
}

/// Headless pacing: steps run back to back.
pub struct NoPacing;

impl Pacing for NoPacing {
    fn pause(&mut self) {}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeStep {
    /// 0 for the matches produced by the swap itself.
    pub depth: u32,
    pub points: u32,
    pub cleared: MatchSet,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CascadeSummary {
    pub steps: u32,
    pub points: u64,
    /// Cells cleared by the final step.
    pub last_cleared: MatchSet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cascade {
    pending: MatchSet,
    depth: u32,
}

impl Cascade {
    pub fn new(matches: MatchSet) -> Self {
        Self {
            pending: matches,
            depth: 0,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn step<R: Rng + ?Sized>(
        &mut self,
        board: &mut Board,
        palette: &Palette,
        rng: &mut R,
        observer: &mut dyn CascadeObserver,
    ) -> Option<CascadeStep> {
        if self.pending.is_empty() {
            return None;
        }
        let matches = std::mem::take(&mut self.pending);
        let points = POINTS_PER_TILE * matches.len() as u32;
        observer.on_score_delta(points);
        let cleared: Vec<(Cell, Color)> = matches
            .iter()
            .filter_map(|&cell| board.get(cell).map(|color| (cell, color)))
            .collect();
        observer.on_match_cleared(&cleared);

        for &cell in &matches {
            board.set(cell, None);
        }
        for col in 0..board.cols() {
            board.compact_column(col, palette, rng);
        }
        observer.on_settled(board, &matches);

        self.pending = find_matches(board);
        let step = CascadeStep {
            depth: self.depth,
            points,
            cleared: matches,
        };
        self.depth += 1;
        Some(step)
    }
}

/// Runs a cascade to completion, pausing between iterations. Returns only
/// once the board holds no run; there is no iteration cap.
pub fn resolve<R: Rng + ?Sized>(
    board: &mut Board,
    matches: MatchSet,
    palette: &Palette,
    rng: &mut R,
    observer: &mut dyn CascadeObserver,
    pacing: &mut dyn Pacing,
) -> CascadeSummary {
    let mut cascade = Cascade::new(matches);
    let mut summary = CascadeSummary::default();
    while let Some(step) = cascade.step(board, palette, rng, observer) {
        summary.steps += 1;
        summary.points += step.points as u64;
        summary.last_cleared = step.cleared;
        if cascade.is_settled() {
            break;
        }
        pacing.pause();
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[derive(Default)]
    struct Recorder {
        deltas: Vec<u32>,
        cleared: usize,
        settled: usize,
    }

    impl CascadeObserver for Recorder {
        fn on_score_delta(&mut self, points: u32) {
            self.deltas.push(points);
        }

        fn on_match_cleared(&mut self, cleared: &[(Cell, Color)]) {
            self.cleared += cleared.len();
        }

        fn on_settled(&mut self, board: &Board, _highlighted: &MatchSet) {
            assert!(board.is_full());
            self.settled += 1;
        }
    }

    struct CountingPacing(u32);

    impl Pacing for CountingPacing {
        fn pause(&mut self) {
            self.0 += 1;
        }
    }

    #[test]
    fn test_five_cells_score_fifty() {
        let mut board = Board::from_rows(&["AAAAA", "BCDBC", "CDBCD"]);
        let matches = find_matches(&board);
        assert_eq!(matches.len(), 5);
        let mut rng = SmallRng::seed_from_u64(11);
        let mut rec = Recorder::default();
        let mut cascade = Cascade::new(matches);
        let step = cascade
            .step(&mut board, &Palette::default(), &mut rng, &mut rec)
            .unwrap();
        assert_eq!(step.points, 50);
        assert_eq!(step.depth, 0);
        assert_eq!(rec.deltas[0], 50);
        assert_eq!(rec.cleared, 5);
        assert_eq!(rec.settled, 1);
        assert!(board.is_full());
    }

    #[test]
    fn test_cleared_column_drops_tiles() {
        // Clearing the vertical run in column 0 refills rows 0..3 and keeps
        // the bottom tile in place.
        let mut board = Board::from_rows(&["AB", "AC", "AB", "DC"]);
        let mut rng = SmallRng::seed_from_u64(5);
        let mut cascade = Cascade::new(find_matches(&board));
        cascade
            .step(&mut board, &Palette::default(), &mut rng, &mut Recorder::default())
            .unwrap();
        assert_eq!(board.get(Cell::new(3, 0)), Some(Color(3)));
        assert_eq!(board.column(1), Board::from_rows(&["AB", "AC", "AB", "DC"]).column(1));
    }

    #[test]
    fn test_resolve_leaves_stable_board() {
        let pal = Palette::default();
        for seed in 0..100 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut board = Board::generate(10, 10, &pal, &mut rng, 100);
            // Force a run into the top row.
            for c in 0..3 {
                board.set(Cell::new(0, c), Some(Color(0)));
            }
            let matches = find_matches(&board);
            assert!(matches.len() >= 3);
            let mut rec = Recorder::default();
            let mut pacing = CountingPacing(0);
            let summary = resolve(&mut board, matches, &pal, &mut rng, &mut rec, &mut pacing);
            assert!(find_matches(&board).is_empty());
            assert!(board.is_full());
            assert!(summary.steps >= 1);
            assert_eq!(summary.steps as usize, rec.deltas.len());
            assert_eq!(pacing.0, summary.steps - 1);
            assert_eq!(summary.points, rec.deltas.iter().map(|&d| d as u64).sum::<u64>());
        }
    }

    #[test]
    fn test_empty_match_set_is_noop() {
        let mut board = Board::from_rows(&["AB", "BA"]);
        let before = board.clone();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut rec = Recorder::default();
        let summary = resolve(
            &mut board,
            MatchSet::new(),
            &Palette::default(),
            &mut rng,
            &mut rec,
            &mut NoPacing,
        );
        assert_eq!(summary, CascadeSummary::default());
        assert!(rec.deltas.is_empty());
        assert_eq!(board, before);
    }
}
