//! Core data models for the match-three board.
//! The grid is stored row-major; a cell is only ever empty while a cascade step
//! is clearing and refilling it.

use rand::Rng;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// Von Neumann adjacency: exactly one step up, down, left or right.
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Index into the active [`Palette`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub u8);

/// Cells cleared together by one detection pass.
pub type MatchSet = BTreeSet<Cell>;

/// A drag resolved to a pair of neighbouring cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapProposal {
    pub from: Cell,
    pub to: Cell,
}

pub const DEFAULT_PALETTE: [&str; 4] = ["#e91e63", "#4caf50", "#2196f3", "#ff9800"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Palette {
    pub fn new(colors: Vec<String>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::Validation("palette is empty".into()));
        }
        if colors.len() > u8::MAX as usize {
            return Err(ConfigError::Validation(format!(
                "palette has {} colors, at most {} allowed",
                colors.len(),
                u8::MAX
            )));
        }
        Ok(Self { colors })
    }

    /// CSS color for a tile; unknown indices fall back to the first entry.
    pub fn css(&self, color: Color) -> &str {
        self.colors
            .get(color.0 as usize)
            .unwrap_or(&self.colors[0])
            .as_str()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Color {
        Color(rng.gen_range(0..self.colors.len()) as u8)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cells; length = rows * cols.
    cells: Vec<Option<Color>>,
}

impl Board {
    /// Fills the grid top-to-bottom, left-to-right so that no cell completes a
    /// run of three with the two cells above it or the two cells to its left.
    /// A cell gets at most `max_resample` draws; the last one is kept even if
    /// it forms a run, which only happens with palettes under three colors.
    pub fn generate<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        palette: &Palette,
        rng: &mut R,
        max_resample: u32,
    ) -> Self {
        let mut board = Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        };
        let attempts = max_resample.max(1);
        for r in 0..rows {
            for c in 0..cols {
                let mut color = palette.sample(rng);
                let mut tries = 1;
                while tries < attempts && board.completes_run(r, c, color) {
                    color = palette.sample(rng);
                    tries += 1;
                }
                board.cells[r * cols + c] = Some(color);
            }
        }
        board
    }

    fn completes_run(&self, r: usize, c: usize, color: Color) -> bool {
        let same = |rr: usize, cc: usize| self.cells[rr * self.cols + cc] == Some(color);
        (r >= 2 && same(r - 1, c) && same(r - 2, c)) || (c >= 2 && same(r, c - 1) && same(r, c - 2))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    fn idx(&self, cell: Cell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// `None` for empty or out-of-range cells.
    pub fn get(&self, cell: Cell) -> Option<Color> {
        if !self.in_bounds(cell) {
            return None;
        }
        self.cells[self.idx(cell)]
    }

    pub fn set(&mut self, cell: Cell, color: Option<Color>) {
        if self.in_bounds(cell) {
            let i = self.idx(cell);
            self.cells[i] = color;
        }
    }

    /// Exchanges two cells in place. Callers validate bounds and adjacency.
    pub fn swap(&mut self, a: Cell, b: Cell) {
        let (ia, ib) = (self.idx(a), self.idx(b));
        self.cells.swap(ia, ib);
    }

    #[cfg(test)]
    pub(crate) fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Drops every filled cell of `col` to the bottom, keeping their order.
    /// Returns how many empty slots are left at the top.
    pub fn apply_gravity(&mut self, col: usize) -> usize {
        let mut write = self.rows;
        for r in (0..self.rows).rev() {
            let i = r * self.cols + col;
            if let Some(color) = self.cells[i] {
                write -= 1;
                self.cells[i] = None;
                self.cells[write * self.cols + col] = Some(color);
            }
        }
        write
    }

    /// Gravity, then fresh random colors for the vacated top cells. Refills
    /// are not checked for runs; a refill may start the next cascade step.
    pub fn compact_column<R: Rng + ?Sized>(&mut self, col: usize, palette: &Palette, rng: &mut R) {
        let empty = self.apply_gravity(col);
        for r in 0..empty {
            self.cells[r * self.cols + col] = Some(palette.sample(rng));
        }
    }

    /// Builds a board from rows of letters, `A` = color 0 and `.` = empty.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        let cells = rows
            .iter()
            .flat_map(|r| {
                assert_eq!(r.len(), cols, "ragged test board");
                r.bytes().map(|b| match b {
                    b'.' => None,
                    b => Some(Color(b - b'A')),
                })
            })
            .collect();
        Self {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    #[cfg(test)]
    pub(crate) fn column(&self, col: usize) -> Vec<Option<Color>> {
        (0..self.rows).map(|r| self.cells[r * self.cols + col]).collect()
    }
}
