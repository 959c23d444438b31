// Screen-space layout of the board, the mapping between client pixels and cells
use crate::model::Cell;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    /// Top-left corner of cell (0, 0), padding already applied.
    pub origin_x: f64,
    pub origin_y: f64,
    pub cell_size: f64,
    /// Spacing between neighbouring cells.
    pub gap: f64,
    pub rows: usize,
    pub cols: usize,
}

impl Geometry {
    /// Lays out `cols` square cells across a container of `width` pixels.
    pub fn fit(left: f64, top: f64, width: f64, rows: usize, cols: usize, gap: f64, pad: f64) -> Option<Self> {
        if cols == 0 || rows == 0 {
            return None;
        }
        let inner = width - pad * 2.0;
        let cell_size = (inner - gap * (cols as f64 - 1.0)) / cols as f64;
        let g = Self {
            origin_x: left + pad,
            origin_y: top + pad,
            cell_size,
            gap,
            rows,
            cols,
        };
        g.is_valid().then_some(g)
    }

    /// Same layout with its origin moved by `(dx, dy)`.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            origin_x: self.origin_x + dx,
            origin_y: self.origin_y + dy,
            ..self
        }
    }

    pub fn is_valid(&self) -> bool {
        self.rows > 0
            && self.cols > 0
            && self.cell_size.is_finite()
            && self.cell_size > 0.0
            && self.gap.is_finite()
            && self.gap >= 0.0
            && self.origin_x.is_finite()
            && self.origin_y.is_finite()
    }

    pub fn pitch(&self) -> f64 {
        self.cell_size + self.gap
    }

    pub fn width(&self) -> f64 {
        self.cols as f64 * self.pitch() - self.gap
    }

    pub fn height(&self) -> f64 {
        self.rows as f64 * self.pitch() - self.gap
    }

    pub fn cell_origin(&self, cell: Cell) -> (f64, f64) {
        (
            self.origin_x + cell.col as f64 * self.pitch(),
            self.origin_y + cell.row as f64 * self.pitch(),
        )
    }

    pub fn cell_center(&self, cell: Cell) -> (f64, f64) {
        let (x, y) = self.cell_origin(cell);
        let half = self.cell_size / 2.0;
        (x + half, y + half)
    }

    /// Cell under a point; `None` outside the grid box or for invalid geometry.
    pub fn cell_at(&self, x: f64, y: f64) -> Option<Cell> {
        if !self.is_valid() || !x.is_finite() || !y.is_finite() {
            return None;
        }
        let (dx, dy) = (x - self.origin_x, y - self.origin_y);
        if dx < 0.0 || dy < 0.0 || dx > self.width() || dy > self.height() {
            return None;
        }
        let col = (dx / self.pitch()).floor() as usize;
        let row = (dy / self.pitch()).floor() as usize;
        (row < self.rows && col < self.cols).then_some(Cell::new(row, col))
    }
}

/// Source of the current layout, queried before each gesture decision.
/// `None` means the board surface is not laid out yet.
pub trait GeometryProvider {
    fn geometry(&self) -> Option<Geometry>;
}

impl GeometryProvider for Geometry {
    fn geometry(&self) -> Option<Geometry> {
        self.is_valid().then_some(*self)
    }
}

impl GeometryProvider for Option<Geometry> {
    fn geometry(&self) -> Option<Geometry> {
        self.and_then(|g| g.geometry())
    }
}
