// Drag gesture state: press → move → release, resolved to a swap proposal
use super::geometry::GeometryProvider;
use crate::model::{Cell, SwapProposal};

/// The input that owns a drag. Touches are told apart by their identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerId {
    Mouse,
    Touch(i32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSession {
    pub origin: Cell,
    pub pointer: PointerId,
    /// Offset of the dragged tile from its home center, for drawing only.
    pub offset_x: f64,
    pub offset_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GestureResolver {
    session: Option<GestureSession>,
    /// Largest visual offset, as a fraction of the cell size.
    drag_clamp: f64,
}

impl Default for GestureResolver {
    fn default() -> Self {
        Self::new(0.9)
    }
}

impl GestureResolver {
    pub fn new(drag_clamp: f64) -> Self {
        Self {
            session: None,
            drag_clamp,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn owned_by(&self, pointer: PointerId) -> bool {
        self.session.is_some_and(|s| s.pointer == pointer)
    }

    /// Starts a drag on the cell under the pointer. Ignored while another drag
    /// is active or when the point is not over the board.
    pub fn on_press_start(
        &mut self,
        provider: &dyn GeometryProvider,
        pointer: PointerId,
        x: f64,
        y: f64,
    ) -> Option<Cell> {
        if self.session.is_some() {
            return None;
        }
        let origin = provider.geometry()?.cell_at(x, y)?;
        self.session = Some(GestureSession {
            origin,
            pointer,
            offset_x: 0.0,
            offset_y: 0.0,
        });
        Some(origin)
    }

    /// Moves from any pointer other than the one that started the drag are
    /// ignored.
    pub fn on_press_move(
        &mut self,
        provider: &dyn GeometryProvider,
        pointer: PointerId,
        x: f64,
        y: f64,
    ) -> Option<(f64, f64)> {
        if !self.owned_by(pointer) {
            return None;
        }
        let geom = provider.geometry()?;
        let session = self.session.as_mut()?;
        let (cx, cy) = geom.cell_center(session.origin);
        let max = geom.cell_size * self.drag_clamp;
        session.offset_x = (x - cx).clamp(-max, max);
        session.offset_y = (y - cy).clamp(-max, max);
        Some((session.offset_x, session.offset_y))
    }

    /// Ends the drag and picks the cell whose center is nearest the release
    /// point among the origin and its in-bounds orthogonal neighbours. Ties
    /// go to the earlier candidate (origin, up, down, left, right). A release
    /// by another pointer leaves the drag running.
    pub fn on_press_end(
        &mut self,
        provider: &dyn GeometryProvider,
        pointer: PointerId,
        x: f64,
        y: f64,
    ) -> Option<SwapProposal> {
        if !self.owned_by(pointer) {
            return None;
        }
        let session = self.session.take()?;
        let geom = provider.geometry()?;
        let o = session.origin;
        let candidates = [
            Some(o),
            o.row.checked_sub(1).map(|r| Cell::new(r, o.col)),
            Some(Cell::new(o.row + 1, o.col)),
            o.col.checked_sub(1).map(|c| Cell::new(o.row, c)),
            Some(Cell::new(o.row, o.col + 1)),
        ];
        let mut best: Option<(Cell, f64)> = None;
        for cand in candidates.into_iter().flatten() {
            if cand.row >= geom.rows || cand.col >= geom.cols {
                continue;
            }
            let (cx, cy) = geom.cell_center(cand);
            let dist = (x - cx).hypot(y - cy);
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((cand, dist));
            }
        }
        let (target, _) = best?;
        if target == o || !o.is_adjacent(target) {
            return None;
        }
        Some(SwapProposal { from: o, to: target })
    }

    pub fn cancel(&mut self) {
        self.session = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Geometry;

    fn grid() -> Geometry {
        Geometry {
            origin_x: 0.0,
            origin_y: 0.0,
            cell_size: 40.0,
            gap: 2.0,
            rows: 10,
            cols: 10,
        }
    }

    const MOUSE: PointerId = PointerId::Mouse;

    fn drag(from: (f64, f64), to: (f64, f64)) -> Option<SwapProposal> {
        let mut g = GestureResolver::default();
        g.on_press_start(&grid(), MOUSE, from.0, from.1)?;
        let out = g.on_press_end(&grid(), MOUSE, to.0, to.1);
        assert!(!g.is_active());
        out
    }

    #[test]
    fn test_release_on_neighbour_center() {
        let p = drag((20.0, 20.0), (62.0, 20.0)).unwrap();
        assert_eq!(p.from, Cell::new(0, 0));
        assert_eq!(p.to, Cell::new(0, 1));
        let p = drag((104.0, 104.0), (104.0, 70.0)).unwrap();
        assert_eq!((p.from, p.to), (Cell::new(2, 2), Cell::new(1, 2)));
    }

    #[test]
    fn test_release_near_origin_is_no_swap() {
        assert_eq!(drag((20.0, 20.0), (22.0, 18.0)), None);
        assert_eq!(drag((20.0, 20.0), (39.0, 20.0)), None);
    }

    #[test]
    fn test_diagonal_release_picks_adjacent_cell() {
        // Release on the center of (1, 1): only (1, 0) and (0, 1) are
        // candidates, equally far; the downward neighbour comes first.
        let p = drag((20.0, 20.0), (62.0, 62.0)).unwrap();
        assert_eq!(p.to, Cell::new(1, 0));
        assert_eq!(p.from.manhattan(p.to), 1);
    }

    #[test]
    fn test_far_release_clamps_to_neighbour() {
        let p = drag((20.0, 20.0), (400.0, 25.0)).unwrap();
        assert_eq!(p.to, Cell::new(0, 1));
        // Off the board at the edge: the out-of-range neighbour is skipped.
        let p = drag((398.0, 398.0), (398.0, 600.0));
        assert_eq!(p, None);
    }

    #[test]
    fn test_press_outside_or_without_geometry() {
        let mut g = GestureResolver::default();
        assert_eq!(g.on_press_start(&grid(), MOUSE, -5.0, 10.0), None);
        assert_eq!(g.on_press_start(&grid(), MOUSE, 430.0, 10.0), None);
        assert_eq!(g.on_press_start(&None::<Geometry>, MOUSE, 20.0, 20.0), None);
        assert!(!g.is_active());
        assert_eq!(g.on_press_end(&grid(), MOUSE, 62.0, 20.0), None);
    }

    #[test]
    fn test_second_press_ignored_while_active() {
        let mut g = GestureResolver::default();
        assert_eq!(g.on_press_start(&grid(), MOUSE, 20.0, 20.0), Some(Cell::new(0, 0)));
        assert_eq!(g.on_press_start(&grid(), MOUSE, 104.0, 104.0), None);
        assert_eq!(g.session().unwrap().origin, Cell::new(0, 0));
        g.cancel();
        assert!(!g.is_active());
        assert_eq!(g.on_press_start(&grid(), MOUSE, 104.0, 104.0), Some(Cell::new(2, 2)));
    }

    #[test]
    fn test_move_offset_is_clamped() {
        let mut g = GestureResolver::default();
        assert_eq!(g.on_press_move(&grid(), MOUSE, 30.0, 30.0), None);
        g.on_press_start(&grid(), MOUSE, 104.0, 104.0);
        assert_eq!(g.on_press_move(&grid(), MOUSE, 114.0, 94.0), Some((10.0, -10.0)));
        assert_eq!(g.on_press_move(&grid(), MOUSE, 300.0, -300.0), Some((36.0, -36.0)));
        let s = g.session().unwrap();
        assert_eq!((s.offset_x, s.offset_y), (36.0, -36.0));
    }

    #[test]
    fn test_other_touch_does_not_end_drag() {
        let mut g = GestureResolver::default();
        let (first, second) = (PointerId::Touch(4), PointerId::Touch(9));
        assert_eq!(g.on_press_start(&grid(), first, 20.0, 20.0), Some(Cell::new(0, 0)));
        // A second finger lifting over (0, 1) must not resolve the drag.
        assert_eq!(g.on_press_move(&grid(), second, 62.0, 20.0), None);
        assert_eq!(g.on_press_end(&grid(), second, 62.0, 20.0), None);
        assert!(g.is_active());
        assert_eq!(g.session().unwrap().pointer, first);
        // The mouse is another pointer too.
        assert_eq!(g.on_press_end(&grid(), MOUSE, 62.0, 20.0), None);
        assert!(g.is_active());

        let p = g.on_press_end(&grid(), first, 20.0, 62.0).unwrap();
        assert_eq!((p.from, p.to), (Cell::new(0, 0), Cell::new(1, 0)));
        assert!(!g.is_active());
    }

    #[test]
    fn test_lost_geometry_ends_session_without_swap() {
        let mut g = GestureResolver::default();
        g.on_press_start(&grid(), MOUSE, 20.0, 20.0);
        assert_eq!(g.on_press_end(&None::<Geometry>, MOUSE, 62.0, 20.0), None);
        assert!(!g.is_active());
    }
}
