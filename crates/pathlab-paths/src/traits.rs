use pathlab_core::{Grid, Point};

/// Map interface the search algorithms run against.
pub trait Pather {
    /// Whether `p` lies on the map.
    fn in_bounds(&self, p: Point) -> bool;

    /// Whether `p` can be entered. Only called for in-bounds points.
    fn passable(&self, p: Point) -> bool;
}

impl Pather for Grid {
    #[inline]
    fn in_bounds(&self, p: Point) -> bool {
        Grid::in_bounds(self, p)
    }

    #[inline]
    fn passable(&self, p: Point) -> bool {
        self.is_walkable(p)
    }
}
