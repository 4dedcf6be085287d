use pathlab_core::Point;

/// Reusable buffer for neighbour enumeration.
///
/// Neighbours always come out in north, east, south, west order; the
/// search algorithms rely on this for deterministic tie-breaking.
pub struct Neighbors {
    buf: Vec<Point>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the 4-directional neighbours of `p`, keeping only those for
    /// which `keep` returns `true`.
    pub fn cardinal(&mut self, p: Point, keep: impl Fn(Point) -> bool) -> &[Point] {
        self.buf.clear();
        for n in p.neighbors_4() {
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }

    /// Cardinal neighbours of `p` that are on the map and passable.
    pub fn passable<P: crate::Pather>(&mut self, pather: &P, p: Point) -> &[Point] {
        self.cardinal(p, |n| pather.in_bounds(n) && pather.passable(n))
    }
}
