use pathlab_core::Point;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{SearchError, check_endpoints};
use crate::heap::MinHeap;
use crate::neighbors::Neighbors;
use crate::result::SearchResult;
use crate::traits::Pather;

/// Manhattan distance between `from` and `to`, the A* heuristic.
///
/// Admissible and consistent on a 4-connected unit-cost grid.
#[inline]
pub fn heuristic(from: Point, to: Point) -> f64 {
    f64::from(from.manhattan(to))
}

/// A* search from `start` to `goal` guided by [`heuristic`].
///
/// The open list uses lazy deletion: a point may be queued several times
/// and only its first pop is expanded, later pops are discarded.
/// `visited_order` records the order in which points are closed.
pub fn astar<P: Pather>(
    pather: &P,
    start: Point,
    goal: Point,
) -> Result<SearchResult, SearchError> {
    check_endpoints(pather, start, goal)?;

    let mut open = MinHeap::new();
    open.push(start, 0.0);
    let mut g_score: FxHashMap<Point, f64> = FxHashMap::default();
    g_score.insert(start, 0.0);
    let mut parents = FxHashMap::default();
    let mut closed = FxHashSet::default();
    let mut visited_order = Vec::new();
    let mut nb = Neighbors::new();

    while let Some((current, _)) = open.pop() {
        // Stale duplicate.
        if !closed.insert(current) {
            continue;
        }
        visited_order.push(current);
        if current == goal {
            return Ok(SearchResult::found(visited_order, &parents, start, goal));
        }

        let current_g = g_score.get(&current).copied().unwrap_or(f64::INFINITY);
        for &next in nb.passable(pather, current) {
            if closed.contains(&next) {
                continue;
            }
            let tentative = current_g + 1.0;
            if g_score.get(&next).is_some_and(|&g| tentative >= g) {
                continue;
            }
            parents.insert(next, current);
            g_score.insert(next, tentative);
            open.push(next, tentative + heuristic(next, goal));
        }
    }

    Ok(SearchResult::not_found(visited_order))
}
