use std::collections::VecDeque;

use pathlab_core::Point;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{SearchError, check_endpoints};
use crate::neighbors::Neighbors;
use crate::result::SearchResult;
use crate::traits::Pather;

/// Breadth-first search from `start` to `goal`.
///
/// Nodes are marked visited when they are enqueued, so each point enters
/// the queue at most once and the first path to reach the goal is a
/// shortest one. `visited_order` records dequeue order.
pub fn bfs<P: Pather>(pather: &P, start: Point, goal: Point) -> Result<SearchResult, SearchError> {
    check_endpoints(pather, start, goal)?;

    let mut queue = VecDeque::from([start]);
    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut parents = FxHashMap::default();
    let mut visited_order = Vec::new();
    let mut nb = Neighbors::new();

    while let Some(current) = queue.pop_front() {
        visited_order.push(current);
        if current == goal {
            return Ok(SearchResult::found(visited_order, &parents, start, goal));
        }
        for &next in nb.passable(pather, current) {
            if visited.insert(next) {
                parents.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    Ok(SearchResult::not_found(visited_order))
}
