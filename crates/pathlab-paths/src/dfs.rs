use pathlab_core::Point;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{SearchError, check_endpoints};
use crate::neighbors::Neighbors;
use crate::result::SearchResult;
use crate::traits::Pather;

/// Depth-first search from `start` to `goal` using an explicit stack.
///
/// Nodes are marked visited when pushed, so the stack never holds the same
/// point twice. The path found is not necessarily the shortest.
/// `visited_order` records pop order.
pub fn dfs<P: Pather>(pather: &P, start: Point, goal: Point) -> Result<SearchResult, SearchError> {
    check_endpoints(pather, start, goal)?;

    let mut stack = vec![start];
    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut parents = FxHashMap::default();
    let mut visited_order = Vec::new();
    let mut nb = Neighbors::new();

    while let Some(current) = stack.pop() {
        visited_order.push(current);
        if current == goal {
            return Ok(SearchResult::found(visited_order, &parents, start, goal));
        }
        for &next in nb.passable(pather, current) {
            if visited.insert(next) {
                parents.insert(next, current);
                stack.push(next);
            }
        }
    }

    Ok(SearchResult::not_found(visited_order))
}
