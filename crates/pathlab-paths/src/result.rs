use pathlab_core::Point;
use rustc_hash::FxHashMap;

/// Outcome of one search run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SearchResult {
    /// Whether the goal was reached.
    pub found: bool,
    /// Start to goal inclusive; empty when not found.
    pub path: Vec<Point>,
    /// Points in the order they were expanded.
    pub visited_order: Vec<Point>,
    /// Always `visited_order.len()`.
    pub expanded_nodes: usize,
    /// Number of steps along `path`.
    pub path_length: usize,
}

impl SearchResult {
    pub(crate) fn found(
        visited_order: Vec<Point>,
        parents: &FxHashMap<Point, Point>,
        start: Point,
        goal: Point,
    ) -> Self {
        let path = reconstruct_path(parents, start, goal);
        Self {
            found: true,
            path_length: path.len().saturating_sub(1),
            path,
            expanded_nodes: visited_order.len(),
            visited_order,
        }
    }

    pub(crate) fn not_found(visited_order: Vec<Point>) -> Self {
        Self {
            found: false,
            path: Vec::new(),
            expanded_nodes: visited_order.len(),
            visited_order,
            path_length: 0,
        }
    }
}

/// Walk the parent map back from `goal` to `start` and return the path in
/// start-to-goal order.
fn reconstruct_path(parents: &FxHashMap<Point, Point>, start: Point, goal: Point) -> Vec<Point> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(&prev) = parents.get(&current) else {
            break;
        };
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn wire_names_are_camel_case() {
        let r = SearchResult::not_found(vec![Point::ZERO]);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["found"], false);
        assert_eq!(v["expandedNodes"], 1);
        assert_eq!(v["pathLength"], 0);
        assert_eq!(v["visitedOrder"][0]["x"], 0);
        assert!(v["path"].as_array().unwrap().is_empty());
    }
}
