use std::fmt;
use std::str::FromStr;

use pathlab_core::Point;

use crate::error::SearchError;
use crate::result::SearchResult;
use crate::traits::Pather;
use crate::{astar, bfs, dfs};

/// The available search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bfs,
    Dfs,
    AStar,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Bfs, Algorithm::Dfs, Algorithm::AStar];

    /// Canonical lower-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dfs => "dfs",
            Algorithm::AStar => "astar",
        }
    }

    /// Run this search on `pather`.
    pub fn search<P: Pather>(
        self,
        pather: &P,
        start: Point,
        goal: Point,
    ) -> Result<SearchResult, SearchError> {
        match self {
            Algorithm::Bfs => bfs(pather, start, goal),
            Algorithm::Dfs => dfs(pather, start, goal),
            Algorithm::AStar => astar(pather, start, goal),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SearchError;

    /// Accepts `bfs`, `dfs`, `astar` and `a*`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Algorithm::Bfs),
            "dfs" => Ok(Algorithm::Dfs),
            "astar" | "a*" => Ok(Algorithm::AStar),
            _ => Err(SearchError::UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Look up `algorithm` by name and run it.
///
/// An unrecognised name fails with [`SearchError::UnknownAlgorithm`] before
/// the grid is inspected.
pub fn search<P: Pather>(
    algorithm: &str,
    pather: &P,
    start: Point,
    goal: Point,
) -> Result<SearchResult, SearchError> {
    algorithm.parse::<Algorithm>()?.search(pather, start, goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathlab_core::Grid;

    #[test]
    fn parses_names_case_insensitively() {
        for (name, want) in [
            ("bfs", Algorithm::Bfs),
            ("BFS", Algorithm::Bfs),
            ("Dfs", Algorithm::Dfs),
            ("astar", Algorithm::AStar),
            ("AStar", Algorithm::AStar),
            ("a*", Algorithm::AStar),
            ("A*", Algorithm::AStar),
        ] {
            assert_eq!(name.parse::<Algorithm>().unwrap(), want, "{name}");
        }
    }

    #[test]
    fn rejects_unknown_names() {
        for name in ["", "dijkstra", "a-star", " bfs"] {
            assert_eq!(
                name.parse::<Algorithm>().unwrap_err(),
                SearchError::UnknownAlgorithm(name.to_owned())
            );
        }
    }

    #[test]
    fn names_round_trip() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.to_string().parse::<Algorithm>().unwrap(), algo);
        }
    }

    #[test]
    fn unknown_algorithm_checked_before_grid() {
        let g = Grid::new(2, 2);
        let err = search("greedy", &g, Point::new(-5, -5), Point::ZERO).unwrap_err();
        assert!(matches!(err, SearchError::UnknownAlgorithm(_)));
    }

    #[test]
    fn dispatches_to_each_search() {
        let g = Grid::new(4, 4);
        for name in ["bfs", "dfs", "a*"] {
            let r = search(name, &g, Point::new(0, 0), Point::new(3, 0)).unwrap();
            assert!(r.found, "{name}");
            assert_eq!(r.path.last(), Some(&Point::new(3, 0)));
        }
    }
}
