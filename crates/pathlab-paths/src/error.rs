use pathlab_core::Point;
use thiserror::Error;

use crate::Pather;

/// Why a search refused to run. All variants are detected before any
/// traversal work starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// Start or goal lies outside the grid.
    #[error("point {0} outside grid bounds")]
    OutOfBounds(Point),
    /// Start or goal is a wall.
    #[error("point {0} is blocked")]
    Blocked(Point),
    /// The algorithm name did not match any known search.
    #[error("unknown algorithm {0:?}")]
    UnknownAlgorithm(String),
}

/// Bounds are checked for both endpoints before walkability.
pub(crate) fn check_endpoints<P: Pather>(
    pather: &P,
    start: Point,
    goal: Point,
) -> Result<(), SearchError> {
    for p in [start, goal] {
        if !pather.in_bounds(p) {
            return Err(SearchError::OutOfBounds(p));
        }
    }
    for p in [start, goal] {
        if !pather.passable(p) {
            return Err(SearchError::Blocked(p));
        }
    }
    Ok(())
}
