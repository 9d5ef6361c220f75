//! Error types for grid construction and search preconditions.
//!
//! An unreachable goal or a cancelled search is not an error; those are reported as
//! [SearchResult](crate::SearchResult) variants.
use grid_util::Point;
use thiserror::Error;

use crate::node::Role;

/// A caller-contract violation detected before any search work begins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("{pos} lies outside the {rows}x{rows} grid")]
    OutOfBounds { pos: Point, rows: usize },

    #[error("no node holds the {0:?} role")]
    MissingRole(Role),

    #[error("{count} nodes hold the {role:?} role, expected exactly one")]
    DuplicateRole { role: Role, count: usize },

    #[error("{pos} does not hold the {role:?} role")]
    RoleMismatch { pos: Point, role: Role },

    #[error("the {role:?} node at {pos} is an obstacle")]
    Blocked { pos: Point, role: Role },

    #[error("neighbour lists are stale, call compute_neighbors before searching")]
    StaleNeighbors,
}

/// Failure to read a [Grid](crate::Grid) from its ASCII form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseGridError {
    #[error("grid text contains no rows")]
    Empty,

    #[error("line {line} has {found} cells, expected {expected} for a square grid")]
    NotSquare {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("unknown cell {ch:?} at row {row}, column {col}")]
    UnknownCell { ch: char, row: usize, col: usize },
}
