//! # grid_astar
//!
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) search on a square grid with
//! uniform edge cost and a 4-neighbourhood, built to be driven by an interactive front-end.
//! The caller edits a [Grid] (obstacles, start and end roles), rebuilds its neighbour lists and
//! hands it to [run_search] together with a step hook and a [Cancellation] source. The hook is
//! invoked synchronously after every expanded node and for every node of the reconstructed
//! path, so a renderer can show the search as it unfolds and stop it between two iterations.
//!
//! The heuristic is the
//! [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry), which is consistent
//! for this movement model, so every returned [Path] is optimal. Ties in the frontier are
//! broken by insertion order, which makes the result fully deterministic.
//!
//! ```
//! use grid_astar::{run_search, Grid, Never, Role, SearchResult};
//!
//! let mut grid = Grid::create(3);
//! grid.set_role(0, 0, Role::Start);
//! grid.set_role(2, 0, Role::End);
//! grid.set_obstacle(1, 0);
//! grid.set_obstacle(1, 2);
//! grid.compute_neighbors();
//!
//! let (start, end) = grid.endpoints().unwrap();
//! let result = run_search(&mut grid, start, end, |_, _| {}, &Never).unwrap();
//! match result {
//!     SearchResult::Found(path) => assert_eq!(path.cost(), 4),
//!     _ => unreachable!(),
//! }
//! ```
pub mod error;
pub mod frontier;
pub mod grid;
pub mod heuristic;
pub mod node;
pub mod path;
pub mod search;

pub use error::{ParseGridError, SearchError};
pub use grid::Grid;
pub use grid_util::Point;
pub use node::{Mark, Node, Role};
pub use path::{Path, PathOrder};
pub use search::{run_search, AstarSearch, Cancellation, Never, SearchResult, Step};

/// Integer cost type used for g and f scores.
pub type Cost = i32;

/// Cost of moving between two adjacent nodes.
pub const EDGE_COST: Cost = 1;

/// Score of a node that has not been reached by the current search.
pub const UNREACHABLE: Cost = Cost::MAX;

/// Inline capacity of neighbour lists; a node never has more than four.
pub(crate) const N_SMALLVEC_SIZE: usize = 4;
