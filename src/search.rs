//! The A* relaxation loop and the hooks it exposes to the caller.
//!
//! A search runs to completion on the caller's thread. After every expanded node, and for every
//! node of the reconstructed path, it hands the grid to a step hook; this is the only point at
//! which the caller regains control, so it is also where a renderer would redraw and where a
//! cancellation request would be raised. Cancellation is polled at the top of each iteration.
use log::{debug, info, trace};
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::grid::Grid;
use crate::heuristic::manhattan;
use crate::node::Mark;
use crate::path::{reconstruct_path, Path, PathOrder};
use crate::{Point, EDGE_COST};

/// Progress notification passed to the step hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// The node at this position was popped from the frontier and its neighbours relaxed.
    Expanded(Point),
    /// The node at this position was added to the reconstructed path.
    Traced(Point),
}

/// Outcome of a search that passed its precondition checks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchResult {
    Found(Path),
    /// The frontier ran dry: no path exists.
    Exhausted,
    /// The caller asked to stop. No partial path is produced.
    Cancelled,
}

impl SearchResult {
    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchResult::Found(path) => Some(path),
            _ => None,
        }
    }
    pub fn into_path(self) -> Option<Path> {
        match self {
            SearchResult::Found(path) => Some(path),
            _ => None,
        }
    }
    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}

/// A source the search polls to learn whether the caller wants it to stop.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

/// Never cancels.
#[derive(Clone, Copy, Debug, Default)]
pub struct Never;

impl Cancellation for Never {
    fn is_cancelled(&self) -> bool {
        false
    }
}

impl Cancellation for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl Cancellation for Cell<bool> {
    fn is_cancelled(&self) -> bool {
        self.get()
    }
}

impl<F> Cancellation for F
where
    F: Fn() -> bool,
{
    fn is_cancelled(&self) -> bool {
        self()
    }
}

/// A* search configured by its public fields.
#[derive(Clone, Debug, Default)]
pub struct AstarSearch {
    pub order: PathOrder,
}

impl AstarSearch {
    pub fn new() -> AstarSearch {
        AstarSearch::default()
    }

    pub fn with_order(mut self, order: PathOrder) -> AstarSearch {
        self.order = order;
        self
    }

    /// Searches for an optimal path from `start` to `end`, which must hold the start and end
    /// roles of `grid`. Scores, predecessors and marks from a previous search are reset first.
    ///
    /// `on_step` is called after every iteration and for every node of the reconstructed path.
    /// `cancel` is polled before the start node is seeded and at the top of every iteration.
    ///
    /// Fails only if a precondition does not hold; an unreachable end is
    /// [SearchResult::Exhausted].
    pub fn run<F, C>(
        &self,
        grid: &mut Grid,
        start: Point,
        end: Point,
        mut on_step: F,
        cancel: &C,
    ) -> Result<SearchResult, SearchError>
    where
        F: FnMut(&Grid, Step),
        C: Cancellation + ?Sized,
    {
        let (start_ix, end_ix) = grid.prepare_search(&start, &end)?;
        debug!(
            "Searching from {} to {} on {2}x{2} grid",
            start,
            end,
            grid.rows()
        );
        grid.reset_search_state();
        if cancel.is_cancelled() {
            info!("Search from {} to {} cancelled before it started", start, end);
            return Ok(SearchResult::Cancelled);
        }

        let mut frontier = Frontier::new();
        {
            let node = &mut grid.nodes[start_ix];
            node.g_score = 0;
            node.f_score = manhattan(&start, &end);
            frontier.push(start_ix, node.f_score);
        }

        let mut expanded = 0usize;
        while !frontier.is_empty() {
            if cancel.is_cancelled() {
                info!("Search cancelled after {} expansions", expanded);
                return Ok(SearchResult::Cancelled);
            }
            let Some(current) = frontier.pop_min() else {
                break;
            };
            let current_pos = grid.point(current);

            if current == end_ix {
                let trail = reconstruct_path(grid, end_ix, &mut on_step);
                grid.nodes[end_ix].mark = Mark::Goal;
                let path = Path::from_trail(trail, self.order);
                info!(
                    "Found path of cost {} from {} to {} after {} expansions",
                    path.cost(),
                    start,
                    end,
                    expanded
                );
                return Ok(SearchResult::Found(path));
            }

            let current_g = grid.nodes[current].g_score;
            let neighbors = grid.nodes[current].neighbors.clone();
            for neighbor in neighbors {
                let tentative_g = current_g + EDGE_COST;
                if tentative_g < grid.nodes[neighbor].g_score {
                    let f_score = tentative_g + manhattan(&grid.point(neighbor), &end);
                    let node = &mut grid.nodes[neighbor];
                    node.predecessor = Some(current);
                    node.g_score = tentative_g;
                    node.f_score = f_score;
                    if !frontier.contains(neighbor) {
                        frontier.push(neighbor, f_score);
                        node.mark = Mark::Open;
                    }
                }
            }
            expanded += 1;
            trace!("Expanded {} with g = {}", current_pos, current_g);

            on_step(grid, Step::Expanded(current_pos));

            if current != start_ix {
                grid.nodes[current].mark = Mark::Closed;
            }
        }

        info!(
            "{} is not reachable from {} ({} expansions)",
            end, start, expanded
        );
        Ok(SearchResult::Exhausted)
    }
}

/// Runs [AstarSearch] with its default configuration.
pub fn run_search<F, C>(
    grid: &mut Grid,
    start: Point,
    end: Point,
    on_step: F,
    cancel: &C,
) -> Result<SearchResult, SearchError>
where
    F: FnMut(&Grid, Step),
    C: Cancellation + ?Sized,
{
    AstarSearch::new().run(grid, start, end, on_step, cancel)
}
