use core::fmt;
use std::str::FromStr;

use itertools::{iproduct, Itertools};
use log::{debug, warn};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::{ParseGridError, SearchError};
use crate::node::{Mark, Node, Role};
use crate::{Point, N_SMALLVEC_SIZE};

/// [Grid] owns a square array of [Node]s stored row-major, addressed either by `(row, col)` or
/// by `Point::new(row, col)`. Besides the nodes it keeps a [UnionFind] structure over passable
/// nodes for cheap reachability queries.
///
/// Neighbour lists are not kept in sync with obstacle edits: call
/// [compute_neighbors](Self::compute_neighbors) after editing and before searching. The search
/// refuses to run on stale lists.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    pub(crate) nodes: Vec<Node>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
    neighbors_dirty: bool,
}

impl Grid {
    /// Allocates a `rows` x `rows` grid of passable nodes without roles.
    pub fn create(rows: usize) -> Grid {
        let nodes = iproduct!(0..rows, 0..rows)
            .map(|(row, col)| Node::new(row, col))
            .collect();
        let mut grid = Grid {
            rows,
            nodes,
            components: UnionFind::new(rows * rows),
            components_dirty: false,
            neighbors_dirty: true,
        };
        grid.generate_components();
        grid
    }

    /// Rebuilds the grid wholesale: every obstacle, role and score is dropped.
    pub fn reset(&mut self) {
        *self = Grid::create(self.rows);
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn ix(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.rows,
            "({row}, {col}) lies outside the {0}x{0} grid",
            self.rows
        );
        row * self.rows + col
    }
    pub(crate) fn index_of(&self, point: &Point) -> Option<usize> {
        self.in_bounds(point)
            .then(|| point.x as usize * self.rows + point.y as usize)
    }
    pub(crate) fn point(&self, ix: usize) -> Point {
        self.nodes[ix].pos()
    }
    pub fn in_bounds(&self, point: &Point) -> bool {
        let rows = self.rows as i32;
        point.x >= 0 && point.y >= 0 && point.x < rows && point.y < rows
    }

    /// # Panics
    /// If `(row, col)` lies outside the grid.
    pub fn node(&self, row: usize, col: usize) -> &Node {
        &self.nodes[self.ix(row, col)]
    }
    pub fn node_at(&self, point: &Point) -> Option<&Node> {
        self.index_of(point).map(|ix| &self.nodes[ix])
    }
    /// All nodes in row-major order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Marks `(row, col)` impassable. Breaking a node out of a component may split it, so the
    /// components are flagged as dirty.
    ///
    /// # Panics
    /// If `(row, col)` lies outside the grid.
    pub fn set_obstacle(&mut self, row: usize, col: usize) {
        let ix = self.ix(row, col);
        if self.nodes[ix].passable {
            self.nodes[ix].passable = false;
            self.components_dirty = true;
            self.neighbors_dirty = true;
        }
    }

    /// Makes `(row, col)` passable again and joins it with the components of its passable
    /// neighbours.
    ///
    /// # Panics
    /// If `(row, col)` lies outside the grid.
    pub fn clear_obstacle(&mut self, row: usize, col: usize) {
        let ix = self.ix(row, col);
        if !self.nodes[ix].passable {
            self.nodes[ix].passable = true;
            for n in self.adjacent(ix) {
                self.components.union(ix, n);
            }
            self.neighbors_dirty = true;
        }
    }

    /// Assigns a role. Keeping at most one start and one end is up to the caller; the search
    /// rejects grids that violate it.
    ///
    /// # Panics
    /// If `(row, col)` lies outside the grid.
    pub fn set_role(&mut self, row: usize, col: usize, role: Role) {
        let ix = self.ix(row, col);
        self.nodes[ix].role = role;
    }

    /// # Panics
    /// If `(row, col)` lies outside the grid.
    pub fn clear_role(&mut self, row: usize, col: usize) {
        self.set_role(row, col, Role::None);
    }

    /// Returns a node to its pristine editor state: passable and without a role.
    ///
    /// # Panics
    /// If `(row, col)` lies outside the grid.
    pub fn clear_cell(&mut self, row: usize, col: usize) {
        self.clear_obstacle(row, col);
        self.clear_role(row, col);
    }

    /// Passable in-bounds nodes orthogonally adjacent to `ix`, in the order down, up, right,
    /// left. The order decides tie-breaks during search.
    fn adjacent(&self, ix: usize) -> SmallVec<[usize; N_SMALLVEC_SIZE]> {
        let (row, col) = (ix / self.rows, ix % self.rows);
        [
            (row + 1 < self.rows).then(|| ix + self.rows),
            (row > 0).then(|| ix - self.rows),
            (col + 1 < self.rows).then(|| ix + 1),
            (col > 0).then(|| ix - 1),
        ]
        .into_iter()
        .flatten()
        .filter(|&n| self.nodes[n].passable)
        .collect()
    }

    /// Rebuilds the neighbour list of every node from the current obstacles.
    pub fn compute_neighbors(&mut self) {
        debug!("Computing neighbour lists for {0}x{0} grid", self.rows);
        for ix in 0..self.nodes.len() {
            let neighbors = self.adjacent(ix);
            self.nodes[ix].neighbors = neighbors;
        }
        self.neighbors_dirty = false;
    }

    /// Whether obstacles changed since the last [compute_neighbors](Self::compute_neighbors).
    pub fn neighbors_stale(&self) -> bool {
        self.neighbors_dirty
    }

    /// Neighbours of `point` as of the last [compute_neighbors](Self::compute_neighbors).
    pub fn neighbors(&self, point: &Point) -> impl Iterator<Item = Point> + '_ {
        self.node_at(point)
            .into_iter()
            .flat_map(|node| node.neighbors.iter())
            .map(|&n| self.point(n))
    }

    /// The node through which the last search reached `point`, if any.
    pub fn predecessor(&self, point: &Point) -> Option<Point> {
        self.node_at(point)
            .and_then(|node| node.predecessor)
            .map(|ix| self.point(ix))
    }

    /// Clears scores, predecessors and marks left by a previous search. Roles and obstacles are
    /// kept.
    pub fn reset_search_state(&mut self) {
        for node in self.nodes.iter_mut() {
            node.reset_scores();
        }
    }

    fn holders(&self, role: Role) -> Vec<usize> {
        self.nodes.iter().positions(|n| n.role == role).collect()
    }
    fn unique_role(&self, role: Role) -> Result<Point, SearchError> {
        match self.holders(role).as_slice() {
            [] => Err(SearchError::MissingRole(role)),
            [ix] => Ok(self.point(*ix)),
            holders => Err(SearchError::DuplicateRole {
                role,
                count: holders.len(),
            }),
        }
    }

    /// First node holding [Role::Start].
    pub fn start(&self) -> Option<Point> {
        self.holders(Role::Start).first().map(|&ix| self.point(ix))
    }
    /// First node holding [Role::End].
    pub fn end(&self) -> Option<Point> {
        self.holders(Role::End).first().map(|&ix| self.point(ix))
    }
    /// The start and end positions, provided exactly one node holds each role.
    pub fn endpoints(&self) -> Result<(Point, Point), SearchError> {
        Ok((self.unique_role(Role::Start)?, self.unique_role(Role::End)?))
    }

    /// Checks every precondition of a search from `start` to `end` and resolves both to node
    /// indices.
    pub(crate) fn prepare_search(
        &self,
        start: &Point,
        end: &Point,
    ) -> Result<(usize, usize), SearchError> {
        let out_of_bounds = |pos: &Point| SearchError::OutOfBounds {
            pos: *pos,
            rows: self.rows,
        };
        let start_ix = self.index_of(start).ok_or_else(|| out_of_bounds(start))?;
        let end_ix = self.index_of(end).ok_or_else(|| out_of_bounds(end))?;
        if self.neighbors_dirty {
            return Err(SearchError::StaleNeighbors);
        }
        let (marked_start, marked_end) = self.endpoints()?;
        if marked_start != *start {
            return Err(SearchError::RoleMismatch {
                pos: *start,
                role: Role::Start,
            });
        }
        if marked_end != *end {
            return Err(SearchError::RoleMismatch {
                pos: *end,
                role: Role::End,
            });
        }
        for (ix, pos, role) in [(start_ix, start, Role::Start), (end_ix, end, Role::End)] {
            if !self.nodes[ix].passable {
                return Err(SearchError::Blocked { pos: *pos, role });
            }
        }
        Ok((start_ix, end_ix))
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.index_of(point).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are on the same component. Obstacles form components of their
    /// own.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        if self.components_dirty {
            warn!("Querying reachability while components are dirty");
        }
        match (self.index_of(start), self.index_of(goal)) {
            (Some(start_ix), Some(goal_ix)) => self.components.equiv(start_ix, goal_ix),
            _ => false,
        }
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        !self.reachable(start, goal)
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up passable neighbours to the same
    /// components.
    pub fn generate_components(&mut self) {
        debug!("Generating connected components");
        self.components = UnionFind::new(self.nodes.len());
        self.components_dirty = false;
        for ix in 0..self.nodes.len() {
            if self.nodes[ix].passable {
                for n in self.adjacent(ix) {
                    self.components.union(ix, n);
                }
            }
        }
    }

    fn cell_char(node: &Node) -> char {
        match (node.role, node.passable, node.mark) {
            (Role::Start, ..) => 'S',
            (Role::End, ..) => 'E',
            (_, false, _) => '#',
            (_, _, Mark::Path) => '*',
            (_, _, Mark::Open) => 'o',
            (_, _, Mark::Closed) => 'x',
            _ => '.',
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.nodes.chunks(self.rows.max(1)) {
            let line: String = row.iter().map(Grid::cell_char).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Reads a square grid drawn with `S` (start), `E` (end), `#` (obstacle) and `.` (free).
/// Progress marks written by [Display](fmt::Display) (`o`, `x`, `*`) read back as free cells. Blank lines and surrounding whitespace are ignored. The parsed grid has fresh neighbour
/// lists and components.
impl FromStr for Grid {
    type Err = ParseGridError;

    fn from_str(s: &str) -> Result<Grid, ParseGridError> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<&str>>();
        if lines.is_empty() {
            return Err(ParseGridError::Empty);
        }
        let rows = lines.len();
        let mut grid = Grid::create(rows);
        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != rows {
                return Err(ParseGridError::NotSquare {
                    line: row + 1,
                    found,
                    expected: rows,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    'S' => grid.set_role(row, col, Role::Start),
                    'E' => grid.set_role(row, col, Role::End),
                    '#' => grid.set_obstacle(row, col),
                    '.' | 'o' | 'x' | '*' => {}
                    ch => return Err(ParseGridError::UnknownCell { ch, row, col }),
                }
            }
        }
        grid.compute_neighbors();
        grid.generate_components();
        Ok(grid)
    }
}
