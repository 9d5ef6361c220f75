use smallvec::SmallVec;

use crate::{Cost, Point, N_SMALLVEC_SIZE, UNREACHABLE};

/// Designation of a node set by the grid editor. At most one node holds [Role::Start] and at
/// most one holds [Role::End]; the search checks this before it starts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    None,
    Start,
    End,
}

/// Progress marker written by the search so a renderer can show what happened to a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mark {
    #[default]
    Unvisited,
    /// Queued in the frontier.
    Open,
    /// Expanded; its cost is final.
    Closed,
    /// Part of the reconstructed path.
    Path,
    /// The end node of a successful search.
    Goal,
}

/// A single cell of a [Grid](crate::Grid). Its position never changes after construction; the
/// remaining state is either edited by the caller (passability, role) or owned by the search
/// (scores, predecessor, mark, neighbour list).
#[derive(Clone, Debug)]
pub struct Node {
    row: usize,
    col: usize,
    pub(crate) passable: bool,
    pub(crate) role: Role,
    pub(crate) mark: Mark,
    pub(crate) g_score: Cost,
    pub(crate) f_score: Cost,
    pub(crate) predecessor: Option<usize>,
    pub(crate) neighbors: SmallVec<[usize; N_SMALLVEC_SIZE]>,
}

impl Node {
    pub(crate) fn new(row: usize, col: usize) -> Node {
        Node {
            row,
            col,
            passable: true,
            role: Role::None,
            mark: Mark::Unvisited,
            g_score: UNREACHABLE,
            f_score: UNREACHABLE,
            predecessor: None,
            neighbors: SmallVec::new(),
        }
    }

    /// Forgets everything a previous search wrote.
    pub(crate) fn reset_scores(&mut self) {
        self.g_score = UNREACHABLE;
        self.f_score = UNREACHABLE;
        self.predecessor = None;
        self.mark = Mark::Unvisited;
    }

    pub fn row(&self) -> usize {
        self.row
    }
    pub fn col(&self) -> usize {
        self.col
    }
    /// Position as `Point::new(row, col)`.
    pub fn pos(&self) -> Point {
        Point::new(self.row as i32, self.col as i32)
    }
    pub fn is_passable(&self) -> bool {
        self.passable
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn mark(&self) -> Mark {
        self.mark
    }
    /// Best known cost from the start, [UNREACHABLE] if the node has not been reached.
    pub fn g_score(&self) -> Cost {
        self.g_score
    }
    /// `g_score` plus the heuristic estimate to the end, [UNREACHABLE] if not reached.
    pub fn f_score(&self) -> Cost {
        self.f_score
    }
    pub fn is_open(&self) -> bool {
        self.mark == Mark::Open
    }
    pub fn is_closed(&self) -> bool {
        self.mark == Mark::Closed
    }
}
