use fxhash::FxHashSet;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::Cost;

/// Heap entry referring to a node by index. Nodes have no natural order, so ties in the
/// estimated cost are broken by the insertion sequence instead.
struct SmallestCostHolder {
    estimated_cost: Cost,
    sequence: u64,
    index: usize,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost == other.estimated_cost && self.sequence == other.sequence
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys so the max-heap yields the smallest (f, seq) first
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Open set of the search: a binary heap ordered by `(f_score, insertion sequence)` plus a
/// membership set answering whether a node currently has a pending entry.
///
/// Entries are never removed or re-keyed. A node whose score improves while it is pending keeps
/// its original entry; once popped, its membership is cleared and a later push is the only way
/// for it to return.
#[derive(Default)]
pub struct Frontier {
    heap: BinaryHeap<SmallestCostHolder>,
    pending: FxHashSet<usize>,
    sequence: u64,
}

impl Frontier {
    pub fn new() -> Frontier {
        Frontier::default()
    }

    /// Queues `index` with the given estimated total cost and marks it pending.
    pub fn push(&mut self, index: usize, f_score: Cost) {
        self.sequence += 1;
        self.heap.push(SmallestCostHolder {
            estimated_cost: f_score,
            sequence: self.sequence,
            index,
        });
        self.pending.insert(index);
    }

    /// Removes the entry with the smallest `(f_score, sequence)` and returns its node index.
    pub fn pop_min(&mut self) -> Option<usize> {
        let SmallestCostHolder { index, .. } = self.heap.pop()?;
        self.pending.remove(&index);
        Some(index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.pending.contains(&index)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Number of entries physically held by the heap.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
