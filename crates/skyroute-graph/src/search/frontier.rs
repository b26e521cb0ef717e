//! Priority queue of nodes waiting to be expanded.
//!
//! Improving a node's score pushes a fresh entry instead of decreasing a
//! key in place, so a node may sit in the queue several times. The search
//! recognizes and skips the stale copies when they surface.

use crate::graph::NodeId;
use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FrontierEntry {
    /// Priority: cost so far plus the heuristic estimate.
    pub(crate) f_score: OrderedFloat<f64>,
    /// Cost from the start when the entry was pushed.
    pub(crate) g_score: OrderedFloat<f64>,
    /// Insertion sequence number, unique per frontier.
    pub(crate) seq: u64,
    pub(crate) node: NodeId,
}

// BinaryHeap is a max-heap, so every comparison is reversed.
// Smaller f first, then smaller g, then earlier insertion.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.g_score.cmp(&self.g_score))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_seq: u64,
}

impl Frontier {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, f_score: f64, g_score: f64, node: NodeId) {
        let entry = FrontierEntry {
            f_score: OrderedFloat(f_score),
            g_score: OrderedFloat(g_score),
            seq: self.next_seq,
            node,
        };
        self.next_seq += 1;
        self.heap.push(entry);
    }

    pub(crate) fn pop(&mut self) -> Option<FrontierEntry> {
        self.heap.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }
}
