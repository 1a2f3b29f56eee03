//! Liveness analysis and interference-graph construction over a
//! straight-line [`Block`].

use crate::block::{Cell, Block};
use crate::vreg::VReg;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Two parallel adjacency maps: `interfere` is true register conflicts,
/// `coalesce` is non-binding copy hints from `Motion` cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterferenceGraph {
    interfere: HashMap<VReg, HashSet<VReg>>,
    coalesce: HashMap<VReg, HashSet<VReg>>,
}

impl InterferenceGraph {
    fn entry(&mut self, v: VReg) {
        self.interfere.entry(v).or_default();
        self.coalesce.entry(v).or_default();
    }

    fn add_interference(&mut self, a: VReg, b: VReg) {
        if a == b {
            return;
        }
        self.entry(a);
        self.entry(b);
        self.interfere.get_mut(&a).unwrap().insert(b);
        self.interfere.get_mut(&b).unwrap().insert(a);
    }

    fn add_coalesce(&mut self, a: VReg, b: VReg) {
        self.entry(a);
        self.entry(b);
        self.coalesce.get_mut(&a).unwrap().insert(b);
        self.coalesce.get_mut(&b).unwrap().insert(a);
    }

    /// Every register that appears in the graph (as a node, even if it has
    /// no interference neighbours).
    pub fn nodes(&self) -> impl Iterator<Item = VReg> + '_ {
        self.interfere.keys().copied()
    }

    /// Number of distinct registers in the graph.
    pub fn len(&self) -> usize {
        self.interfere.len()
    }

    /// Whether the graph has no registers.
    pub fn is_empty(&self) -> bool {
        self.interfere.is_empty()
    }

    /// The interference neighbours of `v`, or an empty set if `v` is not
    /// in the graph.
    pub fn interferes_with(&self, v: VReg) -> &HashSet<VReg> {
        static EMPTY: once_empty::Empty = once_empty::Empty::new();
        self.interfere.get(&v).unwrap_or(EMPTY.get())
    }

    /// The coalesce hints recorded for `v`.
    pub fn coalesces_with(&self, v: VReg) -> &HashSet<VReg> {
        static EMPTY: once_empty::Empty = once_empty::Empty::new();
        self.coalesce.get(&v).unwrap_or(EMPTY.get())
    }

    fn remove(&mut self, v: VReg) -> (HashSet<VReg>, HashSet<VReg>) {
        let interfere = self.interfere.remove(&v).unwrap_or_default();
        let coalesce = self.coalesce.remove(&v).unwrap_or_default();
        for other in &interfere {
            if let Some(set) = self.interfere.get_mut(other) {
                set.remove(&v);
            }
        }
        (interfere, coalesce)
    }

    /// Degree of `v` among the registers still present in the graph.
    pub fn degree(&self, v: VReg) -> usize {
        self.interfere.get(&v).map_or(0, |s| s.len())
    }
}

/// Avoids allocating a fresh empty `HashSet` on every miss of
/// `interferes_with`/`coalesces_with` while still returning `&HashSet`.
mod once_empty {
    use super::*;
    use std::sync::OnceLock;

    pub struct Empty(OnceLock<HashSet<VReg>>);

    impl Empty {
        pub const fn new() -> Self {
            Self(OnceLock::new())
        }

        pub fn get(&self) -> &HashSet<VReg> {
            self.0.get_or_init(HashSet::new)
        }
    }
}

/// Result of liveness analysis: the graph, plus the active set live
/// *after* each cell (in the same order as `block.cells()`), for callers
/// that want to inspect liveness at a specific program point.
#[derive(Debug, Clone)]
pub struct LivenessResult {
    /// The constructed interference graph.
    pub graph: InterferenceGraph,
    /// `active` sets, one per cell, in forward (original) order.
    pub active_after: Vec<HashSet<VReg>>,
}

/// Walk `block` in reverse, computing liveness and building the
/// interference graph.
///
/// The update rule is `active := (active XOR defs) | uses`, deliberately
/// not simplified to `(active \ defs) | uses` — the two coincide
/// whenever every def is genuinely live or immediately dead, but the XOR
/// form also flips back in a register whose def had already dropped out
/// of `active` (a dead-def edge case), which the set-difference form
/// would mask.
pub fn analyze(block: &Block) -> LivenessResult {
    let mut graph = InterferenceGraph::default();
    let mut active: HashSet<VReg> = HashSet::new();
    let mut active_after = vec![HashSet::new(); block.len()];

    for (rev_idx, cell) in block.into_iter().rev().enumerate() {
        let idx = block.len() - 1 - rev_idx;
        let defs = cell.defs();
        let uses = cell.uses();

        active = symmetric_difference(&active, &defs)
            .union(&uses)
            .copied()
            .collect();
        active_after[idx] = active.clone();

        for &v in &active {
            for &other in &active {
                if other != v {
                    graph.add_interference(v, other);
                }
            }
        }
        // every active register is a node, even if it has no neighbours
        for &v in &active {
            graph.entry(v);
        }

        if let Cell::Motion { dst, src } = cell {
            graph.add_coalesce(*dst, *src);
        }
    }

    tracing::debug!(
        registers = graph.len(),
        coalesce_hints = graph.coalesce.values().map(|s| s.len()).sum::<usize>() / 2,
        "interference graph constructed"
    );

    LivenessResult { graph, active_after }
}

fn symmetric_difference(a: &HashSet<VReg>, b: &HashSet<VReg>) -> HashSet<VReg> {
    a.symmetric_difference(b).copied().collect()
}
