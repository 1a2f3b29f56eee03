//! Chaitin–Briggs graph-coloring register allocation: simplify onto a
//! stack, then pop to color.

use crate::error::{Error, Result};
use crate::liveness::InterferenceGraph;
use crate::vreg::VReg;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A physical register name, e.g. `"ax"`. Deliberately just a newtype
/// over `&'static str` — the core never interprets register names, it
/// only hands them back out in the [`ColorMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PhysReg(pub &'static str);

impl std::fmt::Display for PhysReg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `VReg.uid -> physical register name`, for every register that
/// appeared in the block's defs or uses.
pub type ColorMap = HashMap<VReg, PhysReg>;

/// Run simplify/select over `graph` against the fixed physical register
/// file `registers`. `K = registers.len()`.
///
/// Simplify repeatedly removes any node of degree `< K`, pushing it (with
/// the interference set it had *at removal time*) onto a stack. If no
/// such node exists while the graph is non-empty, allocation fails with
/// [`Error::SpillRequired`] carrying the residual graph — this core does
/// not implement spilling, so a stalled simplify worklist is reported as
/// a typed error rather than being worked around by picking a spill
/// candidate and continuing.
///
/// Select then pops the stack and assigns each register any color not
/// already used by a neighbour present at its removal time; a coalesce
/// partner's color is preferred when available, as a non-binding quality
/// heuristic.
pub fn allocate(graph: &InterferenceGraph, registers: &[PhysReg]) -> Result<ColorMap> {
    let k = registers.len();
    let mut remaining: HashMap<VReg, usize> = graph.nodes().map(|v| (v, graph.degree(v))).collect();
    let mut stack: Vec<(VReg, HashSet<VReg>, HashSet<VReg>)> = Vec::new();

    while !remaining.is_empty() {
        let candidate = remaining
            .iter()
            .find(|(_, &degree)| degree < k)
            .map(|(&v, _)| v);

        let Some(v) = candidate else {
            let residual = remaining.keys().copied().collect::<Vec<_>>();
            tracing::warn!(remaining = residual.len(), "simplify stalled, spill required");
            return Err(Error::SpillRequired {
                remaining: residual,
                graph: graph.clone(),
            });
        };

        let interfere_at_removal: HashSet<VReg> = graph
            .interferes_with(v)
            .iter()
            .copied()
            .filter(|n| remaining.contains_key(n))
            .collect();
        let coalesce = graph.coalesces_with(v).clone();

        remaining.remove(&v);
        for &neighbor in &interfere_at_removal {
            if let Some(degree) = remaining.get_mut(&neighbor) {
                *degree -= 1;
            }
        }

        stack.push((v, interfere_at_removal, coalesce));
    }

    let mut colors: ColorMap = HashMap::new();
    while let Some((v, interfere_at_removal, coalesce)) = stack.pop() {
        let filled: HashSet<PhysReg> = interfere_at_removal
            .iter()
            .filter_map(|n| colors.get(n).copied())
            .collect();

        let chosen = coalesce
            .iter()
            .filter_map(|partner| colors.get(partner).copied())
            .find(|color| !filled.contains(color))
            .or_else(|| registers.iter().copied().find(|color| !filled.contains(color)))
            .expect("simplify invariant guarantees an available color");

        colors.insert(v, chosen);
    }

    Ok(colors)
}
