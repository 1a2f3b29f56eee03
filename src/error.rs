//! Error types for the tiling selector and the register allocator.

use crate::liveness::InterferenceGraph;
use crate::vreg::VReg;
use serde::Serialize;
use thiserror::Error;

/// Errors the core can return. Both are fatal to the current compilation
/// unit: neither the selector nor the allocator attempts a retry or a
/// partial result.
#[derive(Error, Debug, Clone, Serialize)]
pub enum Error {
    /// Raised by the selector when an IR node matched no tile of finite
    /// cost.
    ///
    /// **Triggered by:** an opcode (or constant shape) the tile table does
    /// not cover, e.g. selecting over a `"mul"` node with a tile table
    /// that only knows `"add"`/`"sub"`.
    /// **Prevention:** ensure the tile table covers every opcode the IR
    /// producer can emit, including at least one catch-all leaf pattern
    /// for constants.
    #[error("no tile covers node: {node_description}")]
    NoCoveringTile {
        /// A human-readable description of the uncovered node.
        node_description: String,
    },

    /// Raised by the allocator when the simplify worklist stalls with a
    /// non-empty interference graph: every remaining register has degree
    /// `>= K`, so no further progress can be made without spilling.
    ///
    /// Spilling is out of scope for this core; the residual graph is
    /// carried on the error so a caller that does implement spilling has
    /// what it needs to insert spill code and restart allocation.
    #[error("register allocation requires spilling: {} registers remain uncolored", remaining.len())]
    SpillRequired {
        /// The registers still uncolored when simplification stalled.
        remaining: Vec<VReg>,
        /// The interference graph as it stood at the point of failure.
        graph: InterferenceGraph,
    },
}

impl Error {
    /// Render this error as pretty-printed JSON, so a caller can report
    /// `SpillRequired`'s residual graph (or `NoCoveringTile`'s node
    /// description) structurally instead of via `Debug` formatting.
    pub fn to_json(&self) -> std::result::Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("JSON serialization failed: {e}"))
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
