#![allow(clippy::type_complexity)]
//! # tiletree — tree-tiling instruction selection and graph-coloring
//! register allocation
//!
//! This crate is the core of a compiler back-end: it covers an
//! expression-tree IR with a minimum-cost set of target-specific
//! instruction patterns ("tiles") by bottom-up dynamic programming, then
//! assigns every virtual register the tiles reference to a physical
//! register via Chaitin–Briggs graph coloring.
//!
//! ## What this crate does *not* do
//!
//! It does not parse source, does not know any particular target's
//! instruction set, does not print assembly, and does not spill. Those
//! are all external collaborators: the caller supplies an [`ir::IrNode`]
//! tree and a [`tile::Tile`] table, and walks the resulting [`block::Block`]
//! plus [`regalloc::ColorMap`] to produce text.
//!
//! ## Quick start
//!
//! ```ignore
//! use tiletree::{compile, ir::IrNode, regalloc::PhysReg};
//!
//! let tree = IrNode::op("add", vec![IrNode::constant(0), IrNode::constant(2)]);
//! let registers = [PhysReg("ax"), PhysReg("bx"), PhysReg("cx"), PhysReg("dx")];
//! let outcome = compile(&tree, &my_target::tiles(), &registers)?;
//! for cell in outcome.block.cells() {
//!     println!("{cell}");
//! }
//! # Ok::<(), tiletree::Error>(())
//! ```

pub mod block;
pub mod emit;
pub mod error;
pub mod ir;
pub mod liveness;
pub mod pattern;
pub mod regalloc;
pub mod selector;
pub mod tile;
pub mod vreg;

pub use block::{Block, Cell, Operand};
pub use error::{Error, Result};
pub use ir::IrNode;
pub use liveness::InterferenceGraph;
pub use regalloc::{ColorMap, PhysReg};
pub use tile::Tile;
pub use vreg::{RegClass, VReg};

/// Options controlling a single compilation: currently just the target's
/// physical register file.
#[derive(Debug, Clone)]
pub struct Options<'a> {
    /// The fixed set of physical registers the allocator may assign.
    pub registers: &'a [PhysReg],
}

/// Everything produced by a successful compilation: the linear
/// instruction block and the coloring assigning each virtual register
/// there a physical register.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// The emitted instruction block.
    pub block: Block,
    /// The root expression's result register (post-coloring, look it up
    /// in `colors`).
    pub result: VReg,
    /// The virtual-to-physical register coloring.
    pub colors: ColorMap,
}

/// Run the whole pipeline: select tiles, emit a block, then allocate
/// registers. A textual-assembly emitter sits downstream of this,
/// walking the returned block and coloring to print real instructions.
pub fn compile(root: &IrNode, tiles: &[Tile], options: &Options<'_>) -> Result<Outcome> {
    let (block, result) = emit::select_and_emit(root, tiles)?;
    let liveness = liveness::analyze(&block);
    let colors = regalloc::allocate(&liveness.graph, options.registers)?;
    Ok(Outcome {
        block,
        result,
        colors,
    })
}
