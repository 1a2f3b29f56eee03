//! Tiles: `(pattern, base cost, emit)` triples, and the emitter context
//! tiles are invoked through.
//!
//! The target-specific tile table is an external collaborator — this
//! module only defines the shape it must have. See `tests/support` for
//! a concrete example table covering a small x86 real-mode-style target.

use crate::block::Block;
use crate::error::Result;
use crate::pattern::Pattern;
use crate::vreg::{VReg, VRegAllocator};

/// The non-negative cost unit tiles are priced in. A node with no chosen
/// tile reports `Cost::MAX`, standing in for an unbounded cost.
pub type Cost = u64;

/// The emitter context passed to every `emit` call.
///
/// This is how open recursion across the tile table is implemented
/// without a process-wide singleton: an emit procedure that needs to
/// emit code for one of its operands calls `cx.gen(operand)`, which
/// looks up that operand's already-chosen tile and invokes it in turn.
pub struct EmitCx<'a> {
    tiles: &'a [Tile],
    block: &'a mut Block,
    vregs: &'a mut VRegAllocator,
}

impl<'a> EmitCx<'a> {
    /// Construct a context over a tile table, and the block/register
    /// allocator to emit into.
    pub fn new(tiles: &'a [Tile], block: &'a mut Block, vregs: &'a mut VRegAllocator) -> Self {
        Self {
            tiles,
            block,
            vregs,
        }
    }

    /// Append a cell to the output block.
    pub fn push(&mut self, cell: crate::block::Cell) {
        self.block.push(cell);
    }

    /// Mint a fresh virtual register.
    pub fn fresh_vreg(&mut self, class: Option<crate::vreg::RegClass>) -> VReg {
        self.vregs.fresh(class)
    }

    /// Recursively emit code for `node`, using whichever tile `choose`
    /// selected for it.
    pub fn gen(&mut self, node: &crate::ir::IrNode) -> Result<VReg> {
        let chosen = node.tile_slot().borrow().clone().ok_or_else(|| {
            crate::error::Error::NoCoveringTile {
                node_description: node.describe(),
            }
        })?;
        let tile = &self.tiles[chosen.tile_index];
        (tile.emit)(node, self)
    }
}

/// The signature an emit procedure must have: given the matched node and
/// a mutable emitter context, append zero or more cells and return the
/// register holding the tile's result.
pub type EmitFn = Box<dyn Fn(&crate::ir::IrNode, &mut EmitCx) -> Result<VReg>>;

/// A tile: a pattern, its base cost, and the procedure that emits code
/// when that pattern is chosen to cover a node.
pub struct Tile {
    /// The structural pattern this tile covers.
    pub pattern: Pattern,
    /// The tile's own cost, excluding whatever its operand children cost.
    pub base_cost: Cost,
    /// The emission procedure.
    pub emit: EmitFn,
}

impl Tile {
    /// Construct a tile from a pattern, base cost, and emit closure.
    pub fn new(
        pattern: Pattern,
        base_cost: Cost,
        emit: impl Fn(&crate::ir::IrNode, &mut EmitCx) -> Result<VReg> + 'static,
    ) -> Self {
        Self {
            pattern,
            base_cost,
            emit: Box::new(emit),
        }
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tile")
            .field("pattern", &self.pattern)
            .field("base_cost", &self.base_cost)
            .finish_non_exhaustive()
    }
}
