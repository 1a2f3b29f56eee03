//! The emitter driver: walks the selected tiles top-down and appends
//! cells to an output block.

use crate::block::Block;
use crate::error::Result;
use crate::ir::IrNode;
use crate::tile::{EmitCx, Tile};
use crate::vreg::{VReg, VRegAllocator};

/// Select tiles for `root` (see [`crate::selector::choose`]) and then
/// drive emission, producing a fresh [`Block`] and the register holding
/// the whole tree's result.
pub fn select_and_emit(root: &IrNode, tiles: &[Tile]) -> Result<(Block, VReg)> {
    crate::selector::choose(root, tiles)?;
    let mut block = Block::new();
    let mut vregs = VRegAllocator::new();
    let mut cx = EmitCx::new(tiles, &mut block, &mut vregs);
    let result = cx.gen(root)?;
    Ok((block, result))
}
