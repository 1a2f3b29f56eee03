//! The bottom-up dynamic-program tile selector.

use crate::error::{Error, Result};
use crate::ir::{ChosenTile, IrNode};
use crate::tile::Tile;

/// Cover `root` with the cheapest tile at every node.
///
/// Traverses `root` in postorder — children before parents — so that
/// whenever a node is costed, every operand it might reference already
/// has a chosen tile (Aho–Johnson optimal tiling restricted to tree IR).
/// Ties are broken by table order: a strictly-lower cost is required to
/// replace an earlier match, so the first tile encountered wins exactly
/// at equal cost.
pub fn choose(root: &IrNode, tiles: &[Tile]) -> Result<()> {
    let mut postorder = Vec::new();
    root.postorder(&mut postorder);

    for node in postorder {
        let mut best: Option<ChosenTile> = None;

        for (index, tile) in tiles.iter().enumerate() {
            if !tile.pattern.matches(node) {
                continue;
            }
            let cost = tile.pattern.estimate(node, tile.base_cost);
            let replace = match &best {
                None => true,
                Some(current) => cost < current.cost,
            };
            if replace {
                best = Some(ChosenTile {
                    tile_index: index,
                    cost,
                });
            }
        }

        match best {
            Some(chosen) => {
                tracing::debug!(
                    node = %node.describe(),
                    tile_index = chosen.tile_index,
                    cost = chosen.cost,
                    "selected tile"
                );
                *node.tile_slot().borrow_mut() = Some(chosen);
            }
            None => {
                return Err(Error::NoCoveringTile {
                    node_description: node.describe(),
                });
            }
        }
    }

    Ok(())
}
