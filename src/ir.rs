//! The input expression tree.
//!
//! An `IrNode` is a finite tree with no sharing and no cycles: `Constant`
//! leaves and `Operation` interior nodes, ordered-operand. Operand order
//! is significant — `Op("sub", [a, b])` is `a - b`, not `b - a`.

use crate::vreg::RegClass;
use std::cell::RefCell;

/// The tile chosen to cover a node, recorded once selection completes.
#[derive(Debug, Clone)]
pub struct ChosenTile {
    /// Index into the tile table this node was matched against.
    pub tile_index: usize,
    /// Total cost of covering this node with that tile (base cost plus
    /// the cost of every operand already covered).
    pub cost: u64,
}

/// The mutable "chosen tile" annotation attached to each node during
/// selection, implemented as interior mutability on an otherwise owned,
/// immutable tree — a side table keyed by node identity, degenerating
/// to a single cell per node since each node has exactly one slot.
pub type TileSlot = RefCell<Option<ChosenTile>>;

/// An IR node: either an integer constant or an operation over ordered
/// operand children.
#[derive(Debug)]
pub enum IrNode {
    /// An integer literal, optionally hinted with a register class.
    Constant {
        /// The literal value.
        value: i64,
        /// Optional register-class hint.
        class: Option<RegClass>,
        /// The tile chosen to cover this node, set once by `choose`.
        tile: TileSlot,
    },
    /// An operation: an opcode name applied to ordered operand children.
    Operation {
        /// The opcode, e.g. `"add"`, `"sub"`.
        op: String,
        /// Ordered operand children. Order is significant.
        operands: Vec<IrNode>,
        /// Optional register-class hint for the result.
        class: Option<RegClass>,
        /// The tile chosen to cover this node, set once by `choose`.
        tile: TileSlot,
    },
}

impl IrNode {
    /// Construct a constant leaf.
    pub fn constant(value: i64) -> Self {
        IrNode::Constant {
            value,
            class: None,
            tile: RefCell::new(None),
        }
    }

    /// Construct a constant leaf with a register-class hint.
    pub fn constant_with_class(value: i64, class: RegClass) -> Self {
        IrNode::Constant {
            value,
            class: Some(class),
            tile: RefCell::new(None),
        }
    }

    /// Construct an operation over ordered operands.
    pub fn op(name: impl Into<String>, operands: Vec<IrNode>) -> Self {
        IrNode::Operation {
            op: name.into(),
            operands,
            class: None,
            tile: RefCell::new(None),
        }
    }

    /// The operand children, or an empty slice for a `Constant`.
    pub fn operands(&self) -> &[IrNode] {
        match self {
            IrNode::Constant { .. } => &[],
            IrNode::Operation { operands, .. } => operands,
        }
    }

    /// The tile-slot annotation, shared between selection and emission.
    pub fn tile_slot(&self) -> &TileSlot {
        match self {
            IrNode::Constant { tile, .. } => tile,
            IrNode::Operation { tile, .. } => tile,
        }
    }

    /// The cost of the chosen tile, or `u64::MAX` if none has been chosen
    /// yet.
    pub fn tile_cost(&self) -> u64 {
        self.tile_slot()
            .borrow()
            .as_ref()
            .map_or(u64::MAX, |t| t.cost)
    }

    /// A short human-readable description, used in `NoCoveringTile`
    /// errors.
    pub fn describe(&self) -> String {
        match self {
            IrNode::Constant { value, .. } => format!("Const({value})"),
            IrNode::Operation { op, operands, .. } => format!("Op({op}, arity={})", operands.len()),
        }
    }

    /// Visit every node in postorder (children before parents).
    pub fn postorder<'a>(&'a self, out: &mut Vec<&'a IrNode>) {
        for child in self.operands() {
            child.postorder(out);
        }
        out.push(self);
    }
}
