//! Tree patterns, matched structurally against [`IrNode`]s and scored by
//! the bottom-up dynamic program in `selector`.

use crate::ir::IrNode;

/// A pattern that matches part of the IR tree.
///
/// Matching is purely structural: `Op` patterns recurse into their child
/// patterns positionally, so `Op("add", [Any, Int])` matches
/// an `add` node whose second operand is a constant, regardless of what
/// the first operand is.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches any node at all.
    Any,
    /// Matches any `Constant` node, regardless of value.
    Int,
    /// Matches a `Constant` node whose value equals `v` exactly.
    Const(i64),
    /// Matches an `Operation` node with the given name, arity, and
    /// children satisfying the given child patterns positionally.
    Op(String, Vec<Pattern>),
}

impl Pattern {
    /// Does this pattern match `node`?
    pub fn matches(&self, node: &IrNode) -> bool {
        match (self, node) {
            (Pattern::Any, _) => true,
            (Pattern::Int, IrNode::Constant { .. }) => true,
            (Pattern::Int, IrNode::Operation { .. }) => false,
            (Pattern::Const(v), IrNode::Constant { value, .. }) => value == v,
            (Pattern::Const(_), IrNode::Operation { .. }) => false,
            (Pattern::Op(name, children), IrNode::Operation { op, operands, .. }) => {
                op == name
                    && children.len() == operands.len()
                    && children
                        .iter()
                        .zip(operands.iter())
                        .all(|(pat, sub)| pat.matches(sub))
            }
            (Pattern::Op(..), IrNode::Constant { .. }) => false,
        }
    }

    /// The cost of covering `node` with this pattern, given the pattern's
    /// `base` cost: `base + sum(tile_cost(child))` over the operand
    /// children, where `tile_cost(child)` is the cost already stored on
    /// that child's chosen tile. Postorder selection guarantees every
    /// operand already has a chosen tile by the time its
    /// parent is costed, making this a true bottom-up dynamic program.
    ///
    /// Leaf patterns (`Any`, `Int`, `Const`) contribute only `base` — they
    /// never recurse, since there is nothing left to cover once a leaf
    /// pattern matches.
    pub fn estimate(&self, node: &IrNode, base: u64) -> u64 {
        match self {
            Pattern::Any | Pattern::Int | Pattern::Const(_) => base,
            Pattern::Op(_, _) => {
                let mut total = base;
                for sub in node.operands() {
                    total = total.saturating_add(sub.tile_cost());
                }
                total
            }
        }
    }
}
