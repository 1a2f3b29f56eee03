//! A small demonstration tile table for a hypothetical two-address x86
//! real-mode target.
//!
//! This lives under `tests/`, not `src/`, because the tile table is an
//! external collaborator of the core — these tiles exist only to
//! exercise the selector/allocator end to end.

use std::collections::HashSet;
use tiletree::block::{Cell, Operand};
use tiletree::ir::IrNode;
use tiletree::pattern::Pattern;
use tiletree::tile::{EmitCx, Tile};
use tiletree::{PhysReg, Result};

/// `ConstPattern(0)` → base 10 → xor-zero idiom.
fn xor_zero() -> Tile {
    Tile::new(Pattern::Const(0), 10, |_node, cx: &mut EmitCx| {
        let dst = cx.fresh_vreg(None);
        cx.push(Cell::Code {
            template: "xor {}, {}".into(),
            operands: vec![Operand::Reg(dst), Operand::Reg(dst)],
            defs: [dst].into_iter().collect(),
            uses: HashSet::new(),
        });
        Ok(dst)
    })
}

/// `IntPattern` → base 10 → load-immediate.
fn load_immediate() -> Tile {
    Tile::new(Pattern::Int, 10, |node, cx: &mut EmitCx| {
        let value = match node {
            IrNode::Constant { value, .. } => *value,
            IrNode::Operation { .. } => unreachable!("IntPattern only matches Constant"),
        };
        let dst = cx.fresh_vreg(None);
        cx.push(Cell::Code {
            template: "mov {}, {}".into(),
            operands: vec![Operand::Reg(dst), Operand::Imm(value)],
            defs: [dst].into_iter().collect(),
            uses: HashSet::new(),
        });
        Ok(dst)
    })
}

fn binop_immediate(opcode: &'static str, template: &'static str) -> Tile {
    Tile::new(
        Pattern::Op(opcode.into(), vec![Pattern::Any, Pattern::Int]),
        15,
        move |node, cx: &mut EmitCx| -> Result<tiletree::VReg> {
            let (lhs, rhs_value) = op_operands(node);
            let src1 = cx.gen(lhs)?;
            let dst = cx.fresh_vreg(None);
            cx.push(Cell::Motion { dst, src: src1 });
            cx.push(Cell::Code {
                template: template.into(),
                operands: vec![Operand::Reg(dst), Operand::Imm(rhs_value)],
                defs: [dst].into_iter().collect(),
                uses: [dst].into_iter().collect(),
            });
            Ok(dst)
        },
    )
}

fn binop_register(opcode: &'static str, template: &'static str) -> Tile {
    Tile::new(
        Pattern::Op(opcode.into(), vec![Pattern::Any, Pattern::Any]),
        20,
        move |node, cx: &mut EmitCx| -> Result<tiletree::VReg> {
            let operands = match node {
                IrNode::Operation { operands, .. } => operands,
                IrNode::Constant { .. } => unreachable!("OpPattern only matches Operation"),
            };
            let src1 = cx.gen(&operands[0])?;
            let src2 = cx.gen(&operands[1])?;
            let dst = cx.fresh_vreg(None);
            cx.push(Cell::Motion { dst, src: src1 });
            cx.push(Cell::Code {
                template: template.into(),
                operands: vec![Operand::Reg(dst), Operand::Reg(src2)],
                defs: [dst].into_iter().collect(),
                uses: [dst, src2].into_iter().collect(),
            });
            Ok(dst)
        },
    )
}

fn op_operands(node: &IrNode) -> (&IrNode, i64) {
    match node {
        IrNode::Operation { operands, .. } => {
            let rhs_value = match &operands[1] {
                IrNode::Constant { value, .. } => *value,
                IrNode::Operation { .. } => unreachable!("IntPattern child must be a Constant"),
            };
            (&operands[0], rhs_value)
        }
        IrNode::Constant { .. } => unreachable!("OpPattern only matches Operation"),
    }
}

/// The full demonstration tile table: constant/int leaves, then
/// add/sub over an immediate or a second register operand.
pub fn tiles() -> Vec<Tile> {
    vec![
        xor_zero(),
        load_immediate(),
        binop_immediate("add", "add {}, {}"),
        binop_register("add", "add {}, {}"),
        binop_immediate("sub", "sub {}, {}"),
        binop_register("sub", "sub {}, {}"),
    ]
}

pub const REGISTERS: &[PhysReg] = &[PhysReg("ax"), PhysReg("bx"), PhysReg("cx"), PhysReg("dx")];
