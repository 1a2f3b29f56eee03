//! The linear instruction block built by the emitter driver.

use crate::vreg::VReg;
use std::collections::HashSet;

/// An operand of a [`Cell::Code`] instruction: either a virtual register
/// or an immediate value baked in at emission time (e.g. the `Int` child
/// of an `add[Any, Int]` tile, read directly off the IR constant).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// A virtual register, to be replaced with its assigned color.
    Reg(VReg),
    /// A literal value, printed as-is.
    Imm(i64),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Reg(r) => write!(f, "{r}"),
            Operand::Imm(v) => write!(f, "{v}"),
        }
    }
}

/// One cell of the output block.
///
/// `Motion` is kept distinct from `Code` rather than folded into a generic
/// "move" opcode because the allocator treats it specially: it records a
/// coalescing hint, and an external emitter may elide it entirely when
/// `dst` and `src` are colored the same.
#[derive(Debug, Clone)]
pub enum Cell {
    /// A machine instruction: an opaque format template plus operands.
    Code {
        /// Positional template, e.g. `"add {}, {}"`.
        template: String,
        /// Operands substituted into the template in order.
        operands: Vec<Operand>,
        /// Registers defined (written) by this instruction.
        defs: HashSet<VReg>,
        /// Registers used (read) by this instruction.
        uses: HashSet<VReg>,
    },
    /// A virtual copy `dst = src`.
    Motion {
        /// Destination register.
        dst: VReg,
        /// Source register.
        src: VReg,
    },
}

impl Cell {
    /// Registers defined by this cell.
    pub fn defs(&self) -> HashSet<VReg> {
        match self {
            Cell::Code { defs, .. } => defs.clone(),
            Cell::Motion { dst, .. } => std::iter::once(*dst).collect(),
        }
    }

    /// Registers used by this cell.
    pub fn uses(&self) -> HashSet<VReg> {
        match self {
            Cell::Code { uses, .. } => uses.clone(),
            Cell::Motion { src, .. } => std::iter::once(*src).collect(),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Code {
                template, operands, ..
            } => {
                let mut parts = template.splitn(operands.len() + 1, "{}");
                write!(f, "{}", parts.next().unwrap_or(""))?;
                for (op, rest) in operands.iter().zip(parts) {
                    write!(f, "{op}{rest}")?;
                }
                Ok(())
            }
            Cell::Motion { dst, src } => write!(f, "{dst} = {src}"),
        }
    }
}

/// An ordered sequence of [`Cell`]s, built by appending during emission.
#[derive(Debug, Clone, Default)]
pub struct Block {
    cells: Vec<Cell>,
}

impl Block {
    /// An empty block.
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Append a cell, preserving the append order the allocator relies on.
    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    /// The cells in emission order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells in the block.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the block has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<'a> IntoIterator for &'a Block {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
