//! Branch instructions and execution records.

use bitvec::prelude::*;
use crate::bit::fmt_bits;
use crate::Outcome;

/// A branch instruction, reduced to the address bits a predictor sees.
///
/// Index 0 is the most-significant address bit, matching the convention
/// used by every register and table in this crate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchInstruction {
    addr: BitVec<usize, Lsb0>,
}
impl BranchInstruction {
    pub fn new(addr: BitVec<usize, Lsb0>) -> Self {
        Self { addr }
    }

    /// Build an instruction from the low `width` bits of a program counter
    /// value, most-significant bit first.
    pub fn from_pc(pc: usize, width: usize) -> Self {
        let mut addr = bitvec![usize, Lsb0; 0; width];
        for i in 0..width {
            addr.set(i, (pc >> (width - 1 - i)) & 1 != 0);
        }
        Self { addr }
    }

    /// Return the address bits.
    pub fn address(&self) -> &BitSlice {
        self.addr.as_bitslice()
    }

    /// Return the address width in bits.
    pub fn width(&self) -> usize {
        self.addr.len()
    }
}
impl std::fmt::Display for BranchInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", fmt_bits(&self.addr))
    }
}

/// A record of one executed branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchRecord {
    /// The program counter value for this branch
    pub pc: usize,

    /// The outcome evaluated for this branch
    pub outcome: Outcome,
}
