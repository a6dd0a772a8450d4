//! SAg: history registers shared per set (a hashed, reduced-width address
//! index) feeding a single global table keyed by history alone.

use bitvec::prelude::*;
use crate::branch::BranchInstruction;
use crate::history::{RegisterBank, ShiftRegister};
use crate::logic::{self, CountMode, HashMode};
use crate::predictor::{check_addr, fetch, require, BranchPredictor};
use crate::table::PatternHistoryTable;
use crate::{Outcome, Result};

/// Geometry for a [SAg] predictor.
#[derive(Clone, Copy, Debug)]
pub struct SAgConfig {
    /// Branch history register width in bits
    pub bhr_bits: usize,

    /// Saturating counter width in bits
    pub ctr_bits: usize,

    /// Number of branch address bits considered
    pub addr_bits: usize,

    /// Reduced set-index width in bits
    pub set_bits: usize,

    /// Folding algorithm for set selection
    pub hash_mode: HashMode,
}
impl SAgConfig {
    pub fn build(self) -> Result<SAg> {
        require(self.bhr_bits > 0, "history register width must be positive")?;
        require(self.ctr_bits > 0, "counter width must be positive")?;
        require(self.addr_bits > 0, "address width must be positive")?;
        require(self.set_bits > 0, "set index width must be positive")?;
        require(self.set_bits <= self.addr_bits,
            "set index width cannot exceed the address width")?;
        log::debug!("SAg: {} history bits, {} counter bits, {} address bits, {} set bits",
            self.bhr_bits, self.ctr_bits, self.addr_bits, self.set_bits);
        Ok(SAg {
            addr_bits: self.addr_bits,
            set_bits: self.set_bits,
            hash_mode: self.hash_mode,
            bank: RegisterBank::new(self.set_bits, self.bhr_bits),
            sc: ShiftRegister::new(self.ctr_bits),
            pht: PatternHistoryTable::global(self.bhr_bits, self.ctr_bits),
        })
    }
}

/// Per-set-history, global-table predictor.
#[derive(Debug)]
pub struct SAg {
    addr_bits: usize,
    set_bits: usize,
    hash_mode: HashMode,

    /// Per-set branch history registers
    bank: RegisterBank,

    /// Working saturating-counter register
    sc: ShiftRegister,

    /// Pattern history table, keyed by history
    pht: PatternHistoryTable,
}

impl SAg {
    fn set_index(&self, branch: &BranchInstruction)
        -> Result<BitVec<usize, Lsb0>>
    {
        check_addr(branch, self.addr_bits)?;
        Ok(logic::hash(branch.address(), self.set_bits, self.hash_mode))
    }
}

impl BranchPredictor for SAg {
    fn name(&self) -> &'static str { "SAg" }

    fn predict(&mut self, branch: &BranchInstruction) -> Result<Outcome> {
        let set = self.set_index(branch)?;
        let bhr = self.bank.read(&set)?;
        let key = bhr.read();
        fetch(&mut self.pht, &mut self.sc, &key)?;
        Ok(self.sc.msb().into())
    }

    fn update(&mut self, branch: &BranchInstruction, actual: Outcome)
        -> Result<()>
    {
        let set = self.set_index(branch)?;
        let mut bhr = self.bank.read(&set)?;
        let key = bhr.read();
        fetch(&mut self.pht, &mut self.sc, &key)?;
        let counted = logic::count(
            self.sc.as_bitslice(), actual.is_taken(), CountMode::Saturating
        );
        self.sc.load(&counted)?;
        self.pht.put(&key, self.sc.as_bitslice())?;

        bhr.insert(actual.into());
        self.bank.write(&set, bhr.as_bitslice())?;
        Ok(())
    }

    fn snapshot(&self) -> String {
        format!("SAg predictor snapshot:\n{}SC:  {}\n{}",
            self.bank, self.sc, self.pht)
    }
}
