//! GAp: one global history register, with a per-address table so that
//! branches sharing a history pattern keep separate counters.

use bitvec::prelude::*;
use crate::branch::BranchInstruction;
use crate::history::ShiftRegister;
use crate::logic::{self, CountMode};
use crate::predictor::{check_addr, concat, fetch, require, BranchPredictor};
use crate::table::PatternHistoryTable;
use crate::{Outcome, Result};

/// Geometry for a [GAp] predictor.
#[derive(Clone, Copy, Debug)]
pub struct GApConfig {
    /// Branch history register width in bits
    pub bhr_bits: usize,

    /// Saturating counter width in bits
    pub ctr_bits: usize,

    /// Number of branch address bits considered
    pub addr_bits: usize,
}
impl GApConfig {
    pub fn build(self) -> Result<GAp> {
        require(self.bhr_bits > 0, "history register width must be positive")?;
        require(self.ctr_bits > 0, "counter width must be positive")?;
        require(self.addr_bits > 0, "address width must be positive")?;
        log::debug!("GAp: {} history bits, {} counter bits, {} address bits",
            self.bhr_bits, self.ctr_bits, self.addr_bits);
        Ok(GAp {
            addr_bits: self.addr_bits,
            bhr: ShiftRegister::new(self.bhr_bits),
            sc: ShiftRegister::new(self.ctr_bits),
            pht: PatternHistoryTable::per_address(
                self.addr_bits, self.bhr_bits, self.ctr_bits
            ),
        })
    }
}

/// Global-history, per-address-table predictor.
pub struct GAp {
    addr_bits: usize,

    /// Global branch history register
    bhr: ShiftRegister,

    /// Working saturating-counter register
    sc: ShiftRegister,

    /// Pattern history table, keyed by address ++ history
    pht: PatternHistoryTable,
}

impl GAp {
    fn key(&self, branch: &BranchInstruction) -> Result<BitVec<usize, Lsb0>> {
        check_addr(branch, self.addr_bits)?;
        Ok(concat(branch.address(), self.bhr.as_bitslice()))
    }
}

impl BranchPredictor for GAp {
    fn name(&self) -> &'static str { "GAp" }

    fn predict(&mut self, branch: &BranchInstruction) -> Result<Outcome> {
        let key = self.key(branch)?;
        fetch(&mut self.pht, &mut self.sc, &key)?;
        Ok(self.sc.msb().into())
    }

    fn update(&mut self, branch: &BranchInstruction, actual: Outcome)
        -> Result<()>
    {
        let key = self.key(branch)?;
        fetch(&mut self.pht, &mut self.sc, &key)?;
        let counted = logic::count(
            self.sc.as_bitslice(), actual.is_taken(), CountMode::Saturating
        );
        self.sc.load(&counted)?;
        self.pht.put(&key, self.sc.as_bitslice())?;
        self.bhr.insert(actual.into());
        Ok(())
    }

    fn snapshot(&self) -> String {
        format!("GAp predictor snapshot:\nBHR: {}\nSC:  {}\n{}",
            self.bhr, self.sc, self.pht)
    }
}
