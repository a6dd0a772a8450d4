//! PAp: a private history register per branch address and a per-address
//! table. Nothing is shared between distinct branches.

use crate::branch::BranchInstruction;
use crate::history::{RegisterBank, ShiftRegister};
use crate::logic::{self, CountMode};
use crate::predictor::{check_addr, concat, fetch, require, BranchPredictor};
use crate::table::PatternHistoryTable;
use crate::{Outcome, Result};

/// Geometry for a [PAp] predictor.
#[derive(Clone, Copy, Debug)]
pub struct PApConfig {
    /// Branch history register width in bits
    pub bhr_bits: usize,

    /// Saturating counter width in bits
    pub ctr_bits: usize,

    /// Number of branch address bits considered
    pub addr_bits: usize,
}
impl PApConfig {
    pub fn build(self) -> Result<PAp> {
        require(self.bhr_bits > 0, "history register width must be positive")?;
        require(self.ctr_bits > 0, "counter width must be positive")?;
        require(self.addr_bits > 0, "address width must be positive")?;
        log::debug!("PAp: {} history bits, {} counter bits, {} address bits",
            self.bhr_bits, self.ctr_bits, self.addr_bits);
        Ok(PAp {
            addr_bits: self.addr_bits,
            bank: RegisterBank::new(self.addr_bits, self.bhr_bits),
            sc: ShiftRegister::new(self.ctr_bits),
            pht: PatternHistoryTable::per_address(
                self.addr_bits, self.bhr_bits, self.ctr_bits
            ),
        })
    }
}

/// Per-address-history, per-address-table predictor.
pub struct PAp {
    addr_bits: usize,

    /// Per-address branch history registers
    bank: RegisterBank,

    /// Working saturating-counter register
    sc: ShiftRegister,

    /// Pattern history table, keyed by address ++ history
    pht: PatternHistoryTable,
}

impl BranchPredictor for PAp {
    fn name(&self) -> &'static str { "PAp" }

    fn predict(&mut self, branch: &BranchInstruction) -> Result<Outcome> {
        check_addr(branch, self.addr_bits)?;
        let bhr = self.bank.read(branch.address())?;
        let key = concat(branch.address(), bhr.as_bitslice());
        fetch(&mut self.pht, &mut self.sc, &key)?;
        Ok(self.sc.msb().into())
    }

    fn update(&mut self, branch: &BranchInstruction, actual: Outcome)
        -> Result<()>
    {
        check_addr(branch, self.addr_bits)?;
        let mut bhr = self.bank.read(branch.address())?;
        let key = concat(branch.address(), bhr.as_bitslice());
        fetch(&mut self.pht, &mut self.sc, &key)?;
        let counted = logic::count(
            self.sc.as_bitslice(), actual.is_taken(), CountMode::Saturating
        );
        self.sc.load(&counted)?;
        self.pht.put(&key, self.sc.as_bitslice())?;

        // Registers come out of the bank by value; the shifted history
        // must be written back to be retained.
        bhr.insert(actual.into());
        self.bank.write(branch.address(), bhr.as_bitslice())?;
        Ok(())
    }

    fn snapshot(&self) -> String {
        format!("PAp predictor snapshot:\n{}SC:  {}\n{}",
            self.bank, self.sc, self.pht)
    }
}
