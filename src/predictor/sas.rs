//! SAs: history registers shared per set, with the table also keyed at
//! set granularity. Both key segments are reduced by the same fold, so
//! colliding branches share everything.

use bitvec::prelude::*;
use crate::branch::BranchInstruction;
use crate::history::{RegisterBank, ShiftRegister};
use crate::logic::{self, CountMode, HashMode};
use crate::predictor::{check_addr, concat, fetch, require, BranchPredictor};
use crate::table::PatternHistoryTable;
use crate::{Outcome, Result};

/// Geometry for a [SAs] predictor.
#[derive(Clone, Copy, Debug)]
pub struct SAsConfig {
    /// Branch history register width in bits
    pub bhr_bits: usize,

    /// Saturating counter width in bits
    pub ctr_bits: usize,

    /// Number of branch address bits considered
    pub addr_bits: usize,

    /// Reduced set-index width in bits
    pub set_bits: usize,

    /// Folding algorithm for set selection and key reduction
    pub hash_mode: HashMode,
}
impl SAsConfig {
    pub fn build(self) -> Result<SAs> {
        require(self.bhr_bits > 0, "history register width must be positive")?;
        require(self.ctr_bits > 0, "counter width must be positive")?;
        require(self.addr_bits > 0, "address width must be positive")?;
        require(self.set_bits > 0, "set index width must be positive")?;
        require(self.set_bits <= self.addr_bits,
            "set index width cannot exceed the address width")?;
        log::debug!("SAs: {} history bits, {} counter bits, {} address bits, {} set bits",
            self.bhr_bits, self.ctr_bits, self.addr_bits, self.set_bits);
        Ok(SAs {
            addr_bits: self.addr_bits,
            set_bits: self.set_bits,
            hash_mode: self.hash_mode,
            bank: RegisterBank::new(self.set_bits, self.bhr_bits),
            sc: ShiftRegister::new(self.ctr_bits),
            pht: PatternHistoryTable::per_set(
                self.set_bits, self.set_bits, self.ctr_bits
            ),
        })
    }
}

/// Per-set-history, per-set-table predictor.
pub struct SAs {
    addr_bits: usize,
    set_bits: usize,
    hash_mode: HashMode,

    /// Per-set branch history registers
    bank: RegisterBank,

    /// Working saturating-counter register
    sc: ShiftRegister,

    /// Pattern history table, keyed by folded address ++ folded history
    pht: PatternHistoryTable,
}

impl SAs {
    fn set_index(&self, branch: &BranchInstruction)
        -> Result<BitVec<usize, Lsb0>>
    {
        check_addr(branch, self.addr_bits)?;
        Ok(logic::hash(branch.address(), self.set_bits, self.hash_mode))
    }

    /// Both key segments are folded to the set width, in `predict` and
    /// `update` alike.
    fn key(&self, set: &BitSlice, bhr: &ShiftRegister)
        -> BitVec<usize, Lsb0>
    {
        let history = logic::hash(
            bhr.as_bitslice(), self.set_bits, self.hash_mode
        );
        concat(set, &history)
    }
}

impl BranchPredictor for SAs {
    fn name(&self) -> &'static str { "SAs" }

    fn predict(&mut self, branch: &BranchInstruction) -> Result<Outcome> {
        let set = self.set_index(branch)?;
        let bhr = self.bank.read(&set)?;
        let key = self.key(&set, &bhr);
        fetch(&mut self.pht, &mut self.sc, &key)?;
        Ok(self.sc.msb().into())
    }

    fn update(&mut self, branch: &BranchInstruction, actual: Outcome)
        -> Result<()>
    {
        let set = self.set_index(branch)?;
        let mut bhr = self.bank.read(&set)?;
        let key = self.key(&set, &bhr);
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
        format!("SAs predictor snapshot:\n{}SC:  {}\n{}",
            self.bank, self.sc, self.pht)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Outcome::{N, T};

    fn build() -> SAs {
        SAsConfig {
            bhr_bits: 4,
            ctr_bits: 2,
            addr_bits: 4,
            set_bits: 2,
            hash_mode: HashMode::Xor,
        }.build().unwrap()
    }

    #[test]
    fn fresh_predictor_says_not_taken() {
        let mut p = build();
        let b = BranchInstruction::from_pc(0b1001, 4);
        assert_eq!(p.predict(&b).unwrap(), N);
    }

    #[test]
    fn colliding_addresses_share_everything() {
        // 0001 and 0100 fold to the same set, so their keys are
        // identical in every cycle: A's training is B's training.
        let mut p = build();
        let a = BranchInstruction::from_pc(0b0001, 4);
        let b = BranchInstruction::from_pc(0b0100, 4);

        for _ in 0..8 {
            p.predict(&a).unwrap();
            p.update(&a, T).unwrap();
        }
        assert_eq!(p.predict(&a).unwrap(), T);
        assert_eq!(p.predict(&b).unwrap(), T);
    }

    #[test]
    fn key_uses_folded_history_in_both_paths() {
        // With a 4-bit history folded to 2 bits, histories 0110 and 1001
        // collide (both fold to 11 ^ ... = same segment). Drive the
        // history to 1111 and check the predictor still resolves rows
        // through the folded key rather than the raw one: the table key
        // width is 2 * set_bits, which the width checks enforce on every
        // access, so a raw 4-bit history segment would error out.
        let mut p = build();
        let a = BranchInstruction::from_pc(0b0001, 4);
        for _ in 0..6 {
            p.predict(&a).unwrap();
            assert!(p.update(&a, T).is_ok());
        }
        assert_eq!(p.predict(&a).unwrap(), T);
    }

    #[test]
    fn update_without_predict_is_well_defined() {
        let mut p = build();
        let a = BranchInstruction::from_pc(0b0011, 4);
        // No preceding predict; update must default the row itself.
        assert!(p.update(&a, T).is_ok());
        assert_eq!(p.predict(&a).unwrap(), N);
    }
}
