//! GAg: one global history register, one pattern history table keyed by
//! history alone. Every branch in the program shares both.

use crate::branch::BranchInstruction;
use crate::history::ShiftRegister;
use crate::logic::{self, CountMode};
use crate::predictor::{fetch, require, BranchPredictor};
use crate::table::PatternHistoryTable;
use crate::{Outcome, Result};

/// Geometry for a [GAg] predictor.
#[derive(Clone, Copy, Debug)]
pub struct GAgConfig {
    /// Branch history register width in bits
    pub bhr_bits: usize,

    /// Saturating counter width in bits
    pub ctr_bits: usize,
}
impl GAgConfig {
    pub fn build(self) -> Result<GAg> {
        require(self.bhr_bits > 0, "history register width must be positive")?;
        require(self.ctr_bits > 0, "counter width must be positive")?;
        log::debug!("GAg: {} history bits, {} counter bits",
            self.bhr_bits, self.ctr_bits);
        Ok(GAg {
            bhr: ShiftRegister::new(self.bhr_bits),
            sc: ShiftRegister::new(self.ctr_bits),
            pht: PatternHistoryTable::global(self.bhr_bits, self.ctr_bits),
        })
    }
}

/// Global-history, global-table predictor.
pub struct GAg {
    /// Global branch history register
    bhr: ShiftRegister,

    /// Working saturating-counter register
    sc: ShiftRegister,

    /// Pattern history table, keyed by history
    pht: PatternHistoryTable,
}

impl BranchPredictor for GAg {
    fn name(&self) -> &'static str { "GAg" }

    fn predict(&mut self, _branch: &BranchInstruction) -> Result<Outcome> {
        let key = self.bhr.read();
        fetch(&mut self.pht, &mut self.sc, &key)?;
        Ok(self.sc.msb().into())
    }

    fn update(&mut self, _branch: &BranchInstruction, actual: Outcome)
        -> Result<()>
    {
        let key = self.bhr.read();
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
        format!("GAg predictor snapshot:\nBHR: {}\nSC:  {}\n{}",
            self.bhr, self.sc, self.pht)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Outcome::{N, T};

    fn branch() -> BranchInstruction {
        // GAg ignores the address entirely.
        BranchInstruction::from_pc(0, 4)
    }

    #[test]
    fn fresh_predictor_says_not_taken() {
        let mut p = GAgConfig { bhr_bits: 2, ctr_bits: 2 }.build().unwrap();
        assert_eq!(p.predict(&branch()).unwrap(), N);
    }

    #[test]
    fn predict_is_idempotent() {
        let mut p = GAgConfig { bhr_bits: 2, ctr_bits: 2 }.build().unwrap();
        let a = p.predict(&branch()).unwrap();
        let b = p.predict(&branch()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn all_taken_stream_saturates_the_repeated_row() {
        // With 2 history bits an all-taken stream walks the history
        // through 00, 10, 11 and then parks on 11. The row keyed by 11
        // follows the counter path 00 -> 01 -> 10 -> 11, so its
        // prediction flips to taken once the value reaches 2.
        let mut p = GAgConfig { bhr_bits: 2, ctr_bits: 2 }.build().unwrap();
        let mut predictions = Vec::new();
        for _ in 0..6 {
            predictions.push(p.predict(&branch()).unwrap());
            p.update(&branch(), T).unwrap();
        }
        assert_eq!(predictions, vec![N, N, N, N, T, T]);
    }

    #[test]
    fn zero_widths_are_rejected() {
        assert!(GAgConfig { bhr_bits: 0, ctr_bits: 2 }.build().is_err());
        assert!(GAgConfig { bhr_bits: 2, ctr_bits: 0 }.build().is_err());
    }
}
