//! Synthetic branch traces for driving a predictor.
//!
//! File-based trace ingestion belongs to callers of this crate; the
//! generator here only exists so the evaluation binaries and tests have
//! reproducible outcome streams to feed the engine.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::branch::BranchRecord;
use crate::Outcome;

/// A pre-determined pattern of outcomes associated with a branch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BranchPattern {
    /// A branch whose outcome is always 'taken'.
    AlwaysTaken,

    /// A branch whose outcome is always 'not-taken'.
    NeverTaken,

    /// A branch which is "taken" every 'n'-th execution.
    /// Otherwise, the branch is "not-taken" by default.
    TakenPeriodic(usize),

    /// A branch which is "taken" with the given probability.
    Biased(f64),
}
impl BranchPattern {
    fn outcome(&self, occurrence: usize, rng: &mut StdRng) -> Outcome {
        match self {
            Self::AlwaysTaken => Outcome::T,
            Self::NeverTaken => Outcome::N,
            Self::TakenPeriodic(n) => {
                ((occurrence + 1) % n == 0).into()
            },
            Self::Biased(p) => rng.gen_bool(*p).into(),
        }
    }
}

/// A reproducible stream of branch records.
pub struct SyntheticTrace {
    records: Vec<BranchRecord>,
}
impl SyntheticTrace {
    /// Interleave the given branches round-robin for `rounds` iterations.
    /// The same seed always yields the same trace.
    pub fn generate(branches: &[(usize, BranchPattern)], rounds: usize,
        seed: u64) -> Self
    {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut records = Vec::with_capacity(branches.len() * rounds);
        for round in 0..rounds {
            for (pc, pattern) in branches {
                records.push(BranchRecord {
                    pc: *pc,
                    outcome: pattern.outcome(round, &mut rng),
                });
            }
        }
        log::debug!("generated {} records for {} branches",
            records.len(), branches.len());
        Self { records }
    }

    /// Return a slice of records.
    pub fn records(&self) -> &[BranchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}
