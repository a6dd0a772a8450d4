//! Helpers for collecting statistics while evaluating a predictor.

use std::collections::*;
use bitvec::prelude::*;

use crate::branch::BranchRecord;
use crate::Outcome;

/// Container for recording simple statistics while evaluating some model.
pub struct BranchStats {
    /// Per-branch statistics (indexed by program counter value).
    data: BTreeMap<usize, BranchData>,

    /// Number of correct predictions
    global_hits: usize,

    /// Number of times any branch instruction was executed
    global_brns: usize,
}
impl BranchStats {
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
            global_hits: 0,
            global_brns: 0,
        }
    }

    /// Record one predicted/actual pair, updating both the global and
    /// the per-branch counts.
    pub fn record(&mut self, record: &BranchRecord, predicted: Outcome) {
        let hit = predicted == record.outcome;
        self.global_brns += 1;
        if hit { self.global_hits += 1; }

        let data = self.data.entry(record.pc).or_insert_with(BranchData::new);
        data.occ += 1;
        data.pat.push(record.outcome.into());
        if hit { data.hits += 1; }
    }

    /// Return the global hit rate.
    pub fn hit_rate(&self) -> f64 {
        self.global_hits as f64 / self.global_brns as f64
    }

    /// Return the global hit count.
    pub fn global_hits(&self) -> usize { self.global_hits }

    /// Return the global miss count.
    pub fn global_miss(&self) -> usize { self.global_brns - self.global_hits }

    /// Return the total branch count.
    pub fn global_brns(&self) -> usize { self.global_brns }

    /// Return the number of distinct branches observed.
    pub fn num_branches(&self) -> usize { self.data.len() }

    /// Returns a reference to data collected for a particular branch.
    pub fn get(&self, pc: usize) -> Option<&BranchData> {
        self.data.get(&pc)
    }
}
impl Default for BranchStats {
    fn default() -> Self { Self::new() }
}

/// Statistics for a single static branch.
pub struct BranchData {
    /// Number of times this branch was executed
    pub occ: usize,

    /// Number of correct predictions for this branch
    pub hits: usize,

    /// The pattern of outcomes observed for this branch
    pub pat: BitVec,
}
impl BranchData {
    pub fn new() -> Self {
        Self {
            occ: 0,
            hits: 0,
            pat: BitVec::new(),
        }
    }
    pub fn hit_rate(&self) -> f64 {
        self.hits as f64 / self.occ as f64
    }
}
impl Default for BranchData {
    fn default() -> Self { Self::new() }
}
