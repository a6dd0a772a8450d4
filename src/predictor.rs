//! The contract shared by every predictor organization, plus the six
//! organizations themselves.

pub mod gag;
pub mod gap;
pub mod pap;
pub mod sag;
pub mod sap;
pub mod sas;

pub use gag::*;
pub use gap::*;
pub use pap::*;
pub use sag::*;
pub use sap::*;
pub use sas::*;

use bitvec::prelude::*;
use crate::branch::BranchInstruction;
use crate::history::ShiftRegister;
use crate::table::PatternHistoryTable;
use crate::{Error, Outcome, Result};

/// Interface to a dynamic branch predictor.
///
/// For a given branch occurrence the caller invokes `predict` first and
/// `update` second, once each, on a single thread. `predict` may populate
/// default table rows and bank registers for never-seen keys (a fresh
/// context always predicts not-taken), but it never advances learning
/// state; two consecutive `predict` calls return the same outcome.
pub trait BranchPredictor {
    /// The name of this predictor organization.
    fn name(&self) -> &'static str;

    /// Predict the outcome of a branch before it resolves.
    fn predict(&mut self, branch: &BranchInstruction) -> Result<Outcome>;

    /// Learn from the resolved outcome of a branch.
    fn update(&mut self, branch: &BranchInstruction, actual: Outcome)
        -> Result<()>;

    /// Human-readable dump of register and table contents.
    /// Debug aid only; the format carries no stability contract.
    fn snapshot(&self) -> String;
}

/// An all-zero counter block of the given width.
pub(crate) fn default_block(width: usize) -> BitVec<usize, Lsb0> {
    bitvec![usize, Lsb0; 0; width]
}

/// Concatenate two key segments, `head` first.
pub(crate) fn concat(head: &BitSlice, tail: &BitSlice)
    -> BitVec<usize, Lsb0>
{
    let mut key = head.to_bitvec();
    key.extend_from_bitslice(tail);
    key
}

/// Default the table row for `key` if unseen, then load it into the
/// working counter register. Shared by every organization's `predict`
/// and `update` paths.
pub(crate) fn fetch(pht: &mut PatternHistoryTable, sc: &mut ShiftRegister,
    key: &BitSlice) -> Result<()>
{
    pht.set_default(key, &default_block(sc.len()))?;
    sc.load(pht.get(key)?)
}

pub(crate) fn require(cond: bool, msg: &str) -> Result<()> {
    if cond {
        Ok(())
    } else {
        Err(Error::InvalidConfig(msg.to_string()))
    }
}

/// Reject a branch whose address width disagrees with the configuration.
pub(crate) fn check_addr(branch: &BranchInstruction, addr_bits: usize)
    -> Result<()>
{
    if branch.width() != addr_bits {
        return Err(Error::SizeMismatch {
            expected: addr_bits,
            found: branch.width(),
        });
    }
    Ok(())
}
