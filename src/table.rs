//! Pattern history tables mapping a history/address key to a
//! saturating-counter block.

use bitvec::prelude::*;
use std::collections::HashMap;
use itertools::Itertools;

use crate::bit::fmt_bits;
use crate::{Error, Result};

/// A sparse associative store from a `key_bits`-wide key to a
/// `block_bits`-wide saturating-counter block.
///
/// Conceptually the table has `2^key_bits` rows, but rows only come into
/// existence on first access. The three constructors differ only in how
/// the key space is assembled; the storage and operations are identical.
#[derive(Debug)]
pub struct PatternHistoryTable {
    key_bits: usize,
    block_bits: usize,
    entries: HashMap<BitVec<usize, Lsb0>, BitVec<usize, Lsb0>>,
}

impl PatternHistoryTable {
    fn new(key_bits: usize, block_bits: usize) -> Self {
        Self {
            key_bits,
            block_bits,
            entries: HashMap::new(),
        }
    }

    /// A table keyed purely by history-register content.
    pub fn global(history_bits: usize, block_bits: usize) -> Self {
        Self::new(history_bits, block_bits)
    }

    /// A table keyed by a full branch address concatenated with history.
    pub fn per_address(addr_bits: usize, history_bits: usize,
        block_bits: usize) -> Self
    {
        Self::new(addr_bits + history_bits, block_bits)
    }

    /// A table keyed by a hashed set index concatenated with a hashed
    /// (reduced-width) history segment.
    pub fn per_set(set_bits: usize, history_bits: usize,
        block_bits: usize) -> Self
    {
        Self::new(set_bits + history_bits, block_bits)
    }

    pub fn key_bits(&self) -> usize { self.key_bits }
    pub fn block_bits(&self) -> usize { self.block_bits }

    /// Return the number of populated rows.
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    fn check(&self, bits: &BitSlice, expected: usize) -> Result<()> {
        if bits.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                found: bits.len(),
            });
        }
        Ok(())
    }

    /// Store `value` under `key` only if the key has never been seen.
    /// Idempotent; an existing row is left untouched.
    pub fn set_default(&mut self, key: &BitSlice, value: &BitSlice)
        -> Result<()>
    {
        self.check(key, self.key_bits)?;
        self.check(value, self.block_bits)?;
        self.entries
            .entry(key.to_bitvec())
            .or_insert_with(|| value.to_bitvec());
        Ok(())
    }

    /// Return the row stored under `key`.
    ///
    /// Every caller in this crate defaults the row first, so a
    /// [Error::KeyNotFound] here indicates a broken caller.
    pub fn get(&self, key: &BitSlice) -> Result<&BitSlice> {
        self.check(key, self.key_bits)?;
        self.entries
            .get(key)
            .map(|v| v.as_bitslice())
            .ok_or_else(|| Error::KeyNotFound { key: fmt_bits(key) })
    }

    /// Store `value` under `key` unconditionally.
    pub fn put(&mut self, key: &BitSlice, value: &BitSlice) -> Result<()> {
        self.check(key, self.key_bits)?;
        self.check(value, self.block_bits)?;
        self.entries.insert(key.to_bitvec(), value.to_bitvec());
        Ok(())
    }
}

impl std::fmt::Display for PatternHistoryTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "PatternHistoryTable ({} key bits, {} block bits, {} rows populated)",
            self.key_bits, self.block_bits, self.entries.len())?;
        let rows = self.entries.iter()
            .sorted_by(|a, b| a.0.cmp(b.0));
        for (key, value) in rows {
            writeln!(f, "  {} -> {}", fmt_bits(key), fmt_bits(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn get_before_default_is_an_error() {
        let pht = PatternHistoryTable::global(2, 2);
        let key = bitvec![usize, Lsb0; 0, 1];
        assert_eq!(
            pht.get(&key).unwrap_err(),
            Error::KeyNotFound { key: "01".to_string() }
        );
    }

    #[test]
    fn set_default_is_idempotent() {
        let mut pht = PatternHistoryTable::global(2, 2);
        let key = bitvec![usize, Lsb0; 1, 0];
        let zero = bitvec![usize, Lsb0; 0, 0];
        let trained = bitvec![usize, Lsb0; 1, 1];

        pht.set_default(&key, &zero).unwrap();
        pht.put(&key, &trained).unwrap();

        // A later default must not clobber the trained row.
        pht.set_default(&key, &zero).unwrap();
        assert_eq!(pht.get(&key).unwrap(), trained.as_bitslice());
        assert_eq!(pht.len(), 1);
    }

    #[test]
    fn put_overwrites() {
        let mut pht = PatternHistoryTable::global(2, 2);
        let key = bitvec![usize, Lsb0; 1, 1];
        pht.put(&key, &bitvec![usize, Lsb0; 0, 1]).unwrap();
        pht.put(&key, &bitvec![usize, Lsb0; 1, 0]).unwrap();
        assert_eq!(
            pht.get(&key).unwrap(),
            bitvec![usize, Lsb0; 1, 0].as_bitslice()
        );
    }

    #[test]
    fn widths_are_checked() {
        let mut pht = PatternHistoryTable::per_address(4, 2, 2);
        assert_eq!(pht.key_bits(), 6);

        let short_key = bitvec![usize, Lsb0; 1, 0];
        assert_eq!(
            pht.set_default(&short_key, &bitvec![usize, Lsb0; 0, 0]).unwrap_err(),
            Error::SizeMismatch { expected: 6, found: 2 }
        );

        let key = bitvec![usize, Lsb0; 0, 0, 0, 0, 0, 0];
        let wide_block = bitvec![usize, Lsb0; 0, 0, 0];
        assert_eq!(
            pht.put(&key, &wide_block).unwrap_err(),
            Error::SizeMismatch { expected: 2, found: 3 }
        );
    }
}
