//! Branch history storage: shift registers and per-address register banks.

use bitvec::prelude::*;
use std::collections::HashMap;
use itertools::Itertools;

use crate::bit::{fmt_bits, Bit};
use crate::{Error, Result};

/// A fixed-width serial-in/parallel-out shift register.
///
/// Index 0 holds the most recently inserted bit; the bit at index
/// `len - 1` is the oldest and is discarded on the next insert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShiftRegister {
    data: BitVec<usize, Lsb0>,
    len: usize,
}

impl std::fmt::Display for ShiftRegister {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", fmt_bits(&self.data))
    }
}

impl ShiftRegister {
    /// Create a register with the specified length in bits.
    /// All bits in the register are initialized to zero.
    pub fn new(len: usize) -> Self {
        Self {
            data: bitvec![usize, Lsb0; 0; len],
            len,
        }
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Return the current contents as a slice.
    pub fn as_bitslice(&self) -> &BitSlice { self.data.as_bitslice() }

    /// Return a copy of the current contents.
    pub fn read(&self) -> BitVec<usize, Lsb0> {
        self.data.clone()
    }

    /// Return the most-significant (most recently inserted) bit.
    pub fn msb(&self) -> Bit {
        Bit::of(self.data[0])
    }

    /// Replace the contents wholesale.
    pub fn load(&mut self, bits: &BitSlice) -> Result<()> {
        if bits.len() != self.len {
            return Err(Error::SizeMismatch {
                expected: self.len,
                found: bits.len(),
            });
        }
        self.data.clear();
        self.data.extend_from_bitslice(bits);
        Ok(())
    }

    /// Shift every bit one position toward the tail, discard the oldest,
    /// and place `bit` at index 0.
    pub fn insert(&mut self, bit: Bit) {
        if self.len > 1 {
            self.data.shift_right(1);
        }
        self.data.set(0, bit.value());
    }
}

/// A lazily populated bank of [ShiftRegister], keyed by an address tag.
///
/// The first `read` or `write` against a tag creates an all-zero register
/// for it; entries are never evicted. Registers are handed out by value,
/// so a mutated register must be written back to be retained.
#[derive(Debug)]
pub struct RegisterBank {
    tag_bits: usize,
    register_bits: usize,
    entries: HashMap<BitVec<usize, Lsb0>, ShiftRegister>,
}

impl RegisterBank {
    pub fn new(tag_bits: usize, register_bits: usize) -> Self {
        Self {
            tag_bits,
            register_bits,
            entries: HashMap::new(),
        }
    }

    pub fn tag_bits(&self) -> usize { self.tag_bits }
    pub fn register_bits(&self) -> usize { self.register_bits }

    /// Return the number of populated entries.
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    fn check_tag(&self, tag: &BitSlice) -> Result<()> {
        if tag.len() != self.tag_bits {
            return Err(Error::SizeMismatch {
                expected: self.tag_bits,
                found: tag.len(),
            });
        }
        Ok(())
    }

    /// Return a copy of the register stored under `tag`, creating an
    /// all-zero register if the tag has never been seen.
    pub fn read(&mut self, tag: &BitSlice) -> Result<ShiftRegister> {
        self.check_tag(tag)?;
        let register_bits = self.register_bits;
        let reg = self.entries
            .entry(tag.to_bitvec())
            .or_insert_with(|| ShiftRegister::new(register_bits));
        Ok(reg.clone())
    }

    /// Load `bits` into the register stored under `tag`, creating the
    /// register first if the tag has never been seen.
    pub fn write(&mut self, tag: &BitSlice, bits: &BitSlice) -> Result<()> {
        self.check_tag(tag)?;
        let register_bits = self.register_bits;
        let reg = self.entries
            .entry(tag.to_bitvec())
            .or_insert_with(|| ShiftRegister::new(register_bits));
        reg.load(bits)
    }
}

impl std::fmt::Display for RegisterBank {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "RegisterBank ({} tag bits, {} register bits, {} entries)",
            self.tag_bits, self.register_bits, self.entries.len())?;
        let rows = self.entries.iter()
            .sorted_by(|a, b| a.0.cmp(b.0));
        for (tag, reg) in rows {
            writeln!(f, "  {} -> {}", fmt_bits(tag), reg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn insert_is_newest_first() {
        let mut r = ShiftRegister::new(4);
        r.insert(Bit::One);
        r.insert(Bit::Zero);
        r.insert(Bit::One);
        assert_eq!(fmt_bits(r.as_bitslice()), "1010");
    }

    #[test]
    fn insert_discards_oldest() {
        let mut r = ShiftRegister::new(2);
        r.insert(Bit::One);
        r.insert(Bit::One);
        r.insert(Bit::Zero);
        assert_eq!(fmt_bits(r.as_bitslice()), "01");
    }

    #[test]
    fn insert_into_single_bit_register() {
        let mut r = ShiftRegister::new(1);
        r.insert(Bit::One);
        assert_eq!(r.msb(), Bit::One);
        r.insert(Bit::Zero);
        assert_eq!(r.msb(), Bit::Zero);
    }

    #[test]
    fn load_checks_width() {
        let mut r = ShiftRegister::new(3);
        let bits = bitvec![usize, Lsb0; 1, 0];
        assert_eq!(
            r.load(&bits),
            Err(Error::SizeMismatch { expected: 3, found: 2 })
        );
    }

    #[test]
    fn read_is_a_copy() {
        let mut r = ShiftRegister::new(2);
        let mut copy = r.read();
        copy.set(0, true);
        assert_eq!(fmt_bits(r.as_bitslice()), "00");
        r.insert(Bit::One);
        assert_eq!(fmt_bits(&copy), "10");
        assert_eq!(fmt_bits(r.as_bitslice()), "10");
    }

    #[test]
    fn bank_defaults_on_first_read() {
        let mut bank = RegisterBank::new(2, 4);
        let tag = bitvec![usize, Lsb0; 1, 0];
        let reg = bank.read(&tag).unwrap();
        assert_eq!(fmt_bits(reg.as_bitslice()), "0000");
        assert_eq!(bank.len(), 1);

        // A second read must not reset the stored register.
        let written = bitvec![usize, Lsb0; 1, 1, 0, 1];
        bank.write(&tag, &written).unwrap();
        let reg = bank.read(&tag).unwrap();
        assert_eq!(fmt_bits(reg.as_bitslice()), "1101");
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn bank_entries_are_independent() {
        let mut bank = RegisterBank::new(2, 2);
        let a = bitvec![usize, Lsb0; 0, 0];
        let b = bitvec![usize, Lsb0; 0, 1];
        bank.write(&a, &bitvec![usize, Lsb0; 1, 1]).unwrap();
        let reg = bank.read(&b).unwrap();
        assert_eq!(fmt_bits(reg.as_bitslice()), "00");
        assert_eq!(bank.len(), 2);
    }

    #[test]
    fn bank_checks_tag_width() {
        let mut bank = RegisterBank::new(3, 2);
        let tag = bitvec![usize, Lsb0; 1];
        assert_eq!(
            bank.read(&tag).unwrap_err(),
            Error::SizeMismatch { expected: 3, found: 1 }
        );
    }

    #[test]
    fn mutated_copy_requires_write_back() {
        let mut bank = RegisterBank::new(1, 2);
        let tag = bitvec![usize, Lsb0; 0];
        let mut reg = bank.read(&tag).unwrap();
        reg.insert(Bit::One);

        // Not written back yet; the bank still holds the old value.
        assert_eq!(fmt_bits(bank.read(&tag).unwrap().as_bitslice()), "00");

        bank.write(&tag, reg.as_bitslice()).unwrap();
        assert_eq!(fmt_bits(bank.read(&tag).unwrap().as_bitslice()), "10");
    }
}
