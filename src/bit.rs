
use bitvec::prelude::*;
use crate::Outcome;

/// A single binary value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bit { Zero, One }
impl Bit {
    pub fn of(x: bool) -> Self {
        if x { Self::One } else { Self::Zero }
    }
    pub fn value(self) -> bool {
        matches!(self, Self::One)
    }
}
impl std::ops::Not for Bit {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::Zero => Self::One,
            Self::One => Self::Zero,
        }
    }
}
impl std::ops::BitXor for Bit {
    type Output = Self;
    fn bitxor(self, rhs: Self) -> Self {
        Self::of(self.value() ^ rhs.value())
    }
}
impl From<bool> for Bit {
    fn from(x: bool) -> Self { Self::of(x) }
}
impl From<Bit> for bool {
    fn from(x: Bit) -> Self { x.value() }
}
impl From<Outcome> for Bit {
    fn from(x: Outcome) -> Self { Self::of(x.is_taken()) }
}
impl From<Bit> for Outcome {
    fn from(x: Bit) -> Self { x.value().into() }
}
impl std::fmt::Display for Bit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", if self.value() { '1' } else { '0' })
    }
}

/// Render a [BitSlice] with index 0 (the most-significant bit) leftmost.
pub fn fmt_bits(bits: &BitSlice) -> String {
    bits.iter().by_vals()
        .map(|b| if b { '1' } else { '0' })
        .collect()
}
