//! Combinational logic shared by every predictor organization:
//! saturating-counter arithmetic and address folding.

use bitvec::prelude::*;
use crate::bit::Bit;

/// Counter update discipline. Only saturating arithmetic is defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountMode { Saturating }

/// Address folding discipline. Only the XOR fold is defined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashMode { Xor }

/// Step a counter one unit toward saturation.
///
/// The counter is read as an unsigned integer with index 0 as the
/// most-significant bit. A taken outcome increments toward
/// `2^w - 1`, a not-taken outcome decrements toward 0, and both ends
/// clamp instead of wrapping. The result has the same width as the input.
pub fn count(counter: &BitSlice, taken: bool, mode: CountMode)
    -> BitVec<usize, Lsb0>
{
    match mode {
        CountMode::Saturating => saturate(counter, taken),
    }
}

fn saturate(counter: &BitSlice, taken: bool) -> BitVec<usize, Lsb0> {
    let width = counter.len();
    let max = if width >= 128 { u128::MAX } else { (1u128 << width) - 1 };
    let value = to_uint(counter);
    let next = if taken {
        (value + 1).min(max)
    } else {
        value.saturating_sub(1)
    };
    from_uint(next, width)
}

/// Fold an arbitrary-width bit sequence down to `output_bits` bits.
///
/// Position `i` of the input folds into position `i % output_bits` of the
/// output. The fold consumes exactly the slice it is given, so callers
/// pass the address segment they intend to reduce. Deterministic and not
/// remotely cryptographic; collisions are how sets are formed.
pub fn hash(bits: &BitSlice, output_bits: usize, mode: HashMode)
    -> BitVec<usize, Lsb0>
{
    match mode {
        HashMode::Xor => xor_fold(bits, output_bits),
    }
}

fn xor_fold(bits: &BitSlice, output_bits: usize) -> BitVec<usize, Lsb0> {
    assert!(output_bits > 0);
    let mut out = vec![Bit::Zero; output_bits];
    for (i, b) in bits.iter().by_vals().enumerate() {
        let j = i % output_bits;
        out[j] = out[j] ^ Bit::of(b);
    }
    out.iter().map(|b| b.value()).collect()
}

/// Read a bit sequence as an unsigned integer, index 0 first.
fn to_uint(bits: &BitSlice) -> u128 {
    bits.iter().by_vals()
        .fold(0, |acc, b| (acc << 1) | b as u128)
}

/// Write the low `width` bits of a value, most-significant bit at index 0.
fn from_uint(value: u128, width: usize) -> BitVec<usize, Lsb0> {
    let mut out = bitvec![usize, Lsb0; 0; width];
    for i in 0..width {
        out.set(i, (value >> (width - 1 - i)) & 1 != 0);
    }
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bit::fmt_bits;

    #[test]
    fn increment_path() {
        let mut ctr = bitvec![usize, Lsb0; 0, 0];
        let expected = ["01", "10", "11", "11"];
        for step in expected {
            ctr = count(&ctr, true, CountMode::Saturating);
            assert_eq!(fmt_bits(&ctr), step);
        }
    }

    #[test]
    fn decrement_clamps_at_zero() {
        let mut ctr = bitvec![usize, Lsb0; 0, 1];
        ctr = count(&ctr, false, CountMode::Saturating);
        assert_eq!(fmt_bits(&ctr), "00");
        ctr = count(&ctr, false, CountMode::Saturating);
        assert_eq!(fmt_bits(&ctr), "00");
    }

    #[test]
    fn bounds_hold_for_any_sequence() {
        let width = 3;
        let mut ctr = bitvec![usize, Lsb0; 0; width];
        let outcomes = [true, true, false, true, true, true, true,
                        true, false, false, true, false];
        for taken in outcomes {
            ctr = count(&ctr, taken, CountMode::Saturating);
            assert_eq!(ctr.len(), width);
        }
        // Converge upward and stay saturated.
        for _ in 0..10 {
            ctr = count(&ctr, true, CountMode::Saturating);
        }
        assert_eq!(fmt_bits(&ctr), "111");
        // Converge downward and stay at zero.
        for _ in 0..10 {
            ctr = count(&ctr, false, CountMode::Saturating);
        }
        assert_eq!(fmt_bits(&ctr), "000");
    }

    #[test]
    fn single_bit_counter() {
        let ctr = bitvec![usize, Lsb0; 0];
        let up = count(&ctr, true, CountMode::Saturating);
        assert_eq!(fmt_bits(&up), "1");
        let up_again = count(&up, true, CountMode::Saturating);
        assert_eq!(fmt_bits(&up_again), "1");
    }

    #[test]
    fn xor_fold_positions() {
        // Position i folds into i % 2:
        //   out[0] = in[0] ^ in[2] = 1 ^ 1 = 0
        //   out[1] = in[1] ^ in[3] = 0 ^ 1 = 1
        let bits = bitvec![usize, Lsb0; 1, 0, 1, 1];
        let folded = hash(&bits, 2, HashMode::Xor);
        assert_eq!(fmt_bits(&folded), "01");
    }

    #[test]
    fn hash_is_deterministic_and_width_exact() {
        let bits = bitvec![usize, Lsb0; 1, 1, 0, 1, 0, 0, 1, 0];
        let a = hash(&bits, 3, HashMode::Xor);
        let b = hash(&bits, 3, HashMode::Xor);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);

        // Output wider than the input still has exactly the asked width.
        let short = bitvec![usize, Lsb0; 1, 0];
        let wide = hash(&short, 5, HashMode::Xor);
        assert_eq!(fmt_bits(&wide), "10000");
    }
}
