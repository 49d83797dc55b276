use std::ops::{BitAnd, BitOr, BitXor, Shl, Shr};

use crate::CrackError;

/// Width of every bit vector and state word.
pub const WIDTH: usize = 32;

/// A 32-bit vector. Position 0 is the most significant bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bits32(u32);

impl Bits32 {
    pub const fn from_word(word: u32) -> Self {
        Self(word)
    }

    pub const fn to_word(self) -> u32 {
        self.0
    }

    /// Build a vector from individual bits, most significant first.
    /// Slices shorter than 32 are zero-padded on the left.
    pub fn from_bits(bits: &[u8]) -> Result<Self, CrackError> {
        if bits.len() > WIDTH {
            return Err(CrackError::InvariantViolation(format!(
                "bit vector has {} elements, at most {} allowed",
                bits.len(),
                WIDTH
            )));
        }
        let mut word = 0u32;
        for (i, &bit) in bits.iter().enumerate() {
            if bit > 1 {
                return Err(CrackError::InvariantViolation(format!(
                    "bit {} has value {}, expected 0 or 1",
                    i, bit
                )));
            }
            word = (word << 1) | bit as u32;
        }
        Ok(Self(word))
    }

    pub fn to_bits(self) -> [u8; WIDTH] {
        std::array::from_fn(|i| self.bit(i))
    }

    /// The bit at `pos`, counting from the most significant end.
    pub fn bit(self, pos: usize) -> u8 {
        debug_assert!(pos < WIDTH);
        ((self.0 >> (WIDTH - 1 - pos)) & 1) as u8
    }

    pub fn with_bit(self, pos: usize, bit: u8) -> Self {
        debug_assert!(pos < WIDTH);
        let mask = 1u32 << (WIDTH - 1 - pos);
        if bit & 1 == 1 {
            Self(self.0 | mask)
        } else {
            Self(self.0 & !mask)
        }
    }
}

impl From<u32> for Bits32 {
    fn from(word: u32) -> Self {
        Self::from_word(word)
    }
}

impl From<Bits32> for u32 {
    fn from(bits: Bits32) -> Self {
        bits.to_word()
    }
}

impl BitAnd for Bits32 {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl BitOr for Bits32 {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitXor for Bits32 {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

// Shifting by 32 or more clears the vector rather than overflowing.
impl Shl<u32> for Bits32 {
    type Output = Self;

    fn shl(self, rhs: u32) -> Self {
        Self(self.0.checked_shl(rhs).unwrap_or(0))
    }
}

impl Shr<u32> for Bits32 {
    type Output = Self;

    fn shr(self, rhs: u32) -> Self {
        Self(self.0.checked_shr(rhs).unwrap_or(0))
    }
}
