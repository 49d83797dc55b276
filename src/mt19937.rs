use rand::RngCore;

use crate::temper::temper;

/// MT19937 parameters, shared by the generator, the tempering transform and
/// the twist recurrences.
pub const N: usize = 624;
pub(crate) const M: usize = 397;
pub(crate) const W: u32 = 32;
pub(crate) const UMASK: u32 = 0xffffffff << (W - 1);
pub(crate) const LMASK: u32 = 0xffffffff >> 1;
pub(crate) const A: u32 = 0x9908b0df;
pub(crate) const U: u32 = 11;
pub(crate) const S: u32 = 7;
pub(crate) const T: u32 = 15;
pub(crate) const L: u32 = 18;
pub(crate) const B: u32 = 0x9d2c5680;
pub(crate) const C: u32 = 0xefc60000;
const F: u32 = 1812433253;

/// MT19937 pseudo-random number generator.
#[derive(Debug, Clone)]
pub struct Mt19937 {
    state: [u32; N],
    state_idx: usize,
}

impl Mt19937 {
    pub fn new(seed: u32) -> Self {
        Self {
            state: Self::seed_state(seed),
            state_idx: 0,
        }
    }

    /// Resume a generator from a raw state array. Words before `state_idx`
    /// are already twisted, words from `state_idx` on are twisted as they
    /// are consumed.
    pub fn from_state(state: [u32; N], state_idx: usize) -> Self {
        Self {
            state,
            state_idx: state_idx % N,
        }
    }

    pub fn generate(&mut self) -> u32 {
        let k: usize = self.state_idx;
        let mut j: usize = k.checked_sub(N - 1).unwrap_or(k + 1);
        let mut x: u32 = (self.state[k] & UMASK) | (self.state[j] & LMASK);
        let mut x_a: u32 = x >> 1;
        if x & 1 > 0 {
            x_a ^= A;
        }
        j = k.checked_sub(N - M).unwrap_or(k + M);
        x = self.state[j] ^ x_a;
        self.state[k] = x;
        self.state_idx = (k + 1) % N;
        temper(x)
    }

    fn seed_state(mut seed: u32) -> [u32; N] {
        let mut state = [0; N];
        state[0] = seed;
        for (i, state_element) in state.iter_mut().enumerate().skip(1) {
            seed = F.wrapping_mul(seed ^ (seed >> (W - 2))).wrapping_add(i as u32);
            *state_element = seed;
        }
        state
    }
}

// 64-bit values and byte streams are assembled from consecutive outputs,
// least significant word first.
impl RngCore for Mt19937 {
    fn next_u32(&mut self) -> u32 {
        self.generate()
    }

    fn next_u64(&mut self) -> u64 {
        let low = self.generate() as u64;
        let high = self.generate() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.generate().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::Rng;
    use rstest::rstest;

    #[rstest]
    #[case(0, [2357136044, 2546248239, 3071714933])]
    #[case(19650218, [2325592414, 482149846, 4177211283])]
    #[case(101, [2217915231, 2373142027, 2450998609])]
    #[case(5489, [3499211612, 581869302, 3890346734])]
    fn generate_returns_correct_value_for_seed(#[case] seed: u32, #[case] values: [u32; 3]) {
        let mut rng = Mt19937::new(seed);

        assert_eq!(rng.generate(), values[0]);
        assert_eq!(rng.generate(), values[1]);
        assert_eq!(rng.generate(), values[2]);
    }

    #[test]
    fn from_state_at_index_zero_continues_from_twisted_state() {
        let mut rng = Mt19937::new(101);
        for _ in 0..N {
            rng.generate();
        }
        let mut resumed = Mt19937::from_state(rng.state, 0);

        for _ in 0..N {
            assert_eq!(resumed.generate(), rng.generate());
        }
    }

    #[test]
    fn next_u64_puts_first_output_in_low_word() {
        let mut rng = Mt19937::new(5489);
        let mut reference = Mt19937::new(5489);

        let value = rng.next_u64();

        assert_eq!(value as u32, reference.generate());
        assert_eq!((value >> 32) as u32, reference.generate());
    }

    #[test]
    fn fill_bytes_uses_little_endian_outputs() {
        let mut rng = Mt19937::new(5489);
        let mut reference = Mt19937::new(5489);
        let mut buf = [0u8; 6];

        rng.fill_bytes(&mut buf);

        let first = reference.generate().to_le_bytes();
        let second = reference.generate().to_le_bytes();
        assert_eq!(buf[..4], first);
        assert_eq!(buf[4..], second[..2]);
    }

    #[test]
    fn usable_through_rng_trait() {
        let mut rng = Mt19937::new(42);

        let value: u8 = rng.gen_range(10..20);

        assert!((10..20).contains(&value));
    }
}
