use crate::bits::Bits32;
use crate::mt19937::{Mt19937, N};
use crate::temper::harden;
use crate::twist::{twist, untwist};

/// Cursor over a recovered state array.
///
/// Generation 0 is the observed window; prediction starts at the first word
/// of generation 1.
#[derive(Debug, Clone)]
pub(crate) struct Predictor {
    state: Box<[u32; N]>,
    cursor: usize,
    generation: i64,
}

impl Predictor {
    pub(crate) fn new(window: [u32; N]) -> Self {
        let mut predictor = Self {
            state: Box::new(window),
            cursor: N,
            generation: 0,
        };
        predictor.regenerate();
        predictor
    }

    /// Index of the next output, counted from the first observed output.
    pub(crate) fn position(&self) -> i64 {
        self.generation * N as i64 + self.cursor as i64
    }

    pub(crate) fn next(&mut self) -> u32 {
        if self.cursor == N {
            self.regenerate();
        }
        let output = harden(Bits32::from_word(self.state[self.cursor])).to_word();
        self.cursor += 1;
        output
    }

    /// Move the cursor `n` outputs forward or backward.
    pub(crate) fn offset(&mut self, n: i64) {
        if n >= 0 {
            self.skip(n.unsigned_abs());
        } else {
            let back = n.unsigned_abs();
            for _ in 0..(back / N as u64 + 1) {
                self.rewind();
            }
            self.skip(N as u64 - back % N as u64);
        }
    }

    /// A generator that continues from the current cursor.
    pub(crate) fn to_generator(&self) -> Mt19937 {
        if self.cursor == N {
            return Mt19937::from_state(*self.state, 0);
        }
        // Words the generator has not reached yet must be in their
        // untwisted form.
        let mut state = *self.state;
        untwist(&mut state);
        state[..self.cursor].copy_from_slice(&self.state[..self.cursor]);
        Mt19937::from_state(state, self.cursor)
    }

    // Same as calling `next` n times, without tempering the skipped words.
    fn skip(&mut self, mut n: u64) {
        while n > 0 {
            if self.cursor == N {
                self.regenerate();
            }
            let step = n.min((N - self.cursor) as u64);
            self.cursor += step as usize;
            n -= step;
        }
    }

    fn regenerate(&mut self) {
        twist(&mut self.state);
        self.cursor = 0;
        self.generation += 1;
    }

    // The cursor stays where it is, so the position moves back by exactly
    // one cycle.
    fn rewind(&mut self) {
        untwist(&mut self.state);
        self.generation -= 1;
    }
}
