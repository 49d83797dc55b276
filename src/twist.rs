use crate::mt19937::{A, LMASK, M, N, UMASK};

/// Advance a state array by one full cycle of 624 outputs.
///
/// Runs in place, so the wrapped reads of the last 397 indices see words
/// that were already twisted, exactly as the generator does one word at a
/// time.
pub fn twist(state: &mut [u32; N]) {
    for k in 0..(N - M) {
        state[k] = state[k + M] ^ mix(state[k], state[k + 1]);
    }
    for k in (N - M)..(N - 1) {
        state[k] = state[k + M - N] ^ mix(state[k], state[k + 1]);
    }
    state[N - 1] = state[M - 1] ^ mix(state[N - 1], state[0]);
}

/// Step a state array back by one full cycle, undoing [`twist`].
///
/// The low 31 bits of word 0 never take part in a twist. They are recovered
/// from words 623 and 396 of the previous array, which is exact whenever that
/// array came out of a twist itself, i.e. for every state except a freshly
/// seeded one. `twist(untwist(s)) == s` holds for any twisted `s`.
pub fn untwist(state: &mut [u32; N]) {
    for i in (0..N).rev() {
        // Top bit comes from the mix that produced word i, low bits from the
        // mix that produced word i - 1.
        let upper = unmix(state[i] ^ state[(i + M) % N]);
        let lower = unmix(state[(i + N - 1) % N] ^ state[(i + M - 1) % N]);
        state[i] = (upper & UMASK) | (lower & LMASK);
    }
}

fn mix(upper: u32, lower: u32) -> u32 {
    let y = (upper & UMASK) | (lower & LMASK);
    let mut y_a = y >> 1;
    if y & 1 > 0 {
        y_a ^= A;
    }
    y_a
}

// Recover the word y that `mix` was given. The top bit of a mixed word can
// only be set by A, which marks an odd y.
fn unmix(mixed: u32) -> u32 {
    if mixed & UMASK != 0 {
        ((mixed ^ A) << 1) | 1
    } else {
        mixed << 1
    }
}
