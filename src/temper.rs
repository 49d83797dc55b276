use crate::bits::{Bits32, WIDTH};
use crate::mt19937::{B, C, L, S, T, U};

/// Temper a raw state word into the output the generator emits.
pub fn harden(raw: Bits32) -> Bits32 {
    let mut y = raw ^ (raw >> U);
    y = y ^ ((y << S) & Bits32::from_word(B));
    y = y ^ ((y << T) & Bits32::from_word(C));
    y ^ (y >> L)
}

/// Recover the raw state word behind an emitted output.
pub fn unharden(tempered: Bits32) -> Bits32 {
    let mut y = invert_right_shift_xor(tempered, L);
    y = BitGraph::for_left_shift(T, Bits32::from_word(C)).solve(y);
    y = BitGraph::for_left_shift(S, Bits32::from_word(B)).solve(y);
    invert_right_shift_xor(y, U)
}

pub fn temper(raw: u32) -> u32 {
    harden(Bits32::from_word(raw)).to_word()
}

pub fn untemper(tempered: u32) -> u32 {
    unharden(Bits32::from_word(tempered)).to_word()
}

// Reversing x = y ^ (y >> shift). With index 0 as the most significant bit:
//      x[i] = y[i]                  for i < shift
//      x[i] = y[i] ^ y[i - shift]   for i >= shift
// so walking from the top, every y[i - shift] is known by the time y[i] is
// needed.
fn invert_right_shift_xor(x: Bits32, shift: u32) -> Bits32 {
    let shift = shift as usize;
    let mut y = x;
    for i in shift..WIDTH {
        y = y.with_bit(i, x.bit(i) ^ y.bit(i - shift));
    }
    y
}

/// Dependencies between bit positions when reversing
///     x = y ^ ((y << shift) & mask).
///
/// Bitwise this is x[i] = y[i] ^ (y[i + shift] & mask[i]). A position whose
/// mask bit is clear, or whose source lies past the end of the word, was
/// left untouched and is a root. Every other position needs y[i + shift]
/// first. Each position has at most one dependency and one dependent, so
/// the graph is a set of chains ending in roots, none longer than
/// ceil(32 / shift).
struct BitGraph {
    depends_on: [Option<usize>; WIDTH],
    dependent: [Option<usize>; WIDTH],
}

impl BitGraph {
    fn for_left_shift(shift: u32, mask: Bits32) -> Self {
        let shift = shift as usize;
        let depends_on: [Option<usize>; WIDTH] = std::array::from_fn(|i| {
            let source = i + shift;
            (source < WIDTH && mask.bit(i) == 1).then_some(source)
        });
        let mut dependent = [None; WIDTH];
        for (i, source) in depends_on.iter().enumerate() {
            if let Some(source) = source {
                dependent[*source] = Some(i);
            }
        }
        Self {
            depends_on,
            dependent,
        }
    }

    /// Resolve every position by propagating from the roots, one layer of
    /// the graph at a time.
    fn solve(&self, observed: Bits32) -> Bits32 {
        let mut recovered = observed;
        let mut layer: Vec<usize> = (0..WIDTH)
            .filter(|&i| self.depends_on[i].is_none())
            .collect();
        while !layer.is_empty() {
            let mut next_layer = Vec::with_capacity(layer.len());
            for &resolved in &layer {
                if let Some(i) = self.dependent[resolved] {
                    recovered = recovered.with_bit(i, observed.bit(i) ^ recovered.bit(resolved));
                    next_layer.push(i);
                }
            }
            layer = next_layer;
        }
        recovered
    }

    /// Number of layers `solve` walks through.
    #[cfg(test)]
    fn depth(&self) -> usize {
        (0..WIDTH)
            .filter(|&i| self.depends_on[i].is_none())
            .map(|root| {
                let mut length = 1;
                let mut node = root;
                while let Some(next) = self.dependent[node] {
                    length += 1;
                    node = next;
                }
                length
            })
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;
    use rstest::rstest;

    proptest! {
        #[test]
        fn unharden_inverts_harden(x in any::<u32>()) {
            prop_assert_eq!(untemper(temper(x)), x);
        }

        #[test]
        fn harden_inverts_unharden(x in any::<u32>()) {
            prop_assert_eq!(temper(untemper(x)), x);
        }
    }

    #[rstest]
    #[case(0)]
    #[case(u32::MAX)]
    #[case(B)]
    #[case(C)]
    #[case(0x8000_0001)]
    fn tempering_round_trips_edge_words(#[case] word: u32) {
        assert_eq!(untemper(temper(word)), word);
        assert_eq!(temper(untemper(word)), word);
    }

    #[rstest]
    #[case(S, B)]
    #[case(T, C)]
    fn masked_step_is_inverted_by_graph(#[case] shift: u32, #[case] mask: u32) {
        let graph = BitGraph::for_left_shift(shift, Bits32::from_word(mask));

        for y in [0u32, 1, 0xdead_beef, 0x1234_5678, u32::MAX] {
            let x = y ^ ((y << shift) & mask);
            assert_eq!(graph.solve(Bits32::from_word(x)).to_word(), y);
        }
    }

    #[rstest]
    #[case(S, B)]
    #[case(T, C)]
    #[case(1, u32::MAX)]
    fn graph_depth_is_bounded_by_shift(#[case] shift: u32, #[case] mask: u32) {
        let graph = BitGraph::for_left_shift(shift, Bits32::from_word(mask));

        assert!(graph.depth() <= WIDTH.div_ceil(shift as usize));
    }

    #[rstest]
    #[case(U)]
    #[case(L)]
    fn right_shift_step_is_inverted_in_closed_form(#[case] shift: u32) {
        for y in [0u32, 1, 0xdead_beef, 0x8000_0000, u32::MAX] {
            let x = Bits32::from_word(y ^ (y >> shift));
            assert_eq!(invert_right_shift_xor(x, shift).to_word(), y);
        }
    }
}
