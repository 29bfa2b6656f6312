//! Deterministic pseudo-random integer generation.
//!
//! The market simulation must replay identically for a given seed, so it
//! uses its own small generator rather than an OS entropy source: a linear
//! congruential generator whose raw output is whitened by a per-bit
//! majority vote across five consecutive draws.

/// A linear congruential generator with modulus 2^32, multiplier 134775813,
/// and increment 1 (Borland constants).
///
/// Implements [`Iterator`]; each step advances `state = a * state + c`
/// modulo 2^32 and yields the new state.
///
/// # Examples
///
/// ```
/// use ravl_tree::Lcg;
///
/// let mut lcg = Lcg::new(0);
/// assert_eq!(lcg.next(), Some(1));
/// assert_eq!(lcg.next(), Some(134_775_814));
/// ```
#[derive(Clone, Debug)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    const MULTIPLIER: u32 = 134_775_813;
    const INCREMENT: u32 = 1;

    /// Creates a generator starting from `seed`.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }
}

impl Iterator for Lcg {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        // Wrapping arithmetic on u32 is the mod-2^32 reduction.
        self.state = self
            .state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        Some(self.state)
    }
}

/// A deterministic source of integers in `[1, k]`.
///
/// Each call to [`next_in_range`](RandomGen::next_in_range) consumes five
/// LCG draws: the 16 least significant bits of each draw are dropped, the
/// five remaining 16-bit words vote bit-by-bit (a result bit is 1 when at
/// least three of the five words have it set), and the voted word is mapped
/// into the requested range with `% k + 1`.
///
/// # Examples
///
/// ```
/// use ravl_tree::RandomGen;
///
/// let mut a = RandomGen::new(42);
/// let mut b = RandomGen::new(42);
/// // Same seed, same sequence.
/// for _ in 0..10 {
///     assert_eq!(a.next_in_range(100), b.next_in_range(100));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct RandomGen {
    lcg: Lcg,
}

impl RandomGen {
    /// Number of LCG draws consumed per generated value.
    const DRAWS: u32 = 5;

    /// Creates a generator from a seed. Equal seeds produce equal
    /// sequences.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { lcg: Lcg::new(seed) }
    }

    /// Returns a value in `[1, k]`, advancing the internal state by five
    /// draws.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0; an empty range has no valid value.
    pub fn next_in_range(&mut self, k: usize) -> usize {
        assert!(k > 0, "next_in_range requires a non-empty range");

        let mut votes = [0u32; 16];
        for _ in 0..Self::DRAWS {
            let draw = self.lcg.next().expect("the LCG never terminates");
            let word = draw >> 16;
            for (bit, vote) in votes.iter_mut().enumerate() {
                *vote += (word >> bit) & 1;
            }
        }

        let mut voted: u32 = 0;
        for (bit, &vote) in votes.iter().enumerate() {
            if vote >= 3 {
                voted |= 1 << bit;
            }
        }

        (voted as usize) % k + 1
    }
}
