use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FragmentOptions {
    /// Shortest fragment, in chars. Clamped to at least 1.
    pub min_len: usize,
    /// Longest fragment, in chars. Clamped to at least `min_len`.
    pub max_len: usize,
    /// Fixed seed for reproducible splits; a random one is drawn when `None`.
    pub seed: Option<u64>,
}

impl Default for FragmentOptions {
    fn default() -> Self {
        Self {
            min_len: 2,
            max_len: 19,
            seed: None,
        }
    }
}

/// Splits a text into random-length fragments, simulating a model that hands out oddly
/// chunked tokens.
///
/// Every fragment is non-empty and cut on a char boundary; only the last one may be shorter
/// than `min_len`. Concatenating the fragments gives back the input.
#[derive(Debug, Clone)]
pub struct RandomFragments<'a> {
    rest: &'a str,
    rng: StdRng,
    min_len: usize,
    max_len: usize,
    seed: u64,
}

impl<'a> RandomFragments<'a> {
    pub fn new(text: &'a str, opts: FragmentOptions) -> Self {
        let min_len = opts.min_len.max(1);
        let max_len = opts.max_len.max(min_len);
        let seed = opts.seed.unwrap_or_else(rand::random);
        Self {
            rest: text,
            rng: StdRng::seed_from_u64(seed),
            min_len,
            max_len,
            seed,
        }
    }

    /// The seed actually in use; log it to replay a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<'a> Iterator for RandomFragments<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let want = self.rng.random_range(self.min_len..=self.max_len);
        let end = self
            .rest
            .char_indices()
            .nth(want)
            .map(|(i, _)| i)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(head)
    }
}
