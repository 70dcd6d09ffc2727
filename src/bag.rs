//! 7-bag randomizer for piece generation
//!
//! All 7 pieces are shuffled into a bag, then dealt out one at a time into a
//! fixed-depth preview queue. An exhausted bag is replaced by a fresh shuffle.

use crate::tetromino::TetrominoType;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// Number of upcoming pieces kept visible
pub const PREVIEW_DEPTH: usize = 3;

const BAG_SIZE: usize = 7;

/// The 7-bag piece randomizer with its preview queue
#[derive(Debug, Clone)]
pub struct Bag {
    /// The current shuffled permutation
    bag: [TetrominoType; BAG_SIZE],
    /// How many pieces of `bag` have been dealt
    drawn: usize,
    /// Upcoming pieces, front first; always full
    queue: [TetrominoType; PREVIEW_DEPTH],
    rng: ChaCha8Rng,
}

impl Default for Bag {
    fn default() -> Self {
        Self::new()
    }
}

impl Bag {
    /// Create a bag seeded from system entropy
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a deterministic bag from a seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a bag drawing from the given random source
    pub fn with_rng(rng: ChaCha8Rng) -> Self {
        let mut bag = Self {
            bag: TetrominoType::all(),
            drawn: BAG_SIZE,
            queue: [TetrominoType::I; PREVIEW_DEPTH],
            rng,
        };
        for _ in 0..PREVIEW_DEPTH {
            bag.refill();
        }
        bag
    }

    /// A uniformly shuffled permutation of all 7 kinds
    pub fn new_bag(&mut self) -> [TetrominoType; BAG_SIZE] {
        let mut new_bag = TetrominoType::all();
        new_bag.shuffle(&mut self.rng);
        new_bag
    }

    /// Deal one piece into the back of the queue, reshuffling if the bag ran dry
    fn refill(&mut self) {
        if self.drawn == BAG_SIZE {
            self.bag = self.new_bag();
            self.drawn = 0;
        }
        self.queue.rotate_left(1);
        self.queue[PREVIEW_DEPTH - 1] = self.bag[self.drawn];
        self.drawn += 1;
    }

    /// Take the front of the queue and deal a replacement behind it
    pub fn next(&mut self) -> TetrominoType {
        let piece = self.queue[0];
        self.refill();
        piece
    }

    /// The upcoming pieces, front first
    pub fn preview(&self) -> Vec<TetrominoType> {
        self.queue.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_bag_contains_all_pieces() {
        let mut bag = Bag::with_seed(7);
        for _ in 0..20 {
            let generated = bag.new_bag();
            assert_eq!(generated.len(), 7);
            let unique: HashSet<_> = generated.iter().collect();
            assert_eq!(unique.len(), 7);
        }
    }

    #[test]
    fn test_each_dealt_bag_is_a_permutation() {
        let mut bag = Bag::with_seed(42);
        for _ in 0..10 {
            let dealt: HashSet<_> = (0..7).map(|_| bag.next()).collect();
            assert_eq!(dealt.len(), 7);
        }
    }

    #[test]
    fn test_preview_depth_is_kept() {
        let mut bag = Bag::with_seed(1);
        assert_eq!(bag.preview().len(), PREVIEW_DEPTH);
        for _ in 0..100 {
            let expected = bag.preview()[0];
            assert_eq!(bag.next(), expected);
            assert_eq!(bag.preview().len(), PREVIEW_DEPTH);
        }
    }

    #[test]
    fn test_next_shifts_queue_forward() {
        let mut bag = Bag::with_seed(99);
        for _ in 0..30 {
            let before = bag.preview();
            let dealt = bag.next();
            let after = bag.preview();
            assert_eq!(dealt, before[0]);
            assert_eq!(after[..PREVIEW_DEPTH - 1], before[1..]);
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Bag::with_seed(2024);
        let mut b = Bag::with_seed(2024);
        let seq_a: Vec<_> = (0..28).map(|_| a.next()).collect();
        let seq_b: Vec<_> = (0..28).map(|_| b.next()).collect();
        assert_eq!(seq_a, seq_b);
    }
}
