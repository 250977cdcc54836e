//! Seeded randomness for arena generation.
//!
//! Everything is driven by `ChaCha8Rng`, whose output is fully specified and identical
//! on every platform, so a seed always reproduces the same arena. Independent consumers
//! of the same seed read from separate ChaCha streams.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

use crate::protocol::Coord;

// Stream used to shuffle the obstacle draw order
pub const TILE_SHUFFLE_STREAM: u64 = 0;
// Stream used for obstacle heights and colour percents
pub const OBSTACLE_VISUALS_STREAM: u64 = 1;
// Stream used to shuffle the open tiles handed to spawners
pub const OPEN_TILE_SHUFFLE_STREAM: u64 = 2;
// Stream used for the random colour pair of a palette seed
pub const PALETTE_STREAM: u64 = 3;

// Create a generator for one purpose of a seed.
#[must_use]
pub fn seeded_rng(seed: u64, stream: u64) -> ChaCha8Rng {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rng.set_stream(stream);
    rng
}

// Fisher-Yates shuffle, last index down to 1
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

// Shuffle a copy of `items` with the given seed and stream.
#[must_use]
pub fn shuffled<T: Clone>(items: &[T], seed: u64, stream: u64) -> Vec<T> {
    let mut rng = seeded_rng(seed, stream);
    let mut out = items.to_vec();
    shuffle(&mut out, &mut rng);
    out
}

// ============================================================================
// Cyclic Draw Queue
// ============================================================================

/// Pre-shuffled coordinates drawn in a fixed cycle.
///
/// Each draw takes the front coordinate and requeues it at the back, so drawing more
/// coordinates than the queue holds repeats the same permutation without reshuffling.
#[derive(Debug, Clone)]
pub struct CoordQueue {
    queue: VecDeque<Coord>,
}

impl CoordQueue {
    #[must_use]
    pub fn new(coords: &[Coord], seed: u64, stream: u64) -> Self {
        Self {
            queue: shuffled(coords, seed, stream).into(),
        }
    }

    // Build from an order that has already been shuffled.
    #[must_use]
    pub fn from_order(order: Vec<Coord>) -> Self {
        Self { queue: order.into() }
    }

    // Draw the next coordinate, `None` only when the queue is empty.
    pub fn draw(&mut self) -> Option<Coord> {
        let coord = self.queue.pop_front()?;
        self.queue.push_back(coord);
        Some(coord)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    // Current cycle order, starting with the next draw
    pub fn iter(&self) -> impl Iterator<Item = &Coord> {
        self.queue.iter()
    }
}
