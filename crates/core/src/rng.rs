//! RNG module - uniform piece generation and the upcoming queue
//!
//! Every draw picks a kind uniformly and independently from the configured pool.
//! There is no 7-bag here: long droughts of a kind are possible, which is a known
//! fairness gap of this generator rather than a defect.
//!
//! The upcoming queue always holds the same number of kinds: whenever the front
//! is dequeued a fresh draw is appended in the same call.

use arrayvec::ArrayVec;

use crate::types::{ShapeKind, MAX_QUEUE_LEN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales the full 32-bit output instead of taking a modulus; the low bits
    /// of a power-of-two LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Piece generator: a pool of kinds, an RNG and the fixed-length upcoming queue
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    pool: ArrayVec<ShapeKind, 7>,
    queue: ArrayVec<ShapeKind, MAX_QUEUE_LEN>,
    capacity: usize,
    rng: SimpleRng,
}

impl PieceGenerator {
    /// Create a generator drawing from `pool` with a queue of `capacity` kinds.
    ///
    /// The queue starts empty until [`initialize`](Self::initialize). Duplicate
    /// pool entries are ignored; an empty pool falls back to all seven kinds and
    /// the capacity is clamped to `1..=MAX_QUEUE_LEN`.
    pub fn new(seed: u32, pool: &[ShapeKind], capacity: usize) -> Self {
        let mut kinds = ArrayVec::new();
        for &kind in pool {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        if kinds.is_empty() {
            kinds.extend(ShapeKind::ALL);
        }

        Self {
            pool: kinds,
            queue: ArrayVec::new(),
            capacity: capacity.clamp(1, MAX_QUEUE_LEN),
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw one kind, uniformly from the pool
    pub fn next_shape(&mut self) -> ShapeKind {
        let idx = self.rng.next_range(self.pool.len() as u32) as usize;
        self.pool[idx]
    }

    /// Refill the queue from scratch to its full length
    pub fn initialize(&mut self) {
        self.queue.clear();
        while self.queue.len() < self.capacity {
            let kind = self.next_shape();
            self.queue.push(kind);
        }
    }

    /// Pop the front kind and append a fresh draw, keeping the length constant
    pub fn dequeue(&mut self) -> ShapeKind {
        if self.queue.is_empty() {
            self.initialize();
        }
        let kind = self.queue.remove(0);
        let refill = self.next_shape();
        self.queue.push(refill);
        kind
    }

    /// Upcoming kinds, front first
    pub fn upcoming(&self) -> &[ShapeKind] {
        &self.queue
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn pool(&self) -> &[ShapeKind] {
        &self.pool
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1, &ShapeKind::ALL, crate::types::DEFAULT_QUEUE_LEN)
    }
}
