//! RNG module - seedable piece selection
//!
//! A small LCG drives every random choice so that a seed fully determines a
//! session. The [`Spawner`] sits on top of it and keeps a one-piece lookahead
//! ("next") that the presentation layer can preview.
//!
//! Three selection policies are available:
//!
//! - [`SpawnPolicy::Uniform`]: each kind equally likely on every draw
//! - [`SpawnPolicy::Bag7`]: shuffled bags holding one of each kind
//! - [`SpawnPolicy::Cycle`]: a fixed sequence repeated forever

use serde::Deserialize;

use crate::types::PieceKind;

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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Multiply-shift reduction: uses the high bits, which are the good ones
    /// in an LCG.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

}

/// How the spawner picks kinds.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    #[default]
    Uniform,
    Bag7,
    /// Repeat the given kinds in order. An empty list falls back to uniform.
    Cycle(Vec<PieceKind>),
}

/// Piece generator with one-piece lookahead.
#[derive(Debug, Clone)]
pub struct Spawner {
    policy: SpawnPolicy,
    rng: SimpleRng,
    bag: [PieceKind; 7],
    bag_index: usize,
    cycle_index: usize,
    next: PieceKind,
}

impl Spawner {
    pub fn new(seed: u32, policy: SpawnPolicy) -> Self {
        let mut spawner = Self {
            policy,
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            // Forces a refill on the first bag draw.
            bag_index: 7,
            cycle_index: 0,
            next: PieceKind::I,
        };
        spawner.next = spawner.roll();
        spawner
    }

    fn roll(&mut self) -> PieceKind {
        match &self.policy {
            SpawnPolicy::Cycle(kinds) if !kinds.is_empty() => {
                let kind = kinds[self.cycle_index % kinds.len()];
                self.cycle_index = self.cycle_index.wrapping_add(1);
                kind
            }
            SpawnPolicy::Bag7 => {
                if self.bag_index >= 7 {
                    self.bag = PieceKind::ALL;
                    self.rng.shuffle(&mut self.bag);
                    self.bag_index = 0;
                }
                let kind = self.bag[self.bag_index];
                self.bag_index += 1;
                kind
            }
            SpawnPolicy::Uniform | SpawnPolicy::Cycle(_) => {
                PieceKind::ALL[self.rng.next_range(7) as usize]
            }
        }
    }

    /// The kind the next [`Spawner::draw`] will return.
    pub fn peek(&self) -> PieceKind {
        self.next
    }

    /// Take the lookahead piece and generate a new one behind it.
    pub fn draw(&mut self) -> PieceKind {
        let kind = self.next;
        self.next = self.roll();
        kind
    }

}
