//! The random source threaded through every synthesis call.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Bounded random draws used by the value generators.
pub trait RandomSource {
    fn next_u32(&mut self) -> u32;

    fn next_u64(&mut self) -> u64;

    /// Uniform in `[0, bound)`. A zero bound yields 0.
    fn next_below(&mut self, bound: u64) -> u64;

    /// Uniform in `[0.0, 1.0)`.
    fn next_unit(&mut self) -> f64;

    fn next_bool(&mut self) -> bool;
}

/// Adapts any `rand` generator.
pub struct RngSource<R> {
    rng: R,
}

impl<R: RngCore> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> RandomSource for RngSource<R> {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn next_below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }

    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    fn next_bool(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

/// Replays a fixed script of integers; every draw consumes one entry, and an
/// exhausted script keeps answering 0.
///
/// Integer draws reduce the entry modulo the bound, `next_unit` divides it by
/// 1000 and `next_bool` tests it for non-zero.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    script: VecDeque<u64>,
}

impl ScriptedSource {
    pub fn new(script: impl IntoIterator<Item = u64>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    fn next(&mut self) -> u64 {
        self.script.pop_front().unwrap_or(0)
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for ScriptedSource {
    fn next_u32(&mut self) -> u32 {
        self.next() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.next()
    }

    fn next_below(&mut self, bound: u64) -> u64 {
        let value = self.next();
        if bound == 0 {
            0
        } else {
            value % bound
        }
    }

    fn next_unit(&mut self) -> f64 {
        (self.next() % 1000) as f64 / 1000.0
    }

    fn next_bool(&mut self) -> bool {
        self.next() != 0
    }
}
