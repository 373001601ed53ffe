// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use rand::prelude::*;

use crate::{
    config::{
        Config,
        DEFAULT_PROBABILITY,
        MAX_LEVELS,
    },
    errs::{
        Result,
        SkipListError,
    },
};

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a `LevelGenerator`.
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist for this level
    /// generator.
    fn total(&self) -> usize;
    /// Generate a random level for a new node in the range `[0, total)`.
    ///
    /// This must never return a level that is `>= self.total()`.
    fn random(&mut self) -> usize;
}

/// A level generator which will produce geometrically distributed numbers.
///
/// Starting from the bottom level, a node is promoted one level at a time for
/// as long as a coin weighted with `p` comes up heads, and never past the top
/// level.
#[derive(Debug, Clone)]
pub struct GeometricalLevelGenerator {
    total: usize,
    p: f64,
    rng: SmallRng, // Fast generator
}

impl GeometricalLevelGenerator {
    /// Create a new GeometricalLevelGenerator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level.
    ///
    /// `p` must be between 0 and 1 and `total` must be at least 1, anything
    /// else is rejected.
    pub fn new(total: usize, p: f64) -> Result<Self> {
        Self::build(total, &Config::default().with_probability(p))
    }

    /// Create a generator over [`MAX_LEVELS`] levels from a [`Config`].
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::build(MAX_LEVELS, config)
    }

    fn build(total: usize, config: &Config) -> Result<Self> {
        if total == 0 {
            return Err(SkipListError::InvalidConfig(
                "total levels must be non-zero".to_string(),
            ));
        }
        config.validate()?;

        let rng = match config.seed() {
            | Some(seed) => SmallRng::seed_from_u64(seed),
            | None => SmallRng::from_entropy(),
        };

        Ok(GeometricalLevelGenerator {
            total,
            p: config.probability(),
            rng,
        })
    }
}

impl Default for GeometricalLevelGenerator {
    fn default() -> Self {
        GeometricalLevelGenerator {
            total: MAX_LEVELS,
            p: DEFAULT_PROBABILITY,
            rng: SmallRng::from_entropy(),
        }
    }
}

impl LevelGenerator for GeometricalLevelGenerator {
    fn random(&mut self) -> usize {
        let mut h = 0;
        while h + 1 < self.total && self.rng.gen_bool(self.p) {
            h += 1;
        }
        h
    }

    fn total(&self) -> usize {
        self.total
    }
}
