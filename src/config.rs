// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

use crate::errs::{
    Result,
    SkipListError,
};

/// The number of levels every skip list carries head slots for. Node heights
/// are clamped to this.
pub const MAX_LEVELS: usize = 30;

/// The chance that a node which reaches level `n` also reaches level `n + 1`.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Tunables for the level generator backing a skip list.
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Config {
    /// Promotion probability, must be in `(0, 1)`.
    probability: f64,
    /// When set, node heights are drawn from a generator seeded with this
    /// value so the shape of the list is reproducible.
    seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl Config {
    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        // written so NaN fails as well
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(SkipListError::InvalidConfig(format!(
                "probability must be in (0, 1), got {}",
                self.probability
            )));
        }
        Ok(())
    }
}
