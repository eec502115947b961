use super::calculator::CityOdds;
use rand::SeedableRng;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;

/// Draws predicted next cities from a [`CityOdds`].
#[derive(Debug, Clone)]
pub struct OddsSampler {
    rng: StdRng,
}

impl OddsSampler {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns `None` when no city has positive weight.
    pub fn sample<'a>(&mut self, odds: &'a CityOdds) -> Option<&'a str> {
        let index = WeightedIndex::new(odds.weights()).ok()?;
        odds.name_at(index.sample(&mut self.rng))
    }

    pub fn sample_many<'a>(&mut self, odds: &'a CityOdds, draws: usize) -> Vec<&'a str> {
        let Ok(index) = WeightedIndex::new(odds.weights()) else {
            return Vec::new();
        };
        (0..draws)
            .filter_map(|_| odds.name_at(index.sample(&mut self.rng)))
            .collect()
    }
}

impl Default for OddsSampler {
    fn default() -> Self {
        Self::new()
    }
}
