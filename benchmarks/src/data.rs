//! Seeded synthetic horse records.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stride_regression::dataset::HorseRecord;
use stride_regression::{Dataset, Observation};

/// Generates records from `distance = c0 + c1·sps + c2·sl + noise` with
/// uniform noise in `[-noise, noise]`.
#[derive(Debug, Clone)]
pub struct SyntheticHorses {
    rng: StdRng,
    pub coefficients: [f64; 3],
    pub noise: f64,
}

impl SyntheticHorses {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            coefficients: [-12.0, 4.0, 1.5],
            noise: 0.4,
        }
    }

    pub fn with_coefficients(mut self, coefficients: [f64; 3]) -> Self {
        self.coefficients = coefficients;
        self
    }

    pub fn with_noise(mut self, noise: f64) -> Self {
        self.noise = noise;
        self
    }

    pub fn observation(&mut self) -> Observation {
        let sps = self.rng.gen_range(2.0..2.6);
        let sl = self.rng.gen_range(6.8..8.2);
        let noise = if self.noise > 0.0 {
            self.rng.gen_range(-self.noise..=self.noise)
        } else {
            0.0
        };
        let [c0, c1, c2] = self.coefficients;
        Observation::new(sps, sl, c0 + c1 * sps + c2 * sl + noise)
    }

    /// `n` observations for a single group.
    ///
    /// # Panics
    /// If the configured coefficients or noise produce a non-finite outcome.
    pub fn dataset(&mut self, n: usize) -> Dataset {
        let observations: Vec<Observation> = (0..n).map(|_| self.observation()).collect();
        Dataset::new(observations).expect("generator coefficients and noise must be finite")
    }

    /// `n` records with ages drawn from 2..=8, so a few fall outside both groups.
    pub fn records(&mut self, n: usize) -> Vec<HorseRecord> {
        (0..n)
            .map(|_| {
                let age = self.rng.gen_range(2..=8);
                let o = self.observation();
                HorseRecord {
                    age,
                    sps_avg: o.predictor1,
                    sl_avg: o.predictor2,
                    distance: o.outcome,
                }
            })
            .collect()
    }
}
