#![allow(dead_code, reason = "each test binary uses a different subset")]

use densa_core::{Dataset, EpsBound};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use serde::Deserialize;

const SCENARIOS: &str = include_str!("../fixtures/scenarios.json");

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundFixture {
    Strict,
    Inclusive,
}

impl From<BoundFixture> for EpsBound {
    fn from(value: BoundFixture) -> Self {
        match value {
            BoundFixture::Strict => Self::Strict,
            BoundFixture::Inclusive => Self::Inclusive,
        }
    }
}

/// Hand-checked clustering case loaded from `fixtures/scenarios.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub eps: f64,
    pub min_samples: usize,
    pub bound: BoundFixture,
    pub points: Vec<Vec<f64>>,
    pub expected: Vec<i64>,
}

impl Scenario {
    #[must_use]
    pub fn dataset(&self) -> Dataset {
        Dataset::try_new(self.name.as_str(), self.points.clone()).expect("fixture rows are valid")
    }
}

#[must_use]
pub fn scenarios() -> Vec<Scenario> {
    serde_json::from_str(SCENARIOS).expect("scenario fixture must parse")
}

#[must_use]
pub fn scenario(name: &str) -> Scenario {
    scenarios()
        .into_iter()
        .find(|scenario| scenario.name == name)
        .unwrap_or_else(|| panic!("scenario `{name}` must exist"))
}

/// Gaussian-ish blobs around random centres, deterministic for `seed`.
#[must_use]
pub fn blobs(seed: u64, centres: usize, per_centre: usize, dimension: usize) -> Dataset {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(centres * per_centre);
    for _ in 0..centres {
        let centre: Vec<f64> = (0..dimension).map(|_| rng.gen_range(-10.0..10.0)).collect();
        for _ in 0..per_centre {
            rows.push(
                centre
                    .iter()
                    .map(|value| value + rng.gen_range(-0.5..0.5))
                    .collect::<Vec<f64>>(),
            );
        }
    }
    Dataset::try_new(format!("blobs-{seed}"), rows).expect("generated rows are valid")
}
