//! Fixture generation for the clustering property suites.
//!
//! Every fixture is derived from a layout and a seed so failing cases can be
//! replayed as rstest cases.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{Dataset, EpsBound};

use super::types::{DbscanFixture, PointLayout};

const MIN_POINTS: usize = 2;
const MAX_POINTS: usize = 48;
const MAX_DIMENSION: usize = 3;

/// Lattice spacing; a power of two so every lattice distance along an axis
/// is exact.
const LATTICE_STEP: f64 = 0.5;

pub(super) fn dbscan_fixture_strategy() -> impl Strategy<Value = DbscanFixture> {
    (any::<PointLayout>(), any::<u64>()).prop_map(|(layout, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(layout, &mut rng)
    })
}

pub(super) fn generate_fixture(layout: PointLayout, rng: &mut SmallRng) -> DbscanFixture {
    let dimension = rng.gen_range(1..=MAX_DIMENSION);
    let len = rng.gen_range(MIN_POINTS..=MAX_POINTS);
    let bound = if rng.gen_bool(0.5) {
        EpsBound::Strict
    } else {
        EpsBound::Inclusive
    };
    let min_samples = rng.gen_range(1..=5);

    let (rows, eps) = match layout {
        PointLayout::Uniform => {
            let eps = rng.gen_range(0.2..1.5);
            (uniform_rows(rng, len, dimension, 4.0), eps)
        }
        PointLayout::Blobs => blob_rows(rng, len, dimension),
        PointLayout::Lattice => (lattice_rows(rng, len, dimension), LATTICE_STEP),
        PointLayout::Duplicates => {
            let eps = rng.gen_range(0.2..1.5);
            (duplicated_rows(rng, len, dimension), eps)
        }
    };

    let dataset = Dataset::try_new(format!("{layout:?}"), rows)
        .unwrap_or_else(|err| panic!("generated rows must be valid: {err}"));
    DbscanFixture {
        layout,
        dataset,
        eps,
        min_samples,
        bound,
    }
}

fn uniform_rows(rng: &mut SmallRng, len: usize, dimension: usize, extent: f64) -> Vec<Vec<f64>> {
    (0..len)
        .map(|_| {
            (0..dimension)
                .map(|_| rng.gen_range(-extent..extent))
                .collect()
        })
        .collect()
}

fn blob_rows(rng: &mut SmallRng, len: usize, dimension: usize) -> (Vec<Vec<f64>>, f64) {
    let eps = rng.gen_range(0.3..1.0);
    let blobs = rng.gen_range(1..=4);
    let centres = uniform_rows(rng, blobs, dimension, 10.0);
    let rows = (0..len)
        .map(|_| {
            if rng.gen_bool(0.1) {
                return (0..dimension).map(|_| rng.gen_range(-12.0..12.0)).collect();
            }
            let centre = &centres[rng.gen_range(0..blobs)];
            centre
                .iter()
                .map(|value| value + rng.gen_range(-eps..eps))
                .collect()
        })
        .collect();
    (rows, eps)
}

fn lattice_rows(rng: &mut SmallRng, len: usize, dimension: usize) -> Vec<Vec<f64>> {
    (0..len)
        .map(|_| {
            (0..dimension)
                .map(|_| f64::from(rng.gen_range(-4_i32..=4)) * LATTICE_STEP)
                .collect()
        })
        .collect()
}

fn duplicated_rows(rng: &mut SmallRng, len: usize, dimension: usize) -> Vec<Vec<f64>> {
    let mut rows = uniform_rows(rng, len, dimension, 3.0);
    for index in 1..rows.len() {
        if rng.gen_bool(0.3) {
            let source = rng.gen_range(0..index);
            rows[index] = rows[source].clone();
        }
    }
    rows
}
