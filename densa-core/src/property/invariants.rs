//! Property runners shared by the proptest and rstest entry points.

use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;

use crate::{ClusteringResult, DbscanBuilder, NeighbourSearch};
#[cfg(feature = "grid")]
use crate::{Euclidean, NeighbourhoodQuery};

use super::oracle::{adjacency, reference_labels};
use super::types::DbscanFixture;

fn run(fixture: &DbscanFixture, search: NeighbourSearch) -> ClusteringResult {
    DbscanBuilder::new()
        .with_eps(fixture.eps)
        .with_min_samples(fixture.min_samples)
        .with_bound(fixture.bound)
        .with_neighbour_search(search)
        .build()
        .expect("fixture parameters are valid")
        .run(&fixture.dataset)
        .expect("fixture datasets are non-empty")
}

/// The engine agrees with the adjacency-matrix oracle label for label.
pub(super) fn run_oracle_equivalence_property(fixture: &DbscanFixture) -> TestCaseResult {
    let labels = run(fixture, NeighbourSearch::BruteForce).labels();
    prop_assert_eq!(labels, reference_labels(fixture), "layout {:?}", fixture.layout);
    Ok(())
}

/// Totality, contiguous ids in seed order and core closure.
pub(super) fn run_structural_invariants_property(fixture: &DbscanFixture) -> TestCaseResult {
    let result = run(fixture, NeighbourSearch::BruteForce);
    let labels = result.labels();
    let adjacency = adjacency(fixture);
    let is_core = |point: usize| adjacency[point].len() >= fixture.min_samples;

    prop_assert_eq!(labels.len(), fixture.dataset.len());
    prop_assert!(labels.iter().all(|&label| label >= -1));
    prop_assert!(result.seeds().windows(2).all(|pair| pair[0] < pair[1]));
    for (cluster, &seed) in result.seeds().iter().enumerate() {
        prop_assert!(is_core(seed));
        prop_assert_eq!(labels[seed], i64::try_from(cluster).expect("small"));
    }

    for (point, neighbours) in adjacency.iter().enumerate() {
        let label = labels[point];
        if is_core(point) {
            prop_assert!(label >= 0, "core point {} is noise", point);
            for &neighbour in neighbours {
                prop_assert!(labels[neighbour] >= 0, "neighbour {} of core {}", neighbour, point);
                if is_core(neighbour) {
                    prop_assert_eq!(labels[neighbour], label);
                }
            }
        } else if label >= 0 {
            prop_assert!(
                neighbours
                    .iter()
                    .any(|&neighbour| is_core(neighbour) && labels[neighbour] == label),
                "border point {} has no core neighbour in cluster {}",
                point,
                label
            );
        } else {
            prop_assert!(!neighbours.iter().any(|&neighbour| is_core(neighbour)));
        }
    }
    Ok(())
}

/// The grid index returns the brute-force neighbourhoods and labels.
#[cfg(feature = "grid")]
pub(super) fn run_grid_equivalence_property(fixture: &DbscanFixture) -> TestCaseResult {
    let brute = NeighbourhoodQuery::new(
        &fixture.dataset,
        &Euclidean,
        fixture.eps,
        fixture.bound,
        NeighbourSearch::BruteForce,
    )
    .expect("brute force always builds");
    let grid = NeighbourhoodQuery::new(
        &fixture.dataset,
        &Euclidean,
        fixture.eps,
        fixture.bound,
        NeighbourSearch::Grid,
    )
    .expect("euclidean fixtures fit the grid");
    prop_assert_eq!(grid.strategy(), NeighbourSearch::Grid);
    for point in 0..fixture.dataset.len() {
        prop_assert_eq!(
            grid.neighbours(point).expect("grid query"),
            brute.neighbours(point).expect("brute query")
        );
    }

    prop_assert_eq!(
        run(fixture, NeighbourSearch::Grid).labels(),
        run(fixture, NeighbourSearch::BruteForce).labels()
    );
    Ok(())
}

/// Repeated runs, and step-wise runs, produce identical results.
pub(super) fn run_determinism_property(fixture: &DbscanFixture) -> TestCaseResult {
    let dbscan = DbscanBuilder::new()
        .with_eps(fixture.eps)
        .with_min_samples(fixture.min_samples)
        .with_bound(fixture.bound)
        .build()
        .expect("fixture parameters are valid");
    let first = dbscan.run(&fixture.dataset).expect("first run");
    let second = dbscan.run(&fixture.dataset).expect("second run");
    let stepped = dbscan
        .steps(&fixture.dataset)
        .expect("steps start")
        .finish()
        .expect("stepped run");
    prop_assert_eq!(&first, &second);
    prop_assert_eq!(&first, &stepped);
    Ok(())
}
