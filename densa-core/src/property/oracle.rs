//! Independent reference clustering used to cross-check the engine.
//!
//! Builds the full adjacency matrix up front and grows clusters with a
//! depth-first stack over core points, which reaches the same membership as
//! the engine's breadth-first worklist.

use crate::distance::euclidean_distance;

use super::types::DbscanFixture;

pub(super) fn adjacency(fixture: &DbscanFixture) -> Vec<Vec<usize>> {
    let points: Vec<&[f64]> = fixture.dataset.points().collect();
    points
        .iter()
        .map(|left| {
            points
                .iter()
                .enumerate()
                .filter(|(_, right)| {
                    let distance =
                        euclidean_distance(left, right).expect("fixture points are valid");
                    fixture.bound.admits(distance, fixture.eps)
                })
                .map(|(index, _)| index)
                .collect()
        })
        .collect()
}

pub(super) fn reference_labels(fixture: &DbscanFixture) -> Vec<i64> {
    let adjacency = adjacency(fixture);
    let core: Vec<bool> = adjacency
        .iter()
        .map(|neighbours| neighbours.len() >= fixture.min_samples)
        .collect();

    let mut labels: Vec<Option<i64>> = vec![None; adjacency.len()];
    let mut next_cluster = 0_i64;
    for seed in 0..adjacency.len() {
        if labels[seed].is_some() {
            continue;
        }
        if !core[seed] {
            labels[seed] = Some(-1);
            continue;
        }

        let cluster = next_cluster;
        next_cluster += 1;
        labels[seed] = Some(cluster);
        let mut stack = vec![seed];
        while let Some(point) = stack.pop() {
            for &neighbour in &adjacency[point] {
                if matches!(labels[neighbour], None | Some(-1)) {
                    labels[neighbour] = Some(cluster);
                    if core[neighbour] {
                        stack.push(neighbour);
                    }
                }
            }
        }
    }

    labels
        .into_iter()
        .map(|label| label.expect("every point is visited by the seed loop"))
        .collect()
}
