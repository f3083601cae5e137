//! Uniform grid index for axis-bounded metrics.
//!
//! Points are bucketed by `floor(x_k / width)` on every axis. For an
//! axis-bounded metric any point within `eps` of a query differs by at most
//! `eps` on each axis, so it sits in one of the `3^D` cells around the query's
//! cell. Candidates from those cells are sorted ascending before filtering,
//! which keeps results identical to the brute-force scan.

use std::collections::HashMap;

use crate::dataset::Dataset;

/// Highest dimension the grid will index; `3^6 = 729` cells per query.
pub const GRID_MAX_DIMENSION: usize = 6;

/// Smallest dataset for which `NeighbourSearch::Auto` picks the grid.
pub const GRID_MIN_ITEMS: usize = 256;

/// Cells are a hair wider than `eps` so rounding in `x / width` cannot push a
/// true neighbour two cells away.
const CELL_SLACK: f64 = 1.000_001;

type CellKey = Vec<i64>;

#[derive(Debug)]
pub(crate) struct GridIndex {
    width: f64,
    cells: HashMap<CellKey, Vec<usize>>,
    offsets: Vec<Vec<i64>>,
}

impl GridIndex {
    pub(crate) fn build(dataset: &Dataset, eps: f64) -> Self {
        let width = eps * CELL_SLACK;
        let mut cells: HashMap<CellKey, Vec<usize>> = HashMap::new();
        for (index, point) in dataset.points().enumerate() {
            cells.entry(cell_of(point, width)).or_default().push(index);
        }
        Self {
            width,
            cells,
            offsets: neighbour_offsets(dataset.dimension()),
        }
    }

    /// Every indexed point in the cells surrounding `origin`, ascending and
    /// without repeats.
    pub(crate) fn candidates(&self, origin: &[f64]) -> Vec<usize> {
        let centre = cell_of(origin, self.width);
        let mut found = Vec::new();
        let mut key = centre.clone();
        for offset in &self.offsets {
            for ((slot, base), delta) in key.iter_mut().zip(&centre).zip(offset) {
                *slot = base.saturating_add(*delta);
            }
            if let Some(members) = self.cells.get(&key) {
                found.extend_from_slice(members);
            }
        }
        // Saturated keys make distinct offsets land on the same cell.
        found.sort_unstable();
        found.dedup();
        found
    }

    #[cfg(test)]
    pub(crate) fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}

// `as` saturates, so far-out coordinates share the outermost cell.
fn cell_of(point: &[f64], width: f64) -> CellKey {
    point
        .iter()
        .map(|coordinate| (coordinate / width).floor() as i64)
        .collect()
}

/// All `{-1, 0, 1}^dimension` offset vectors.
fn neighbour_offsets(dimension: usize) -> Vec<Vec<i64>> {
    let mut offsets = vec![Vec::with_capacity(dimension)];
    for _ in 0..dimension {
        offsets = offsets
            .into_iter()
            .flat_map(|prefix| {
                [-1_i64, 0, 1].into_iter().map(move |delta| {
                    let mut next = prefix.clone();
                    next.push(delta);
                    next
                })
            })
            .collect();
    }
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 3)]
    #[case(2, 9)]
    #[case(3, 27)]
    fn offsets_cover_the_neighbouring_cells(#[case] dimension: usize, #[case] expected: usize) {
        let offsets = neighbour_offsets(dimension);
        assert_eq!(offsets.len(), expected);
        assert!(offsets.iter().all(|offset| offset.len() == dimension));
        assert!(offsets.contains(&vec![0; dimension]));
    }

    #[test]
    fn candidates_are_sorted_and_local() {
        let dataset = Dataset::try_new(
            "grid",
            vec![[5.0, 5.0], [0.1, 0.1], [0.9, 0.2], [-0.5, 0.0], [3.0, 0.0]],
        )
        .expect("valid rows");
        let grid = GridIndex::build(&dataset, 1.0);
        assert_eq!(grid.candidates(&[0.1, 0.1]), vec![1, 2, 3]);
        assert_eq!(grid.occupied_cells(), 4);
    }

    #[rstest]
    #[case::positive_edge(1e9, i64::MAX)]
    #[case::negative_edge(-1e9, i64::MIN)]
    fn saturated_cells_yield_each_candidate_once(#[case] far: f64, #[case] key: i64) {
        let dataset = Dataset::try_new("edge", vec![[far], [5.0]]).expect("valid rows");
        let grid = GridIndex::build(&dataset, 1e-10);
        assert_eq!(cell_of(&[far], grid.width), vec![key]);
        assert_eq!(grid.candidates(&[far]), vec![0]);
    }

    #[test]
    fn negative_coordinates_floor_downwards() {
        assert_eq!(cell_of(&[-0.5, 0.5], 1.0), vec![-1, 0]);
    }
}
