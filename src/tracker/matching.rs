//! Matching utilities for centroid tracking.

use crate::tracker::rect::{BoundingBox, Centroid, Rect};
use ndarray::Array2;

/// Cost used to square up a rectangular matrix for the LAPJV solver.
const PADDING_COST: f64 = 1e6;

/// Detection input for the tracker.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detection {
    /// Bounding box in TLBR format (xmin, ymin, xmax, ymax)
    pub bbox: Rect,
    /// Detection confidence score
    pub score: f32,
    /// Class index reported by the detector
    pub class_id: Option<usize>,
    /// Human-readable class name
    pub label: Option<String>,
}

impl Detection {
    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32, score: f32) -> Self {
        Self::from_rect(Rect::new(xmin, ymin, xmax, ymax), score)
    }

    pub fn from_rect(bbox: Rect, score: f32) -> Self {
        Self {
            bbox,
            score,
            class_id: None,
            label: None,
        }
    }

    pub fn with_class(mut self, class_id: usize, label: impl Into<String>) -> Self {
        self.class_id = Some(class_id);
        self.label = Some(label.into());
        self
    }
}

impl BoundingBox for Detection {
    fn bbox(&self) -> Rect {
        self.bbox
    }
}

/// Compute the Euclidean distance matrix between tracked and input centroids.
///
/// Returns a matrix of shape (M, N) where M is the length of `tracked`
/// and N is the length of `inputs`.
pub fn distance_matrix(tracked: &[Centroid], inputs: &[Centroid]) -> Array2<f64> {
    let mut dists = Array2::zeros((tracked.len(), inputs.len()));
    for (i, t) in tracked.iter().enumerate() {
        for (j, c) in inputs.iter().enumerate() {
            dists[[i, j]] = t.distance(c);
        }
    }
    dists
}

/// Outcome of associating matrix rows (tracked objects) with columns (inputs).
///
/// Both unmatched lists are in ascending index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_rows: Vec<usize>,
    pub unmatched_cols: Vec<usize>,
}

impl AssignmentResult {
    fn from_matches(matches: Vec<(usize, usize)>, num_rows: usize, num_cols: usize) -> Self {
        let mut row_used = vec![false; num_rows];
        let mut col_used = vec![false; num_cols];
        for &(row, col) in &matches {
            row_used[row] = true;
            col_used[col] = true;
        }

        Self {
            matches,
            unmatched_rows: unused_indices(&row_used),
            unmatched_cols: unused_indices(&col_used),
        }
    }
}

fn unused_indices(used: &[bool]) -> Vec<usize> {
    used.iter()
        .enumerate()
        .filter_map(|(i, &u)| if u { None } else { Some(i) })
        .collect()
}

fn exceeds(cost: f64, max_cost: Option<f64>) -> bool {
    max_cost.is_some_and(|max| cost > max)
}

/// Greedy closest-row-first assignment.
///
/// Rows are visited in ascending order of their minimum cost (stable, so
/// equal minima keep row order). Each row proposes the first column holding
/// its minimum; the pair is committed only if that column is still free.
/// A row whose best column was taken stays unmatched, there is no fallback
/// to its second-best column.
pub fn greedy_assignment(cost_matrix: &Array2<f64>, max_cost: Option<f64>) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 || num_cols == 0 {
        return AssignmentResult::from_matches(vec![], num_rows, num_cols);
    }

    let row_best: Vec<(usize, f64)> = cost_matrix
        .outer_iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .fold((0, f64::INFINITY), |best, (j, &d)| {
                    if d < best.1 { (j, d) } else { best }
                })
        })
        .collect();

    let mut order: Vec<usize> = (0..num_rows).collect();
    order.sort_by(|&a, &b| row_best[a].1.total_cmp(&row_best[b].1));

    let mut col_used = vec![false; num_cols];
    let mut matches = vec![];

    for row in order {
        let (col, cost) = row_best[row];
        if col_used[col] || exceeds(cost, max_cost) {
            continue;
        }
        col_used[col] = true;
        matches.push((row, col));
    }

    AssignmentResult::from_matches(matches, num_rows, num_cols)
}

/// Minimum total cost assignment using the LAPJV solver.
///
/// Returns `None` if the solver fails.
pub fn linear_assignment(
    cost_matrix: &Array2<f64>,
    max_cost: Option<f64>,
) -> Option<AssignmentResult> {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 || num_cols == 0 {
        return Some(AssignmentResult::from_matches(vec![], num_rows, num_cols));
    }

    let size = num_rows.max(num_cols);
    let mut padded = Array2::<f64>::from_elem((size, size), PADDING_COST);

    for i in 0..num_rows {
        for j in 0..num_cols {
            padded[[i, j]] = cost_matrix[[i, j]];
        }
    }

    let (row_to_col, _) = lapjv::lapjv(&padded).ok()?;

    let matches = row_to_col
        .iter()
        .enumerate()
        .filter(|&(row, &col)| row < num_rows && col < num_cols)
        .filter(|&(row, &col)| !exceeds(cost_matrix[[row, col]], max_cost))
        .map(|(row, &col)| (row, col))
        .collect();

    Some(AssignmentResult::from_matches(matches, num_rows, num_cols))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_distance_matrix_shape_and_values() {
        let tracked = [Centroid::new(0, 0), Centroid::new(10, 0)];
        let inputs = [Centroid::new(3, 4), Centroid::new(10, 0), Centroid::new(0, 0)];
        let d = distance_matrix(&tracked, &inputs);

        assert_eq!(d.dim(), (2, 3));
        assert!((d[[0, 0]] - 5.0).abs() < 1e-12);
        assert!((d[[0, 1]] - 10.0).abs() < 1e-12);
        assert_eq!(d[[1, 1]], 0.0);
        assert_eq!(d[[0, 2]], 0.0);
    }

    #[test]
    fn test_greedy_closest_row_first() {
        // Row 1 has the smallest minimum (1.0 at col 0), so it claims col 0
        // before row 0 can. Row 0 then stays unmatched even though col 1 is free.
        let cost = array![[2.0, 50.0], [1.0, 60.0]];
        let result = greedy_assignment(&cost, None);

        assert_eq!(result.matches, vec![(1, 0)]);
        assert_eq!(result.unmatched_rows, vec![0]);
        assert_eq!(result.unmatched_cols, vec![1]);
    }

    #[test]
    fn test_greedy_ties_prefer_first_seen() {
        // Equal row minima: row 0 goes first. Equal columns: col 0 is chosen.
        let cost = array![[3.0, 3.0], [3.0, 3.0]];
        let result = greedy_assignment(&cost, None);

        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_rows, vec![1]);
        assert_eq!(result.unmatched_cols, vec![1]);
    }

    #[test]
    fn test_greedy_respects_max_cost() {
        let cost = array![[1.0, 9.0], [8.0, 40.0]];
        let result = greedy_assignment(&cost, Some(5.0));

        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_rows, vec![1]);
        assert_eq!(result.unmatched_cols, vec![1]);

        // A pair exactly at the limit still matches
        let cost = array![[5.0, 9.0]];
        let result = greedy_assignment(&cost, Some(5.0));
        assert_eq!(result.matches, vec![(0, 0)]);

        let result = greedy_assignment(&cost, Some(4.999));
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_cols, vec![0, 1]);
    }

    #[test]
    fn test_greedy_empty_dimensions() {
        let cost = Array2::<f64>::zeros((0, 3));
        let result = greedy_assignment(&cost, None);
        assert!(result.matches.is_empty());
        assert_eq!(result.unmatched_cols, vec![0, 1, 2]);

        let cost = Array2::<f64>::zeros((2, 0));
        let result = greedy_assignment(&cost, None);
        assert_eq!(result.unmatched_rows, vec![0, 1]);
        assert!(result.unmatched_cols.is_empty());
    }

    #[test]
    fn test_linear_assignment_finds_global_minimum() {
        // Greedy takes (1, 0) and strands row 0; the optimal pairing uses both.
        let cost = array![[2.0, 50.0], [1.0, 60.0]];
        let result = linear_assignment(&cost, None).unwrap();

        let mut matches = result.matches.clone();
        matches.sort();
        assert_eq!(matches, vec![(0, 1), (1, 0)]);
        assert!(result.unmatched_rows.is_empty());
        assert!(result.unmatched_cols.is_empty());
    }

    #[test]
    fn test_linear_assignment_rectangular() {
        let cost = array![[0.0, 10.0, 20.0]];
        let result = linear_assignment(&cost, None).unwrap();

        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_cols, vec![1, 2]);
    }

    #[test]
    fn test_linear_assignment_respects_max_cost() {
        let cost = array![[1.0, 100.0], [100.0, 30.0]];
        let result = linear_assignment(&cost, Some(10.0)).unwrap();

        assert_eq!(result.matches, vec![(0, 0)]);
        assert_eq!(result.unmatched_rows, vec![1]);
        assert_eq!(result.unmatched_cols, vec![1]);
    }
}
