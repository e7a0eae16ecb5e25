//! Reordering of equations to get a diagonally dominant matrix.
//!
//! Row i may take diagonal position j if |a_ij| >= sum_{k != j} |a_ik|, which is the same as
//! sum_k |a_ik| - 2|a_ij| <= 0. These pairs form a bipartite graph rows -> columns, and a
//! suitable reordering exists iff the graph has a perfect matching. The matching is found
//! with Kuhn's augmenting path algorithm.
use crate::somelinalg::augmented_matrix::AugmentedMatrix;
use crate::somelinalg::solver_errors::SolverError;
use log::{info, warn};

/// column j is an admissible diagonal position for row i
pub fn is_eligible(row: &[f64], n: usize, j: usize) -> bool {
    let sum: f64 = row[..n].iter().map(|a| a.abs()).sum();
    // ties allowed: non-strict dominance is fine
    sum - 2.0 * row[j].abs() <= 0.0
}

/// bipartite graph: for every row the list of admissible diagonal columns, ascending
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityGraph {
    adjacency: Vec<Vec<usize>>,
}

impl EligibilityGraph {
    pub fn new(matrix: &AugmentedMatrix) -> EligibilityGraph {
        let n = matrix.n();
        let adjacency = matrix
            .rows()
            .iter()
            .map(|row| (0..n).filter(|&j| is_eligible(row, n, j)).collect())
            .collect();
        EligibilityGraph { adjacency }
    }
    pub fn n(&self) -> usize {
        self.adjacency.len()
    }
    pub fn columns_of(&self, row: usize) -> &[usize] {
        &self.adjacency[row]
    }
    pub fn number_of_edges(&self) -> usize {
        self.adjacency.iter().map(|cols| cols.len()).sum()
    }
}

/// perfect matching: diagonal position j is taken by original row row_of[j]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    row_of: Vec<usize>,
}

impl Permutation {
    /// original row placed at diagonal position j
    pub fn row_for_position(&self, j: usize) -> usize {
        self.row_of[j]
    }
    pub fn as_slice(&self) -> &[usize] {
        &self.row_of
    }
    pub fn is_identity(&self) -> bool {
        self.row_of.iter().enumerate().all(|(j, &i)| i == j)
    }
    /// returns a new matrix with independent copies of the reordered rows
    pub fn apply(&self, matrix: &AugmentedMatrix) -> Result<AugmentedMatrix, SolverError> {
        if self.row_of.len() != matrix.n() {
            return Err(SolverError::InvalidInput(format!(
                "permutation of {} rows applied to matrix with {} rows",
                self.row_of.len(),
                matrix.n()
            )));
        }
        let rows = (0..self.row_of.len())
            .map(|j| matrix.row(self.row_for_position(j)).to_vec())
            .collect();
        AugmentedMatrix::new(rows)
    }
}

/// Kuhn's algorithm over the eligibility graph
pub struct DominanceMatcher<'a> {
    graph: &'a EligibilityGraph,
    /// row currently matched to the column
    match_of: Vec<Option<usize>>,
}

impl<'a> DominanceMatcher<'a> {
    pub fn new(graph: &'a EligibilityGraph) -> DominanceMatcher<'a> {
        DominanceMatcher {
            graph,
            match_of: vec![None; graph.n()],
        }
    }
    /// depth-first search of augmenting path starting from row v
    fn try_kuhn(&mut self, v: usize, visited: &mut [bool]) -> bool {
        if visited[v] {
            return false;
        }
        visited[v] = true;
        let graph = self.graph;
        for &to in graph.columns_of(v) {
            let current = self.match_of[to];
            let can_take = match current {
                None => true,
                Some(u) => self.try_kuhn(u, visited),
            };
            if can_take {
                self.match_of[to] = Some(v);
                return true;
            }
        }
        false
    }
    /// perfect matching or None
    pub fn find_matching(mut self) -> Option<Permutation> {
        let n = self.graph.n();
        for v in 0..n {
            let mut visited = vec![false; n];
            self.try_kuhn(v, &mut visited);
        }
        let row_of: Option<Vec<usize>> = self.match_of.into_iter().collect();
        row_of.map(|row_of| Permutation { row_of })
    }
}

/// permutation of rows making the matrix diagonally dominant
pub fn find_dominant_permutation(matrix: &AugmentedMatrix) -> Result<Permutation, SolverError> {
    let graph = EligibilityGraph::new(matrix);
    info!(
        "eligibility graph: {} rows, {} edges",
        graph.n(),
        graph.number_of_edges()
    );
    match DominanceMatcher::new(&graph).find_matching() {
        Some(permutation) => {
            if permutation.is_identity() {
                info!("matrix is diagonally dominant without reordering");
            } else {
                info!("diagonal dominance achieved, rows order {:?}", permutation.as_slice());
            }
            Ok(permutation)
        }
        None => {
            warn!("no perfect matching between rows and diagonal positions");
            Err(SolverError::Infeasible)
        }
    }
}

/// reorders rows into a diagonally dominant matrix
pub fn make_diagonally_dominant(
    matrix: &AugmentedMatrix,
) -> Result<(Permutation, AugmentedMatrix), SolverError> {
    let permutation = find_dominant_permutation(matrix)?;
    let permuted = permutation.apply(matrix)?;
    Ok((permutation, permuted))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dominant_matrix(n: usize) -> AugmentedMatrix {
        let rows = (0..n)
            .map(|i| {
                let mut row: Vec<f64> = (0..=n).map(|j| ((i + 2 * j) % 5) as f64 - 2.0).collect();
                let off: f64 = (0..n).filter(|&j| j != i).map(|j| row[j].abs()).sum();
                row[i] = off + 1.0;
                row
            })
            .collect();
        AugmentedMatrix::new(rows).unwrap()
    }

    #[test]
    fn test_eligibility_ties() {
        // 2 - 2*1 = 0 passes
        assert!(is_eligible(&[1.0, 1.0, 5.0], 2, 0));
        assert!(is_eligible(&[1.0, 1.0, 5.0], 2, 1));
        // right-hand side does not count
        assert!(is_eligible(&[3.0, -1.0, 100.0], 2, 0));
        assert!(!is_eligible(&[3.0, -1.0, 100.0], 2, 1));
        // nothing dominates
        let row = [1.0, 1.0, 1.0, 0.0];
        assert!((0..3).all(|j| !is_eligible(&row, 3, j)));
    }

    #[test]
    fn test_graph() {
        let matrix = AugmentedMatrix::new(vec![vec![1.0, 1.0, 5.0], vec![1.0, 3.0, 7.0]]).unwrap();
        let graph = EligibilityGraph::new(&matrix);
        assert_eq!(graph.columns_of(0), &[0, 1]);
        assert_eq!(graph.columns_of(1), &[1]);
        assert_eq!(graph.number_of_edges(), 3);
    }

    #[test]
    fn test_dominant_gives_identity() {
        for n in 1..=20 {
            let matrix = dominant_matrix(n);
            let permutation = find_dominant_permutation(&matrix).unwrap();
            assert!(permutation.is_identity(), "n = {}", n);
            assert_eq!(permutation.as_slice(), (0..n).collect::<Vec<usize>>().as_slice());
        }
    }

    #[test]
    fn test_swapped_rows() {
        let matrix = AugmentedMatrix::new(vec![
            vec![1.0, 5.0, 1.0, 1.0],
            vec![1.0, 1.0, 6.0, 2.0],
            vec![7.0, 2.0, 1.0, 3.0],
        ])
        .unwrap();
        let (permutation, permuted) = make_diagonally_dominant(&matrix).unwrap();
        assert_eq!(permutation.as_slice(), &[2, 0, 1]);
        assert_eq!(permutation.row_for_position(0), 2);
        assert!(!permutation.is_identity());
        assert_eq!(
            permuted.rows(),
            &[
                vec![7.0, 2.0, 1.0, 3.0],
                vec![1.0, 5.0, 1.0, 1.0],
                vec![1.0, 1.0, 6.0, 2.0],
            ]
        );
    }

    #[test]
    fn test_augmenting_path_reassigns() {
        // row 0 takes column 0 first, row 1 can only use column 0, so row 0 has to move to column 1
        let matrix = AugmentedMatrix::new(vec![vec![1.0, 1.0, 0.0], vec![4.0, 1.0, 0.0]]).unwrap();
        let (permutation, permuted) = make_diagonally_dominant(&matrix).unwrap();
        assert_eq!(permutation.as_slice(), &[1, 0]);
        assert_eq!(permuted.row(0), &[4.0, 1.0, 0.0]);
        assert_eq!(permuted.row(1), &[1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_infeasible() {
        let matrix = AugmentedMatrix::new(vec![
            vec![1.0, 1.0, 1.0, 1.0],
            vec![5.0, 1.0, 1.0, 1.0],
            vec![1.0, 1.0, 5.0, 1.0],
        ])
        .unwrap();
        assert_eq!(find_dominant_permutation(&matrix), Err(SolverError::Infeasible));
        // every row wants the same column
        let matrix = AugmentedMatrix::new(vec![vec![5.0, 1.0, 1.0], vec![5.0, 1.0, 1.0]]).unwrap();
        assert_eq!(
            make_diagonally_dominant(&matrix).map(|(p, _)| p),
            Err(SolverError::Infeasible)
        );
    }

    #[test]
    fn test_permuted_rows_are_copies() {
        let matrix = AugmentedMatrix::new(vec![vec![1.0, 4.0, 1.0], vec![3.0, 1.0, 2.0]]).unwrap();
        let (_, permuted) = make_diagonally_dominant(&matrix).unwrap();
        let mut rows = permuted.into_rows();
        rows[0][0] = 100.0;
        assert_eq!(matrix.row(1), &[3.0, 1.0, 2.0]);
        assert_eq!(matrix.row(0), &[1.0, 4.0, 1.0]);
    }

    #[test]
    fn test_determinism() {
        let matrix = AugmentedMatrix::new(vec![
            vec![2.0, 2.0, 0.0, 1.0],
            vec![2.0, 2.0, 0.0, 1.0],
            vec![0.0, 0.0, 3.0, 1.0],
        ])
        .unwrap();
        let first = find_dominant_permutation(&matrix).unwrap();
        let second = find_dominant_permutation(&matrix).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.as_slice(), &[1, 0, 2]);
    }
}
