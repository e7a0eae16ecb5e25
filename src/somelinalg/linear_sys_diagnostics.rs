use crate::somelinalg::augmented_matrix::AugmentedMatrix;
use log::{info, warn};
use nalgebra::{DMatrix, DVector};
/// Rouché–Capelli theorem: the system A*x = b has a solution if and only if rank(A) == rank([A b]).
pub fn Rouche_Capelli_theorem(matrix: &AugmentedMatrix) -> bool {
    let n = matrix.n();
    let Ab = DMatrix::from_fn(n, n + 1, |i, j| matrix.row(i)[j]);
    let A = matrix.coefficients();
    let eps = 1e3 * f64::EPSILON; // tolerance for rank calculation
    let rank_A = A.rank(eps);
    let rank_Ab = Ab.rank(eps);

    let result = rank_A == rank_Ab;
    if !result {
        warn!(
            "The system has no solution. rank(A) = {} != rank([A b]) = {}",
            rank_A, rank_Ab
        );
    }
    result
}
pub fn is_singular(matrix: &AugmentedMatrix, epsilon: f64) -> bool {
    let det = matrix.coefficients().determinant();
    let is_singular = det.abs() < epsilon; // tolerance for singularity check
    if is_singular {
        warn!("Matrix is singular. Determinant = {:.8}", det);
    }
    is_singular
}
/// every row satisfies |a_ii| >= sum_{j != i} |a_ij|
pub fn is_diagonally_dominant(matrix: &AugmentedMatrix) -> bool {
    let n = matrix.n();
    matrix.rows().iter().enumerate().all(|(i, row)| {
        let off_diagonal: f64 = (0..n).filter(|&j| j != i).map(|j| row[j].abs()).sum();
        row[i].abs() >= off_diagonal
    })
}
/// ||A*x - b||_inf
pub fn residual_norm(matrix: &AugmentedMatrix, solution: &[f64]) -> f64 {
    let x = DVector::from_column_slice(solution);
    let residual = matrix.coefficients() * x - matrix.rhs();
    residual.amax()
}
/// checks before solving: the system must be consistent and not singular
pub fn linear_system_diagnostics(matrix: &AugmentedMatrix, threshold: f64) -> bool {
    if Rouche_Capelli_theorem(matrix) {
        if is_singular(matrix, threshold) {
            warn!("The system of linear equations has a solution, but the matrix is singular.");
            false
        } else {
            info!("The system of linear equations has a unique solution.");
            true
        }
    } else {
        warn!("The system of linear equations does not have a solution.");
        false
    }
}
