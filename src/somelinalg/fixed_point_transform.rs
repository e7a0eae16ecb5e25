use crate::somelinalg::augmented_matrix::{AugmentedMatrix, TransformedMatrix};
use crate::somelinalg::solver_errors::SolverError;
use log::{info, warn};

/// Brings A*x = b to the form x = C*x + d:
/// c_ij = -a_ij/a_ii (j != i), c_ii = 0, d_i = b_i/a_ii
pub fn to_fixed_point_form(matrix: AugmentedMatrix) -> Result<TransformedMatrix, SolverError> {
    let n = matrix.n();
    let mut rows = matrix.into_rows();
    for (i, row) in rows.iter_mut().enumerate() {
        let denominator = row[i];
        if denominator == 0.0 {
            warn!("zero diagonal element in row {}", i);
            return Err(SolverError::DivideByZero { row: i });
        }
        for el in row.iter_mut() {
            *el = -*el / denominator;
        }
        row[n] *= -1.0;
        row[i] = 0.0;
    }
    let transformed = TransformedMatrix::new(rows)?;
    let norm = transformed.row_norm();
    if norm >= 1.0 {
        warn!(
            "row norm of iteration matrix = {} >= 1, convergence is not guaranteed",
            norm
        );
    } else {
        info!("row norm of iteration matrix = {}", norm);
    }
    Ok(transformed)
}
