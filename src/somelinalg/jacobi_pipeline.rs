//! Full pipeline of the simple iteration method:
//! [A | b] -> reordering for diagonal dominance -> fixed-point form x = C*x + d -> iterations.
//! Pure function of (matrix, epsilon), no I/O. Intermediate matrices are kept in the report.
use crate::somelinalg::augmented_matrix::{AugmentedMatrix, TransformedMatrix};
use crate::somelinalg::diag_dominance::{Permutation, make_diagonally_dominant};
use crate::somelinalg::fixed_point_transform::to_fixed_point_form;
use crate::somelinalg::simple_iteration::{IterationResult, iterate};
use crate::somelinalg::solver_errors::SolverError;
use itertools::Itertools;
use std::fmt;

/// everything a caller may want to show after a solve
#[derive(Debug, Clone, PartialEq)]
pub struct JacobiReport {
    pub original: AugmentedMatrix,
    pub epsilon: f64,
    pub permutation: Option<Permutation>,
    pub permuted: Option<AugmentedMatrix>,
    pub transformed: Option<TransformedMatrix>,
    pub outcome: Result<IterationResult, SolverError>,
}

impl JacobiReport {
    pub fn dominance_achieved(&self) -> bool {
        self.permutation.is_some()
    }
    pub fn solution(&self) -> Option<&[f64]> {
        self.outcome.as_ref().ok().map(|res| res.solution.as_slice())
    }
}

fn format_vector(v: &[f64]) -> String {
    format!("[{}]", v.iter().join(", "))
}

impl fmt::Display for JacobiReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Given matrix:")?;
        writeln!(f, "{}", self.original)?;
        match &self.permuted {
            Some(permuted) => {
                writeln!(f, "Diagonal dominance achieved. Reordered matrix:")?;
                writeln!(f, "{}", permuted)?;
            }
            None => {
                writeln!(f, "Diagonal dominance can not be achieved. Calculation stopped.")?;
                return Ok(());
            }
        }
        if let Some(transformed) = &self.transformed {
            writeln!(f, "Matrix in fixed-point form:")?;
            writeln!(f, "{}", transformed)?;
        }
        match &self.outcome {
            Ok(res) => {
                writeln!(f, "Solution vector: {}", format_vector(&res.solution))?;
                writeln!(f, "Number of iterations: {}", res.iterations)?;
                writeln!(f, "Error vector: {}", format_vector(&res.errors))
            }
            Err(SolverError::NonConvergent { .. }) => writeln!(
                f,
                "Convergence was not reached within the allowed number of iterations."
            ),
            Err(e) => writeln!(f, "{}", e),
        }
    }
}

/// runs every stage and keeps what was produced before a failure
pub fn run_pipeline(matrix: &AugmentedMatrix, epsilon: f64) -> JacobiReport {
    let mut report = JacobiReport {
        original: matrix.clone(),
        epsilon,
        permutation: None,
        permuted: None,
        transformed: None,
        outcome: Err(SolverError::Infeasible),
    };
    let (permutation, permuted) = match make_diagonally_dominant(matrix) {
        Ok(res) => res,
        Err(e) => {
            report.outcome = Err(e);
            return report;
        }
    };
    report.permutation = Some(permutation);
    report.permuted = Some(permuted.clone());
    let transformed = match to_fixed_point_form(permuted) {
        Ok(transformed) => transformed,
        Err(e) => {
            report.outcome = Err(e);
            return report;
        }
    };
    report.outcome = iterate(&transformed, epsilon);
    report.transformed = Some(transformed);
    report
}

/// solve A*x = b given as augmented matrix, only the final result
pub fn solve_linear_system(
    matrix: &AugmentedMatrix,
    epsilon: f64,
) -> Result<IterationResult, SolverError> {
    let (_, permuted) = make_diagonally_dominant(matrix)?;
    let transformed = to_fixed_point_form(permuted)?;
    iterate(&transformed, epsilon)
}
