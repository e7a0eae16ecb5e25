use std::fmt;

/// Error types of the simple iteration pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// no row permutation gives a diagonally dominant matrix
    Infeasible,
    /// zero on the diagonal while bringing the system to fixed-point form
    DivideByZero { row: usize },
    /// iteration cap reached, errors of the last sweep are kept for diagnostics
    NonConvergent { iterations: usize, errors: Vec<f64> },
    InvalidInput(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::Infeasible => {
                write!(f, "Diagonal dominance can not be achieved by permutation of rows")
            }
            SolverError::DivideByZero { row } => {
                write!(f, "Zero diagonal element in row {}", row)
            }
            SolverError::NonConvergent { iterations, errors } => {
                let max_error = errors.iter().cloned().fold(0.0, f64::max);
                write!(
                    f,
                    "No convergence after {} iterations, max error = {:e}",
                    iterations, max_error
                )
            }
            SolverError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
        }
    }
}

impl std::error::Error for SolverError {}
