//! Simple (Jacobi) iteration x^(k+1) = C*x^(k) + d on a system in fixed-point form.
//! Every component of the new estimate is computed from the full previous estimate,
//! iteration stops when max_i |x_i^(k+1) - x_i^(k)| < epsilon.
use crate::somelinalg::augmented_matrix::TransformedMatrix;
use crate::somelinalg::solver_errors::SolverError;
use log::{debug, error, info};

/// iteration cap
pub const MAX_ITERATION: usize = 10000;

#[derive(Debug, Clone, PartialEq)]
pub struct IterationResult {
    pub solution: Vec<f64>,
    /// |x_i^(k) - x_i^(k-1)| of the last sweep
    pub errors: Vec<f64>,
    pub iterations: usize,
}

impl IterationResult {
    pub fn max_error(&self) -> f64 {
        self.errors.iter().cloned().fold(0.0, f64::max)
    }
}

/// max that keeps NaN: a NaN error must not look like convergence
fn max_keeping_nan(current: f64, value: f64) -> f64 {
    if value.is_nan() || value > current {
        value
    } else {
        current
    }
}

pub struct SimpleIteration<'a> {
    matrix: &'a TransformedMatrix,
    epsilon: f64,
    max_iterations: usize,
    solution: Vec<f64>,
    errors: Vec<f64>,
    iteration: usize,
}

impl<'a> SimpleIteration<'a> {
    pub fn new(matrix: &'a TransformedMatrix, epsilon: f64) -> Result<SimpleIteration<'a>, SolverError> {
        if !(epsilon > 0.0) || !epsilon.is_finite() {
            return Err(SolverError::InvalidInput(format!(
                "epsilon must be a positive number, got {}",
                epsilon
            )));
        }
        let n = matrix.n();
        // one step from the zero vector
        let solution = (0..n).map(|i| matrix.constant(i)).collect();
        Ok(SimpleIteration {
            matrix,
            epsilon,
            max_iterations: MAX_ITERATION,
            solution,
            errors: vec![0.0; n],
            iteration: 0,
        })
    }
    /// one sweep, returns max error of the sweep
    pub fn step(&mut self) -> f64 {
        let n = self.matrix.n();
        let previous = self.solution.clone();
        let mut current_eps = 0.0;
        for i in 0..n {
            let new_root = (0..n)
                .map(|j| self.matrix.coefficient(i, j) * previous[j])
                .sum::<f64>()
                + self.matrix.constant(i);
            self.errors[i] = (new_root - self.solution[i]).abs();
            current_eps = max_keeping_nan(current_eps, self.errors[i]);
            self.solution[i] = new_root;
        }
        self.iteration += 1;
        current_eps
    }
    pub fn iteration(&self) -> usize {
        self.iteration
    }
    pub fn solution(&self) -> &[f64] {
        &self.solution
    }
    /// iterate until convergence or the iteration cap
    pub fn main_loop(mut self) -> Result<IterationResult, SolverError> {
        while self.iteration < self.max_iterations {
            let current_eps = self.step();
            debug!("iteration = {}, error = {}", self.iteration, current_eps);
            // reaching the cap is a failure even if the last sweep met epsilon
            if current_eps < self.epsilon && self.iteration < self.max_iterations {
                info!(
                    "converged in {} iterations, error = {}",
                    self.iteration, current_eps
                );
                return Ok(IterationResult {
                    solution: self.solution,
                    errors: self.errors,
                    iterations: self.iteration,
                });
            }
        }
        error!("Maximum number of iterations reached. No solution found.");
        Err(SolverError::NonConvergent {
            iterations: self.iteration,
            errors: self.errors,
        })
    }
}

/// solve system in fixed-point form with tolerance epsilon
pub fn iterate(matrix: &TransformedMatrix, epsilon: f64) -> Result<IterationResult, SolverError> {
    SimpleIteration::new(matrix, epsilon)?.main_loop()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_converges() {
        // 4x + y = 9, x + 3y = 7
        let matrix = TransformedMatrix::new(vec![
            vec![0.0, -0.25, 2.25],
            vec![-1.0 / 3.0, 0.0, 7.0 / 3.0],
        ])
        .unwrap();
        let result = iterate(&matrix, 1e-6).unwrap();
        assert!(result.iterations > 1 && result.iterations < 100);
        assert!(result.max_error() < 1e-6);
        assert_relative_eq!(result.solution[0], 20.0 / 11.0, epsilon = 1e-6);
        assert_relative_eq!(result.solution[1], 19.0 / 11.0, epsilon = 1e-6);
    }

    #[test]
    fn test_first_step_from_zero() {
        let matrix = TransformedMatrix::new(vec![vec![0.0, 0.5, 1.0], vec![0.5, 0.0, 2.0]]).unwrap();
        let mut iteration = SimpleIteration::new(&matrix, 1e-3).unwrap();
        assert_eq!(iteration.solution(), &[1.0, 2.0]);
        // uses previous estimate only: x = 0.5*2 + 1, y = 0.5*1 + 2
        let eps = iteration.step();
        assert_eq!(iteration.solution(), &[2.0, 2.5]);
        assert_eq!(eps, 1.0);
        assert_eq!(iteration.iteration(), 1);
    }

    #[test]
    fn test_already_solved() {
        let matrix = TransformedMatrix::new(vec![vec![0.0, 0.0, 1.5], vec![0.0, 0.0, -4.0]]).unwrap();
        let result = iterate(&matrix, 1e-12).unwrap();
        assert_eq!(result.iterations, 1);
        assert_eq!(result.solution, vec![1.5, -4.0]);
        assert_eq!(result.errors, vec![0.0, 0.0]);
    }

    #[test]
    fn test_oscillation_not_convergent() {
        // x = y + 1, y = x - 1 jumps between (0, 0) and (1, -1)
        let matrix = TransformedMatrix::new(vec![vec![0.0, 1.0, 1.0], vec![1.0, 0.0, -1.0]]).unwrap();
        match iterate(&matrix, 1e-6) {
            Err(SolverError::NonConvergent { iterations, errors }) => {
                assert_eq!(iterations, MAX_ITERATION);
                assert_eq!(errors, vec![1.0, 1.0]);
            }
            other => panic!("expected NonConvergent, got {:?}", other),
        }
    }

    #[test]
    fn test_divergence_not_convergent() {
        // row sums 2 > 1: estimates grow to inf and then NaN
        for d in [[1.0, 1.0], [1.0, -1.0]] {
            let matrix =
                TransformedMatrix::new(vec![vec![0.0, 2.0, d[0]], vec![2.0, 0.0, d[1]]]).unwrap();
            let result = iterate(&matrix, 1e-6);
            assert!(matches!(
                result,
                Err(SolverError::NonConvergent {
                    iterations: MAX_ITERATION,
                    ..
                })
            ));
        }
    }

    /// max errors of the first `sweeps` sweeps
    fn sweep_errors(matrix: &TransformedMatrix, sweeps: usize) -> Vec<f64> {
        let mut iteration = SimpleIteration::new(matrix, 1.0).unwrap();
        (0..sweeps).map(|_| iteration.step()).collect()
    }

    #[test]
    fn test_convergence_at_the_cap() {
        // contraction 0.999: errors shrink slowly and strictly
        let matrix =
            TransformedMatrix::new(vec![vec![0.0, 0.999, 1.0], vec![0.999, 0.0, 1.0]]).unwrap();
        let errors = sweep_errors(&matrix, MAX_ITERATION);
        let last = errors[MAX_ITERATION - 1];
        let before_last = errors[MAX_ITERATION - 2];
        let before_before_last = errors[MAX_ITERATION - 3];
        assert!(last < before_last && before_last < before_before_last);

        // only the 10000th sweep meets epsilon
        let epsilon = 0.5 * (last + before_last);
        match iterate(&matrix, epsilon) {
            Err(SolverError::NonConvergent { iterations, .. }) => {
                assert_eq!(iterations, MAX_ITERATION)
            }
            other => panic!("expected NonConvergent, got {:?}", other),
        }
        // the 9999th sweep meets epsilon
        let epsilon = 0.5 * (before_last + before_before_last);
        let result = iterate(&matrix, epsilon).unwrap();
        assert_eq!(result.iterations, MAX_ITERATION - 1);
    }

    #[test]
    fn test_bad_epsilon() {
        let matrix = TransformedMatrix::new(vec![vec![0.0, 1.0]]).unwrap();
        assert!(iterate(&matrix, 0.0).is_err());
        assert!(iterate(&matrix, -1e-3).is_err());
        assert!(iterate(&matrix, f64::NAN).is_err());
    }

    #[test]
    fn test_max_keeping_nan() {
        assert_eq!(max_keeping_nan(1.0, 2.0), 2.0);
        assert_eq!(max_keeping_nan(3.0, 2.0), 3.0);
        assert!(max_keeping_nan(3.0, f64::NAN).is_nan());
        assert!(max_keeping_nan(f64::NAN, 1.0).is_nan());
    }
}
