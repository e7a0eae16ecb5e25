//! Dense augmented matrix [A | b] of a square linear system and its fixed-point
//! counterpart [C | d] used by simple iteration x = C*x + d.
use crate::somelinalg::solver_errors::SolverError;
use nalgebra::{DMatrix, DVector};
use std::fmt;
use tabled::{builder::Builder, settings::Style};

/// maximal number of unknowns the solver accepts
pub const MAX_UNKNOWNS: usize = 20;

/// checks that rows form an n x (n+1) matrix with 1 <= n <= MAX_UNKNOWNS
fn check_shape(rows: &[Vec<f64>]) -> Result<usize, SolverError> {
    let n = rows.len();
    if n == 0 {
        return Err(SolverError::InvalidInput("matrix has no rows".to_string()));
    }
    if n > MAX_UNKNOWNS {
        return Err(SolverError::InvalidInput(format!(
            "number of unknowns {} exceeds {}",
            n, MAX_UNKNOWNS
        )));
    }
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n + 1) {
        return Err(SolverError::InvalidInput(format!(
            "row {} has {} elements, expected {}",
            i,
            row.len(),
            n + 1
        )));
    }
    Ok(n)
}

fn rows_to_table(rows: &[Vec<f64>], rhs_header: &str) -> String {
    let n = rows.len();
    let mut builder = Builder::default();
    let mut header: Vec<String> = (1..=n).map(|j| format!("x{}", j)).collect();
    header.push(rhs_header.to_string());
    builder.push_record(header);
    for row in rows {
        builder.push_record(row.iter().map(|x| x.to_string()));
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// n rows of n+1 elements: columns 0..n are coefficients, column n is the right-hand side
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedMatrix {
    rows: Vec<Vec<f64>>,
}

impl AugmentedMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<AugmentedMatrix, SolverError> {
        check_shape(&rows)?;
        Ok(AugmentedMatrix { rows })
    }
    /// build [A | b] from nalgebra matrix and vector
    pub fn from_DMatrix(A: &DMatrix<f64>, b: &DVector<f64>) -> Result<AugmentedMatrix, SolverError> {
        let (n, m) = A.shape();
        if n != m {
            return Err(SolverError::InvalidInput(format!(
                "matrix must be square, got {}x{}",
                n, m
            )));
        }
        if b.len() != n {
            return Err(SolverError::InvalidInput(format!(
                "right-hand side has length {}, expected {}",
                b.len(),
                n
            )));
        }
        let rows = A
            .row_iter()
            .zip(b.iter())
            .map(|(row, b_i)| row.iter().cloned().chain(std::iter::once(*b_i)).collect())
            .collect();
        AugmentedMatrix::new(rows)
    }
    /// number of unknowns
    pub fn n(&self) -> usize {
        self.rows.len()
    }
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
    /// coefficient matrix A
    pub fn coefficients(&self) -> DMatrix<f64> {
        let n = self.n();
        DMatrix::from_fn(n, n, |i, j| self.rows[i][j])
    }
    /// right-hand side b
    pub fn rhs(&self) -> DVector<f64> {
        let n = self.n();
        DVector::from_iterator(n, self.rows.iter().map(|row| row[n]))
    }
    pub fn to_table(&self) -> String {
        rows_to_table(&self.rows, "b")
    }
}

impl fmt::Display for AugmentedMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}

/// system in fixed-point form x_i = sum_j c_ij*x_j + d_i, c_ii = 0,
/// stored with the same n x (n+1) layout as the augmented matrix
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedMatrix {
    rows: Vec<Vec<f64>>,
}

impl TransformedMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<TransformedMatrix, SolverError> {
        check_shape(&rows)?;
        Ok(TransformedMatrix { rows })
    }
    pub fn n(&self) -> usize {
        self.rows.len()
    }
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
    /// c_ij
    pub fn coefficient(&self, i: usize, j: usize) -> f64 {
        self.rows[i][j]
    }
    /// d_i
    pub fn constant(&self, i: usize) -> f64 {
        self.rows[i][self.n()]
    }
    /// max_i sum_j |c_ij|, simple iteration surely converges when it is below 1
    pub fn row_norm(&self) -> f64 {
        let n = self.n();
        self.rows
            .iter()
            .map(|row| row[..n].iter().map(|c| c.abs()).sum::<f64>())
            .fold(0.0, f64::max)
    }
    pub fn to_table(&self) -> String {
        rows_to_table(&self.rows, "d")
    }
}

impl fmt::Display for TransformedMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}
