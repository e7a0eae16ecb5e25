//! linear algebra part: solution of A*x = b by simple iteration
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// dense augmented matrix [A | b] and the system in fixed-point form
pub mod augmented_matrix;
/// reordering of rows to reach diagonal dominance (Kuhn's bipartite matching)
pub mod diag_dominance;
/// A*x = b  ->  x = C*x + d
pub mod fixed_point_transform;
/// whole pipeline: reorder, transform, iterate
pub mod jacobi_pipeline;
/// diagnostics for linear systems and matrices: if it is consistent, singular
/// or diagonally dominant, residual of a solution
pub mod linear_sys_diagnostics;
pub mod simple_iteration;
pub mod solver_errors;
