//! examples of usage of RustedJacobi
/// linear systems solved by simple iteration
pub mod jacobi_examples;
