/// Simple iteration (Jacobi) solver of linear systems
///  Example#1
/// ```
///    use RustedJacobi::numerical::Jacobi::{JacobiSolver, LogLevel};
///    // 4x + y = 9, x + 3y = 7
///    let mut Jacobi_instance = JacobiSolver::new();
///    Jacobi_instance
///        .set_equation_system_from_rows(vec![vec![4.0, 1.0, 9.0], vec![1.0, 3.0, 7.0]], 1e-6)
///        .unwrap();
///    Jacobi_instance.set_solver_params(Some(LogLevel::Off), None, None);
///    Jacobi_instance.solve().unwrap();
///    println!("result = {:?} \n", Jacobi_instance.get_result().unwrap());
///  ```
pub mod Jacobi;
/// building the solver from task documents, task template
pub mod Jacobi_task;
