use crate::numerical::Jacobi::{JacobiSolver, LogLevel, Postprocessing};
use crate::somelinalg::augmented_matrix::AugmentedMatrix;
use crate::somelinalg::jacobi_pipeline::{run_pipeline, solve_linear_system};
use nalgebra::{DMatrix, DVector};

/// 20 equations, strongly dominant diagonal, rows given in reversed order
fn big_system() -> Vec<Vec<f64>> {
    let n = 20;
    let mut rows: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let mut row = vec![1.0; n + 1];
            row[i] = 2.0 * n as f64;
            row[n] = (i + 1) as f64;
            row
        })
        .collect();
    rows.reverse();
    rows
}

pub fn jacobi_examples(example: usize) {
    match example {
        0 => {
            // the shortest way: rows of [A | b], tolerance, solve, print
            let mut Jacobi_instance = JacobiSolver::new();
            Jacobi_instance
                .set_equation_system_from_rows(vec![vec![4.0, 1.0, 9.0], vec![1.0, 3.0, 7.0]], 1e-6)
                .unwrap();
            Jacobi_instance.set_solver_params(Some(LogLevel::Info), Some(false), Some(true));
            match Jacobi_instance.solve() {
                Ok(solution) => println!("result = {:?} \n", solution),
                Err(e) => println!("{}", e),
            }
            Jacobi_instance.print_report();
        }
        1 => {
            // rows must be swapped before iterating
            let mut Jacobi_instance = JacobiSolver::new();
            Jacobi_instance
                .set_equation_system_from_rows(
                    vec![
                        vec![1.0, 1.0, 5.0, 7.0],
                        vec![6.0, 1.0, 1.0, 8.0],
                        vec![1.0, 7.0, 1.0, 9.0],
                    ],
                    1e-8,
                )
                .unwrap();
            Jacobi_instance.set_solver_params(Some(LogLevel::Off), None, None);
            let solution = Jacobi_instance.solve().unwrap();
            println!("result = {:?} \n", solution);
        }
        2 => {
            // task given as a document
            let task = r#"
                solver_settings
                epsilon: 0,0001
                unknowns: 3
                loglevel: warn
                matrix
                1 8 1 10
                10 1 1 12
                2 2 10 14
                postprocessing
                print: true
            "#;
            let mut Jacobi_instance = JacobiSolver::from_task_str(task).unwrap();
            let _ = Jacobi_instance.solve();
            Jacobi_instance.postprocessing().unwrap();
        }
        3 => {
            // no permutation makes this system diagonally dominant
            let matrix =
                AugmentedMatrix::new(vec![vec![1.0, 2.0, 3.0], vec![1.0, 3.0, 1.0]]).unwrap();
            let report = run_pipeline(&matrix, 1e-6);
            println!("{}", report);
        }
        4 => {
            let mut Jacobi_instance = JacobiSolver::new();
            Jacobi_instance
                .set_equation_system_from_rows(big_system(), 1e-10)
                .unwrap();
            Jacobi_instance.set_solver_params(Some(LogLevel::Off), None, Some(false));
            Jacobi_instance.set_postprocessing(Postprocessing {
                print: false,
                save: false,
                save_to_csv: false,
                filename: None,
            });
            let solution = Jacobi_instance.solve().unwrap();
            println!("result = {:?} \n", solution);
        }
        5 => {
            // nalgebra matrices without the solver struct
            let A = DMatrix::from_row_slice(3, 3, &[3.0, 1.0, 1.0, 1.0, 4.0, 1.0, 1.0, 1.0, 5.0]);
            let b = DVector::from_vec(vec![5.0, 6.0, 7.0]);
            let matrix = AugmentedMatrix::from_DMatrix(&A, &b).unwrap();
            match solve_linear_system(&matrix, 1e-9) {
                Ok(res) => println!(
                    "solution = {:?}, iterations = {}, max error = {:e}",
                    res.solution,
                    res.iterations,
                    res.max_error()
                ),
                Err(e) => println!("{}", e),
            }
        }
        _ => {
            println!("no example with number {}", example);
        }
    }
}
