#![allow(non_snake_case)]
use RustedJacobi::Examples::jacobi_examples::jacobi_examples;
use RustedJacobi::numerical::Jacobi::JacobiSolver;
use std::io::{self, Read};

/// usage:
///   RustedJacobi                run the example
///   RustedJacobi task.txt       solve the task from file
///   RustedJacobi '*'            read the task from standard input
/// a task is a sectioned document or the plain layout: epsilon, number of unknowns, rows of [A | b]
fn main() {
    let args: Vec<String> = std::env::args().collect();
    let Some(source) = args.get(1) else {
        let example = 0;
        jacobi_examples(example);
        return;
    };
    let solver = if source == "*" {
        let mut input = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut input) {
            eprintln!("failed to read standard input: {}", e);
            std::process::exit(1);
        }
        JacobiSolver::from_task_str(&input)
    } else {
        JacobiSolver::from_task_file(source)
    };
    let mut Jacobi_instance = match solver {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    // a failed solve still has a report worth printing
    if let Err(e) = Jacobi_instance.solve() {
        eprintln!("{}", e);
    }
    if let Err(e) = Jacobi_instance.postprocessing() {
        eprintln!("failed to save result: {}", e);
    }
}
