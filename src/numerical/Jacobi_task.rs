//! # Jacobi Task Parser Module
//!
//! Builds a `JacobiSolver` from a task document (string or file) parsed by `Utils::task_parser`.
//!
//! ## Configuration Structure
//!
//! ### solver_settings Section
//! - `epsilon`: convergence tolerance, required
//! - `unknowns`: number of unknowns (Optional), must match the number of matrix rows
//! - `loglevel`: debug, info, warn, error or off (Optional)
//! - `save_log`: write log into a dated file (Optional)
//! - `diagnostics`: consistency and residual checks (Optional)
//!
//! ### matrix Section
//! Rows of the augmented matrix [A | b], one equation per line, numbers separated by spaces.
//! Decimal commas are accepted: `4,5 1 9` is the row 4.5, 1, 9.
//!
//! ### postprocessing Section (Optional)
//! - `print`, `save`, `save_to_csv`: booleans
//! - `filename`: name of the result file without extension
//!
//! Sections "settings"/"solve_settings" and "system"/"augmented_matrix" are taken as pseudonyms.
//!
//! ## Plain Layout
//! A task may also be given without sections: epsilon on the first line, the number of
//! unknowns on the second, then the rows of [A | b]:
//! ```text
//! 0,001
//! 2
//! 4 1 9
//! 1 3 7
//! ```
use crate::Utils::task_parser::{
    DocumentMap, Section, is_comment, parse_document, parse_number, parse_numbers,
};
use crate::numerical::Jacobi::{JacobiSolver, LogLevel, Postprocessing};
use crate::somelinalg::augmented_matrix::MAX_UNKNOWNS;
use crate::somelinalg::solver_errors::SolverError;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;

const SETTINGS_NAMES: [&str; 3] = ["solver_settings", "settings", "solve_settings"];
const MATRIX_NAMES: [&str; 3] = ["matrix", "system", "augmented_matrix"];
const POSTPROCESSING_NAMES: [&str; 2] = ["postprocessing", "postprocess"];

const TEMPLATE: &str = r#"# task for the simple iteration solver
solver_settings
epsilon: 1e-6
loglevel: info
save_log: false
diagnostics: true
# rows of [A | b]
matrix
4 1 9
1 3 7
postprocessing
print: true
save: false
save_to_csv: false
filename: result
"#;

fn find_section<'a>(doc: &'a DocumentMap, names: &[&str]) -> Option<&'a Section> {
    names.iter().find_map(|name| doc.get(*name))
}

fn invalid(msg: String) -> SolverError {
    SolverError::InvalidInput(msg)
}

fn get_float(section: &Section, key: &str) -> Result<Option<f64>, SolverError> {
    match section.first(key) {
        None => Ok(None),
        Some(value) => value
            .as_float()
            .map(Some)
            .ok_or_else(|| invalid(format!("{} must be a number, got {}", key, value))),
    }
}

fn get_bool(section: &Section, key: &str) -> Result<Option<bool>, SolverError> {
    match section.first(key) {
        None => Ok(None),
        Some(value) => value
            .as_boolean()
            .map(Some)
            .ok_or_else(|| invalid(format!("{} must be true or false, got {}", key, value))),
    }
}

impl JacobiSolver {
    /// Map parsed DocumentMap to solver parameters
    pub fn set_params_from_document(&mut self, doc: &DocumentMap) -> Result<(), SolverError> {
        let settings = find_section(doc, &SETTINGS_NAMES)
            .ok_or_else(|| invalid("section solver_settings not found".to_string()))?;
        let epsilon = get_float(settings, "epsilon")?
            .ok_or_else(|| invalid("epsilon not found in solver_settings".to_string()))?;
        let loglevel = match settings.first("loglevel") {
            Some(value) => Some(
                LogLevel::from_str(&value.to_string_value())
                    .map_err(|_| invalid(format!("unknown loglevel {}", value)))?,
            ),
            None => None,
        };
        let save_log = get_bool(settings, "save_log")?;
        let diagnostics = get_bool(settings, "diagnostics")?;

        let matrix = find_section(doc, &MATRIX_NAMES)
            .ok_or_else(|| invalid("section matrix not found".to_string()))?;
        if let Some(value) = settings.first("unknowns") {
            let n = value
                .as_integer()
                .filter(|n| *n > 0 && *n <= MAX_UNKNOWNS as i64)
                .ok_or_else(|| {
                    invalid(format!(
                        "unknowns must be an integer between 1 and {}, got {}",
                        MAX_UNKNOWNS, value
                    ))
                })?;
            if n as usize != matrix.rows.len() {
                return Err(invalid(format!(
                    "{} unknowns declared, but matrix has {} rows",
                    n,
                    matrix.rows.len()
                )));
            }
        }
        self.set_equation_system_from_rows(matrix.rows.clone(), epsilon)?;
        self.set_solver_params(loglevel, save_log, diagnostics);

        if let Some(pp) = find_section(doc, &POSTPROCESSING_NAMES) {
            let filename = pp.first("filename").map(|value| {
                value
                    .as_string()
                    .cloned()
                    .unwrap_or_else(|| value.to_string_value())
            });
            self.set_postprocessing(Postprocessing {
                print: get_bool(pp, "print")?.unwrap_or(false),
                save: get_bool(pp, "save")?.unwrap_or(false),
                save_to_csv: get_bool(pp, "save_to_csv")?.unwrap_or(false),
                filename,
            });
        }
        Ok(())
    }

    /// sectioned document or plain layout, whichever the first line says
    pub fn from_task_str(input: &str) -> Result<JacobiSolver, SolverError> {
        let first_line = meaningful_lines(input).next();
        if first_line.is_some_and(|line| parse_number(line).is_ok()) {
            return JacobiSolver::from_plain_str(input);
        }
        let doc = parse_document(input).map_err(SolverError::InvalidInput)?;
        let mut solver = JacobiSolver::new();
        solver.set_params_from_document(&doc)?;
        Ok(solver)
    }

    /// epsilon, number of unknowns, rows of [A | b]; the report is printed after solving
    pub fn from_plain_str(input: &str) -> Result<JacobiSolver, SolverError> {
        let mut lines = meaningful_lines(input);
        let epsilon_line = lines
            .next()
            .ok_or_else(|| invalid("empty task: epsilon expected".to_string()))?;
        let epsilon = parse_number(epsilon_line).map_err(SolverError::InvalidInput)?;
        let n_line = lines
            .next()
            .ok_or_else(|| invalid("number of unknowns expected after epsilon".to_string()))?;
        let n = n_line
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0 && *n <= MAX_UNKNOWNS)
            .ok_or_else(|| {
                invalid(format!(
                    "number of unknowns must be an integer between 1 and {}, got {}",
                    MAX_UNKNOWNS, n_line
                ))
            })?;
        let rows = lines
            .by_ref()
            .take(n)
            .map(|line| parse_numbers(line).map_err(SolverError::InvalidInput))
            .collect::<Result<Vec<Vec<f64>>, SolverError>>()?;
        if rows.len() != n {
            return Err(invalid(format!(
                "{} rows of the matrix expected, got {}",
                n,
                rows.len()
            )));
        }
        if let Some(extra) = lines.next() {
            return Err(invalid(format!("unexpected line after the matrix: '{}'", extra)));
        }
        let mut solver = JacobiSolver::new();
        solver.set_equation_system_from_rows(rows, epsilon)?;
        solver.set_postprocessing(Postprocessing {
            print: true,
            ..Postprocessing::default()
        });
        Ok(solver)
    }

    pub fn from_task_file<P: AsRef<Path>>(path: P) -> Result<JacobiSolver, SolverError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            invalid(format!("Failed to read file {}: {}", path.display(), e))
        })?;
        JacobiSolver::from_task_str(&content)
    }
}

/// trimmed lines without blanks and comments
fn meaningful_lines(input: &str) -> impl Iterator<Item = &str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment(line))
}

/// Generate task file template
pub fn create_template_file<P: AsRef<Path>>(path: P) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(TEMPLATE.as_bytes())?;
    Ok(())
}
