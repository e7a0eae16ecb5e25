//! Simple iteration solver of linear systems with logging, statistics and postprocessing.
//!
//!  Example#1
//! ```
//! use RustedJacobi::numerical::Jacobi::JacobiSolver;
//! use RustedJacobi::somelinalg::augmented_matrix::AugmentedMatrix;
//! // 4x + y = 9, x + 3y = 7
//! let matrix = AugmentedMatrix::new(vec![vec![4.0, 1.0, 9.0], vec![1.0, 3.0, 7.0]]).unwrap();
//! let mut Jacobi_instance = JacobiSolver::new();
//! Jacobi_instance.set_equation_system(matrix, 1e-6).unwrap();
//! let solution = Jacobi_instance.solver().unwrap();
//! assert!((solution[0] - 20.0 / 11.0).abs() < 1e-6);
//! ```
//! Example#2
//! ```
//! use RustedJacobi::numerical::Jacobi::JacobiSolver;
//! // the same system given as a task document
//! let task = "solver_settings\n epsilon: 1e-8\n loglevel: off\n matrix\n 1 3 7\n 4 1 9\n";
//! let mut Jacobi_instance = JacobiSolver::from_task_str(task).unwrap();
//! Jacobi_instance.solve().unwrap();
//! println!("{}", Jacobi_instance.get_report().unwrap());
//! ```
use crate::Utils::logger::{save_solution_to_csv, save_solution_to_file};
use crate::somelinalg::augmented_matrix::AugmentedMatrix;
use crate::somelinalg::jacobi_pipeline::{JacobiReport, run_pipeline};
use crate::somelinalg::linear_sys_diagnostics::{
    is_diagonally_dominant, linear_system_diagnostics, residual_norm,
};
use crate::somelinalg::solver_errors::SolverError;
use chrono::Local;
use log::{error, info, warn};
use simplelog::*;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::time::Instant;
use strum_macros::{Display, EnumString};
use tabled::{builder::Builder, settings::Style};

/// determinant threshold of the singularity check
const SINGULARITY_THRESHOLD: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum LogLevel {
    #[strum(serialize = "debug")]
    Debug,
    #[strum(serialize = "info")]
    Info,
    #[strum(to_string = "warn", serialize = "warning")]
    Warn,
    #[strum(serialize = "error")]
    Error,
    #[strum(to_string = "off", serialize = "none")]
    Off,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Off => LevelFilter::Off,
        }
    }
}

/// what to do with the result after solving
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Postprocessing {
    /// print the report to stdout
    pub print: bool,
    /// save solution to tab-separated text file
    pub save: bool,
    pub save_to_csv: bool,
    /// file name without extension, "result" if not set
    pub filename: Option<String>,
}

pub struct JacobiSolver {
    pub matrix: Option<AugmentedMatrix>, // augmented matrix [A | b]
    pub epsilon: f64,                    // tolerance
    pub loglevel: LogLevel,
    pub save_log: bool,    // write log into dated file besides terminal
    pub diagnostics: bool, // consistency, singularity and residual checks
    pub postprocessing: Postprocessing,
    report: Option<JacobiReport>,
    calc_statistics: HashMap<String, usize>,
}

impl Default for JacobiSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl JacobiSolver {
    pub fn new() -> JacobiSolver {
        JacobiSolver {
            matrix: None,
            epsilon: 1e-6,
            loglevel: LogLevel::Info,
            save_log: false,
            diagnostics: true,
            postprocessing: Postprocessing::default(),
            report: None,
            calc_statistics: HashMap::new(),
        }
    }
    ////////////////////////////SETTERS///////////////////////////////////////////////////////////////////
    pub fn set_equation_system(
        &mut self,
        matrix: AugmentedMatrix,
        epsilon: f64,
    ) -> Result<(), SolverError> {
        if !(epsilon > 0.0) || !epsilon.is_finite() {
            return Err(SolverError::InvalidInput(format!(
                "epsilon must be a positive number, got {}",
                epsilon
            )));
        }
        self.matrix = Some(matrix);
        self.epsilon = epsilon;
        self.report = None;
        Ok(())
    }
    /// rows of [A | b]
    pub fn set_equation_system_from_rows(
        &mut self,
        rows: Vec<Vec<f64>>,
        epsilon: f64,
    ) -> Result<(), SolverError> {
        let matrix = AugmentedMatrix::new(rows)?;
        self.set_equation_system(matrix, epsilon)
    }
    pub fn set_solver_params(
        &mut self,
        loglevel: Option<LogLevel>,
        save_log: Option<bool>,
        diagnostics: Option<bool>,
    ) {
        if let Some(level) = loglevel {
            self.loglevel = level;
        }
        if let Some(save_log) = save_log {
            self.save_log = save_log;
        }
        if let Some(diagnostics) = diagnostics {
            self.diagnostics = diagnostics;
        }
    }
    pub fn set_postprocessing(&mut self, postprocessing: Postprocessing) {
        self.postprocessing = postprocessing;
    }
    ////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
    //                                       main functions to start the solver and caclulate statistics
    ////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
    fn run_diagnostics(&self, matrix: &AugmentedMatrix) {
        if is_diagonally_dominant(matrix) {
            info!("matrix is diagonally dominant as given");
        }
        if !linear_system_diagnostics(matrix, SINGULARITY_THRESHOLD) {
            warn!("the system has no unique solution, iterations are unlikely to converge");
        }
    }

    pub fn solver(&mut self) -> Result<Vec<f64>, SolverError> {
        let matrix = self
            .matrix
            .clone()
            .ok_or_else(|| SolverError::InvalidInput("equation system is not set".to_string()))?;
        info!("solving system of {} equations, epsilon = {}", matrix.n(), self.epsilon);
        if self.diagnostics {
            self.run_diagnostics(&matrix);
        }
        let begin = Instant::now();
        let report = run_pipeline(&matrix, self.epsilon);
        let end = begin.elapsed();
        info!("time elapsed: {:?}", end);

        self.calc_statistics.clear();
        self.calc_statistics
            .insert("time elapsed, us".to_string(), end.as_micros() as usize);
        self.calc_statistics
            .insert("number of unknowns".to_string(), matrix.n());
        let outcome = report.outcome.clone();
        self.report = Some(report);
        match outcome {
            Ok(res) => {
                self.calc_statistics
                    .insert("number of iterations".to_string(), res.iterations);
                if self.diagnostics {
                    info!("residual max|A*x - b| = {:e}", residual_norm(&matrix, &res.solution));
                }
                self.calc_statistics();
                Ok(res.solution)
            }
            Err(e) => {
                if let SolverError::NonConvergent { iterations, .. } = &e {
                    self.calc_statistics
                        .insert("number of iterations".to_string(), *iterations);
                }
                self.calc_statistics();
                error!("{}", e);
                Err(e)
            }
        }
    }
    // wrapper around solver function to implement logging
    pub fn solve(&mut self) -> Result<Vec<f64>, SolverError> {
        if self.loglevel == LogLevel::Off {
            return self.solver();
        }
        let log_option = self.loglevel.to_level_filter();
        println!(" \n \n Program started with loglevel: {}", log_option);
        let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
            log_option,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )];
        if self.save_log {
            let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
            let name = format!("log_{}.txt", date_and_time);
            match File::create(&name) {
                Ok(file) => loggers.push(WriteLogger::new(log_option, Config::default(), file)),
                Err(e) => eprintln!("failed to create log file {}: {}", name, e),
            }
        }
        match CombinedLogger::init(loggers) {
            Ok(()) => {
                let res = self.solver();
                info!(" \n \n Program ended");
                res
            }
            // logger already set by an earlier run
            Err(_) => self.solver(),
        }
    }
    pub fn get_result(&self) -> Option<Vec<f64>> {
        self.report
            .as_ref()
            .and_then(|report| report.solution().map(|x| x.to_vec()))
    }
    pub fn get_report(&self) -> Option<&JacobiReport> {
        self.report.as_ref()
    }
    pub fn get_statistics(&self) -> &HashMap<String, usize> {
        &self.calc_statistics
    }
    fn calc_statistics(&self) {
        let stats = self.calc_statistics.clone();
        let mut table = Builder::from(stats).build();
        table.with(Style::modern_rounded());
        info!("\n \n CALC STATISTICS \n \n {}", table.to_string());
    }
    //////////////////////////////////////////////////////////////////////////////////////////////
    ///                 POSTPROCESSING
    //////////////////////////////////////////////////////////////////////////////////////////////
    pub fn print_report(&self) {
        match &self.report {
            Some(report) => println!("{}", report),
            None => println!("Nothing to print: the system was not solved yet"),
        }
    }
    /// saves solution and errors of the last sweep as requested in postprocessing settings
    pub fn save_result(&self) -> io::Result<()> {
        let pp = &self.postprocessing;
        if !pp.save && !pp.save_to_csv {
            return Ok(());
        }
        let res = match self.report.as_ref().map(|report| &report.outcome) {
            Some(Ok(res)) => res,
            _ => {
                warn!("no solution to save");
                return Ok(());
            }
        };
        let filename = pp.filename.clone().unwrap_or_else(|| "result".to_string());
        if pp.save {
            let name = format!("{}.txt", filename);
            save_solution_to_file(&res.solution, &res.errors, res.iterations, &name)?;
            info!("result saved to {}", name);
        }
        if pp.save_to_csv {
            let name = format!("{}.csv", filename);
            save_solution_to_csv(&res.solution, &res.errors, &name)?;
            info!("result saved to {}", name);
        }
        Ok(())
    }
    pub fn postprocessing(&self) -> io::Result<()> {
        if self.postprocessing.print {
            self.print_report();
        }
        self.save_result()
    }
}
