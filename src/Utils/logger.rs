use csv::Writer;
use std::fs::File;
use std::io::{self, Write};

fn check_lengths(solution: &[f64], errors: &[f64]) -> io::Result<()> {
    if solution.len() != errors.len() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "solution has {} elements, error vector has {}",
                solution.len(),
                errors.len()
            ),
        ));
    }
    Ok(())
}
/// rows "x1  value  error", tab separated
pub fn save_solution_to_file(
    solution: &[f64],
    errors: &[f64],
    iterations: usize,
    filename: &str,
) -> io::Result<()> {
    check_lengths(solution, errors)?;
    let mut file = File::create(filename)?;
    writeln!(file, "# iterations: {}", iterations)?;
    // Write headers
    writeln!(file, "{}", ["unknown", "value", "error"].join("\t"))?;
    for (i, (x, err)) in solution.iter().zip(errors).enumerate() {
        writeln!(file, "x{}\t{}\t{}", i + 1, x, err)?;
    }
    Ok(())
}
pub fn save_solution_to_csv(solution: &[f64], errors: &[f64], filename: &str) -> io::Result<()> {
    check_lengths(solution, errors)?;
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);

    writer.write_record(["unknown", "value", "error"])?;
    // Write data rows
    for (i, (x, err)) in solution.iter().zip(errors).enumerate() {
        writer.write_record(&[format!("x{}", i + 1), x.to_string(), err.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}
