use super::{read, OutputError, Result};
use std::path::Path;

/// Returns the TLUSTY run time [s] from the timing file `fort.69`
///
/// The time is the 3rd column of the last line, 0 for an empty file.
pub fn timing<P: AsRef<Path>>(path: P) -> Result<f64> {
    parse(&read(path)?)
}

fn parse(contents: &str) -> Result<f64> {
    let Some((i, line)) = contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .last()
    else {
        return Ok(0.);
    };
    let token = line
        .split_whitespace()
        .nth(2)
        .ok_or_else(|| OutputError::Missing(format!("time in fort.69 line {}", i + 1)))?;
    crate::fortran::normalize_exponents(token)
        .parse()
        .map_err(|e| OutputError::Number("fort.69".to_string(), i + 1, e))
}
