use super::{read, OutputError, Result};
use crate::fortran::parse_floats;
use std::path::Path;

/// Lines of the state vector written for each depth point
const STATE_LINES: usize = 3;

/// Depth points of a TLUSTY model atmosphere `fort.7`
///
/// The file holds two blocks after its `ND NUMPAR` line:
///  1. the column mass of each depth point,
///  2. the state vector (temperature, electron density, ...) of each depth
///     point written over 3 indented lines.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DepthPoints {
    /// Column mass [g/cm2], in the reversed file order
    pub mass: Vec<f64>,
    /// State vector of each depth point, in file order
    pub state: Vec<Vec<f64>>,
}
impl DepthPoints {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&read(path)?, "fort.7")
    }
    pub fn parse(contents: &str, source: &str) -> Result<Self> {
        let mut this = Self::default();
        let mut state = vec![];
        let mut n_state_lines = 0;
        for (i, line) in contents.lines().enumerate().skip(1) {
            if line.trim().is_empty() {
                continue;
            }
            let values =
                parse_floats(line).map_err(|e| OutputError::Number(source.to_string(), i + 1, e))?;
            if line.chars().nth(1).map_or(true, char::is_whitespace) {
                state.extend(values);
                n_state_lines += 1;
                if n_state_lines == STATE_LINES {
                    this.state.push(std::mem::take(&mut state));
                    n_state_lines = 0;
                }
            } else {
                this.mass.extend(values);
                state.clear();
                n_state_lines = 0;
            }
        }
        this.mass.reverse();
        Ok(this)
    }
    /// Number of depth points
    pub fn len(&self) -> usize {
        self.mass.len()
    }
    pub fn is_empty(&self) -> bool {
        self.mass.is_empty()
    }
    /// Natural logarithm of the column mass
    pub fn log_mass(&self) -> impl Iterator<Item = f64> + '_ {
        self.mass.iter().map(|m| m.ln())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORT7: &str = "    4    3
 1.000000D-06 1.000000D-04 1.000000D-02
 1.000000D+00
   1.20000D+04  1.0D+12
   2.0D-08
   3.0
   1.30000D+04  1.1D+12
   2.1D-08
   3.1
";

    #[test]
    fn blocks() {
        let depths = DepthPoints::parse(FORT7, "fort.7").unwrap();
        assert_eq!(depths.len(), 4);
        assert_eq!(depths.mass, vec![1., 1e-2, 1e-4, 1e-6]);
        assert_eq!(depths.state.len(), 2);
        assert_eq!(depths.state[0], vec![1.2e4, 1e12, 2e-8, 3.]);
        assert_eq!(depths.state[1][0], 1.3e4);
        assert!((depths.log_mass().last().unwrap() - 1e-6f64.ln()).abs() < 1e-12);
    }

    #[test]
    fn bad_number() {
        let err = DepthPoints::parse("1\n 1.0D-05 x.y\n", "fort.7").unwrap_err();
        assert!(matches!(err, OutputError::Number(_, 2, _)));
    }

    #[test]
    fn empty_model() {
        assert!(DepthPoints::parse("", "fort.7").unwrap().is_empty());
    }
}
