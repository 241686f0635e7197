use super::{read, OutputError, Result, Table};
use std::path::Path;

const FINAL_MODEL: &str = "FINAL MODEL ATMOSPHERE";
/// Ratio of the radiative plus convective flux to the total flux
pub const FLUX_RATIO: &str = "(RAD+CON)/TOT";

/// Flux conservation table of the final model in the TLUSTY standard output `fort.6`
#[derive(Debug, Clone, PartialEq)]
pub struct FluxConservation(Table);
impl FluxConservation {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&read(path)?)
    }
    pub fn parse(contents: &str) -> Result<Self> {
        let mut lines = contents
            .lines()
            .enumerate()
            .skip_while(|(_, line)| !line.contains(FINAL_MODEL));
        if lines.next().is_none() {
            return Err(OutputError::Missing(format!("{FINAL_MODEL} in fort.6")));
        }
        let header = lines
            .by_ref()
            .find_map(|(_, line)| {
                let mut tokens = line.split_whitespace().skip_while(|&t| t != "ID").peekable();
                tokens.peek().is_some().then(|| tokens.collect::<Vec<_>>())
            })
            .filter(|columns| columns.iter().any(|&c| c == FLUX_RATIO))
            .ok_or_else(|| OutputError::Missing(format!("{FLUX_RATIO} table header in fort.6")))?;
        let mut table = Table::new(header.join(" "));
        let n_columns = table.columns().len();
        for (i, line) in lines
            .skip_while(|(_, line)| line.trim().is_empty())
            .take_while(|(_, line)| line.split_whitespace().count() == n_columns)
        {
            table.push_line(line, "fort.6", i + 1)?;
        }
        if table.is_empty() {
            return Err(OutputError::Missing(format!("{FLUX_RATIO} table in fort.6")));
        }
        Ok(Self(table))
    }
    pub fn table(&self) -> &Table {
        &self.0
    }
    /// (RAD+CON)/TOT at each depth point
    pub fn ratio(&self) -> Result<&[f64]> {
        self.0.column(FLUX_RATIO)
    }
    /// Largest departure from the mean flux ratio [%]
    ///
    /// It should not be more than 1% for a converged model.
    pub fn departure(&self) -> Result<f64> {
        let flux = self.ratio()?;
        let mean = flux.iter().sum::<f64>() / flux.len() as f64;
        let max_deviation = flux
            .iter()
            .map(|f| (f - mean).abs())
            .fold(f64::NEG_INFINITY, f64::max);
        Ok(max_deviation / mean * 100.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORT6: &str = "
 ITERATION  5
   ID   DM   TEMP   (RAD+CON)/TOT
    1  1.0   1.0    9.0D-01

 FINAL MODEL ATMOSPHERE
 ----------------------

   ID   DM          TEMP        FLUX-RAD    (RAD+CON)/TOT

    1   1.000D-06   8.100D+03   1.000D+00   1.0000D+00
    2   1.000D-04   9.000D+03   1.000D+00   1.0100D+00
    3   1.000D-02   1.200D+04   9.000D-01   9.9000D-01
    4   1.000D+00   2.000D+04   8.000D-01   1.0000D+00

 TOTAL TIME      1.62
";

    #[test]
    fn final_model() {
        let flux = FluxConservation::parse(FORT6).unwrap();
        assert_eq!(flux.table().len(), 4);
        assert_eq!(flux.ratio().unwrap(), [1., 1.01, 0.99, 1.]);
        assert!((flux.departure().unwrap() - 1.).abs() < 1e-9);
    }

    #[test]
    fn unfinished_run() {
        let err = FluxConservation::parse(" ITERATION  5\n   ID   DM\n").unwrap_err();
        assert!(matches!(err, OutputError::Missing(_)));
    }
}
