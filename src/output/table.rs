use super::{OutputError, Result};
use crate::fortran::parse_floats;
use std::io::Write;

/// Whitespace separated table with named columns
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    data: Vec<Vec<f64>>,
}
impl Table {
    pub fn new<S: AsRef<str>>(header: S) -> Self {
        let columns: Vec<_> = header
            .as_ref()
            .split_whitespace()
            .map(|c| c.to_string())
            .collect();
        Self {
            data: vec![vec![]; columns.len()],
            columns,
        }
    }
    /// Appends a row, failing if it does not match the number of columns
    pub(crate) fn push_line(&mut self, line: &str, source: &str, line_no: usize) -> Result<()> {
        let row =
            parse_floats(line).map_err(|e| OutputError::Number(source.to_string(), line_no, e))?;
        if row.len() != self.columns.len() {
            return Err(OutputError::Shape(
                source.to_string(),
                line_no,
                row.len(),
                self.columns.len(),
            ));
        }
        self.data
            .iter_mut()
            .zip(row)
            .for_each(|(column, value)| column.push(value));
        Ok(())
    }
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
    /// Number of rows
    pub fn len(&self) -> usize {
        self.data.first().map_or(0, |column| column.len())
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Values of the column `name`
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.data[i].as_slice())
            .ok_or_else(|| OutputError::Column(name.to_string()))
    }
    /// Writes the table as CSV
    pub fn to_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(&self.columns)?;
        for i in 0..self.len() {
            wtr.write_record(self.data.iter().map(|column| column[i].to_string()))?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
