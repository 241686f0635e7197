use super::{read, Result, Table};
use itertools::Itertools;
use std::{ops::Deref, path::Path};

/// Column holding the iteration number
pub const ITER: &str = "ITER";

/// TLUSTY convergence log `fort.9`
///
/// One row per depth point and iteration with the relative changes of
/// the state vector, e.g. `TEMP` and `MAXIMUM`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IterationLog(Table);
impl Deref for IterationLog {
    type Target = Table;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl IterationLog {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::parse(&read(path)?, "fort.9")
    }
    /// Parses the log: a title line, the column names and the rows
    pub fn parse(contents: &str, source: &str) -> Result<Self> {
        let mut lines = contents.lines().enumerate().skip(1);
        let mut table = match lines.next() {
            Some((_, header)) => Table::new(header),
            None => return Ok(Default::default()),
        };
        for (i, line) in lines.filter(|(_, line)| !line.trim().is_empty()) {
            table.push_line(line, source, i + 1)?;
        }
        Ok(Self(table))
    }
    /// Sorted iteration numbers
    pub fn iterations(&self) -> Result<Vec<u32>> {
        Ok(self
            .column(ITER)?
            .iter()
            .map(|&i| i as u32)
            .sorted_unstable()
            .dedup()
            .collect())
    }
    /// Values of column `name` at `iteration`, one per depth point
    pub fn at_iteration(&self, name: &str, iteration: u32) -> Result<Vec<f64>> {
        Ok(self
            .column(ITER)?
            .iter()
            .zip(self.column(name)?)
            .filter(|(&i, _)| i as u32 == iteration)
            .map(|(_, &value)| value)
            .collect())
    }
    /// Largest value of column `name` at each iteration
    pub fn max_per_iteration(&self, name: &str) -> Result<Vec<(u32, f64)>> {
        Ok(self
            .column(ITER)?
            .iter()
            .zip(self.column(name)?)
            .map(|(&i, &value)| (i as u32, value))
            .into_group_map()
            .into_iter()
            .map(|(i, values)| (i, values.into_iter().fold(f64::NEG_INFINITY, f64::max)))
            .sorted_unstable_by_key(|(i, _)| *i)
            .collect())
    }
}
