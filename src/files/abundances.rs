use super::{FilesError, InputFile, Result};
use crate::fortran::sci;
use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::Path,
};

/// Abundance given to elements that are not specified
pub const DEFAULT_ABUNDANCE: f64 = 1e-50;

/// SYNSPEC abundance change file `fort.56`
#[derive(Debug, Clone)]
pub struct AbundanceFile {
    /// N/H in number space, keyed by atomic number
    abundances: BTreeMap<u32, f64>,
    /// Number of elements written
    pub n_elems: u32,
    /// Abundance of unspecified elements
    pub abn0: f64,
}
impl AbundanceFile {
    /// Creates the file content, rejecting log(N/H) abundances
    pub fn new(abundances: &BTreeMap<u32, f64>) -> Result<Self> {
        if let Some((&z, &abn)) = abundances.iter().find(|(_, abn)| **abn < 0.) {
            return Err(FilesError::LogAbundance(z, abn));
        }
        Ok(Self {
            abundances: abundances.clone(),
            n_elems: 30,
            abn0: DEFAULT_ABUNDANCE,
        })
    }
    pub fn n_elems(self, n_elems: u32) -> Self {
        Self { n_elems, ..self }
    }
    pub fn abn0(self, abn0: f64) -> Self {
        Self { abn0, ..self }
    }
}
impl InputFile for AbundanceFile {
    fn file_name(&self) -> &str {
        "fort.56"
    }
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write!(writer, "{}", self.n_elems)?;
        // hydrogen is always written
        match self.abundances.get(&1) {
            Some(abn) => write!(writer, "\n1\t{}", sci(*abn, 3))?,
            None => write!(writer, "\n1\t1")?,
        }
        for z in 2..=self.n_elems {
            match self.abundances.get(&z) {
                Some(abn) => write!(writer, "\n{}\t{}", z, sci(*abn, 3))?,
                None => write!(writer, "\n{}\t{}", z, sci(self.abn0, 1))?,
            }
        }
        Ok(())
    }
}

/// Reads a tab separated abundance table
///
/// The table is preceded by a free form header:
/// ```text
/// el  at_no   log(N/H)
/// C   6       -6.830
/// ```
/// Abundances are returned in number space for elements 1 to 29,
/// unlisted elements get [DEFAULT_ABUNDANCE] and hydrogen is set to 1.
/// Set `log` to false if the table is already in number space.
pub fn read_abn_file<P: AsRef<Path>>(path: P, log: bool) -> Result<BTreeMap<u32, f64>> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| FilesError::Io(e, path.to_path_buf()))?;
    let mut table = BTreeMap::new();
    for line in contents.lines() {
        let fields: Vec<_> = line.split('\t').collect();
        if fields.len() != 3 || fields[0].trim() == "el" {
            continue;
        }
        let z = fields[1]
            .trim()
            .parse::<u32>()
            .map_err(|_| FilesError::AbundanceTable(line.to_string()))?;
        let abn = fields[2]
            .trim()
            .parse::<f64>()
            .map_err(|_| FilesError::AbundanceTable(line.to_string()))?;
        table.entry(z).or_insert(abn);
    }
    let mut abundances: BTreeMap<u32, f64> = (1..30)
        .map(|z| match table.get(&z) {
            Some(&abn) if log => (z, 10f64.powf(abn)),
            Some(&abn) => (z, abn),
            None => (z, DEFAULT_ABUNDANCE),
        })
        .collect();
    abundances.insert(1, 1.);
    Ok(abundances)
}
