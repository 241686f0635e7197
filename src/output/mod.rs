//! TLUSTY output parsers
//!
//! | file     | content                     | parser              |
//! |----------|-----------------------------|---------------------|
//! | fort.6   | standard output             | [FluxConservation]  |
//! | fort.7   | model atmosphere            | [DepthPoints]       |
//! | fort.9   | convergence log             | [IterationLog]      |
//! | fort.69  | timing                      | [timing]            |

use std::{
    fs,
    path::{Path, PathBuf},
};

mod atmosphere;
mod flux;
mod iterations;
mod table;
mod timing;
pub use atmosphere::DepthPoints;
pub use flux::FluxConservation;
pub use iterations::IterationLog;
pub use table::Table;
pub use timing::timing;

#[derive(thiserror::Error, Debug)]
pub enum OutputError {
    #[error("failed to read {1:?}")]
    Io(#[source] std::io::Error, PathBuf),
    #[error("failed to parse {0:?} at line {1}")]
    Number(String, usize, #[source] std::num::ParseFloatError),
    #[error("{0} line {1} has {2} values for {3} columns")]
    Shape(String, usize, usize, usize),
    #[error("{0} is missing")]
    Missing(String),
    #[error("column {0} not found")]
    Column(String),
    #[error("failed to export the table")]
    Csv(#[from] csv::Error),
}
pub type Result<T> = std::result::Result<T, OutputError>;

pub(crate) fn read<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    log::debug!("reading {:?}", path);
    fs::read_to_string(path).map_err(|e| OutputError::Io(e, path.to_path_buf()))
}
