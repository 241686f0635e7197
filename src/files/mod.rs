//! Input files of TLUSTY and SYNSPEC
//!
//! Every file is rendered into any [Write]r so it can be compared
//! byte for byte, [InputFile::write_in] puts it under its canonical name
//! in a working directory.

use crate::Config;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

mod abundances;
mod keywords;
mod control;
mod header;
mod synspec;
pub use abundances::{read_abn_file, AbundanceFile, DEFAULT_ABUNDANCE};
pub use keywords::AuxFile;
pub use control::{ControlFile, ControlOptions};
pub use header::SpectrumHeader;
pub use synspec::{SynspecFile, SynspecOptions};

#[derive(thiserror::Error, Debug)]
pub enum FilesError {
    #[error("failed to access {1:?}")]
    Io(#[source] std::io::Error, PathBuf),
    #[error("failed to write")]
    Write(#[from] std::io::Error),
    #[error("abundance of element {0} is negative ({1}): abundances must be in number space, not log(N/H)")]
    LogAbundance(u32, f64),
    #[error("invalid abundance table entry {0:?}")]
    AbundanceTable(String),
    #[error("linelist pattern error")]
    Pattern(#[from] glob::PatternError),
    #[error("failed to locate the linelists")]
    Config(#[from] crate::config::ConfigError),
}
pub type Result<T> = std::result::Result<T, FilesError>;

/// An input file of the external codes
pub trait InputFile {
    /// Name of the file in the working directory
    fn file_name(&self) -> &str;
    /// Renders the file contents
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()>;
    /// Writes the file into the directory `dir`, returning its path
    fn write_in<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(self.file_name());
        let file = File::create(&path).map_err(|e| FilesError::Io(e, path.clone()))?;
        let mut buffer = BufWriter::new(file);
        self.write_to(&mut buffer)?;
        buffer.flush()?;
        log::info!("Finished writing {}", self.file_name());
        Ok(path)
    }
    /// Renders the file contents into a string
    fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Lists the linelists available in `<home>/linelists`
pub fn linelists(config: &Config) -> Result<Vec<PathBuf>> {
    let pattern = config.path("linelists")?.join("*");
    Ok(glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| entry.ok())
        .filter(|path| path.is_file())
        .collect())
}

/// Copies the linelist `name` from `<home>/linelists` to `fort.19` in `dir`
pub fn get_linelist<P: AsRef<Path>>(config: &Config, name: &str, dir: P) -> Result<PathBuf> {
    let source = config.path("linelists")?.join(name);
    let target = dir.as_ref().join("fort.19");
    fs::copy(&source, &target).map_err(|e| FilesError::Io(e, source))?;
    log::info!("Got linelist {}", name);
    Ok(target)
}

/// Renames `fort.7` to `fort.8` so that the next TLUSTY run starts from it
pub fn promote_model<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
    let source = dir.as_ref().join("fort.7");
    let target = dir.as_ref().join("fort.8");
    fs::rename(&source, &target).map_err(|e| FilesError::Io(e, source))?;
    Ok(target)
}
