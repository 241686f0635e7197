//! # tluspy
//!
//! A shell around [TLUSTY and SYNSPEC](http://tlusty.oca.eu) for white dwarf
//! atmospheres: it writes their input files, runs them and parses their output
//! to check the convergence of the models.
//!
//! A typical TLUSTY run in the current directory:
//! ```no_run
//! use tluspy::{
//!     files::{AuxFile, ControlFile, InputFile},
//!     run, Config, Convergence, Parameters,
//! };
//!
//! # fn main() -> Result<(), tluspy::Error> {
//! let config = Config::default();
//! let params = Parameters::new("WD 1929+012", 20890., 7.91, [(1, 1.), (12, 1.26e-5)]);
//! AuxFile::new("wd.aux", params.teff as f64, params.log_g, &config).write_in(".")?;
//! ControlFile::new(params.teff, params.log_g, "wd.aux", config.h1_data_path()?).write_in(".")?;
//! run::run(run::Executable::Tlusty, &config, ".")?;
//! Convergence::load(".")?.summary()?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod convection;
pub mod convergence;
mod error;
pub mod files;
pub mod fortran;
pub mod output;
mod parameters;
#[cfg(feature = "plot")]
pub mod plot;
pub mod run;
#[cfg(test)]
mod test_logger;

pub use config::Config;
pub use convergence::{Convergence, Quantity};
pub use error::Error;
pub use parameters::Parameters;
