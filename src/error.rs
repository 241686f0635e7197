use crate::{config::ConfigError, files::FilesError, output::OutputError, run::RunError};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Error in the `config` module")]
    Config(#[from] ConfigError),
    #[error("Error in the `files` module")]
    Files(#[from] FilesError),
    #[error("Error in the `output` module")]
    Output(#[from] OutputError),
    #[error("Error in the `run` module")]
    Run(#[from] RunError),
    #[cfg(feature = "plot")]
    #[error("Error in the `plot` module")]
    Plot(#[from] crate::plot::PlotError),
}
