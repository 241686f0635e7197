//! Invocation of the TLUSTY and SYNSPEC executables

use crate::{config::ConfigError, Config};
use std::{
    fs::File,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
    time::Instant,
};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(thiserror::Error, Debug)]
pub enum RunError {
    #[error("failed to open {1:?}")]
    Io(#[source] std::io::Error, PathBuf),
    #[error("failed to start {1:?}")]
    Spawn(#[source] std::io::Error, PathBuf),
    #[error("{0:?} exited with {1}")]
    Status(PathBuf, ExitStatus),
    #[error("failed to locate the executables")]
    Config(#[from] ConfigError),
}
type Result<T> = std::result::Result<T, RunError>;

/// External codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Executable {
    Tlusty,
    Synspec,
}
impl Executable {
    /// Absolute path to the executable
    pub fn path(&self, config: &Config) -> Result<PathBuf> {
        Ok(match self {
            Executable::Tlusty => config.path(&config.tlpath)?,
            Executable::Synspec => config.path(&config.synpath)?,
        })
    }
}

/// Runs `executable` in the directory `workdir` as `executable < fort.5 > fort.6`
pub fn run<P: AsRef<Path>>(executable: Executable, config: &Config, workdir: P) -> Result<()> {
    run_program(executable.path(config)?, workdir)
}

fn run_program<P: AsRef<Path>>(program: PathBuf, workdir: P) -> Result<()> {
    let workdir = workdir.as_ref();
    let fort5 = workdir.join("fort.5");
    let fort6 = workdir.join("fort.6");
    let stdin = File::open(&fort5).map_err(|e| RunError::Io(e, fort5))?;
    let stdout = File::create(&fort6).map_err(|e| RunError::Io(e, fort6))?;
    log::info!("Running {:?} in {:?}...", program, workdir);
    let now = Instant::now();
    let status = Command::new(&program)
        .current_dir(workdir)
        .stdin(Stdio::from(stdin))
        .stdout(Stdio::from(stdout))
        .status()
        .map_err(|e| RunError::Spawn(e, program.clone()))?;
    log::info!("... completed in {:.3}s", now.elapsed().as_secs_f64());
    if status.success() {
        Ok(())
    } else {
        Err(RunError::Status(program, status))
    }
}

/// Compiles TLUSTY from `<home>/bin/tluspy/tlusty205.f` into `<home>/bin/tlusty.exe`
pub fn build(config: &Config) -> Result<PathBuf> {
    let build_path = config.path("bin/tluspy")?;
    let compiler = PathBuf::from("gfortran");
    log::info!("Compiling TLUSTY in {:?}...", build_path);
    let status = Command::new(&compiler)
        .current_dir(&build_path)
        .args(["-fno-automatic", "-O3", "-o", "../tlusty.exe", "tlusty205.f"])
        .status()
        .map_err(|e| RunError::Spawn(e, compiler.clone()))?;
    if status.success() {
        Ok(config.path("bin/tlusty.exe")?)
    } else {
        Err(RunError::Status(compiler, status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, str::FromStr};
    use strum::IntoEnumIterator;

    #[test]
    fn executables() {
        assert_eq!(Executable::from_str("synspec").unwrap(), Executable::Synspec);
        assert!(Executable::from_str("kurucz").is_err());
        assert_eq!(Executable::Tlusty.to_string(), "tlusty");
        let config = Config {
            home: Some(PathBuf::from("/opt/tluspy")),
            ..Default::default()
        };
        let paths: Vec<_> = Executable::iter()
            .map(|e| e.path(&config).unwrap())
            .collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/opt/tluspy/bin/tlusty208"),
                PathBuf::from("/opt/tluspy/bin/synspec54")
            ]
        );
    }

    #[test]
    fn missing_control_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            run_program(PathBuf::from("cat"), dir.path()),
            Err(RunError::Io(..))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn pipes_control_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fort.5"), "20546  7.910\n").unwrap();
        run_program(PathBuf::from("cat"), dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("fort.6")).unwrap(),
            "20546  7.910\n"
        );
    }

    #[cfg(unix)]
    #[test]
    fn runs_from_install_home() {
        let home = tempfile::tempdir().unwrap();
        let work = tempfile::tempdir().unwrap();
        fs::create_dir(home.path().join("bin")).unwrap();
        std::os::unix::fs::symlink("/bin/cat", home.path().join("bin").join("tlusty208")).unwrap();
        let config = Config {
            home: Some(home.path().to_path_buf()),
            ..Default::default()
        };
        fs::write(work.path().join("fort.5"), "20546  7.910\n").unwrap();
        run(Executable::Tlusty, &config, work.path()).unwrap();
        assert_eq!(
            fs::read_to_string(work.path().join("fort.6")).unwrap(),
            "20546  7.910\n"
        );
        assert!(matches!(
            run(Executable::Synspec, &config, work.path()),
            Err(RunError::Spawn(..))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fort.5"), "").unwrap();
        assert!(matches!(
            run_program(PathBuf::from("false"), dir.path()),
            Err(RunError::Status(..))
        ));
        assert!(matches!(
            run_program(dir.path().join("tlusty208"), dir.path()),
            Err(RunError::Spawn(..))
        ));
    }
}
