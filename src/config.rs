//! Runtime configuration
//!
//! The defaults reproduce the settings the package ships with; any of them
//! can be overridden from a JSON file, e.g.
//! ```json
//! { "home": "/opt/tluspy", "h1_data": "h1.dat", "tl_version": 205 }
//! ```

use serde::{Deserialize, Serialize};
use std::{
    env,
    fmt,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

/// Environment variable pointing to the package install directory
pub const HOME_ENV: &str = "TLUSPY_HOME";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to open the configuration file {1:?}")]
    Io(#[source] std::io::Error, PathBuf),
    #[error("failed to parse the configuration file")]
    Json(#[from] serde_json::Error),
    #[error("failed to resolve the install directory from the current directory")]
    CurrentDir(#[source] std::io::Error),
}
type Result<T> = std::result::Result<T, ConfigError>;

/// Value of a TLUSTY keyword parameter
///
/// Integers and floats are written differently in the auxiliary file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AuxValue {
    Int(i64),
    Float(f64),
}
impl fmt::Display for AuxValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuxValue::Int(value) => write!(f, "{}", value),
            AuxValue::Float(value) => write!(f, "{}", crate::fortran::sci(*value, 3)),
        }
    }
}

/// Ordered list of `KEY=value` keyword parameters
pub type Keywords = Vec<(String, AuxValue)>;

/// Install directory given by `TLUSPY_HOME`
fn env_home() -> Option<PathBuf> {
    env::var_os(HOME_ENV).map(PathBuf::from)
}

fn keywords(entries: &[(&str, AuxValue)]) -> Keywords {
    entries
        .iter()
        .map(|(key, value)| (key.to_string(), *value))
        .collect()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Package install directory, `TLUSPY_HOME` if set
    pub home: Option<PathBuf>,
    /// TLUSTY executable, relative to the install directory
    pub tlpath: PathBuf,
    /// SYNSPEC executable, relative to the install directory
    pub synpath: PathBuf,
    /// H I atomic data file in `<home>/data`
    pub h1_data: String,
    /// Keywords for models without convection (Teff > 15000K)
    pub aux_no_convec: Keywords,
    /// Keywords for convective models
    pub aux_convec: Keywords,
    pub tl_version: u32,
    pub syn_version: u32,
    pub user: String,
}
impl Default for Config {
    fn default() -> Self {
        use AuxValue::{Float, Int};
        Self {
            home: env_home(),
            tlpath: PathBuf::from("bin/tlusty208"),
            synpath: PathBuf::from("bin/synspec54"),
            h1_data: String::from("h1s16.dat"),
            aux_no_convec: keywords(&[
                ("tAUDIV", Int(1)),
                ("iACC", Int(7)),
                ("nITER", Int(60)),
                ("IHYDPR", Int(2)),
            ]),
            aux_convec: keywords(&[
                ("IFRYB", Int(1)),
                ("IPRINT", Int(3)),
                ("ITEK", Int(40)),
                ("IACC", Int(40)),
                ("TAUDIV", Float(1e-2)),
                ("IDLST", Int(0)),
                ("MLTYPE", Int(2)),
                ("NDCGAP", Int(5)),
                ("ICONRE", Int(0)),
                ("IDEEPC", Int(3)),
                ("CRFLIM", Int(-10)),
                ("IMUCON", Int(40)),
                ("ICONRS", Int(5)),
            ]),
            tl_version: 208,
            syn_version: 54,
            user: String::from("Ted Johnson, UCLA, tedjohnson12@g.ucla.edu"),
        }
    }
}
impl Config {
    /// Loads a JSON configuration, missing entries keep their default
    ///
    /// `TLUSPY_HOME` overrides the `home` entry of the file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ConfigError::Io(e, path.to_path_buf()))?;
        let mut config: Config = serde_json::from_reader(BufReader::new(file))?;
        if let Some(home) = env_home() {
            config.home = Some(home);
        }
        log::debug!("configuration loaded from {:?}", path);
        Ok(config)
    }
    /// Absolute path of the package install directory
    ///
    /// A relative `home` and the fallback on the current directory are both
    /// resolved against the current directory, the executables run in the
    /// model working directory.
    pub fn home(&self) -> Result<PathBuf> {
        match &self.home {
            Some(home) if home.is_absolute() => Ok(home.clone()),
            Some(home) => Ok(env::current_dir()
                .map_err(ConfigError::CurrentDir)?
                .join(home)),
            None => env::current_dir().map_err(ConfigError::CurrentDir),
        }
    }
    /// Full path of a file that sits in the install directory
    pub fn path<P: AsRef<Path>>(&self, filename: P) -> Result<PathBuf> {
        Ok(self.home()?.join(filename))
    }
    /// Full path of the H I atomic data
    pub fn h1_data_path(&self) -> Result<PathBuf> {
        Ok(self.path("data")?.join(&self.h1_data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn aux_value_display() {
        assert_eq!(AuxValue::Int(-10).to_string(), "-10");
        assert_eq!(AuxValue::Float(1e-2).to_string(), "1.000e-02");
    }

    #[test]
    fn partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tluspy.json");
        let mut file = File::create(&path).unwrap();
        write!(
            file,
            r#"{{"home": "/opt/tluspy", "tl_version": 205, "aux_no_convec": [["nITER", 30], ["TAUDIV", 0.5]]}}"#
        )
        .unwrap();
        let config = Config::from_path(&path).unwrap();
        assert_eq!(config.tl_version, 205);
        assert_eq!(config.syn_version, 54);
        assert_eq!(
            config.home,
            env_home().or_else(|| Some(PathBuf::from("/opt/tluspy")))
        );
        assert_eq!(
            config.aux_no_convec,
            vec![
                ("nITER".to_string(), AuxValue::Int(30)),
                ("TAUDIV".to_string(), AuxValue::Float(0.5))
            ]
        );
        assert_eq!(config.aux_convec.len(), 13);
    }

    #[test]
    fn absolute_home() {
        let cwd = env::current_dir().unwrap();
        let config = Config {
            home: None,
            ..Default::default()
        };
        assert_eq!(config.home().unwrap(), cwd);
        assert_eq!(
            config.h1_data_path().unwrap(),
            cwd.join("data").join("h1s16.dat")
        );
        let config = Config {
            home: Some(PathBuf::from("tluspy")),
            ..Default::default()
        };
        assert!(config.home().unwrap().is_absolute());
        assert_eq!(
            config.path("bin/tlusty208").unwrap(),
            cwd.join("tluspy").join("bin/tlusty208")
        );
        let config = Config {
            home: Some(PathBuf::from("/opt/tluspy")),
            ..Default::default()
        };
        assert_eq!(
            config.h1_data_path().unwrap(),
            PathBuf::from("/opt/tluspy/data/h1s16.dat")
        );
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Config::from_path("does/not/exist.json"),
            Err(ConfigError::Io(..))
        ));
    }
}
