use super::{FilesError, InputFile, Result};
use crate::{
    convection::{is_convective, mixing_length},
    fortran::sci,
    Config, Parameters,
};
use chrono::Local;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

/// FITS like header of a synthetic spectrum `<name>.tl` file
///
/// The header records the model parameters and is followed by
/// the TLUSTY atmosphere `fort.7`.
#[derive(Debug, Clone)]
pub struct SpectrumHeader<'a> {
    name: String,
    file_name: String,
    params: &'a Parameters,
    config: &'a Config,
    generated: String,
}
impl<'a> SpectrumHeader<'a> {
    pub fn new<S: AsRef<str>>(name: S, params: &'a Parameters, config: &'a Config) -> Self {
        let name = name.as_ref().to_string();
        Self {
            file_name: format!("{}.tl", name),
            name,
            params,
            config,
            generated: Local::now().format("%Y%m%d-%H%M%S").to_string(),
        }
    }
    /// Sets the generation timestamp `YYYYmmdd-HHMMSS`
    pub fn generated<S: Into<String>>(self, generated: S) -> Self {
        Self {
            generated: generated.into(),
            ..self
        }
    }
    /// Appends `_<timestamp>` to the file name
    pub fn timestamp_suffix(self) -> Self {
        Self {
            file_name: format!("{}_{}.tl", self.name, self.generated),
            ..self
        }
    }
    fn convection(&self) -> String {
        let teff = self.params.teff as f64;
        if is_convective(teff) {
            format!(
                "Convection: ML2 = {:.2}",
                mixing_length(teff, self.params.log_g)
            )
        } else {
            String::from("Convection: None")
        }
    }
    /// Writes the header followed by the model atmosphere `fort.7` found in `dir`
    pub fn add_to_model<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let model = dir.as_ref().join("fort.7");
        let atmosphere = fs::read(&model).map_err(|e| FilesError::Io(e, model))?;
        let path = self.write_in(dir.as_ref())?;
        let mut file = OpenOptions::new()
            .append(true)
            .open(&path)
            .map_err(|e| FilesError::Io(e, path.clone()))?;
        file.write_all(&atmosphere)?;
        log::info!("Header added to file {}", self.file_name);
        Ok(path)
    }
}
impl InputFile for SpectrumHeader<'_> {
    fn file_name(&self) -> &str {
        &self.file_name
    }
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let params = self.params;
        writeln!(writer, "TEFF     = {}", params.teff)?;
        writeln!(writer, "LOG_G    = {:.2}", params.log_g)?;
        writeln!(writer, "COMMENT    Tlusty version {}", self.config.tl_version)?;
        writeln!(writer, "COMMENT    Synspec version {}", self.config.syn_version)?;
        writeln!(writer, "COMMENT    Generated {}", self.generated)?;
        writeln!(writer, "COMMENT    User: {}", self.config.user)?;
        writeln!(writer, "COMMENT    Star Name {}", params.name)?;
        writeln!(writer, "COMMENT    {}", self.convection())?;
        writeln!(writer, "COMMENT    el  log[N/H]  [N/H]")?;
        for (z, abn) in &params.abundances {
            writeln!(
                writer,
                "COMMENT    {:02}   {:.2}     {}",
                z,
                abn.log10(),
                sci(*abn, 2)
            )?;
        }
        writeln!(writer, "NAXIS    = 2")?;
        writeln!(writer, "TTYPE1   = 'wavelength'")?;
        writeln!(writer, "TUNIT1   = 'Angstrom'")?;
        writeln!(writer, "TTYPE2   = 'Flambda'")?;
        writeln!(writer, "TUNIT2   = 'erg/cm2/s/Angstrom'")?;
        writeln!(writer, "COMMENT    Air wavelengths > 200 nm")?;
        writeln!(writer, "END")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            user: String::from("A. Observer"),
            ..Default::default()
        }
    }

    #[test]
    fn golden() {
        let params = Parameters::new("WD 1145+017", 16900., 8.07, [(1, 1.), (12, 1e-6)]);
        let config = config();
        let header = SpectrumHeader::new("wd1145", &params, &config).generated("20201231-235959");
        assert_eq!(header.file_name(), "wd1145.tl");
        assert_eq!(
            header.render().unwrap(),
            "TEFF     = 16900
LOG_G    = 8.07
COMMENT    Tlusty version 208
COMMENT    Synspec version 54
COMMENT    Generated 20201231-235959
COMMENT    User: A. Observer
COMMENT    Star Name WD 1145+017
COMMENT    Convection: None
COMMENT    el  log[N/H]  [N/H]
COMMENT    01   0.00     1.00e+00
COMMENT    12   -6.00     1.00e-06
NAXIS    = 2
TTYPE1   = 'wavelength'
TUNIT1   = 'Angstrom'
TTYPE2   = 'Flambda'
TUNIT2   = 'erg/cm2/s/Angstrom'
COMMENT    Air wavelengths > 200 nm
END
"
        );
    }

    #[test]
    fn convective_model_with_atmosphere() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("fort.7"), "  70  2\n 1.0D-05\n").unwrap();
        let params = Parameters::new("G29-38", 11800., 8.4, [(1, 1.)]);
        let config = config();
        let path = SpectrumHeader::new("g2938", &params, &config)
            .generated("20210101-000000")
            .timestamp_suffix()
            .add_to_model(dir.path())
            .unwrap();
        assert_eq!(path, dir.path().join("g2938_20210101-000000.tl"));
        let text = fs::read_to_string(path).unwrap();
        let ml = mixing_length(11800., 8.4);
        assert!(text.contains(&format!("COMMENT    Convection: ML2 = {:.2}\n", ml)));
        assert!(text.ends_with("END\n  70  2\n 1.0D-05\n"));
    }

    #[test]
    fn timestamp_keeps_the_name() {
        let params = Parameters::new("DA", 20000., 8., [(1, 1.)]);
        let config = config();
        let header = SpectrumHeader::new("model.tl", &params, &config)
            .generated("20210101-000000")
            .timestamp_suffix();
        assert_eq!(header.file_name(), "model.tl_20210101-000000.tl");
    }

    #[test]
    fn missing_atmosphere() {
        let dir = tempfile::tempdir().unwrap();
        let params = Parameters::new("DA", 20000., 8., [(1, 1.)]);
        let config = config();
        assert!(matches!(
            SpectrumHeader::new("da", &params, &config).add_to_model(dir.path()),
            Err(FilesError::Io(..))
        ));
    }
}
