use super::{InputFile, Result};
use crate::{
    config::Keywords,
    convection::{is_convective, mixing_length},
    Config,
};
use std::io::Write;

/// TLUSTY keyword parameters file
///
/// Convection is switched on for models at or below 15000K, with the
/// mixing length `HMIX0` from [mixing_length].
#[derive(Debug, Clone)]
pub struct AuxFile {
    name: String,
    mixing_length: Option<f64>,
    keywords: Keywords,
}
impl AuxFile {
    pub fn new<S: Into<String>>(name: S, teff: f64, log_g: f64, config: &Config) -> Self {
        let (mixing_length, keywords) = if is_convective(teff) {
            (
                Some(mixing_length(teff, log_g)),
                config.aux_convec.clone(),
            )
        } else {
            (None, config.aux_no_convec.clone())
        };
        Self {
            name: name.into(),
            mixing_length,
            keywords,
        }
    }
    pub fn is_convective(&self) -> bool {
        self.mixing_length.is_some()
    }
}
impl InputFile for AuxFile {
    fn file_name(&self) -> &str {
        &self.name
    }
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        if let Some(ml) = self.mixing_length {
            writeln!(writer, "HMIX0={:.3}", ml)?;
        }
        for (key, value) in &self.keywords {
            writeln!(writer, "{}={}", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radiative() {
        let aux = AuxFile::new("hot.aux", 20546., 7.91, &Config::default());
        assert!(!aux.is_convective());
        assert_eq!(
            aux.render().unwrap(),
            "tAUDIV=1\niACC=7\nnITER=60\nIHYDPR=2\n"
        );
    }

    #[test]
    fn convective() {
        let aux = AuxFile::new("cool.aux", 12000., 8., &Config::default());
        assert!(aux.is_convective());
        let text = aux.render().unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], format!("HMIX0={:.3}", mixing_length(12000., 8.)));
        assert_eq!(lines.len(), 14);
        assert!(lines.contains(&"TAUDIV=1.000e-02"));
        assert!(lines.contains(&"CRFLIM=-10"));
        assert_eq!(lines[13], "ICONRS=5");
    }

    #[test]
    fn written_under_its_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = AuxFile::new("da.aux", 30000., 8., &Config::default())
            .write_in(dir.path())
            .unwrap();
        assert_eq!(path, dir.path().join("da.aux"));
        assert!(std::fs::read_to_string(path).unwrap().starts_with("tAUDIV=1\n"));
    }
}
