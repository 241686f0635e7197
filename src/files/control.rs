use super::{InputFile, Result};
use std::{io::Write, path::PathBuf};

/// TLUSTY run options
#[derive(Debug, Clone, Copy)]
pub struct ControlOptions {
    /// Local thermodynamic equilibrium model
    pub lte: bool,
    /// Start from a gray model, otherwise a starting model `fort.8` is required
    pub ltgray: bool,
    /// Number of frequency points
    pub frequencies: u32,
    /// Number of explicit H I energy levels
    pub nlevels: u32,
}
impl Default for ControlOptions {
    fn default() -> Self {
        Self {
            lte: true,
            ltgray: true,
            frequencies: 1000,
            nlevels: 9,
        }
    }
}

/// TLUSTY standard input `fort.5`
#[derive(Debug, Clone)]
pub struct ControlFile {
    pub teff: i64,
    pub log_g: f64,
    /// Name of the keyword parameters file
    pub aux: String,
    /// Path to the H I model atom data
    pub h1_data: PathBuf,
    pub options: ControlOptions,
}
impl ControlFile {
    pub fn new<S: Into<String>>(teff: i64, log_g: f64, aux: S, h1_data: PathBuf) -> Self {
        Self {
            teff,
            log_g,
            aux: aux.into(),
            h1_data,
            options: Default::default(),
        }
    }
    pub fn options(self, options: ControlOptions) -> Self {
        Self { options, ..self }
    }
}

fn flag(value: bool) -> char {
    if value {
        'T'
    } else {
        'F'
    }
}

impl InputFile for ControlFile {
    fn file_name(&self) -> &str {
        "fort.5"
    }
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let ControlOptions {
            lte,
            ltgray,
            frequencies,
            nlevels,
        } = self.options;
        writeln!(writer, "{}  {:.3}", self.teff, self.log_g)?;
        writeln!(writer, "{}  {}", flag(lte), flag(ltgray))?;
        writeln!(writer, "'{}'", self.aux)?;
        writeln!(writer, "{}", frequencies)?;
        writeln!(writer, "1")?;
        writeln!(writer, "2 0 0")?;
        writeln!(
            writer,
            "1     0     {}      0    0      0    ' H 1' '{}'",
            nlevels,
            self.h1_data.display()
        )?;
        writeln!(writer, "1     1     1      1      0      0    ' H 2' ' '")?;
        write!(writer, "0     0     0      -1    0      0    ' ' ' '")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden() {
        let fort5 = ControlFile::new(20546, 7.91, "da.aux", PathBuf::from("/opt/tluspy/data/h1s16.dat"));
        assert_eq!(
            fort5.render().unwrap(),
            "20546  7.910
T  T
'da.aux'
1000
1
2 0 0
1     0     9      0    0      0    ' H 1' '/opt/tluspy/data/h1s16.dat'
1     1     1      1      0      0    ' H 2' ' '
0     0     0      -1    0      0    ' ' ' '"
        );
    }

    #[test]
    fn nlte_restart() {
        let fort5 = ControlFile::new(12000, 8., "a", PathBuf::from("h1.dat")).options(ControlOptions {
            lte: false,
            ltgray: false,
            frequencies: 250,
            nlevels: 16,
        });
        let text = fort5.render().unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[1], "F  F");
        assert_eq!(lines[3], "250");
        assert!(lines[6].starts_with("1     0     16      0"));
    }
}
