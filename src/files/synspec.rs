use super::{InputFile, Result};
use std::io::Write;

/// SYNSPEC control parameters
///
/// See Hubeny & Lanz (2017), paper I, for the meaning of each flag.
#[derive(Debug, Clone, Copy)]
pub struct SynspecOptions {
    /// Basic mode: 0 normal spectrum, 2 continuum only, 10 with molecules, -1 opacity only
    pub imode: i32,
    /// Standard depth index where T = (2/3)Teff
    pub idstd: i32,
    pub iprin: i32,
    /// Input model: 0 Kurucz, 1 TLUSTY, 2 accretion disk
    pub inmod: i32,
    pub intrpl: i32,
    pub ichang: i32,
    /// Non-zero reads abundance changes from `fort.56`
    pub ichemc: i32,
    pub iophli: i32,
    /// Quasi-molecular satellites of Lyman alpha, beta, gamma and H alpha
    pub nunalp: i32,
    pub nunbet: i32,
    pub nungam: i32,
    pub nunbal: i32,
    pub ifreq: i32,
    pub inlte: i32,
    pub icontl: i32,
    pub inlist: i32,
    pub ifhe2: i32,
    /// Special line profiles of H I, He I and He II
    pub ihydpr: i32,
    pub ihe1pr: i32,
    pub ihe2pr: i32,
    /// Line opacity cutoff [A]
    pub cutof0: f64,
    pub cutofs: i32,
    /// Line rejection parameter
    pub relop: f64,
    /// Maximum wavelength spacing [A]
    pub space: f64,
}
impl Default for SynspecOptions {
    fn default() -> Self {
        Self {
            imode: 0,
            idstd: 50,
            iprin: 3,
            inmod: 1,
            intrpl: 0,
            ichang: 0,
            ichemc: 1,
            iophli: 0,
            nunalp: 1,
            nunbet: 1,
            nungam: 1,
            nunbal: 0,
            ifreq: 1,
            inlte: 0,
            icontl: 0,
            inlist: 0,
            ifhe2: 0,
            ihydpr: 2,
            ihe1pr: 0,
            ihe2pr: 0,
            cutof0: 3.,
            cutofs: 0,
            relop: 1e-4,
            space: 0.01,
        }
    }
}

/// SYNSPEC wavelength range and settings `fort.55`
#[derive(Debug, Clone, Copy)]
pub struct SynspecFile {
    /// Starting wavelength [A]
    pub w1: i64,
    /// Ending wavelength [A], negative for vacuum wavelengths
    pub w2: i64,
    pub options: SynspecOptions,
}
impl SynspecFile {
    pub fn new(w1: i64, w2: i64) -> Self {
        Self {
            w1,
            w2,
            options: Default::default(),
        }
    }
    pub fn options(self, options: SynspecOptions) -> Self {
        Self { options, ..self }
    }
}
impl InputFile for SynspecFile {
    fn file_name(&self) -> &str {
        "fort.55"
    }
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let o = &self.options;
        writeln!(writer, "{}\t{}\t{}", o.imode, o.idstd, o.iprin)?;
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            o.inmod, o.intrpl, o.ichang, o.ichemc
        )?;
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            o.iophli, o.nunalp, o.nunbet, o.nungam, o.nunbal
        )?;
        writeln!(
            writer,
            "{}\t{}\t{}\t{}\t{}",
            o.ifreq, o.inlte, o.icontl, o.inlist, o.ifhe2
        )?;
        writeln!(writer, "{}\t{}\t{}", o.ihydpr, o.ihe1pr, o.ihe2pr)?;
        writeln!(
            writer,
            "{}\t{}\t{:.6}\t{}\t{:.6}\t{:.6}",
            self.w1, self.w2, o.cutof0, o.cutofs, o.relop, o.space
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden() {
        assert_eq!(
            SynspecFile::new(3000, 7000).render().unwrap(),
            "0\t50\t3\n1\t0\t0\t1\n0\t1\t1\t1\t0\n1\t0\t0\t0\t0\n2\t0\t0\n3000\t7000\t3.000000\t0\t0.000100\t0.010000\n"
        );
    }

    #[test]
    fn continuum_in_vacuum() {
        let fort55 = SynspecFile::new(1100, -1800).options(SynspecOptions {
            imode: 2,
            space: 0.5,
            ..Default::default()
        });
        let text = fort55.render().unwrap();
        assert!(text.starts_with("2\t50\t3\n"));
        assert!(text.ends_with("1100\t-1800\t3.000000\t0\t0.000100\t0.500000\n"));
    }
}
