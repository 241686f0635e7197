use crate::fortran::sci;
use std::{collections::BTreeMap, fmt};

/// Structure to hold the data to create a model
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub name: String,
    /// Effective temperature [K]
    pub teff: i64,
    /// log10(g/[cm/s2])
    pub log_g: f64,
    /// Abundances N/H in number space, keyed by atomic number
    pub abundances: BTreeMap<u32, f64>,
}
impl Parameters {
    /// Creates a new set of model parameters
    ///
    /// `abundances` must be atomic numbers paired with abundances in number space.
    /// Negative abundances are assumed to be log(N/H) and converted,
    /// non-positive atomic numbers are discarded; both cases log a warning.
    pub fn new<S, I>(name: S, teff: f64, log_g: f64, abundances: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (i64, f64)>,
    {
        let mut warn = false;
        let abundances = abundances
            .into_iter()
            .filter_map(|(z, abn)| {
                let Ok(z) = u32::try_from(z) else {
                    warn = true;
                    return None;
                };
                if z == 0 {
                    warn = true;
                    return None;
                }
                if abn < 0. {
                    warn = true;
                    Some((z, 10f64.powf(abn)))
                } else {
                    Some((z, abn))
                }
            })
            .collect();
        if warn {
            log::warn!(
                "abundances must be keyed by positive integer atomic numbers with values in number space, not log(N/H): the input has been corrected"
            );
        }
        Self {
            name: name.into(),
            teff: teff.trunc() as i64,
            log_g,
            abundances,
        }
    }
    /// Sets the abundance of element `atm_no`
    pub fn set_abundance(&mut self, atm_no: u32, value: f64) -> &mut Self {
        self.abundances.insert(atm_no, value);
        self
    }
}
impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{}\tTeff = {}\tLog g = {:.3}",
            self.name, self.teff, self.log_g
        )?;
        writeln!(f, "atm\tabn")?;
        for (z, abn) in &self.abundances {
            writeln!(f, "{}\t{}", z, sci(*abn, 3))?;
        }
        Ok(())
    }
}
