//! Convergence diagnostics of a TLUSTY run

use crate::output::{timing, DepthPoints, FluxConservation, IterationLog, Result};
use std::{fmt, path::Path};
use strum::IntoEnumIterator;

/// Flux departure [%] above which a model is suspicious
pub const FLUX_DEPARTURE_LIMIT: f64 = 1.;

/// State vector quantities followed along the iterations
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::EnumIter, strum_macros::Display)]
pub enum Quantity {
    #[strum(to_string = "Temperature")]
    Temperature,
    #[strum(to_string = "Maximum in State Vector")]
    Maximum,
}
impl Quantity {
    /// Column of the quantity in the convergence log
    pub fn column(&self) -> &'static str {
        match self {
            Quantity::Temperature => "TEMP",
            Quantity::Maximum => "MAXIMUM",
        }
    }
}

/// Relative change of a quantity at one iteration
#[derive(Debug, Clone, PartialEq)]
pub struct IterationProfile {
    pub iteration: u32,
    /// Relative change at each depth point
    pub change: Vec<f64>,
}

/// Everything needed to assess the convergence of a TLUSTY model
#[derive(Debug, Clone)]
pub struct Convergence {
    pub log: IterationLog,
    pub depths: DepthPoints,
    /// Run time [s]
    pub time: f64,
    /// Largest departure from flux conservation [%]
    pub flux_departure: f64,
}
impl Convergence {
    /// Loads `fort.6`, `fort.7`, `fort.9` and `fort.69` from the directory `path`
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading TLUSTY output from {:?}", path);
        let this = Self {
            log: IterationLog::from_path(path.join("fort.9"))?,
            depths: DepthPoints::from_path(path.join("fort.7"))?,
            time: timing(path.join("fort.69"))?,
            flux_departure: FluxConservation::from_path(path.join("fort.6"))?.departure()?,
        };
        if !this.is_flux_conserved() {
            log::warn!(
                "Departure from flux equilibrium of {:.1} pct. May be result of poor convergence.",
                this.flux_departure
            );
        }
        Ok(this)
    }
    pub fn is_flux_conserved(&self) -> bool {
        self.flux_departure < FLUX_DEPARTURE_LIMIT
    }
    /// Relative change of `quantity` versus depth for each iteration
    pub fn profiles(&self, quantity: Quantity) -> Result<Vec<IterationProfile>> {
        self.log
            .iterations()?
            .into_iter()
            .map(|iteration| {
                Ok(IterationProfile {
                    iteration,
                    change: self.log.at_iteration(quantity.column(), iteration)?,
                })
            })
            .collect()
    }
    /// Largest relative change of `quantity` at each iteration
    pub fn history(&self, quantity: Quantity) -> Result<Vec<(u32, f64)>> {
        self.log.max_per_iteration(quantity.column())
    }
    /// Prints a convergence summary
    pub fn summary(&self) -> Result<()> {
        println!("SUMMARY:");
        println!(" - # of depth points: {}", self.depths.len());
        println!(" - # of iterations: {}", self.log.iterations()?.len());
        println!(" - run time: {:.2}s", self.time);
        println!(
            " - max. departure from flux unity: {:.2}%{}",
            self.flux_departure,
            if self.is_flux_conserved() { "" } else { " (!)" }
        );
        for quantity in Quantity::iter() {
            if let Some((iteration, change)) = self.history(quantity)?.last() {
                println!(
                    " - {}: {:+.3e} at iteration #{}",
                    quantity, change, iteration
                );
            }
        }
        Ok(())
    }
}
impl fmt::Display for Convergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Time={:.2} s, Max Departure from Flux Unity={:.2} pct",
            self.time, self.flux_departure
        )
    }
}
