//! Mixing length of convective white dwarf atmospheres

/// Models at or below this effective temperature [K] are convective
pub const CONVECTIVE_TEFF: f64 = 15000.;

/// Returns `true` if a model at `teff` [K] needs convection
pub fn is_convective(teff: f64) -> bool {
    teff <= CONVECTIVE_TEFF
}

/// ML2 mixing length parameter
///
/// Tremblay et al. (2015) fit of the 3D calibration, with
///  * `teff`: effective temperature [K]
///  * `log_g`: log10(g/[cm/s2])
pub fn mixing_length(teff: f64, log_g: f64) -> f64 {
    const A: [f64; 13] = [
        1.1989803e+0,
        -1.8659403e+0,
        1.4425600e+0,
        6.4742170e-2,
        -2.9996192e-2,
        6.0750771e-2,
        -5.2572772e-2,
        5.4690218e+0,
        -1.6330177e-1,
        2.8348941e-1,
        1.7353691e1,
        4.3545950e-1,
        -2.1739157e-1,
    ];
    let g0 = log_g - 8.;
    let t0 = (teff - 12000.) / 1000. - 1.6 * g0;
    (A[0] + (A[1] + (A[3] * t0 + A[4] * g0).exp()) * ((A[5] + A[6] * (A[7] * t0).exp()) * t0 + A[8] * g0).exp())
        + A[9] * (-A[10] * ((t0 - A[11]).powi(2) + (g0 - A[12]).powi(2))).exp()
}
