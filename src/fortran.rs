//! Fortran and C printf number conventions shared by the writers and parsers

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

static D_EXPONENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9.])[Dd]([+-]?[0-9])").expect("valid exponent regex"));

/// Formats `value` like C `%.{precision}e`
///
/// Rust writes `1.48e-7` where the solvers expect `1.480e-07`:
/// the exponent always carries a sign and at least two digits.
pub fn sci(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value).to_lowercase();
    }
    let repr = format!("{:.*e}", precision, value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or_default();
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        None => repr,
    }
}

/// Rewrites Fortran double precision exponents (`1.0D-05`) as `1.0e-05`
pub fn normalize_exponents(line: &str) -> Cow<'_, str> {
    D_EXPONENT.replace_all(line, "${1}e${2}")
}

/// Parses every whitespace separated token of `line` as a float
pub fn parse_floats(line: &str) -> Result<Vec<f64>, std::num::ParseFloatError> {
    normalize_exponents(line)
        .split_whitespace()
        .map(|token| token.parse::<f64>())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sci_pads_exponent() {
        assert_eq!(sci(1.48e-7, 3), "1.480e-07");
        assert_eq!(sci(1e-50, 1), "1.0e-50");
        assert_eq!(sci(0.01, 3), "1.000e-02");
        assert_eq!(sci(1.0, 3), "1.000e+00");
        assert_eq!(sci(-12345.0, 2), "-1.23e+04");
        assert_eq!(sci(1e120, 2), "1.00e+120");
    }

    #[test]
    fn fortran_exponents() {
        assert_eq!(normalize_exponents(" 1.0D-05  2.5D+03 3D2"), " 1.0e-05  2.5e+03 3e2");
        assert_eq!(normalize_exponents("ID TEMP"), "ID TEMP");
        assert_eq!(parse_floats(" 1.5D-01 -2.0d+00 7").unwrap(), vec![0.15, -2.0, 7.0]);
    }
}
