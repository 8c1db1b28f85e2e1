use std::{fmt::Display, iter, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const BRL_SYMBOL: &str = "R$";

//--------------------------------------     Centavos       ---------------------------------------------------------
/// An amount of Brazilian reais, held as a whole number of centavos.
///
/// Catalog APIs hand prices over as decimal strings (`"19000.0000"`). Those are parsed straight into this type so that
/// no floating point arithmetic happens between the API and the `R$ 19.000,00` display form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centavos(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Value cannot be represented in centavos: {0}")]
pub struct CentavosConversionError(String);

impl From<i64> for Centavos {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl TryFrom<f64> for Centavos {
    type Error = CentavosConversionError;

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(CentavosConversionError(format!("{value} is not a finite number")));
        }
        let cents = (value * 100.0).round();
        if cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return Err(CentavosConversionError(format!("{value} is too large to convert to centavos")));
        }
        Ok(Self(cents as i64))
    }
}

impl FromStr for Centavos {
    type Err = CentavosConversionError;

    /// Plain decimals (`-1234.5678`) are parsed exactly and rounded half away from zero. Anything else that still
    /// reads as a float (`1e3`, `1_000.5`) is parsed as `f64` and rounded to the nearest centavo.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match parse_plain_decimal(trimmed) {
            Some(result) => result,
            None => strip_digit_separators(trimmed)
                .ok_or_else(|| CentavosConversionError(format!("Invalid amount: {s}. Misplaced '_'.")))?
                .parse::<f64>()
                .map_err(|e| CentavosConversionError(format!("Invalid amount: {s}. {e}.")))
                .and_then(Self::try_from),
        }
    }
}

/// Removes `_` digit separators. Each one must sit between two digits, so `1_000` is fine but `_5`, `5_` and `1__000`
/// are rejected.
fn strip_digit_separators(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let well_placed = bytes.iter().enumerate().filter(|(_, b)| **b == b'_').all(|(i, _)| {
        i > 0 && bytes[i - 1].is_ascii_digit() && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit())
    });
    well_placed.then(|| s.replace('_', ""))
}

/// Returns `None` when `s` is not of the form `[+-]digits[.digits]`, so that the caller can try a looser parser.
fn parse_plain_decimal(s: &str) -> Option<Result<Centavos, CentavosConversionError>> {
    let (negative, unsigned) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction) {
        return None;
    }
    let overflow = || CentavosConversionError(format!("{s} is too large to convert to centavos"));
    let digits = whole.bytes().chain(fraction.bytes().chain(iter::repeat(b'0')).take(2));
    let mut cents = 0i64;
    for digit in digits {
        match cents.checked_mul(10).and_then(|c| c.checked_add(i64::from(digit - b'0'))) {
            Some(c) => cents = c,
            None => return Some(Err(overflow())),
        }
    }
    if fraction.as_bytes().get(2).is_some_and(|d| *d >= b'5') {
        match cents.checked_add(1) {
            Some(c) => cents = c,
            None => return Some(Err(overflow())),
        }
    }
    Some(Ok(Centavos(if negative { -cents } else { cents })))
}

/// Renders the amount the Brazilian way, `R$ 12.345,67`, whatever the host locale is.
impl Display for Centavos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = (abs / 100).to_string();
        let mut grouped = String::with_capacity(units.len() + units.len() / 3);
        for (i, c) in units.chars().enumerate() {
            if i > 0 && (units.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        // Build the `12,345.67` form first and then swap the separators.
        let swapped = format!("{sign}{grouped}.{:02}", abs % 100)
            .chars()
            .map(|c| match c {
                ',' => '.',
                '.' => ',',
                c => c,
            })
            .collect::<String>();
        write!(f, "{BRL_SYMBOL} {swapped}")
    }
}

impl Centavos {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_reais(reais: i64) -> Self {
        Self(reais * 100)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display_uses_brazilian_separators() {
        assert_eq!(Centavos::default().to_string(), "R$ 0,00");
        assert_eq!(Centavos::from(5).to_string(), "R$ 0,05");
        assert_eq!(Centavos::from_reais(999).to_string(), "R$ 999,00");
        assert_eq!(Centavos::from_reais(19_000).to_string(), "R$ 19.000,00");
        assert_eq!(Centavos::from(123_456_789).to_string(), "R$ 1.234.567,89");
        assert_eq!(Centavos::from(-123_450).to_string(), "R$ -1.234,50");
    }

    #[test]
    fn parse_plain_decimals_exactly() {
        assert_eq!("19000.0000".parse::<Centavos>().unwrap(), Centavos::from_reais(19_000));
        assert_eq!(" 12.5 ".parse::<Centavos>().unwrap(), Centavos::from(1250));
        assert_eq!("7".parse::<Centavos>().unwrap(), Centavos::from(700));
        assert_eq!(".5".parse::<Centavos>().unwrap(), Centavos::from(50));
        assert_eq!("5.".parse::<Centavos>().unwrap(), Centavos::from(500));
        assert_eq!("-3.10".parse::<Centavos>().unwrap(), Centavos::from(-310));
        assert_eq!("+3.10".parse::<Centavos>().unwrap(), Centavos::from(310));
        assert_eq!("0.005".parse::<Centavos>().unwrap(), Centavos::from(1));
        assert_eq!("0.00499".parse::<Centavos>().unwrap(), Centavos::from(0));
        assert_eq!("99.999".parse::<Centavos>().unwrap(), Centavos::from(10_000));
    }

    #[test]
    fn parse_float_forms() {
        assert_eq!("1e3".parse::<Centavos>().unwrap(), Centavos::from_reais(1000));
        assert_eq!("1_000.25".parse::<Centavos>().unwrap(), Centavos::from(100_025));
        assert_eq!("1_0e2".parse::<Centavos>().unwrap(), Centavos::from_reais(1000));
        assert_eq!(Centavos::try_from(19.99).unwrap(), Centavos::from(1999));
    }

    #[test]
    fn parse_failures() {
        assert!("abc".parse::<Centavos>().is_err());
        assert!("".parse::<Centavos>().is_err());
        assert!(".".parse::<Centavos>().is_err());
        assert!("-".parse::<Centavos>().is_err());
        assert!("12,50".parse::<Centavos>().is_err());
        assert!("nan".parse::<Centavos>().is_err());
        assert!("inf".parse::<Centavos>().is_err());
        assert!("99999999999999999999".parse::<Centavos>().is_err());
        assert!(Centavos::try_from(f64::MAX).is_err());
        assert!("1e20".parse::<Centavos>().is_err());
    }

    #[test]
    fn misplaced_digit_separators_are_rejected() {
        for s in ["_5", "5_", "1__000", "_", "1_.5", "1._5"] {
            assert!(s.parse::<Centavos>().is_err(), "{s} should not parse");
        }
    }
}
