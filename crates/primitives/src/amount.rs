//! Decimal amounts as typed by users, and their smallest-unit integer representation.
//!
//! All comparisons against protocol bounds and balances happen on the integer representation. The
//! decimal form only exists at the edges (user input and display).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::AmountParseError;

/// The denomination an amount is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Denomination {
    /// Bitcoin, whose smallest unit is the satoshi.
    #[default]
    Btc,

    /// The native token of the Cosmos-side chain, whose smallest unit is `ubbn`.
    Baby,
}

impl Denomination {
    /// The number of fractional decimal places between the display unit and the smallest unit.
    pub const fn decimals(&self) -> u32 {
        match self {
            Denomination::Btc => 8,
            Denomination::Baby => 6,
        }
    }

    /// The number of smallest units in one display unit.
    pub const fn unit_factor(&self) -> u64 {
        10u64.pow(self.decimals())
    }

    /// The ticker symbol of the display unit.
    pub const fn ticker(&self) -> &'static str {
        match self {
            Denomination::Btc => "BTC",
            Denomination::Baby => "BABY",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

/// Parses a user-entered decimal string into smallest units of `denom`.
///
/// The accepted grammar is an optional sign, decimal digits and at most one `.` (either side of the
/// dot may be empty, but not both). Surrounding whitespace is ignored and trailing fractional zeros
/// do not count towards the precision limit.
///
/// Errors are reported in this order: [`AmountParseError::NotANumber`],
/// [`AmountParseError::TooPrecise`], [`AmountParseError::Negative`],
/// [`AmountParseError::Overflow`].
pub fn parse_units(input: &str, denom: Denomination) -> Result<u64, AmountParseError> {
    let trimmed = input.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(AmountParseError::NotANumber);
    }

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return Err(AmountParseError::NotANumber);
    }

    let max = denom.decimals();
    let frac = frac_part.trim_end_matches('0');
    if frac.len() > max as usize {
        return Err(AmountParseError::TooPrecise { max });
    }

    let is_zero = int_part.bytes().chain(frac.bytes()).all(|b| b == b'0');
    if negative && !is_zero {
        return Err(AmountParseError::Negative);
    }

    let magnitude = accumulate_digits(0, int_part)
        .and_then(|int| int.checked_mul(u128::from(denom.unit_factor())))
        .and_then(|int| {
            // `frac` has at most `max` digits so the padding exponent never underflows.
            let scale = 10u128.pow(max - frac.len() as u32);
            accumulate_digits(0, frac)
                .and_then(|frac| frac.checked_mul(scale))
                .and_then(|frac| int.checked_add(frac))
        })
        .ok_or(AmountParseError::Overflow)?;

    u64::try_from(magnitude).map_err(|_| AmountParseError::Overflow)
}

fn accumulate_digits(init: u128, digits: &str) -> Option<u128> {
    digits.bytes().try_fold(init, |acc, b| {
        acc.checked_mul(10)?.checked_add(u128::from(b - b'0'))
    })
}

/// Formats an amount of smallest units as a decimal string in the display unit of `denom`, without
/// trailing fractional zeros.
pub fn format_units(units: u64, denom: Denomination) -> String {
    let factor = denom.unit_factor();
    let whole = units / factor;
    let frac = units % factor;

    if frac == 0 {
        return whole.to_string();
    }

    let width = denom.decimals() as usize;
    let frac = format!("{frac:0width$}");
    format!("{whole}.{}", frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parses_btc_amounts() {
        assert_eq!(parse_units("1", Denomination::Btc), Ok(100_000_000));
        assert_eq!(parse_units("0.0001", Denomination::Btc), Ok(10_000));
        assert_eq!(parse_units(".5", Denomination::Btc), Ok(50_000_000));
        assert_eq!(parse_units("2.", Denomination::Btc), Ok(200_000_000));
        assert_eq!(parse_units(" 0.00000001 ", Denomination::Btc), Ok(1));
        assert_eq!(parse_units("+3", Denomination::Btc), Ok(300_000_000));
    }

    #[test]
    fn precision_depends_on_denomination() {
        assert_eq!(
            parse_units("0.0000001", Denomination::Baby),
            Err(AmountParseError::TooPrecise { max: 6 })
        );
        assert_eq!(parse_units("0.0000001", Denomination::Btc), Ok(10));
        assert_eq!(parse_units("1.000001", Denomination::Baby), Ok(1_000_001));
    }

    #[test]
    fn trailing_zeros_are_not_precision() {
        assert_eq!(parse_units("1.5000000000000", Denomination::Btc), Ok(150_000_000));
    }

    #[test]
    fn rejects_non_numbers() {
        for input in [
            "", " ", ".", "-", "abc", "1.2.3", "1e3", "0x10", "1,5", "--1", "NaN", "inf",
        ] {
            assert_eq!(
                parse_units(input, Denomination::Btc),
                Err(AmountParseError::NotANumber),
                "input {input:?} must not parse"
            );
        }
    }

    #[test]
    fn negative_and_oversized_values() {
        assert_eq!(parse_units("-1", Denomination::Btc), Err(AmountParseError::Negative));
        assert_eq!(parse_units("-0", Denomination::Btc), Ok(0));
        assert_eq!(
            parse_units("-1.000000001", Denomination::Btc),
            Err(AmountParseError::TooPrecise { max: 8 })
        );
        assert_eq!(
            parse_units("-99999999999999999999999999999999999999999", Denomination::Btc),
            Err(AmountParseError::Negative)
        );
        assert_eq!(
            parse_units("999999999999", Denomination::Btc),
            Err(AmountParseError::Overflow)
        );
        assert_eq!(
            parse_units("99999999999999999999999999999999999999999", Denomination::Btc),
            Err(AmountParseError::Overflow)
        );
    }

    #[test]
    fn u64_boundary_is_exact() {
        // u64::MAX == 18_446_744_073_709_551_615
        assert_eq!(
            parse_units("184467440737.09551615", Denomination::Btc),
            Ok(u64::MAX)
        );
        assert_eq!(
            parse_units("184467440737.09551616", Denomination::Btc),
            Err(AmountParseError::Overflow)
        );
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_units(150_000_000, Denomination::Btc), "1.5");
        assert_eq!(format_units(1, Denomination::Btc), "0.00000001");
        assert_eq!(format_units(2_000_000, Denomination::Baby), "2");
        assert_eq!(format_units(0, Denomination::Baby), "0");
    }

    #[test]
    fn denomination_serde() {
        let json = serde_json::to_string(&Denomination::Baby).unwrap();
        assert_eq!(json, "\"BABY\"");
        let denom: Denomination = serde_json::from_str("\"BTC\"").unwrap();
        assert_eq!(denom, Denomination::Btc);
    }

    proptest! {
        #[test]
        fn formatted_units_parse_back(units in any::<u64>(), baby in any::<bool>()) {
            let denom = if baby { Denomination::Baby } else { Denomination::Btc };
            prop_assert_eq!(parse_units(&format_units(units, denom), denom), Ok(units));
        }
    }
}
