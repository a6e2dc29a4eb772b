use crate::error::{PurchaseError, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Number of decimal places in the chain's base-unit encoding (wei per BNB).
const NATIVE_DECIMALS: usize = 18;

/// Checks a raw amount string against the numeric input pattern:
/// digits only, at most one decimal point, no sign.
///
/// The empty string and a bare `.` are accepted so that a field can be
/// cleared or edited through intermediate keystrokes; both read as zero.
pub fn is_valid_amount(input: &str) -> bool {
    let mut seen_dot = false;
    for c in input.chars() {
        match c {
            '0'..='9' => {}
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    true
}

/// Parses an amount string into a `Decimal`, enforcing the input pattern.
///
/// Returns `None` for anything the pattern rejects, so callers can retain
/// their previous value without raising an error.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    if !is_valid_amount(input) {
        return None;
    }
    let trimmed = input.trim_end_matches('.');
    if trimmed.is_empty() {
        return Some(Decimal::ZERO);
    }
    let owned;
    let normalized = if trimmed.starts_with('.') {
        owned = format!("0{trimmed}");
        owned.as_str()
    } else {
        trimmed
    };
    Decimal::from_str(normalized).ok()
}

/// A native-currency amount in the chain's integer base-unit encoding.
///
/// Wraps the wei value produced by scaling a decimal BNB string by 10^18.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WeiAmount(u128);

impl WeiAmount {
    pub const ZERO: Self = Self(0);

    /// Encodes a decimal BNB string as wei.
    ///
    /// Fails on input that does not match the numeric pattern, on more than
    /// 18 fractional digits, and on values that overflow the encoding.
    pub fn parse(input: &str) -> Result<Self> {
        if !is_valid_amount(input) {
            return Err(PurchaseError::ValidationError(format!(
                "invalid amount: {input:?}"
            )));
        }

        let (int_part, frac_part) = match input.split_once('.') {
            Some((int, frac)) => (int, frac),
            None => (input, ""),
        };

        if frac_part.len() > NATIVE_DECIMALS {
            return Err(PurchaseError::EncodingError(format!(
                "fractional component exceeds {NATIVE_DECIMALS} decimals"
            )));
        }

        let int: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| {
                PurchaseError::EncodingError("integer component overflows".to_string())
            })?
        };
        let frac: u128 = if frac_part.is_empty() {
            0
        } else {
            frac_part.parse().map_err(|_| {
                PurchaseError::EncodingError("fractional component overflows".to_string())
            })?
        };

        // frac * scale < 10^18 by construction, only the integer part can overflow
        let scale = 10u128.pow((NATIVE_DECIMALS - frac_part.len()) as u32);
        int.checked_mul(10u128.pow(NATIVE_DECIMALS as u32))
            .and_then(|wei| wei.checked_add(frac * scale))
            .map(Self)
            .ok_or_else(|| {
                PurchaseError::EncodingError("amount exceeds the encodable range".to_string())
            })
    }

    pub fn value(&self) -> u128 {
        self.0
    }
}
