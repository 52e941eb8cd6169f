use std::fmt;

/// Money is held as integer cents so repeated deposits and withdrawals never drift.
/// 1 unit = 100 cents, so 70.00 = 7000 cents.
pub type Cents = i64;

/// Format cents as a human-readable amount with two decimals.
/// Example: 7000 -> "70.00", -1234 -> "-12.34"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Parse a decimal string into cents.
/// Example: "50.00" -> 5000, "12.5" -> 1250, "+100" -> 10000, ".5" -> 50, "1.5e3" -> 150000
///
/// A leading `-` is accepted so the ledger, not the parser, decides that
/// negative amounts are invalid. An amount finer than one cent is rejected;
/// trailing zeros past the second decimal ("1.500") are fine.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    let (mantissa, exponent) = match rest.find(['e', 'E']) {
        Some(pos) => (&rest[..pos], parse_exponent(&rest[pos + 1..])?),
        None => (rest, 0),
    };

    let (units_str, decimal_str) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if units_str.is_empty() && decimal_str.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !is_ascii_digits(units_str) || !is_ascii_digits(decimal_str) {
        return Err(ParseCentsError::InvalidFormat);
    }

    // Number of digits sitting to the right of the cents position
    let digits = format!("{}{}", units_str, decimal_str);
    let excess = (decimal_str.len() as i64)
        .checked_sub(2)
        .and_then(|n| n.checked_sub(exponent))
        .ok_or(ParseCentsError::Overflow)?;

    let cents = if excess > 0 {
        let split = digits.len().saturating_sub(excess as usize);
        let (kept, dropped) = digits.split_at(split);
        if dropped.bytes().any(|b| b != b'0') {
            return Err(ParseCentsError::SubCent);
        }
        digits_to_i64(kept)?
    } else {
        let base = digits_to_i64(&digits)?;
        if base == 0 {
            0
        } else {
            u32::try_from(excess.unsigned_abs())
                .ok()
                .and_then(|shift| 10i64.checked_pow(shift))
                .and_then(|scale| base.checked_mul(scale))
                .ok_or(ParseCentsError::Overflow)?
        }
    };

    Ok(if negative { -cents } else { cents })
}

fn parse_exponent(input: &str) -> Result<i64, ParseCentsError> {
    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if digits.is_empty() || !is_ascii_digits(digits) {
        return Err(ParseCentsError::InvalidFormat);
    }

    let value: i64 = digits.parse().map_err(|_| ParseCentsError::Overflow)?;
    Ok(if negative { -value } else { value })
}

fn digits_to_i64(digits: &str) -> Result<i64, ParseCentsError> {
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }
    significant.parse().map_err(|_| ParseCentsError::Overflow)
}

fn is_ascii_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    SubCent,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "invalid money format"),
            ParseCentsError::SubCent => write!(f, "amount is finer than one cent"),
            ParseCentsError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
