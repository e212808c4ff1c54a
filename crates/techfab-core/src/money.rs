//! # Money Module
//!
//! Deterministic rounding and display formatting for currency amounts.
//!
//! ## Why Round Per Line?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In IEEE-754 doubles:                                                   │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  quantity × unitPrice × taxRate accumulates representation error,      │
//! │  so a bulk total can drift from the sum of the rounded line amounts    │
//! │  the user sees on screen.                                              │
//! │                                                                         │
//! │  OUR RULE: round every monetary sub-computation individually BEFORE    │
//! │  summation, not just the final total. The displayed lines and the      │
//! │  displayed total then always agree.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use techfab_core::money::{round_to, format_currency};
//!
//! assert_eq!(round_to(0.1 + 0.2), 0.3);
//! assert_eq!(format_currency(1234.5), "RM 1,234.50");
//! ```

// =============================================================================
// Rounding
// =============================================================================

/// Rounds a currency amount to 2 decimal places.
///
/// ## Contract
/// - Pure and total-order-preserving
/// - Idempotent: `round_to(round_to(x)) == round_to(x)`
/// - Half rounds away from zero (2.345 → 2.35, -2.345 → -2.35)
///
/// ## Example
/// ```rust
/// use techfab_core::money::round_to;
///
/// assert_eq!(round_to(2.675), 2.68);
/// assert_eq!(round_to(0.1 + 0.2), 0.3);
/// ```
#[inline]
pub fn round_to(amount: f64) -> f64 {
    round_to_places(amount, 2)
}

/// Rounds to an arbitrary number of decimal places.
///
/// ## Implementation
/// Multiply by `10^decimals`, nudge by machine epsilon so values sitting an
/// ulp below the midpoint (2.675 × 100 = 267.49999...) still round up, round
/// half away from zero, divide back.
pub fn round_to_places(amount: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = amount * factor;
    // One ulp-scale epsilon: only values within representation error of the
    // midpoint are affected. The nudge follows the sign so negative
    // midpoints also round away from zero.
    let nudge = (scaled.abs() * f64::EPSILON).max(f64::EPSILON);
    let nudged = if scaled < 0.0 { scaled - nudge } else { scaled + nudge };
    nudged.round() / factor
}

// =============================================================================
// Display Formatting
// =============================================================================

/// Formats an amount as Malaysian Ringgit: `RM 1,234.56`.
///
/// ## Note
/// This mirrors the en-MY currency format the rest of the product renders
/// with. Negative amounts come out as `-RM 5.00`.
pub fn format_currency(amount: f64) -> String {
    let rounded = round_to(amount);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let cents = (rounded.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;
    format!("{}RM {}.{:02}", sign, group_thousands(whole), fraction)
}

/// Inserts thousands separators into a whole number: 1234567 → "1,234,567".
fn group_thousands(mut n: u64) -> String {
    if n < 1000 {
        return n.to_string();
    }
    let mut groups: Vec<String> = Vec::new();
    while n >= 1000 {
        groups.push(format!("{:03}", n % 1000));
        n /= 1000;
    }
    groups.push(n.to_string());
    groups.reverse();
    groups.join(",")
}

// =============================================================================
// Amount In Words
// =============================================================================

const ONES: [&str; 10] = [
    "", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE",
];
const TEENS: [&str; 10] = [
    "TEN",
    "ELEVEN",
    "TWELVE",
    "THIRTEEN",
    "FOURTEEN",
    "FIFTEEN",
    "SIXTEEN",
    "SEVENTEEN",
    "EIGHTEEN",
    "NINETEEN",
];
const TENS: [&str; 10] = [
    "", "", "TWENTY", "THIRTY", "FORTY", "FIFTY", "SIXTY", "SEVENTY", "EIGHTY", "NINETY",
];
const THOUSANDS: [&str; 4] = ["", "THOUSAND", "MILLION", "BILLION"];

/// Spells a grand total out for the printed document footer.
///
/// ## Example
/// ```rust
/// use techfab_core::money::amount_in_words;
///
/// assert_eq!(
///     amount_in_words(216.0),
///     "RINGGIT MALAYSIA: TWO HUNDRED AND SIXTEEN ONLY"
/// );
/// ```
pub fn amount_in_words(amount: f64) -> String {
    let integer_part = amount.trunc() as u64;
    let decimal_part = ((amount - amount.trunc()) * 100.0).round() as u64;

    let mut result = String::new();
    if integer_part == 0 {
        result.push_str("ZERO");
    } else {
        let mut remaining = integer_part;
        let mut scale = 0;
        while remaining > 0 {
            let chunk = remaining % 1000;
            if chunk != 0 {
                let mut piece = spell_under_thousand(chunk);
                if !THOUSANDS[scale].is_empty() {
                    piece.push(' ');
                    piece.push_str(THOUSANDS[scale]);
                }
                if !result.is_empty() {
                    piece.push(' ');
                    piece.push_str(&result);
                }
                result = piece;
            }
            remaining /= 1000;
            scale += 1;
        }
    }

    let mut words = format!("RINGGIT MALAYSIA: {}", result);
    if decimal_part > 0 {
        words.push_str(" AND CENTS ");
        words.push_str(&spell_under_thousand(decimal_part));
    }
    words.push_str(" ONLY");
    words
}

/// Spells 1..=999 in uppercase English words.
fn spell_under_thousand(n: u64) -> String {
    match n {
        0 => String::new(),
        1..=9 => ONES[n as usize].to_string(),
        10..=19 => TEENS[(n - 10) as usize].to_string(),
        20..=99 => {
            let tail = n % 10;
            if tail == 0 {
                TENS[(n / 10) as usize].to_string()
            } else {
                format!("{} {}", TENS[(n / 10) as usize], ONES[tail as usize])
            }
        }
        _ => {
            let head = format!("{} HUNDRED", ONES[(n / 100) as usize]);
            if n % 100 == 0 {
                head
            } else {
                format!("{} AND {}", head, spell_under_thousand(n % 100))
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
