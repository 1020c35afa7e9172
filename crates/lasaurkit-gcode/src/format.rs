//! Number formatting for G-code words
//!
//! Coordinates are written with a fixed number of decimals. Rounding follows
//! the controller host's reference output: the exact binary value is rounded
//! to nearest, and an exact tie at the last kept digit goes away from zero.
//! Rust's `{:.N}` rounds exact ties to even, so ties are detected and handled
//! here.

/// Extra digits rendered to tell an exact tie from a near one
const TIE_PROBE_DIGITS: usize = 30;

/// Format `value` with exactly `digits` decimals.
///
/// Non-finite values are written as `Infinity`, `-Infinity` and `NaN`.
pub fn format_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return non_finite(value).to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    let probe = format!("{:.*}", digits + TIE_PROBE_DIGITS, magnitude);
    let (head, tail) = probe.split_at(probe.len() - TIE_PROBE_DIGITS);
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    let body = if is_tie {
        round_up_last_digit(head.trim_end_matches('.'))
    } else {
        format!("{:.*}", digits, magnitude)
    };
    format!("{}{}", sign, body)
}

/// Shortest decimal form, as used for feedrates and seek speeds:
/// `24000`, `0.1`, `1500`.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        non_finite(value).to_string()
    } else if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

fn non_finite(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value > 0.0 {
        "Infinity"
    } else {
        "-Infinity"
    }
}

// Add one unit in the last place of a non-negative decimal string.
fn round_up_last_digit(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut carry = true;
    for b in bytes.iter_mut().rev() {
        if !carry {
            break;
        }
        match *b {
            b'.' => continue,
            b'9' => *b = b'0',
            _ => {
                *b += 1;
                carry = false;
            }
        }
    }
    let mut out = String::with_capacity(bytes.len() + 1);
    if carry {
        out.push('1');
    }
    out.extend(bytes.into_iter().map(char::from));
    out
}
