//! Human-readable rendering of result values.
//!
//! Each [`TestKind`] has one unit-scaling rule. Tiers are half-open
//! `[lower, upper)`, so a value sitting exactly on a boundary is rendered in
//! the larger unit (`1000` bps is `"1.00 Kbps"`).
//!
//! Digits are rounded half away from zero on the shortest decimal form of
//! the value, not on its exact binary expansion: `2.5 ms` renders as
//! `"3 ms"` and `1.005 Kbps` as `"1.01 Kbps"`.

use crate::types::TestKind;

const KILO: f64 = 1_000.0;
const MEGA: f64 = 1_000_000.0;

/// Render a value in the canonical unit of `kind`.
pub fn human_readable(kind: TestKind, value: f64) -> String {
    match kind {
        TestKind::Download | TestKind::Upload => throughput(value),
        TestKind::Latency | TestKind::Jitter => time_micros(value),
        TestKind::PacketLoss => percent(value),
    }
}

/// Like [`human_readable`] but keyed by kind name. Unknown names fall back
/// to the plain decimal form of `value`.
pub fn human_readable_named(kind: &str, value: f64) -> String {
    match kind.parse::<TestKind>() {
        Ok(kind) => human_readable(kind, value),
        Err(_) => format!("{value:?}"),
    }
}

/// Bits per second: `bps`, `Kbps` or `Mbps`.
pub fn throughput(bps: f64) -> String {
    if bps < KILO {
        format!("{} bps", round_half_up(bps, 0))
    } else if bps < MEGA {
        format!("{} Kbps", round_half_up(bps / KILO, 2))
    } else {
        format!("{} Mbps", round_half_up(bps / MEGA, 2))
    }
}

/// Microseconds: `microseconds`, `ms` or `s`.
pub fn time_micros(us: f64) -> String {
    if us < KILO {
        format!("{} microseconds", round_half_up(us, 0))
    } else if us < MEGA {
        format!("{} ms", round_half_up(us / KILO, 0))
    } else {
        format!("{} s", round_half_up(us / MEGA, 2))
    }
}

pub fn percent(pct: f64) -> String {
    format!("{} %", round_half_up(pct, 2))
}

/// Fixed-point rendering of `value` with `places` decimals.
///
/// Starts from the shortest decimal string that round-trips to `value`
/// (what `{}` prints) and rounds that string half away from zero.
pub fn round_half_up(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let shortest = value.abs().to_string();
    let (int_part, frac_part) = shortest
        .split_once('.')
        .unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(places))
        .collect();
    if frac_part.as_bytes().get(places).is_some_and(|&d| d >= b'5') {
        carry(&mut digits);
    }

    let int_len = digits.len() - places;
    let mut out = String::with_capacity(digits.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|&d| char::from(d)));
    if places > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|&d| char::from(d)));
    }
    out
}

/// Add one unit in the last place to a string of ASCII digits.
fn carry(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
