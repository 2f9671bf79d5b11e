//! Duration rendering for the `expires` query parameter
//!
//! The server parses link lifetimes in the `72h3m0.5s` grammar, so durations
//! are rendered the same way: hours and minutes only once the value reaches
//! them, seconds with a trimmed fraction, and `ms`/`µs`/`ns` below one second.

use std::fmt::Write;
use std::time::Duration;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Render a duration in the server's canonical text form
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < NANOS_PER_SEC {
        let (scale, unit) = match nanos {
            n if n < 1_000 => (1, "ns"),
            n if n < 1_000_000 => (1_000, "µs"),
            _ => (1_000_000, "ms"),
        };
        return format!("{}{}", fixed_point(nanos, scale), unit);
    }

    let secs = duration.as_secs();
    let mut out = String::new();
    let hours = secs / 3600;
    if hours > 0 {
        let _ = write!(out, "{}h", hours);
    }
    if secs >= 60 {
        let _ = write!(out, "{}m", (secs / 60) % 60);
    }
    let seconds = u128::from(secs % 60) * NANOS_PER_SEC + u128::from(duration.subsec_nanos());
    let _ = write!(out, "{}s", fixed_point(seconds, NANOS_PER_SEC));
    out
}

/// `value / scale` as a decimal with trailing fractional zeros removed
fn fixed_point(value: u128, scale: u128) -> String {
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return whole.to_string();
    }

    let width = scale.ilog10() as usize;
    let digits = format!("{:0width$}", frac, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
