use serde::{Deserialize, Serialize};
use std::fmt;

/// What an undefined rate renders as.
pub const UNDEFINED_RATE: &str = "N/A";

/// An admitted/applicant style ratio as a percentage, or `Undefined` when
/// the inputs do not allow one. `Undefined` is never the same as `0.0%`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Rate {
    Undefined,
    Percent(f64),
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rate::Percent(p) => write!(f, "{:.1}%", p),
            Rate::Undefined => f.write_str(UNDEFINED_RATE),
        }
    }
}

/// `numerator / denominator` as a percentage rounded to one decimal place.
pub fn rate(numerator: Option<i64>, denominator: Option<i64>) -> Rate {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d > 0 => Rate::Percent((n as f64 * 1000.0 / d as f64).round() / 10.0),
        _ => Rate::Undefined,
    }
}
