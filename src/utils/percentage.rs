use std::{fmt::Display, ops::Deref};

use serde::{Deserialize, Serialize};

/// Signed percentage. Unlike a share of a whole, a change can be negative or exceed 100.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(f64);

impl Display for Percentage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 > 0. {
            write!(f, "+{:.1}%", self.0)
        } else {
            write!(f, "{:.1}%", self.0)
        }
    }
}

impl Percentage {
    pub fn new(value: f64) -> Self {
        Percentage(value)
    }

    pub fn rounded(self, places: u32) -> Self {
        Percentage(round_to(self.0, places))
    }
}

impl Deref for Percentage {
    type Target = f64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Relative change from `previous` to `current`.
///
/// Growth from nothing is reported as a flat 100%, and no activity in either period as 0%.
pub fn change_percentage(current: f64, previous: f64) -> Percentage {
    if previous > 0. {
        Percentage((current - previous) / previous * 100.)
    } else if current > 0. {
        Percentage(100.)
    } else {
        Percentage(0.)
    }
}

/// Rounds half away from zero to the given number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
