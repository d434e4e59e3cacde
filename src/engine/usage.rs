//! Capacity usage for display

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::container::Container;

/// Usage percentage at which a warehouse counts as almost full
pub const DEFAULT_ALMOST_FULL: f64 = 90.0;

/// Share of the capacity in use, as a percentage. Zero for a zero-capacity
/// container.
pub fn usage_percent(container: &Container) -> f64 {
    if container.capacity() <= 0.0 {
        0.0
    } else {
        100.0 * container.balance() / container.capacity()
    }
}

/// Qualitative fill level shown next to the percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageLevel {
    Empty,
    Ok,
    AlmostFull,
}

impl UsageLevel {
    pub fn classify(container: &Container, almost_full: f64) -> Self {
        if container.balance() <= 0.0 {
            UsageLevel::Empty
        } else if usage_percent(container) >= almost_full {
            UsageLevel::AlmostFull
        } else {
            UsageLevel::Ok
        }
    }
}

impl fmt::Display for UsageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageLevel::Empty => write!(f, "Empty"),
            UsageLevel::Ok => write!(f, "OK"),
            UsageLevel::AlmostFull => write!(f, "Almost full"),
        }
    }
}
