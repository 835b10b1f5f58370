//! Age bucketing.
//!
//! Bins are lower-exclusive and upper-inclusive over the breakpoints
//! `[0, 18, 35, 50, 65, 120]`:
//!
//! | Bucket | Range |
//! |--------|-------|
//! | 0-18   | (0, 18] |
//! | 19-35  | (18, 35] |
//! | 36-50  | (35, 50] |
//! | 51-65  | (50, 65] |
//! | 66+    | (65, 120] |
//!
//! Anything else (0 and below, above 120, NaN, absent) has no bucket.

use serde::{Deserialize, Serialize};

pub const AGE_BREAKPOINTS: [f64; 6] = [0.0, 18.0, 35.0, 50.0, 65.0, 120.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "0-18")]
    Child,
    #[serde(rename = "19-35")]
    YoungAdult,
    #[serde(rename = "36-50")]
    Adult,
    #[serde(rename = "51-65")]
    MiddleAged,
    #[serde(rename = "66+")]
    Senior,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Child,
        AgeBucket::YoungAdult,
        AgeBucket::Adult,
        AgeBucket::MiddleAged,
        AgeBucket::Senior,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::Child => "0-18",
            AgeBucket::YoungAdult => "19-35",
            AgeBucket::Adult => "36-50",
            AgeBucket::MiddleAged => "51-65",
            AgeBucket::Senior => "66+",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.label() == label)
    }
}

impl std::fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Map an age to its bucket.
pub fn bucket(age: Option<f64>) -> Option<AgeBucket> {
    let age = age.filter(|a| a.is_finite())?;
    AGE_BREAKPOINTS
        .windows(2)
        .zip(AgeBucket::ALL)
        .find(|(edges, _)| age > edges[0] && age <= edges[1])
        .map(|(_, b)| b)
}

/// Coerce a raw `Age` cell to a number. Malformed text becomes `None`
/// instead of rejecting the row.
pub fn parse_age(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|a| a.is_finite())
}
