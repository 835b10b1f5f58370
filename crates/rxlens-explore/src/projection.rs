//! Filtered records → per-sex 3-D scatter series.
//!
//! One point per record, no aggregation. Records whose sex is neither
//! `Male` nor `Female` are counted in [`Projection::dropped`].

use rxlens_data::{ReviewRecord, Sex};
use serde::{Deserialize, Serialize};

pub const MARKER_SIZE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
    pub z: String,
    pub color: String,
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self {
            x: "Condition".into(),
            y: "Drug".into(),
            z: "Satisfaction".into(),
            color: "Satisfaction".into(),
        }
    }
}

/// One plotted review. `reviews` is the hover text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub condition: String,
    pub drug: String,
    pub satisfaction: f64,
    pub reviews: String,
}

impl From<&ReviewRecord> for ChartPoint {
    fn from(r: &ReviewRecord) -> Self {
        Self {
            condition: r.condition.clone(),
            drug: r.drug.clone(),
            satisfaction: r.satisfaction,
            reviews: r.reviews.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub sex: Sex,
    pub title: String,
    pub axes: AxisLabels,
    pub marker_size: u32,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn empty(sex: Sex) -> Self {
        Self {
            title: format!("{}: Condition vs. Drug vs. Satisfaction", sex),
            sex,
            axes: AxisLabels::default(),
            marker_size: MARKER_SIZE,
            points: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub male: ChartSeries,
    pub female: ChartSeries,
    /// Records with any other sex value.
    pub dropped: usize,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            male: ChartSeries::empty(Sex::Male),
            female: ChartSeries::empty(Sex::Female),
            dropped: 0,
        }
    }
}

/// Partition `records` by sex into the male and female series.
pub fn project<'a, I>(records: I) -> Projection
where
    I: IntoIterator<Item = &'a ReviewRecord>,
{
    let mut projection = Projection::default();
    for record in records {
        match record.sex {
            Sex::Male => projection.male.points.push(record.into()),
            Sex::Female => projection.female.points.push(record.into()),
            Sex::Other(_) => projection.dropped += 1,
        }
    }
    projection
}
