//! Clicked chart point → source review.

use rxlens_data::{DatasetStore, ReviewRecord, Sex};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Coordinates of a clicked point as the chart reports them.
/// The chart itself decides the sex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickPoint {
    pub condition: String,
    pub drug: String,
    pub satisfaction: f64,
}

impl ClickPoint {
    pub fn on(self, sex: Sex) -> ClickEvent {
        ClickEvent {
            condition: self.condition,
            drug: self.drug,
            satisfaction: self.satisfaction,
            sex,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickEvent {
    pub condition: String,
    pub drug: String,
    pub satisfaction: f64,
    pub sex: Sex,
}

impl ClickEvent {
    pub fn point(&self) -> ClickPoint {
        ClickPoint {
            condition: self.condition.clone(),
            drug: self.drug.clone(),
            satisfaction: self.satisfaction,
        }
    }
}

/// Every record sharing the click's (condition, drug, sex, satisfaction) key.
pub fn matches_for_click<'a>(store: &'a DatasetStore, click: &ClickEvent) -> Vec<&'a ReviewRecord> {
    store
        .records()
        .iter()
        .filter(|r| r.matches_key(&click.condition, &click.drug, &click.sex, click.satisfaction))
        .collect()
}

/// First record in stored order matching the click, searched over the whole
/// store rather than the current filter.
pub fn resolve_click<'a>(store: &'a DatasetStore, click: &ClickEvent) -> Option<&'a ReviewRecord> {
    let matches = matches_for_click(store, click);
    match matches.len() {
        0 => {
            debug!(
                condition = %click.condition,
                drug = %click.drug,
                sex = %click.sex,
                satisfaction = click.satisfaction,
                "Click matched no review"
            );
            None
        }
        1 => matches.first().copied(),
        n => {
            warn!(
                condition = %click.condition,
                drug = %click.drug,
                sex = %click.sex,
                satisfaction = click.satisfaction,
                matches = n,
                "Several reviews share the clicked key, showing the first"
            );
            matches.first().copied()
        }
    }
}
