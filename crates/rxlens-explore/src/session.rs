//! Explorer session: selection state and the events that move it.
//!
//! ```text
//!   ConditionSelected ──▶ drug_options, drug (reset to default)
//!   DrugSelected ───────▶ drug
//!   PointClicked ───────▶ male_click | female_click
//!   SelectionCleared ───▶ male_click | female_click = None
//!
//!   state ──view()──▶ condition options, drug options, projection
//! ```
//!
//! Transitions are pure: they take the state by value and return the next
//! one. The state is serde round-trippable so a stateless HTTP front end can
//! keep it client side.

use rxlens_data::{DatasetStore, ReviewRecord, Sex};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cascade::{condition_options, drugs_for_condition, records_for, SelectorOptions};
use crate::lookup::{resolve_click, ClickEvent, ClickPoint};
use crate::projection::{project, Projection};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExplorerState {
    pub condition: Option<String>,
    pub drug: Option<String>,
    #[serde(default)]
    pub drug_options: Vec<String>,
    #[serde(default)]
    pub male_click: Option<ClickEvent>,
    #[serde(default)]
    pub female_click: Option<ClickEvent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SelectionEvent {
    ConditionSelected { condition: String },
    DrugSelected { drug: String },
    PointClicked { sex: Sex, point: ClickPoint },
    SelectionCleared { sex: Sex },
}

/// Everything a renderer needs, derived from one state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorerView {
    pub condition_options: SelectorOptions,
    pub drug_options: SelectorOptions,
    pub projection: Projection,
}

impl ExplorerState {
    /// Default condition with its default drug, no clicks.
    pub fn initial(store: &DatasetStore) -> Self {
        match condition_options(store).default {
            Some(condition) => Self::default().select_condition(store, condition),
            None => Self::default(),
        }
    }

    /// The held `drug_options` are rebuilt from the condition after every
    /// event; whatever the client sent for them is ignored.
    pub fn apply(self, store: &DatasetStore, event: SelectionEvent) -> Self {
        debug!(?event, "Applying selection event");
        let mut next = match event {
            SelectionEvent::ConditionSelected { condition } => self.select_condition(store, condition),
            SelectionEvent::DrugSelected { drug } => self.select_drug(drug),
            SelectionEvent::PointClicked { sex, point } => self.click(point.on(sex)),
            SelectionEvent::SelectionCleared { sex } => self.clear(&sex),
        };
        next.drug_options = next.drug_selector(store).options;
        next
    }

    /// Drug options for the current condition; empty without one.
    pub fn drug_selector(&self, store: &DatasetStore) -> SelectorOptions {
        match &self.condition {
            Some(condition) => drugs_for_condition(store, condition),
            None => SelectorOptions::default(),
        }
    }

    /// Recompute the drug options and reset the drug to their default,
    /// even when the current drug is also offered for the new condition.
    pub fn select_condition(mut self, store: &DatasetStore, condition: impl Into<String>) -> Self {
        let condition = condition.into();
        let options = drugs_for_condition(store, &condition);
        self.drug = options.default;
        self.drug_options = options.options;
        self.condition = Some(condition);
        self
    }

    /// The drug is taken as given; one outside the offered options just
    /// yields empty charts.
    pub fn select_drug(mut self, drug: impl Into<String>) -> Self {
        self.drug = Some(drug.into());
        self
    }

    /// Record a click on the chart for `click.sex`. Clicks with any other
    /// sex have no chart and are ignored.
    pub fn click(mut self, click: ClickEvent) -> Self {
        match click.sex {
            Sex::Male => self.male_click = Some(click),
            Sex::Female => self.female_click = Some(click),
            Sex::Other(_) => debug!(sex = %click.sex, "Ignoring click outside the two charts"),
        }
        self
    }

    pub fn clear(mut self, sex: &Sex) -> Self {
        match sex {
            Sex::Male => self.male_click = None,
            Sex::Female => self.female_click = None,
            Sex::Other(_) => {}
        }
        self
    }

    /// Held clicks, male first.
    pub fn clicks(&self) -> impl Iterator<Item = &ClickEvent> {
        self.male_click.iter().chain(self.female_click.iter())
    }

    /// Reviews behind the held clicks, male first. Unmatched clicks are skipped.
    pub fn resolved<'a>(&self, store: &'a DatasetStore) -> Vec<&'a ReviewRecord> {
        self.clicks().filter_map(|c| resolve_click(store, c)).collect()
    }

    /// Records under the current (condition, drug) filter.
    pub fn filtered<'a>(&self, store: &'a DatasetStore) -> Vec<&'a ReviewRecord> {
        match (&self.condition, &self.drug) {
            (Some(condition), Some(drug)) => records_for(store, condition, drug),
            _ => Vec::new(),
        }
    }

    pub fn view(&self, store: &DatasetStore) -> ExplorerView {
        ExplorerView {
            condition_options: condition_options(store),
            drug_options: self.drug_selector(store),
            projection: project(self.filtered(store)),
        }
    }
}
