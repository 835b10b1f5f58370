//! Condition → drug cascade.

use rxlens_data::{DatasetStore, ReviewRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Options offered by one selector plus the value it defaults to.
///
/// `default` is the first option, or `None` when there are no options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorOptions {
    pub options: Vec<String>,
    pub default: Option<String>,
}

impl SelectorOptions {
    pub fn from_ordered(options: Vec<String>) -> Self {
        let default = options.first().cloned();
        Self { options, default }
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o == value)
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

pub type ConditionOptions = SelectorOptions;
pub type DrugOptions = SelectorOptions;

/// Initial population of the condition selector.
pub fn condition_options(store: &DatasetStore) -> ConditionOptions {
    SelectorOptions::from_ordered(store.all_conditions().to_vec())
}

/// Drugs reviewed for `condition`. Exact, case-sensitive match.
pub fn drugs_for_condition(store: &DatasetStore, condition: &str) -> DrugOptions {
    let options = SelectorOptions::from_ordered(store.drugs_for(condition).to_vec());
    debug!(condition, count = options.options.len(), "Recomputed drug options");
    options
}

/// Records matching both `condition` and `drug`, in stored order.
pub fn records_for<'a>(store: &'a DatasetStore, condition: &str, drug: &str) -> Vec<&'a ReviewRecord> {
    store
        .records()
        .iter()
        .filter(|r| r.condition == condition && r.drug == drug)
        .collect()
}
