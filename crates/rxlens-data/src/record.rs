//! Typed review rows.

use serde::{Deserialize, Serialize};

use crate::age::{bucket, AgeBucket};

/// Reviewer sex as recorded in the dataset.
/// Values other than `Male`/`Female` are preserved verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sex {
    Male,
    Female,
    Other(String),
}

impl Sex {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Male" => Sex::Male,
            "Female" => Sex::Female,
            other => Sex::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Sex::Male => "Male",
            Sex::Female => "Female",
            Sex::Other(raw) => raw,
        }
    }
}

impl From<String> for Sex {
    fn from(raw: String) -> Self {
        Sex::parse(&raw)
    }
}

impl From<Sex> for String {
    fn from(sex: Sex) -> Self {
        sex.label().to_string()
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the review dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub condition: String,
    pub drug: String,
    pub sex: Sex,
    pub age: Option<f64>,
    pub age_bucket: Option<AgeBucket>,
    pub satisfaction: f64,
    pub reviews: String,
}

impl ReviewRecord {
    /// Build a record, deriving `age_bucket` from `age`.
    pub fn new(
        condition: impl Into<String>,
        drug: impl Into<String>,
        sex: Sex,
        age: Option<f64>,
        satisfaction: f64,
        reviews: impl Into<String>,
    ) -> Self {
        Self {
            condition: condition.into(),
            drug: drug.into(),
            sex,
            age,
            age_bucket: bucket(age),
            satisfaction,
            reviews: reviews.into(),
        }
    }

    /// Exact match on the (condition, drug, sex, satisfaction) lookup key.
    pub fn matches_key(&self, condition: &str, drug: &str, sex: &Sex, satisfaction: f64) -> bool {
        self.condition == condition
            && self.drug == drug
            && &self.sex == sex
            && self.satisfaction == satisfaction
    }
}
