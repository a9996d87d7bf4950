//! Employee dependents covered by life policies

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Relationship of a dependent to the employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Spouse,
    Child,
    Parent,
}

/// A dependent listed on an employee's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependent {
    pub name: String,
    pub relationship: Relationship,
    pub date_of_birth: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nic: Option<String>,
}

impl Dependent {
    /// Age in whole years as of today
    pub fn age(&self) -> u32 {
        Utc::now()
            .date_naive()
            .years_since(self.date_of_birth)
            .unwrap_or(0)
    }
}
