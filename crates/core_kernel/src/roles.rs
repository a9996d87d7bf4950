//! Portal user roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Role of an authenticated portal user
///
/// The backend authorizes every action by role; the portal mirrors the role
/// in the session so it can hide or reject actions before a request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    HrOfficer,
    InsuranceAgent,
    Employee,
}

impl Role {
    /// All roles, in display order
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::HrOfficer,
        Role::InsuranceAgent,
        Role::Employee,
    ];

    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::HrOfficer => "hr_officer",
            Role::InsuranceAgent => "insurance_agent",
            Role::Employee => "employee",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::HrOfficer => "HR Officer",
            Role::InsuranceAgent => "Insurance Agent",
            Role::Employee => "Employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| CoreError::validation(format!("Unknown role: {s}")))
    }
}
