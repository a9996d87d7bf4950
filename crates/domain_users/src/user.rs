//! Portal users: administrators, HR officers, insurance agents, employees

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use core_kernel::{Role, UserId};
use crate::dependent::Dependent;
use crate::error::UserError;

/// User account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
        })
    }
}

impl FromStr for UserStatus {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(UserStatus::Active),
            "inactive" => Ok(UserStatus::Inactive),
            "suspended" => Ok(UserStatus::Suspended),
            _ => Err(UserError::UnknownStatus(s.to_string())),
        }
    }
}

/// A portal user as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default = "default_status")]
    pub status: UserStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependents: Vec<Dependent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_status() -> UserStatus {
    UserStatus::Active
}

impl User {
    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    /// Whether the account may sign in
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }
}

/// Values of the create/edit user form, sent as `POST /users` or `PATCH /users/:id`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Only sent when creating a user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependents: Vec<Dependent>,
}

impl UserForm {
    /// Pre-fills the form from an existing user for editing
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: Some(user.role),
            password: None,
            nic: user.nic.clone(),
            phone_number: user.phone_number.clone(),
            employee_id: user.employee_id.clone(),
            department: user.department.clone(),
            dependents: user.dependents.clone(),
        }
    }
}

/// Body of `PATCH /users/:id/status`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: UserStatus,
}

/// Response of `GET /users/stats/overview`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub total_users: u64,
    #[serde(default)]
    pub active_users: u64,
    #[serde(default)]
    pub by_role: BTreeMap<Role, u64>,
    #[serde(default)]
    pub by_status: BTreeMap<UserStatus, u64>,
}

impl UserStats {
    /// Number of users holding a role
    pub fn with_role(&self, role: Role) -> u64 {
        self.by_role.get(&role).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_user() {
        let json = r#"{
            "_id": "u1",
            "firstName": "Nimal",
            "lastName": "Perera",
            "email": "nimal@example.lk",
            "role": "hr_officer"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.role, Role::HrOfficer);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.full_name(), "Nimal Perera");
    }

    #[test]
    fn test_form_from_user_omits_password() {
        let user = User {
            id: UserId::new("u2"),
            first_name: "Kamala".to_string(),
            last_name: "Silva".to_string(),
            email: "kamala@example.lk".to_string(),
            role: Role::Employee,
            status: UserStatus::Inactive,
            nic: Some("199012345678".to_string()),
            phone_number: None,
            employee_id: Some("EMP-7".to_string()),
            department: None,
            dependents: Vec::new(),
            created_at: None,
        };
        let form = UserForm::from_user(&user);
        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["employeeId"], "EMP-7");
        assert!(!user.is_active());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!(" Suspended ".parse::<UserStatus>().unwrap(), UserStatus::Suspended);
        assert!("deleted".parse::<UserStatus>().is_err());
    }

    #[test]
    fn test_stats_by_role() {
        let json = r#"{
            "totalUsers": 12,
            "activeUsers": 10,
            "byRole": { "employee": 9, "admin": 1 }
        }"#;
        let stats: UserStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.with_role(Role::Employee), 9);
        assert_eq!(stats.with_role(Role::InsuranceAgent), 0);
    }
}
