//! User Domain Ports
//!
//! `UsersPort` defines the operations the admin screens need from the user
//! directory. The REST adapter in `infra_client` implements it against
//! `/api/v1/users`; `test_utils` provides an in-memory implementation.

use async_trait::async_trait;
use serde::Serialize;

use core_kernel::{PortError, Role, UserId};

use crate::user::{User, UserForm, UserStats, UserStatus};

/// Query parameters for listing users
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    /// Filter by role
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// Filter by account status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    /// Free-text search over name and email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl UserQuery {
    /// Creates a query to find by role
    pub fn by_role(role: Role) -> Self {
        Self {
            role: Some(role),
            ..Default::default()
        }
    }

    /// Adds pagination to the query
    pub fn paginate(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}

/// Port for the user directory
#[async_trait]
pub trait UsersPort: Send + Sync {
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<User>, PortError>;

    async fn get_user(&self, id: &UserId) -> Result<User, PortError>;

    async fn create_user(&self, form: &UserForm) -> Result<User, PortError>;

    async fn update_user(&self, id: &UserId, form: &UserForm) -> Result<User, PortError>;

    async fn update_status(&self, id: &UserId, status: UserStatus) -> Result<User, PortError>;

    async fn delete_user(&self, id: &UserId) -> Result<(), PortError>;

    async fn stats_overview(&self) -> Result<UserStats, PortError>;
}
