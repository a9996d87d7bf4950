//! User directory endpoints

use async_trait::async_trait;
use tracing::{info, instrument};

use core_kernel::{PortError, UserId};
use domain_users::{StatusChange, User, UserForm, UserQuery, UserStats, UserStatus, UsersPort};

use crate::client::{ApiAck, ApiClient};
use crate::error::ClientError;

/// Client for the users resource
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: ApiClient,
}

impl UsersApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /users`
    pub async fn list(&self, query: &UserQuery) -> Result<Vec<User>, ClientError> {
        self.client.get_with_query("users", query).await
    }

    /// `GET /users/:id`
    pub async fn get(&self, id: &UserId) -> Result<User, ClientError> {
        self.client.get(&format!("users/{id}")).await
    }

    /// `POST /users`
    pub async fn create(&self, form: &UserForm) -> Result<User, ClientError> {
        self.client.post("users", form).await
    }

    /// `PATCH /users/:id`
    pub async fn update(&self, id: &UserId, form: &UserForm) -> Result<User, ClientError> {
        self.client.patch(&format!("users/{id}"), form).await
    }

    /// `PATCH /users/:id/status`
    pub async fn set_status(&self, id: &UserId, status: UserStatus) -> Result<User, ClientError> {
        self.client
            .patch(&format!("users/{id}/status"), &StatusChange { status })
            .await
    }

    /// `DELETE /users/:id`
    pub async fn delete(&self, id: &UserId) -> Result<ApiAck, ClientError> {
        self.client.delete(&format!("users/{id}")).await
    }

    /// `GET /users/stats/overview`
    pub async fn stats(&self) -> Result<UserStats, ClientError> {
        self.client.get("users/stats/overview").await
    }
}

#[async_trait]
impl UsersPort for UsersApi {
    #[instrument(skip(self))]
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<User>, PortError> {
        Ok(self.list(query).await?)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn get_user(&self, id: &UserId) -> Result<User, PortError> {
        Ok(self.get(id).await?)
    }

    #[instrument(skip(self, form), fields(email = %form.email))]
    async fn create_user(&self, form: &UserForm) -> Result<User, PortError> {
        let user = self.create(form).await?;
        info!(user_id = %user.id, role = %user.role, "User created");
        Ok(user)
    }

    #[instrument(skip(self, form), fields(user_id = %id))]
    async fn update_user(&self, id: &UserId, form: &UserForm) -> Result<User, PortError> {
        Ok(self.update(id, form).await?)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn update_status(&self, id: &UserId, status: UserStatus) -> Result<User, PortError> {
        let user = self.set_status(id, status).await?;
        info!(status = %user.status, "User status changed");
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = %id))]
    async fn delete_user(&self, id: &UserId) -> Result<(), PortError> {
        self.delete(id).await?;
        info!("User deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn stats_overview(&self) -> Result<UserStats, PortError> {
        Ok(self.stats().await?)
    }
}
