//! Admin create/edit user form

use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::UserId;
use domain_users::UserForm as UserFormValues;
use domain_users::{FormMode, User, UserValidator, UsersPort};

use crate::error::PortalError;
use crate::form::FormState;

pub struct UserForm<P> {
    port: Arc<P>,
    editing: Option<UserId>,
    state: FormState<UserFormValues>,
}

impl<P: UsersPort> UserForm<P> {
    /// Empty form for a new account
    pub fn create(port: Arc<P>) -> Self {
        Self {
            port,
            editing: None,
            state: FormState::new(UserFormValues::default()),
        }
    }

    /// Form pre-filled from an existing account
    pub fn edit(port: Arc<P>, user: &User) -> Self {
        Self {
            port,
            editing: Some(user.id.clone()),
            state: FormState::new(UserFormValues::from_user(user)),
        }
    }

    pub fn mode(&self) -> FormMode {
        if self.editing.is_some() {
            FormMode::Update
        } else {
            FormMode::Create
        }
    }

    pub fn state(&self) -> &FormState<UserFormValues> {
        &self.state
    }

    /// Edits a field by its wire name, clearing that field's error
    pub fn update<F>(&mut self, field: &str, change: F)
    where
        F: FnOnce(&mut UserFormValues),
    {
        self.state.update(field, change);
    }

    /// Validates, then creates or updates the account
    pub async fn submit(&mut self) -> Result<User, PortalError> {
        let mode = self.mode();
        let errors = UserValidator::validate_form(self.state.values(), mode);
        if !self.state.set_errors(errors.clone()) {
            return Err(PortalError::Validation(errors));
        }

        self.state.begin();
        let result = match &self.editing {
            Some(id) => self.port.update_user(id, self.state.values()).await,
            None => self.port.create_user(self.state.values()).await,
        };

        match result {
            Ok(user) => {
                info!(user_id = %user.id, role = %user.role, ?mode, "User saved");
                self.state.succeed(match mode {
                    FormMode::Create => "User created successfully",
                    FormMode::Update => "User updated successfully",
                });
                Ok(user)
            }
            Err(e) => {
                warn!(error = %e, ?mode, "Saving user failed");
                self.state.fail(e.to_string());
                Err(e.into())
            }
        }
    }
}
