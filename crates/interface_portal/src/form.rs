//! Form state shared by every portal form
//!
//! A form holds its field values, the per-field error map produced by the
//! domain validators, and the loading/success/error flags a screen renders.
//! Field errors and the top-level error are separate: validators fill the
//! first, backend failures fill the second.

use core_kernel::ValidationResult;

/// State behind one form on screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState<T> {
    values: T,
    errors: ValidationResult,
    loading: bool,
    success: Option<String>,
    error: Option<String>,
}

impl<T> FormState<T> {
    pub fn new(values: T) -> Self {
        Self {
            values,
            errors: ValidationResult::ok(),
            loading: false,
            success: None,
            error: None,
        }
    }

    pub fn values(&self) -> &T {
        &self.values
    }

    /// Replaces every value and clears all flags
    pub fn reset(&mut self, values: T) {
        *self = Self::new(values);
    }

    /// Edits one field and clears the error shown under it
    pub fn update<F>(&mut self, field: &str, change: F)
    where
        F: FnOnce(&mut T),
    {
        change(&mut self.values);
        self.errors.clear_field(field);
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.error_for(field)
    }

    /// Stores validator output; returns whether the form may be submitted
    pub fn set_errors(&mut self, errors: ValidationResult) -> bool {
        let valid = errors.is_valid();
        self.errors = errors;
        valid
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks a request in flight
    pub fn begin(&mut self) {
        self.loading = true;
        self.success = None;
        self.error = None;
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.errors = ValidationResult::ok();
        self.success = Some(message.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Hides the success and error banners
    pub fn dismiss(&mut self) {
        self.success = None;
        self.error = None;
    }
}
