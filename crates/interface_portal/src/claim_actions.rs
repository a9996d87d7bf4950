//! Claim workflow actions
//!
//! Every action runs in the same order:
//!
//! 1. validate the payload; on field errors nothing is sent
//! 2. check the transition table for the acting role
//! 3. call the claims port
//!
//! Backend failures are reduced to one top-level error string for the
//! screen, while the typed error is still returned to the caller.

use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::{DocumentId, PortError, Role};
use domain_claims::workflow::{ensure_action, ensure_transition};
use domain_claims::{
    Claim, ClaimAction, ClaimError, ClaimsPort, DecisionRequest, DocumentContent,
    ForwardToInsurerData, ReturnRequest,
};

use crate::claim_validation::ClaimValidation;
use crate::error::PortalError;

/// Runs claim workflow actions on behalf of one signed-in role
pub struct ClaimActions<P> {
    port: Arc<P>,
    role: Role,
    validation: ClaimValidation,
    loading: bool,
    success: Option<String>,
    error: Option<String>,
}

impl<P: ClaimsPort> ClaimActions<P> {
    pub fn new(port: Arc<P>, role: Role) -> Self {
        Self {
            port,
            role,
            validation: ClaimValidation::new(),
            loading: false,
            success: None,
            error: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Field errors of the last attempted action
    pub fn validation(&self) -> &ClaimValidation {
        &self.validation
    }

    pub fn validation_mut(&mut self) -> &mut ClaimValidation {
        &mut self.validation
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Top-level error of the last attempted action
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Employee lodges a draft
    pub async fn submit(&mut self, claim: &Claim) -> Result<Claim, PortalError> {
        self.start();
        self.permit(claim, ClaimAction::Submit)?;
        let result = self.port.submit_claim(&claim.id).await;
        self.finish(claim, ClaimAction::Submit, result, "Claim submitted successfully")
    }

    /// HR picks up a lodged claim
    pub async fn start_review(&mut self, claim: &Claim) -> Result<Claim, PortalError> {
        self.start();
        self.permit(claim, ClaimAction::Review)?;
        let result = self.port.start_review(&claim.id).await;
        self.finish(claim, ClaimAction::Review, result, "Claim is now under HR review")
    }

    /// HR forwards a reviewed claim with its coverage breakdown
    pub async fn forward_to_insurer(
        &mut self,
        claim: &Claim,
        data: &ForwardToInsurerData,
    ) -> Result<Claim, PortalError> {
        self.start();
        if !self.validation.validate_forward(data, claim) {
            return Err(self.invalid());
        }
        self.permit(claim, ClaimAction::Forward)?;
        let result = self.port.forward_to_insurer(&claim.id, data).await;
        self.finish(claim, ClaimAction::Forward, result, "Claim forwarded to insurer")
    }

    /// Sends the claim back one stage with a reason
    pub async fn return_claim(
        &mut self,
        claim: &Claim,
        reason: &str,
    ) -> Result<Claim, PortalError> {
        self.start();
        if !self.validation.validate_return(reason, claim, self.role) {
            return Err(self.invalid());
        }
        self.permit(claim, ClaimAction::Return)?;
        let request = ReturnRequest::new(reason);
        let result = self.port.return_claim(&claim.id, &request).await;
        self.finish(claim, ClaimAction::Return, result, "Claim returned")
    }

    /// Insurer approves or rejects
    ///
    /// The target status comes from the decision itself, so the check is
    /// against the exact transition rather than the action.
    pub async fn make_decision(
        &mut self,
        claim: &Claim,
        decision: &DecisionRequest,
    ) -> Result<Claim, PortalError> {
        self.start();
        if !self.validation.validate_decision(decision) {
            return Err(self.invalid());
        }
        if let Err(e) = ensure_transition(claim.status, decision.status, self.role) {
            return Err(self.refuse(e));
        }
        let result = self.port.decide(&claim.id, decision).await;
        let message = format!("Claim {}", decision.status);
        self.finish(claim, ClaimAction::Decide, result, message)
    }

    /// Downloads one of the claim's documents
    pub async fn download_document(
        &mut self,
        claim: &Claim,
        document: &DocumentId,
    ) -> Result<DocumentContent, PortalError> {
        self.start();
        let result = self.port.download_document(&claim.id, document).await;
        self.loading = false;
        result.map_err(|e| self.report(e))
    }

    fn start(&mut self) {
        self.loading = true;
        self.success = None;
        self.error = None;
        self.validation.clear();
    }

    fn invalid(&mut self) -> PortalError {
        self.loading = false;
        PortalError::Validation(self.validation.errors().clone())
    }

    fn permit(&mut self, claim: &Claim, action: ClaimAction) -> Result<(), PortalError> {
        ensure_action(claim.status, self.role, action)
            .map(|_| ())
            .map_err(|e| self.refuse(e))
    }

    fn refuse(&mut self, error: ClaimError) -> PortalError {
        self.loading = false;
        warn!(role = %self.role, error = %error, "Claim action not permitted");
        self.error = Some(error.to_string());
        error.into()
    }

    fn report(&mut self, error: PortError) -> PortalError {
        warn!(role = %self.role, error = %error, "Claims backend request failed");
        self.error = Some(error.to_string());
        error.into()
    }

    fn finish(
        &mut self,
        claim: &Claim,
        action: ClaimAction,
        result: Result<Claim, PortError>,
        message: impl Into<String>,
    ) -> Result<Claim, PortalError> {
        self.loading = false;
        match result {
            Ok(updated) => {
                info!(
                    claim_id = %claim.id,
                    action = %action,
                    from = %claim.status,
                    to = %updated.status,
                    "Claim action completed"
                );
                self.success = Some(message.into());
                Ok(updated)
            }
            Err(e) => Err(self.report(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use core_kernel::ClaimId;
    use domain_claims::{ClaimOption, ClaimQuery, ClaimStatus, ClaimType};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Port that records calls and answers with a fixed status
    struct Scripted {
        calls: Mutex<Vec<&'static str>>,
        reply: ClaimStatus,
    }

    impl Scripted {
        fn new(reply: ClaimStatus) -> Arc<Self> {
            Arc::new(Self { calls: Mutex::new(Vec::new()), reply })
        }

        fn record(&self, call: &'static str) -> Result<Claim, PortError> {
            self.calls.lock().unwrap().push(call);
            Ok(claim_in(self.reply))
        }
    }

    #[async_trait]
    impl ClaimsPort for Scripted {
        async fn list_claims(&self, _: &ClaimQuery) -> Result<Vec<Claim>, PortError> {
            Ok(Vec::new())
        }
        async fn get_claim(&self, _: &ClaimId) -> Result<Claim, PortError> {
            self.record("get")
        }
        async fn submit_claim(&self, _: &ClaimId) -> Result<Claim, PortError> {
            self.record("submit")
        }
        async fn start_review(&self, _: &ClaimId) -> Result<Claim, PortError> {
            self.record("review")
        }
        async fn forward_to_insurer(
            &self,
            _: &ClaimId,
            _: &ForwardToInsurerData,
        ) -> Result<Claim, PortError> {
            self.record("forward")
        }
        async fn return_claim(&self, _: &ClaimId, _: &ReturnRequest) -> Result<Claim, PortError> {
            self.record("return")
        }
        async fn decide(&self, _: &ClaimId, _: &DecisionRequest) -> Result<Claim, PortError> {
            Err(PortError::rejected(500, "Decision service unavailable"))
        }
        async fn download_document(
            &self,
            id: &ClaimId,
            _: &DocumentId,
        ) -> Result<DocumentContent, PortError> {
            Err(PortError::not_found("Claim", id))
        }
    }

    fn claim_in(status: ClaimStatus) -> Claim {
        let mut claim = Claim::draft(
            ClaimId::new("c1"),
            ClaimType::Life,
            ClaimOption::Medication,
            dec!(1000),
        );
        claim.status = status;
        claim
    }

    #[tokio::test]
    async fn test_submit_by_employee() {
        let port = Scripted::new(ClaimStatus::Employee);
        let mut actions = ClaimActions::new(port.clone(), Role::Employee);

        let updated = actions.submit(&claim_in(ClaimStatus::Draft)).await.unwrap();

        assert_eq!(updated.status, ClaimStatus::Employee);
        assert_eq!(actions.success(), Some("Claim submitted successfully"));
        assert_eq!(*port.calls.lock().unwrap(), vec!["submit"]);
    }

    #[tokio::test]
    async fn test_wrong_role_is_refused_without_request() {
        let port = Scripted::new(ClaimStatus::Hr);
        let mut actions = ClaimActions::new(port.clone(), Role::Admin);

        let err = actions.start_review(&claim_in(ClaimStatus::Employee)).await.unwrap_err();

        assert!(matches!(err, PortalError::Workflow(ClaimError::ActionNotPermitted { .. })));
        assert!(actions.error().is_some());
        assert!(port.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_decision_sends_nothing() {
        let port = Scripted::new(ClaimStatus::Approved);
        let mut actions = ClaimActions::new(port, Role::InsuranceAgent);
        let decision = DecisionRequest {
            status: ClaimStatus::Approved,
            approved_amount: Some(dec!(0)),
            rejection_reason: None,
            insurer_notes: None,
        };

        let err = actions
            .make_decision(&claim_in(ClaimStatus::Insurer), &decision)
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert!(actions.validation().error_for("approvedAmount").is_some());
        assert!(actions.error().is_none());
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_top_level_error() {
        let port = Scripted::new(ClaimStatus::Approved);
        let mut actions = ClaimActions::new(port, Role::InsuranceAgent);

        let result = actions
            .make_decision(&claim_in(ClaimStatus::Insurer), &DecisionRequest::approve(dec!(800)))
            .await;

        assert!(result.is_err());
        assert_eq!(actions.error(), Some("Decision service unavailable"));
        assert!(!actions.is_loading());
        assert!(actions.validation().is_valid());
    }
}
