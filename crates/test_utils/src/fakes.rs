//! In-memory fakes
//!
//! `InMemoryClaims` and `InMemoryUsers` implement the domain ports the way
//! the backend behaves, so form-layer tests can run without HTTP. Both record
//! the calls they receive and can be told to fail the next call.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

use core_kernel::{ClaimId, DocumentId, PortError, Role, UserId};
use domain_claims::workflow::{action_target, ensure_transition, return_target};
use domain_claims::{
    Claim, ClaimAction, ClaimQuery, ClaimStatus, ClaimsPort, DecisionRequest, DocumentContent,
    ForwardToInsurerData, ReturnRequest,
};
use domain_users::{User, UserForm, UserQuery, UserStats, UserStatus, UsersPort};
use infra_client::Navigator;

/// Bytes served for every fake document download
pub const FAKE_DOCUMENT: &[u8] = b"%PDF-1.4 fake document";

#[derive(Default)]
struct CallLog {
    calls: Mutex<Vec<String>>,
    failure: Mutex<Option<PortError>>,
}

impl CallLog {
    fn enter(&self, call: String) -> Result<(), PortError> {
        self.calls.lock().expect("call log").push(call);
        match self.failure.lock().expect("failure slot").take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("call log").clone()
    }

    fn fail_next(&self, error: PortError) {
        *self.failure.lock().expect("failure slot") = Some(error);
    }
}

fn conflict(message: impl Into<String>) -> PortError {
    PortError::rejected(400, message)
}

/// In-memory claims backend
#[derive(Default)]
pub struct InMemoryClaims {
    claims: Mutex<BTreeMap<ClaimId, Claim>>,
    log: CallLog,
}

impl InMemoryClaims {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_claims(claims: impl IntoIterator<Item = Claim>) -> Self {
        let fake = Self::new();
        for claim in claims {
            fake.insert(claim);
        }
        fake
    }

    pub fn insert(&self, claim: Claim) {
        self.claims.lock().expect("claims").insert(claim.id.clone(), claim);
    }

    /// Current stored state of a claim
    pub fn stored(&self, id: &ClaimId) -> Option<Claim> {
        self.claims.lock().expect("claims").get(id).cloned()
    }

    /// Calls received so far, as `operation:claim_id`
    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }

    /// Makes the next call fail with `error`
    pub fn fail_next(&self, error: PortError) {
        self.log.fail_next(error);
    }

    fn update<F>(&self, id: &ClaimId, change: F) -> Result<Claim, PortError>
    where
        F: FnOnce(&mut Claim) -> Result<(), PortError>,
    {
        let mut claims = self.claims.lock().expect("claims");
        let claim = claims
            .get_mut(id)
            .ok_or_else(|| PortError::not_found("Claim", id))?;
        change(claim)?;
        Ok(claim.clone())
    }

    fn advance(&self, id: &ClaimId, role: Role, action: ClaimAction) -> Result<Claim, PortError> {
        self.update(id, |claim| {
            let next = action_target(claim.status, role, action).ok_or_else(|| {
                conflict(format!("Cannot {action} a claim in status {}", claim.status))
            })?;
            claim.status = next;
            Ok(())
        })
    }
}

#[async_trait]
impl ClaimsPort for InMemoryClaims {
    async fn list_claims(&self, query: &ClaimQuery) -> Result<Vec<Claim>, PortError> {
        self.log.enter("list_claims".to_string())?;
        let claims = self.claims.lock().expect("claims");
        Ok(claims.values().filter(|c| query.matches(c)).cloned().collect())
    }

    async fn get_claim(&self, id: &ClaimId) -> Result<Claim, PortError> {
        self.log.enter(format!("get_claim:{id}"))?;
        self.stored(id).ok_or_else(|| PortError::not_found("Claim", id))
    }

    async fn submit_claim(&self, id: &ClaimId) -> Result<Claim, PortError> {
        self.log.enter(format!("submit_claim:{id}"))?;
        self.advance(id, Role::Employee, ClaimAction::Submit)
    }

    async fn start_review(&self, id: &ClaimId) -> Result<Claim, PortError> {
        self.log.enter(format!("start_review:{id}"))?;
        self.advance(id, Role::HrOfficer, ClaimAction::Review)
    }

    async fn forward_to_insurer(
        &self,
        id: &ClaimId,
        data: &ForwardToInsurerData,
    ) -> Result<Claim, PortError> {
        self.log.enter(format!("forward_to_insurer:{id}"))?;
        let claim = self.advance(id, Role::HrOfficer, ClaimAction::Forward)?;
        self.update(&claim.id, |claim| {
            claim.coverage_breakdown = data.coverage_breakdown.clone();
            claim.hr_notes = data.hr_notes.clone();
            Ok(())
        })
    }

    async fn return_claim(
        &self,
        id: &ClaimId,
        request: &ReturnRequest,
    ) -> Result<Claim, PortError> {
        self.log.enter(format!("return_claim:{id}"))?;
        self.update(id, |claim| {
            let target = [Role::HrOfficer, Role::InsuranceAgent]
                .into_iter()
                .find_map(|role| return_target(claim.status, role))
                .ok_or_else(|| {
                    conflict(format!("Cannot return a claim in status {}", claim.status))
                })?;
            claim.status = target;
            claim.return_reason = Some(request.reason.clone());
            Ok(())
        })
    }

    async fn decide(&self, id: &ClaimId, decision: &DecisionRequest) -> Result<Claim, PortError> {
        self.log.enter(format!("decide:{id}"))?;
        self.update(id, |claim| {
            ensure_transition(claim.status, decision.status, Role::InsuranceAgent)
                .map_err(|e| conflict(e.to_string()))?;
            claim.status = decision.status;
            if decision.status == ClaimStatus::Approved {
                claim.claim_amount.approved = decision.approved_amount;
            } else {
                claim.rejection_reason = decision.rejection_reason.clone();
            }
            claim.insurer_notes = decision.insurer_notes.clone();
            Ok(())
        })
    }

    async fn download_document(
        &self,
        id: &ClaimId,
        document: &DocumentId,
    ) -> Result<DocumentContent, PortError> {
        self.log.enter(format!("download_document:{id}"))?;
        let claim = self.stored(id).ok_or_else(|| PortError::not_found("Claim", id))?;
        let doc = claim
            .document(document)
            .ok_or_else(|| PortError::not_found("Document", document))?;
        Ok(DocumentContent {
            bytes: FAKE_DOCUMENT.to_vec(),
            content_type: doc.content_type.clone(),
            filename: Some(doc.name.clone()),
        })
    }
}

/// In-memory user directory
#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<BTreeMap<UserId, User>>,
    next_id: Mutex<u32>,
    log: CallLog,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let fake = Self::new();
        {
            let mut stored = fake.users.lock().expect("users");
            for user in users {
                stored.insert(user.id.clone(), user);
            }
        }
        fake
    }

    pub fn stored(&self, id: &UserId) -> Option<User> {
        self.users.lock().expect("users").get(id).cloned()
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.calls()
    }

    pub fn fail_next(&self, error: PortError) {
        self.log.fail_next(error);
    }
}

fn apply_form(user: &mut User, form: &UserForm) {
    user.first_name = form.first_name.clone();
    user.last_name = form.last_name.clone();
    user.email = form.email.clone();
    if let Some(role) = form.role {
        user.role = role;
    }
    user.nic = form.nic.clone();
    user.phone_number = form.phone_number.clone();
    user.employee_id = form.employee_id.clone();
    user.department = form.department.clone();
    user.dependents = form.dependents.clone();
}

#[async_trait]
impl UsersPort for InMemoryUsers {
    async fn list_users(&self, query: &UserQuery) -> Result<Vec<User>, PortError> {
        self.log.enter("list_users".to_string())?;
        let users = self.users.lock().expect("users");
        Ok(users
            .values()
            .filter(|u| query.role.map_or(true, |r| u.role == r))
            .filter(|u| query.status.map_or(true, |s| u.status == s))
            .cloned()
            .collect())
    }

    async fn get_user(&self, id: &UserId) -> Result<User, PortError> {
        self.log.enter(format!("get_user:{id}"))?;
        self.stored(id).ok_or_else(|| PortError::not_found("User", id))
    }

    async fn create_user(&self, form: &UserForm) -> Result<User, PortError> {
        self.log.enter("create_user".to_string())?;
        let mut users = self.users.lock().expect("users");
        if users.values().any(|u| u.email.eq_ignore_ascii_case(&form.email)) {
            return Err(conflict("User with this email already exists"));
        }

        let mut next_id = self.next_id.lock().expect("next id");
        *next_id += 1;
        let mut user = User {
            id: UserId::new(format!("user-{}", *next_id)),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            role: Role::Employee,
            status: UserStatus::Active,
            nic: None,
            phone_number: None,
            employee_id: None,
            department: None,
            dependents: Vec::new(),
            created_at: None,
        };
        apply_form(&mut user, form);
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: &UserId, form: &UserForm) -> Result<User, PortError> {
        self.log.enter(format!("update_user:{id}"))?;
        let mut users = self.users.lock().expect("users");
        let user = users.get_mut(id).ok_or_else(|| PortError::not_found("User", id))?;
        apply_form(user, form);
        Ok(user.clone())
    }

    async fn update_status(&self, id: &UserId, status: UserStatus) -> Result<User, PortError> {
        self.log.enter(format!("update_status:{id}"))?;
        let mut users = self.users.lock().expect("users");
        let user = users.get_mut(id).ok_or_else(|| PortError::not_found("User", id))?;
        user.status = status;
        Ok(user.clone())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), PortError> {
        self.log.enter(format!("delete_user:{id}"))?;
        self.users
            .lock()
            .expect("users")
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("User", id))
    }

    async fn stats_overview(&self) -> Result<UserStats, PortError> {
        self.log.enter("stats_overview".to_string())?;
        let users = self.users.lock().expect("users");
        let mut stats = UserStats {
            total_users: users.len() as u64,
            ..Default::default()
        };
        for user in users.values() {
            *stats.by_role.entry(user.role).or_default() += 1;
            *stats.by_status.entry(user.status).or_default() += 1;
            if user.is_active() {
                stats.active_users += 1;
            }
        }
        Ok(stats)
    }
}

/// Navigator that remembers every route it was sent to
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().expect("routes").clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.routes.lock().expect("routes").push(route.to_string());
    }
}
