//! Pre-built Test Fixtures
//!
//! Ready-to-use records shaped the way the backend returns them.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::{ClaimId, DocumentId, PolicyId, Role, UserId};
use domain_claims::{Claim, ClaimDocument, ClaimOption, ClaimStatus, ClaimType};
use domain_policy::{Policy, PolicyStatus, PolicyType};
use domain_users::{User, UserStatus};

use crate::builders::{TestClaimBuilder, TestPolicyBuilder, TestUserBuilder};

/// Fixture for identifiers
pub struct IdFixtures;

impl IdFixtures {
    pub fn claim_id() -> ClaimId {
        ClaimId::new("65a1f0c2e4b0a1b2c3d4e5f6")
    }

    pub fn document_id() -> DocumentId {
        DocumentId::new("65a1f0c2e4b0a1b2c3d4e5d0")
    }

    pub fn employee_id() -> UserId {
        UserId::new("64ff00aa11bb22cc33dd44ee")
    }

    pub fn policy_id() -> PolicyId {
        PolicyId::new("64ee11ff22aa33bb44cc55dd")
    }
}

/// Fixture for timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// When fixture claims were lodged
    pub fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 12, 9, 30, 0).unwrap()
    }

    pub fn policy_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    pub fn policy_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    }
}

/// Fixture for claims at each workflow stage
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// A vehicle accident claim of Rs 1000 waiting for HR
    pub fn awaiting_hr() -> Claim {
        TestClaimBuilder::new()
            .with_type(ClaimType::Vehicle, ClaimOption::Accident)
            .with_requested(dec!(1000))
            .with_status(ClaimStatus::Hr)
            .build()
    }

    /// A hospitalization claim waiting for the insurer
    pub fn with_insurer() -> Claim {
        TestClaimBuilder::new()
            .with_id(ClaimId::new("65a1f0c2e4b0a1b2c3d4e5f7"))
            .with_requested(dec!(25000))
            .with_status(ClaimStatus::Insurer)
            .with_breakdown("Room charges", dec!(20000))
            .with_breakdown("Medicine", dec!(5000))
            .build()
    }

    /// A draft with one uploaded document
    pub fn draft_with_document() -> Claim {
        let mut claim = TestClaimBuilder::new()
            .with_id(ClaimId::new("65a1f0c2e4b0a1b2c3d4e5f8"))
            .with_status(ClaimStatus::Draft)
            .build();
        claim.documents.push(ClaimDocument {
            id: IdFixtures::document_id(),
            name: "medical-bill.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            uploaded_at: Some(TemporalFixtures::created_at()),
        });
        claim
    }
}

/// Fixture for users
pub struct UserFixtures;

impl UserFixtures {
    pub fn employee() -> User {
        TestUserBuilder::new().build()
    }

    pub fn hr_officer() -> User {
        TestUserBuilder::new()
            .with_id(UserId::new("64ff00aa11bb22cc33dd44ef"))
            .with_name("Dilani", "Fernando")
            .with_role(Role::HrOfficer)
            .build()
    }

    pub fn suspended_agent() -> User {
        TestUserBuilder::new()
            .with_id(UserId::new("64ff00aa11bb22cc33dd44f0"))
            .with_name("Ruwan", "Jayasinghe")
            .with_role(Role::InsuranceAgent)
            .with_status(UserStatus::Suspended)
            .build()
    }
}

/// Fixture for policies
pub struct PolicyFixtures;

impl PolicyFixtures {
    pub fn active_life() -> Policy {
        TestPolicyBuilder::new().build()
    }

    pub fn pending_vehicle() -> Policy {
        TestPolicyBuilder::new()
            .with_id(PolicyId::new("64ee11ff22aa33bb44cc55de"))
            .with_type(PolicyType::Vehicle)
            .with_status(PolicyStatus::Pending)
            .build()
    }
}

/// Wraps a payload in the backend's success envelope
pub fn envelope(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

/// Serializes a record and wraps it in the success envelope
pub fn envelope_of<T: serde::Serialize>(data: &T) -> Value {
    envelope(serde_json::to_value(data).expect("fixture serializes"))
}
