//! Test Data Builders
//!
//! Builders with sensible defaults so tests only spell out the fields they
//! care about.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, PolicyId, Role, UserId};
use domain_claims::{Claim, ClaimOption, ClaimStatus, ClaimType, CoverageBreakdownItem};
use domain_policy::{Policy, PolicyStatus, PolicyType};
use domain_users::{User, UserStatus};

use crate::fixtures::{IdFixtures, TemporalFixtures};

/// Builder for claims
pub struct TestClaimBuilder {
    claim: Claim,
}

impl Default for TestClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestClaimBuilder {
    /// A Rs 5000 life/hospitalization claim in draft, lodged by the fixture employee
    pub fn new() -> Self {
        let mut claim = Claim::draft(
            IdFixtures::claim_id(),
            ClaimType::Life,
            ClaimOption::Hospitalization,
            dec!(5000),
        );
        claim.claim_number = Some("CLM-2024-0001".to_string());
        claim.employee_id = Some(IdFixtures::employee_id());
        claim.policy = Some(IdFixtures::policy_id());
        claim.created_at = Some(TemporalFixtures::created_at());
        Self { claim }
    }

    pub fn with_id(mut self, id: ClaimId) -> Self {
        self.claim.id = id;
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.claim.status = status;
        self
    }

    pub fn with_type(mut self, claim_type: ClaimType, option: ClaimOption) -> Self {
        self.claim.claim_type = claim_type;
        self.claim.claim_option = option;
        self
    }

    pub fn with_requested(mut self, amount: Decimal) -> Self {
        self.claim.claim_amount.requested = amount;
        self
    }

    pub fn with_approved(mut self, amount: Decimal) -> Self {
        self.claim.claim_amount.approved = Some(amount);
        self
    }

    /// Appends a coverage breakdown line
    pub fn with_breakdown(mut self, coverage_type: &str, amount: Decimal) -> Self {
        self.claim
            .coverage_breakdown
            .push(CoverageBreakdownItem::new(coverage_type, amount));
        self
    }

    pub fn with_employee(mut self, employee: UserId) -> Self {
        self.claim.employee_id = Some(employee);
        self
    }

    pub fn build(self) -> Claim {
        self.claim
    }
}

/// Builder for users
pub struct TestUserBuilder {
    user: User,
}

impl Default for TestUserBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestUserBuilder {
    /// An active employee
    pub fn new() -> Self {
        Self {
            user: User {
                id: IdFixtures::employee_id(),
                first_name: "Kamal".to_string(),
                last_name: "Perera".to_string(),
                email: "kamal.perera@example.lk".to_string(),
                role: Role::Employee,
                status: UserStatus::Active,
                nic: Some("199012345678".to_string()),
                phone_number: Some("0771234567".to_string()),
                employee_id: Some("EMP-0001".to_string()),
                department: Some("Finance".to_string()),
                dependents: Vec::new(),
                created_at: Some(TemporalFixtures::created_at()),
            },
        }
    }

    pub fn with_id(mut self, id: UserId) -> Self {
        self.user.id = id;
        self
    }

    pub fn with_name(mut self, first: &str, last: &str) -> Self {
        self.user.first_name = first.to_string();
        self.user.last_name = last.to_string();
        self.user.email = format!("{}.{}@example.lk", first.to_lowercase(), last.to_lowercase());
        self
    }

    /// Sets the role; non-employees carry no employee number
    pub fn with_role(mut self, role: Role) -> Self {
        self.user.role = role;
        if role != Role::Employee {
            self.user.employee_id = None;
        }
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.user.status = status;
        self
    }

    pub fn build(self) -> User {
        self.user
    }
}

/// Builder for policies
pub struct TestPolicyBuilder {
    policy: Policy,
}

impl Default for TestPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPolicyBuilder {
    /// An active group life policy for calendar year 2024
    pub fn new() -> Self {
        Self {
            policy: Policy {
                id: IdFixtures::policy_id(),
                policy_number: "LIFE-2024-001".to_string(),
                policy_type: PolicyType::Life,
                status: PolicyStatus::Active,
                coverage_amount: dec!(1000000),
                premium: dec!(15000),
                currency: Default::default(),
                start_date: TemporalFixtures::policy_start(),
                end_date: TemporalFixtures::policy_end(),
                insurance_agent: None,
                beneficiaries: vec![IdFixtures::employee_id()],
                description: None,
                created_at: None,
            },
        }
    }

    pub fn with_id(mut self, id: PolicyId) -> Self {
        self.policy.id = id;
        self
    }

    pub fn with_type(mut self, policy_type: PolicyType) -> Self {
        self.policy.policy_type = policy_type;
        self
    }

    pub fn with_status(mut self, status: PolicyStatus) -> Self {
        self.policy.status = status;
        self
    }

    pub fn with_term(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.policy.start_date = start;
        self.policy.end_date = end;
        self
    }

    pub fn build(self) -> Policy {
        self.policy
    }
}
