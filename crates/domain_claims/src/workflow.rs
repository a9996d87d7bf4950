//! Claim lifecycle transition table
//!
//! Every permitted move of a claim is listed once in `TRANSITIONS`, keyed by
//! the acting role. Validators, the application layer and the command-line
//! front end all consult this table instead of comparing status strings.
//!
//! ```text
//! draft ──submit──> employee ──review──> hr ──forward──> insurer ──decide──> approved | rejected
//!                      ▲                  │                 │
//!                      └─────return───────┘ <────return─────┘
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use core_kernel::Role;

use crate::claim::ClaimStatus;
use crate::error::ClaimError;

/// Workflow action that moves a claim between statuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimAction {
    /// Employee lodges a draft
    Submit,
    /// HR picks up a lodged claim
    Review,
    /// HR forwards a reviewed claim to the insurer
    Forward,
    /// A reviewer sends the claim back one stage
    Return,
    /// Insurer approves or rejects
    Decide,
}

impl fmt::Display for ClaimAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClaimAction::Submit => "submit",
            ClaimAction::Review => "review",
            ClaimAction::Forward => "forward",
            ClaimAction::Return => "return",
            ClaimAction::Decide => "decide",
        })
    }
}

/// A permitted move of a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub role: Role,
    pub from: ClaimStatus,
    pub to: ClaimStatus,
    pub action: ClaimAction,
}

const fn transition(
    role: Role,
    from: ClaimStatus,
    to: ClaimStatus,
    action: ClaimAction,
) -> Transition {
    Transition { role, from, to, action }
}

/// The complete transition table. Admins have no claim workflow actions.
pub const TRANSITIONS: &[Transition] = &[
    transition(Role::Employee, ClaimStatus::Draft, ClaimStatus::Employee, ClaimAction::Submit),
    transition(Role::HrOfficer, ClaimStatus::Employee, ClaimStatus::Hr, ClaimAction::Review),
    transition(Role::HrOfficer, ClaimStatus::Hr, ClaimStatus::Insurer, ClaimAction::Forward),
    transition(Role::HrOfficer, ClaimStatus::Hr, ClaimStatus::Employee, ClaimAction::Return),
    transition(
        Role::InsuranceAgent,
        ClaimStatus::Insurer,
        ClaimStatus::Approved,
        ClaimAction::Decide,
    ),
    transition(
        Role::InsuranceAgent,
        ClaimStatus::Insurer,
        ClaimStatus::Rejected,
        ClaimAction::Decide,
    ),
    transition(Role::InsuranceAgent, ClaimStatus::Insurer, ClaimStatus::Hr, ClaimAction::Return),
];

fn transitions_from(status: ClaimStatus, role: Role) -> impl Iterator<Item = &'static Transition> {
    TRANSITIONS
        .iter()
        .filter(move |t| t.from == status && t.role == role)
}

/// Statuses a role may move a claim to from `status`
pub fn allowed_next(status: ClaimStatus, role: Role) -> BTreeSet<ClaimStatus> {
    transitions_from(status, role).map(|t| t.to).collect()
}

/// Actions a role may take on a claim in `status`
pub fn available_actions(status: ClaimStatus, role: Role) -> BTreeSet<ClaimAction> {
    transitions_from(status, role).map(|t| t.action).collect()
}

/// Status a claim goes back to when `role` returns it, if it may
pub fn return_target(status: ClaimStatus, role: Role) -> Option<ClaimStatus> {
    transitions_from(status, role)
        .find(|t| t.action == ClaimAction::Return)
        .map(|t| t.to)
}

/// Target status of a single-target action, e.g. `Forward` from `hr`
pub fn action_target(status: ClaimStatus, role: Role, action: ClaimAction) -> Option<ClaimStatus> {
    transitions_from(status, role)
        .find(|t| t.action == action)
        .map(|t| t.to)
}

/// Checks that `role` may move a claim from `from` to `to`
pub fn ensure_transition(from: ClaimStatus, to: ClaimStatus, role: Role) -> Result<(), ClaimError> {
    if allowed_next(from, role).contains(&to) {
        Ok(())
    } else {
        Err(ClaimError::InvalidStatusTransition {
            from: from.to_string(),
            to: to.to_string(),
            role: role.to_string(),
        })
    }
}

/// Checks that `role` may perform `action` on a claim in `status`
pub fn ensure_action(
    status: ClaimStatus,
    role: Role,
    action: ClaimAction,
) -> Result<ClaimStatus, ClaimError> {
    action_target(status, role, action).ok_or_else(|| ClaimError::ActionNotPermitted {
        action: action.to_string(),
        status: status.to_string(),
        role: role.to_string(),
    })
}
