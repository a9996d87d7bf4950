//! Policy statistics shown on the dashboard

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::policy::{Policy, PolicyStatus, PolicyType};

/// Response of `GET /policies/statistics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyStatistics {
    pub total_policies: u64,
    #[serde(default)]
    pub active_policies: u64,
    #[serde(default)]
    pub by_type: BTreeMap<PolicyType, u64>,
    #[serde(default)]
    pub by_status: BTreeMap<PolicyStatus, u64>,
    #[serde(default)]
    pub total_coverage: Decimal,
    #[serde(default)]
    pub total_premium: Decimal,
}

impl PolicyStatistics {
    /// Computes the same figures locally from a policy list
    pub fn from_policies(policies: &[Policy]) -> Self {
        let mut stats = Self {
            total_policies: policies.len() as u64,
            ..Default::default()
        };

        for policy in policies {
            *stats.by_type.entry(policy.policy_type).or_default() += 1;
            *stats.by_status.entry(policy.status).or_default() += 1;
            if policy.status == PolicyStatus::Active {
                stats.active_policies += 1;
                stats.total_coverage += policy.coverage_amount;
                stats.total_premium += policy.premium;
            }
        }

        stats
    }

    pub fn of_type(&self, policy_type: PolicyType) -> u64 {
        self.by_type.get(&policy_type).copied().unwrap_or(0)
    }
}
