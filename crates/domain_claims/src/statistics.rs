//! Claim statistics for dashboards

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::claim::{Claim, ClaimStatus};

/// Counts and totals over a set of claims
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimStatistics {
    pub total: usize,
    pub by_status: BTreeMap<ClaimStatus, usize>,
    /// Sum of requested amounts across all claims
    pub total_requested: Decimal,
    /// Sum of approved amounts across approved claims
    pub total_approved: Decimal,
}

impl ClaimStatistics {
    /// Computes statistics over a list of claims
    pub fn from_claims(claims: &[Claim]) -> Self {
        let mut stats = Self {
            total: claims.len(),
            ..Default::default()
        };

        for claim in claims {
            *stats.by_status.entry(claim.status).or_default() += 1;
            stats.total_requested += claim.claim_amount.requested;
            if claim.status == ClaimStatus::Approved {
                stats.total_approved += claim.claim_amount.approved.unwrap_or_default();
            }
        }

        stats
    }

    /// Number of claims in a status
    pub fn count(&self, status: ClaimStatus) -> usize {
        self.by_status.get(&status).copied().unwrap_or(0)
    }

    /// Claims still moving through the workflow
    pub fn open(&self) -> usize {
        self.by_status
            .iter()
            .filter(|(status, _)| !status.is_terminal())
            .map(|(_, count)| count)
            .sum()
    }

    /// Claims waiting on HR (lodged or under review)
    pub fn awaiting_hr(&self) -> usize {
        self.count(ClaimStatus::Employee) + self.count(ClaimStatus::Hr)
    }
}
