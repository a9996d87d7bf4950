//! Dashboard loader
//!
//! The dashboard needs user statistics, policy statistics and the claims
//! list. The three requests run concurrently; the first failure fails the
//! whole load.

use serde::Serialize;
use tracing::{debug, instrument};

use domain_claims::{Claim, ClaimQuery, ClaimStatistics};
use domain_policy::PolicyStatistics;
use domain_users::UserStats;

use crate::claims::ClaimsApi;
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::policies::PoliciesApi;
use crate::users::UsersApi;

/// Claims shown in the "latest claims" panel
pub const RECENT_CLAIMS: usize = 5;

/// Everything the dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub users: UserStats,
    pub policies: PolicyStatistics,
    pub claims: ClaimStatistics,
    pub recent_claims: Vec<Claim>,
}

/// Loads the dashboard in one round of concurrent requests
#[derive(Debug, Clone)]
pub struct Dashboard {
    users: UsersApi,
    policies: PoliciesApi,
    claims: ClaimsApi,
}

impl Dashboard {
    pub fn new(client: ApiClient) -> Self {
        Self {
            users: UsersApi::new(client.clone()),
            policies: PoliciesApi::new(client.clone()),
            claims: ClaimsApi::new(client),
        }
    }

    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<DashboardSummary, ClientError> {
        let query = ClaimQuery::default();
        let (users, policies, claims) = tokio::try_join!(
            self.users.stats(),
            self.policies.statistics(),
            self.claims.list(&query),
        )?;

        debug!(claims = claims.len(), "Dashboard data loaded");
        Ok(summarize(users, policies, claims))
    }
}

fn summarize(
    users: UserStats,
    policies: PolicyStatistics,
    mut claims: Vec<Claim>,
) -> DashboardSummary {
    let statistics = ClaimStatistics::from_claims(&claims);
    claims.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    claims.truncate(RECENT_CLAIMS);

    DashboardSummary {
        users,
        policies,
        claims: statistics,
        recent_claims: claims,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_kernel::ClaimId;
    use domain_claims::{ClaimOption, ClaimStatus, ClaimType};
    use rust_decimal_macros::dec;

    fn claim(id: &str, day: u32, status: ClaimStatus) -> Claim {
        let mut claim = Claim::draft(
            ClaimId::new(id),
            ClaimType::Life,
            ClaimOption::Medication,
            dec!(100),
        );
        claim.status = status;
        claim.created_at = Some(Utc.with_ymd_and_hms(2024, 3, day, 8, 0, 0).unwrap());
        claim
    }

    #[test]
    fn test_summary_keeps_newest_claims_and_full_statistics() {
        let claims: Vec<_> = (1..=7)
            .map(|day| claim(&format!("c{day}"), day, ClaimStatus::Hr))
            .collect();

        let summary = summarize(UserStats::default(), PolicyStatistics::default(), claims);

        assert_eq!(summary.claims.total, 7);
        assert_eq!(summary.claims.count(ClaimStatus::Hr), 7);
        assert_eq!(summary.recent_claims.len(), RECENT_CLAIMS);
        assert_eq!(summary.recent_claims[0].id.as_str(), "c7");
        assert_eq!(summary.claims.total_requested, dec!(700));
    }
}
