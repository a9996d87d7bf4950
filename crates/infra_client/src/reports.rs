//! Report downloads
//!
//! Reports are PDFs rendered by the backend. Each successful download is
//! remembered in the `recentReports` storage entry so the reports screen can
//! list what was fetched lately, newest first.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::client::{ApiClient, Blob};
use crate::error::ClientError;
use crate::storage::{LocalStorage, StorageError, RECENT_REPORTS_KEY};

/// Number of recent reports kept when no limit is configured
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Report families offered by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Users,
    Policies,
    Claims,
    Financial,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::Users,
        ReportKind::Policies,
        ReportKind::Claims,
        ReportKind::Financial,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::Users => "users",
            ReportKind::Policies => "policies",
            ReportKind::Claims => "claims",
            ReportKind::Financial => "financial",
        }
    }

    fn default_filename(&self, date: NaiveDate) -> String {
        format!("{}-report-{}.pdf", self.as_str(), date.format("%Y-%m-%d"))
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ReportKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("Unknown report type: {s}"))
    }
}

/// Optional filters accepted by every report endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// One entry of the recent reports list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentReport {
    pub kind: ReportKind,
    pub filename: String,
    pub size_bytes: usize,
    pub downloaded_at: DateTime<Utc>,
}

/// Bounded, newest-first list of downloaded reports kept in local storage
#[derive(Debug, Clone)]
pub struct RecentReports {
    storage: Arc<LocalStorage>,
    limit: usize,
}

impl RecentReports {
    pub fn new(storage: Arc<LocalStorage>, limit: usize) -> Self {
        Self {
            storage,
            limit: limit.max(1),
        }
    }

    /// Stored entries; an unreadable entry is treated as an empty list
    pub fn list(&self) -> Vec<RecentReport> {
        let Some(raw) = self.storage.get(RECENT_REPORTS_KEY) else {
            return Vec::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Discarding unreadable recent reports");
            Vec::new()
        })
    }

    /// Puts a report at the front, dropping an older entry with the same
    /// file name and anything past the limit
    pub fn record(&self, report: RecentReport) -> Result<Vec<RecentReport>, StorageError> {
        let mut reports = self.list();
        reports.retain(|r| r.filename != report.filename);
        reports.insert(0, report);
        reports.truncate(self.limit);

        self.storage
            .set(RECENT_REPORTS_KEY, serde_json::to_string(&reports)?)?;
        Ok(reports)
    }

    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove(RECENT_REPORTS_KEY)
    }
}

/// Client for `/reports`
#[derive(Debug, Clone)]
pub struct ReportsApi {
    client: ApiClient,
    recent: RecentReports,
}

impl ReportsApi {
    pub fn new(client: ApiClient, recent_limit: usize) -> Self {
        let recent = RecentReports::new(client.session().storage().clone(), recent_limit);
        Self { client, recent }
    }

    pub fn recent(&self) -> &RecentReports {
        &self.recent
    }

    /// `GET /reports/:kind` returning the PDF
    ///
    /// A download that cannot be recorded in the recent list still succeeds.
    #[instrument(skip(self), fields(kind = %kind))]
    pub async fn download(
        &self,
        kind: ReportKind,
        query: &ReportQuery,
    ) -> Result<Blob, ClientError> {
        let mut blob = self
            .client
            .get_blob_with_query(&format!("reports/{kind}"), query)
            .await?;

        let now = Utc::now();
        let filename = blob
            .filename
            .clone()
            .unwrap_or_else(|| kind.default_filename(now.date_naive()));
        blob.filename = Some(filename.clone());

        let entry = RecentReport {
            kind,
            filename,
            size_bytes: blob.len(),
            downloaded_at: now,
        };
        if let Err(e) = self.recent.record(entry) {
            warn!(error = %e, "Failed to record recent report");
        }

        info!(len = blob.len(), "Report downloaded");
        Ok(blob)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn report(kind: ReportKind, filename: &str, minute: u32) -> RecentReport {
        RecentReport {
            kind,
            filename: filename.to_string(),
            size_bytes: 10,
            downloaded_at: Utc.with_ymd_and_hms(2024, 5, 1, 9, minute, 0).unwrap(),
        }
    }

    #[test]
    fn test_recent_reports_are_bounded_and_newest_first() {
        let recent = RecentReports::new(Arc::new(LocalStorage::in_memory()), 3);
        for (i, name) in ["a.pdf", "b.pdf", "c.pdf", "d.pdf"].into_iter().enumerate() {
            recent.record(report(ReportKind::Claims, name, i as u32)).unwrap();
        }

        let names: Vec<_> = recent.list().into_iter().map(|r| r.filename).collect();
        assert_eq!(names, vec!["d.pdf", "c.pdf", "b.pdf"]);
    }

    #[test]
    fn test_same_file_moves_to_front() {
        let recent = RecentReports::new(Arc::new(LocalStorage::in_memory()), 5);
        recent.record(report(ReportKind::Users, "users.pdf", 0)).unwrap();
        recent.record(report(ReportKind::Claims, "claims.pdf", 1)).unwrap();
        let list = recent.record(report(ReportKind::Users, "users.pdf", 2)).unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].filename, "users.pdf");
        assert_eq!(list[0].downloaded_at.format("%M").to_string(), "02");
    }

    #[test]
    fn test_unreadable_entry_is_ignored() {
        let storage = Arc::new(LocalStorage::in_memory());
        storage.set(RECENT_REPORTS_KEY, "not json").unwrap();
        let recent = RecentReports::new(storage, 5);
        assert!(recent.list().is_empty());
    }

    #[test]
    fn test_report_query_wire_format() {
        let query = ReportQuery {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_date: None,
            status: Some("approved".to_string()),
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json, serde_json::json!({ "startDate": "2024-01-01", "status": "approved" }));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Financial".parse::<ReportKind>().unwrap(), ReportKind::Financial);
        assert!("audit".parse::<ReportKind>().is_err());
        assert_eq!(
            ReportKind::Policies.default_filename(NaiveDate::from_ymd_opt(2024, 2, 9).unwrap()),
            "policies-report-2024-02-09.pdf"
        );
    }
}
