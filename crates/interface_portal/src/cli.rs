//! `portal` command-line front end
//!
//! Every command prints JSON on stdout. Claim workflow commands go through
//! [`ClaimActions`], so validation and transition checks happen before any
//! request is sent.

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use core_kernel::{ClaimId, DocumentId, PolicyId, Role, UserId};
use domain_claims::workflow::available_actions;
use domain_claims::{
    ClaimQuery, ClaimStatus, ClaimType, CoverageBreakdownItem, DecisionRequest,
    ForwardToInsurerData,
};
use domain_policy::{PolicyQuery, PolicyStatus, PolicyType};
use domain_users::{UserQuery, UserStatus};
use infra_client::{
    ApiClient, ClaimsApi, Dashboard, LocalStorage, LoggingNavigator, Navigator, PoliciesApi,
    ReportKind, ReportQuery, ReportsApi, Session, UsersApi, VapiApi,
};

use crate::claim_actions::ClaimActions;
use crate::claims_data::ClaimsData;
use crate::config::PortalConfig;
use crate::error::PortalError;

#[derive(Debug, Parser)]
#[command(name = "portal", version, about = "Employee insurance portal client")]
pub struct Cli {
    /// Backend API root, overrides PORTAL_API_BASE_URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session file, overrides PORTAL_STORAGE_FILE
    #[arg(long, global = true)]
    pub storage: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store or clear the signed-in token and role
    Session {
        #[command(subcommand)]
        command: SessionCommand,
    },
    /// Claim list and workflow actions
    Claims {
        #[command(subcommand)]
        command: ClaimsCommand,
    },
    /// User directory
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Policies
    Policies {
        #[command(subcommand)]
        command: PoliciesCommand,
    },
    /// PDF reports
    Reports {
        #[command(subcommand)]
        command: ReportsCommand,
    },
    /// Voice assistant bridge
    Vapi {
        #[command(subcommand)]
        command: VapiCommand,
    },
    /// User, policy and claim overview in one call
    Dashboard,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    Set {
        #[arg(long)]
        token: String,
        #[arg(long)]
        role: Role,
    },
    Clear,
    Show,
}

#[derive(Debug, Clone, Default, Args)]
pub struct Paging {
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum ClaimsCommand {
    List {
        #[arg(long)]
        status: Option<ClaimStatus>,
        #[arg(long = "type")]
        claim_type: Option<ClaimType>,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    /// Show a claim and the actions the signed-in role may take
    Show { id: ClaimId },
    Submit { id: ClaimId },
    Review { id: ClaimId },
    /// Forward to the insurer with a coverage breakdown
    Forward {
        id: ClaimId,
        /// Breakdown line as `TYPE=AMOUNT`, repeatable
        #[arg(long = "item", value_parser = parse_coverage_item)]
        items: Vec<CoverageBreakdownItem>,
        #[arg(long)]
        notes: Option<String>,
    },
    Return {
        id: ClaimId,
        #[arg(long)]
        reason: String,
    },
    #[command(group(ArgGroup::new("decision").required(true).args(["approve", "reject"])))]
    Decide {
        id: ClaimId,
        /// Approve with this amount
        #[arg(long)]
        approve: Option<Decimal>,
        /// Reject with this reason
        #[arg(long)]
        reject: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Download an attached document
    Document {
        id: ClaimId,
        document_id: DocumentId,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List {
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        status: Option<UserStatus>,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    Show { id: UserId },
    Stats,
    /// Activate, deactivate or suspend an account
    Status { id: UserId, status: UserStatus },
}

#[derive(Debug, Subcommand)]
pub enum PoliciesCommand {
    List {
        #[arg(long)]
        status: Option<PolicyStatus>,
        #[arg(long = "type")]
        policy_type: Option<PolicyType>,
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        paging: Paging,
    },
    Show { id: PolicyId },
    Stats,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    Download {
        kind: ReportKind,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Reports downloaded from this machine, newest first
    Recent,
}

#[derive(Debug, Subcommand)]
pub enum VapiCommand {
    Function {
        name: String,
        #[arg(long, default_value = "{}")]
        params: Value,
    },
    Db {
        operation: String,
        collection: String,
        #[arg(long, default_value = "{}")]
        query: Value,
        #[arg(long)]
        data: Option<Value>,
    },
    Call {
        method: String,
        endpoint: String,
        #[arg(long)]
        data: Option<Value>,
    },
}

/// Parses a `TYPE=AMOUNT` coverage line
pub fn parse_coverage_item(raw: &str) -> Result<CoverageBreakdownItem, String> {
    let (coverage_type, amount) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected TYPE=AMOUNT, got {raw:?}"))?;
    let amount: Decimal = amount
        .trim()
        .parse()
        .map_err(|_| format!("invalid amount {:?}", amount.trim()))?;
    Ok(CoverageBreakdownItem::new(coverage_type.trim(), amount))
}

/// Everything a command needs: the session and a client bound to it
pub struct Portal {
    session: Session,
    client: ApiClient,
    recent_limit: usize,
}

impl Portal {
    pub fn new(client: ApiClient, recent_limit: usize) -> Self {
        Self {
            session: client.session().clone(),
            client,
            recent_limit,
        }
    }

    /// Opens the session file and builds the client
    pub fn connect(
        config: &PortalConfig,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, PortalError> {
        let storage = Arc::new(LocalStorage::open(&config.storage_file)?);
        let client = ApiClient::new(config.client_config(), Session::new(storage), navigator)?;
        Ok(Self::new(client, config.recent_reports_limit))
    }

    fn role(&self) -> Result<Role, PortalError> {
        self.session.role().ok_or(PortalError::NotSignedIn)
    }

    fn claims_port(&self) -> Arc<ClaimsApi> {
        Arc::new(ClaimsApi::new(self.client.clone()))
    }

    /// Runs one command, writing its JSON result to `out`
    pub async fn execute<W: Write>(
        &self,
        command: Command,
        out: &mut W,
    ) -> Result<(), PortalError> {
        debug!(?command, "Running command");
        match command {
            Command::Session { command } => self.session_command(command, out),
            Command::Claims { command } => self.claims_command(command, out).await,
            Command::Users { command } => self.users_command(command, out).await,
            Command::Policies { command } => self.policies_command(command, out).await,
            Command::Reports { command } => self.reports_command(command, out).await,
            Command::Vapi { command } => self.vapi_command(command, out).await,
            Command::Dashboard => {
                let summary = Dashboard::new(self.client.clone()).load().await?;
                emit(out, &summary)
            }
        }
    }

    fn session_command<W: Write>(
        &self,
        command: SessionCommand,
        out: &mut W,
    ) -> Result<(), PortalError> {
        match command {
            SessionCommand::Set { token, role } => self.session.sign_in(token, role)?,
            SessionCommand::Clear => self.session.clear()?,
            SessionCommand::Show => {}
        }
        emit(
            out,
            &json!({
                "authenticated": self.session.is_authenticated(),
                "role": self.session.role(),
            }),
        )
    }

    async fn claims_command<W: Write>(
        &self,
        command: ClaimsCommand,
        out: &mut W,
    ) -> Result<(), PortalError> {
        let port = self.claims_port();
        match command {
            ClaimsCommand::List { status, claim_type, search, paging } => {
                let mut data = ClaimsData::new(port);
                data.apply_filter(ClaimQuery {
                    status,
                    claim_type,
                    search,
                    page: paging.page,
                    limit: paging.limit,
                })
                .await?;
                emit(out, &json!({ "claims": data.claims(), "statistics": data.statistics() }))
            }
            ClaimsCommand::Show { id } => {
                let claim = port.get(&id).await?;
                let actions = self
                    .session
                    .role()
                    .map(|role| available_actions(claim.status, role))
                    .unwrap_or_default();
                emit(out, &json!({ "claim": claim, "availableActions": actions }))
            }
            ClaimsCommand::Submit { id } => {
                let claim = port.get(&id).await?;
                let updated = ClaimActions::new(port, self.role()?).submit(&claim).await?;
                emit(out, &updated)
            }
            ClaimsCommand::Review { id } => {
                let claim = port.get(&id).await?;
                let updated = ClaimActions::new(port, self.role()?).start_review(&claim).await?;
                emit(out, &updated)
            }
            ClaimsCommand::Forward { id, items, notes } => {
                let claim = port.get(&id).await?;
                let data = ForwardToInsurerData {
                    coverage_breakdown: items,
                    hr_notes: notes,
                };
                let updated = ClaimActions::new(port, self.role()?)
                    .forward_to_insurer(&claim, &data)
                    .await?;
                emit(out, &updated)
            }
            ClaimsCommand::Return { id, reason } => {
                let claim = port.get(&id).await?;
                let updated = ClaimActions::new(port, self.role()?)
                    .return_claim(&claim, &reason)
                    .await?;
                emit(out, &updated)
            }
            ClaimsCommand::Decide { id, approve, reject, notes } => {
                let mut decision = match (approve, reject) {
                    (Some(amount), None) => DecisionRequest::approve(amount),
                    (None, Some(reason)) => DecisionRequest::reject(reason),
                    _ => {
                        return Err(PortalError::Input(
                            "pass exactly one of --approve <AMOUNT> or --reject <REASON>"
                                .to_string(),
                        ))
                    }
                };
                decision.insurer_notes = notes;
                let claim = port.get(&id).await?;
                let updated = ClaimActions::new(port, self.role()?)
                    .make_decision(&claim, &decision)
                    .await?;
                emit(out, &updated)
            }
            ClaimsCommand::Document { id, document_id, output } => {
                let claim = port.get(&id).await?;
                let content = ClaimActions::new(port, self.role()?)
                    .download_document(&claim, &document_id)
                    .await?;
                let fallback = format!("document-{document_id}");
                let path = output_path(output, content.filename.as_deref(), &fallback);
                std::fs::write(&path, &content.bytes)?;
                emit(
                    out,
                    &json!({ "file": path.display().to_string(), "bytes": content.bytes.len() }),
                )
            }
        }
    }

    async fn users_command<W: Write>(
        &self,
        command: UsersCommand,
        out: &mut W,
    ) -> Result<(), PortalError> {
        let users = UsersApi::new(self.client.clone());
        match command {
            UsersCommand::List { role, status, search, paging } => {
                let query = UserQuery {
                    role,
                    status,
                    search,
                    page: paging.page,
                    limit: paging.limit,
                };
                emit(out, &users.list(&query).await?)
            }
            UsersCommand::Show { id } => emit(out, &users.get(&id).await?),
            UsersCommand::Stats => emit(out, &users.stats().await?),
            UsersCommand::Status { id, status } => emit(out, &users.set_status(&id, status).await?),
        }
    }

    async fn policies_command<W: Write>(
        &self,
        command: PoliciesCommand,
        out: &mut W,
    ) -> Result<(), PortalError> {
        let policies = PoliciesApi::new(self.client.clone());
        match command {
            PoliciesCommand::List { status, policy_type, search, paging } => {
                let query = PolicyQuery {
                    policy_type,
                    status,
                    search,
                    page: paging.page,
                    limit: paging.limit,
                };
                emit(out, &policies.list(&query).await?)
            }
            PoliciesCommand::Show { id } => emit(out, &policies.get(&id).await?),
            PoliciesCommand::Stats => emit(out, &policies.statistics().await?),
        }
    }

    async fn reports_command<W: Write>(
        &self,
        command: ReportsCommand,
        out: &mut W,
    ) -> Result<(), PortalError> {
        let reports = ReportsApi::new(self.client.clone(), self.recent_limit);
        match command {
            ReportsCommand::Download { kind, start_date, end_date, status, output } => {
                let query = ReportQuery { start_date, end_date, status };
                let blob = reports.download(kind, &query).await?;
                let fallback = format!("{kind}-report.pdf");
                let path = output_path(output, blob.filename.as_deref(), &fallback);
                std::fs::write(&path, &blob.bytes)?;
                emit(out, &json!({ "file": path.display().to_string(), "bytes": blob.len() }))
            }
            ReportsCommand::Recent => emit(out, &reports.recent().list()),
        }
    }

    async fn vapi_command<W: Write>(
        &self,
        command: VapiCommand,
        out: &mut W,
    ) -> Result<(), PortalError> {
        let vapi = VapiApi::new(self.client.clone());
        let result = match command {
            VapiCommand::Function { name, params } => vapi.execute_function(&name, params).await?,
            VapiCommand::Db { operation, collection, query, data } => {
                vapi.db_operation(&operation, &collection, query, data).await?
            }
            VapiCommand::Call { method, endpoint, data } => {
                vapi.api_call(&method, &endpoint, data).await?
            }
        };
        emit(out, &result)
    }
}

/// Where a download is written: the explicit path, else the server's file
/// name in the working directory
fn output_path(explicit: Option<PathBuf>, suggested: Option<&str>, fallback: &str) -> PathBuf {
    explicit.unwrap_or_else(|| {
        let name = suggested
            .and_then(|name| Path::new(name).file_name())
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| fallback.into());
        PathBuf::from(name)
    })
}

fn emit<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), PortalError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Applies command-line overrides and runs the command against stdout
pub async fn run(cli: Cli, mut config: PortalConfig) -> Result<(), PortalError> {
    if let Some(url) = cli.api_url {
        config.api_base_url = url;
    }
    if let Some(storage) = cli.storage {
        config.storage_file = storage;
    }

    let portal = Portal::connect(&config, Arc::new(LoggingNavigator))?;
    let mut stdout = std::io::stdout().lock();
    portal.execute(cli.command, &mut stdout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_coverage_item() {
        let item = parse_coverage_item("Medical Expenses = 600.50").unwrap();
        assert_eq!(item.coverage_type, "Medical Expenses");
        assert_eq!(item.requested_amount, dec!(600.50));

        assert!(parse_coverage_item("Medical Expenses").is_err());
        assert!(parse_coverage_item("Room=lots").is_err());
    }

    #[test]
    fn test_forward_items_repeat() {
        let cli = Cli::try_parse_from([
            "portal", "claims", "forward", "c1",
            "--item", "Medical Expenses=600",
            "--item", "Hospitalization=500",
        ])
        .unwrap();

        match cli.command {
            Command::Claims { command: ClaimsCommand::Forward { items, notes, .. } } => {
                assert_eq!(items.len(), 2);
                assert_eq!(items[1].requested_amount, dec!(500));
                assert!(notes.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_decide_requires_exactly_one_outcome() {
        assert!(Cli::try_parse_from(["portal", "claims", "decide", "c1"]).is_err());
        assert!(Cli::try_parse_from([
            "portal", "claims", "decide", "c1", "--approve", "100", "--reject", "no cover",
        ])
        .is_err());
        let approve = Cli::try_parse_from(["portal", "claims", "decide", "c1", "--approve", "100"]);
        assert!(approve.is_ok());
    }

    #[test]
    fn test_typed_arguments() {
        let cli = Cli::try_parse_from([
            "portal", "session", "set", "--token", "t", "--role", "hr-officer",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Session { command: SessionCommand::Set { role: Role::HrOfficer, .. } }
        ));

        assert!(Cli::try_parse_from(["portal", "claims", "list", "--status", "pending"]).is_err());
        assert!(Cli::try_parse_from(["portal", "reports", "download", "payroll"]).is_err());
        assert!(Cli::try_parse_from(["portal", "claims", "show", "bad/id"]).is_err());
    }

    #[test]
    fn test_output_path_strips_directories() {
        let path = output_path(None, Some("../../etc/claims-report.pdf"), "fallback.pdf");
        assert_eq!(path, PathBuf::from("claims-report.pdf"));
        assert_eq!(output_path(None, None, "fallback.pdf"), PathBuf::from("fallback.pdf"));
    }
}
