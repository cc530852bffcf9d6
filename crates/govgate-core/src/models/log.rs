use super::{Citizen, Labelled, Ref};
use crate::error::CoreError;
use crate::ids::LogId;
use crate::role::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Which audit trail a log entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Citizen,
    Grantee,
    Administrator,
    Manager,
}

impl LogKind {
    pub const ALL: [LogKind; 4] = [
        LogKind::Citizen,
        LogKind::Grantee,
        LogKind::Administrator,
        LogKind::Manager,
    ];

    /// Segment in `/api/{role}/log/{kind}/`.
    pub fn segment(&self) -> &'static str {
        match self {
            LogKind::Citizen => "citizen",
            LogKind::Grantee => "grantee",
            LogKind::Administrator => "administrator",
            LogKind::Manager => "manager",
        }
    }

    /// Audit trails a role may read. Managers see all of them, administrators
    /// the citizen and grantee trails, grantees the citizen trail.
    pub fn available_to(role: Role) -> &'static [LogKind] {
        match role {
            Role::Manager => &LogKind::ALL,
            Role::Admin => &[LogKind::Citizen, LogKind::Grantee],
            Role::Grantee => &[LogKind::Citizen],
            Role::Citizen => &[],
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl FromStr for LogKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "citizen" => Ok(LogKind::Citizen),
            "grantee" => Ok(LogKind::Grantee),
            "administrator" | "admin" => Ok(LogKind::Administrator),
            "manager" | "sitemanager" => Ok(LogKind::Manager),
            _ => Err(CoreError::UnknownVariant {
                kind: "log kind",
                value: s.to_string(),
                expected: "citizen, grantee, administrator, manager",
            }),
        }
    }
}

/// One audit record. The operator columns are plain user names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LogEntry {
    #[serde(rename = "id")]
    pub id: LogId,
    #[serde(default)]
    pub citizen: Option<Ref<Citizen>>,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub record_id: Option<String>,
    #[serde(default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub grantee: Option<String>,
    #[serde(default)]
    pub administrator: Option<String>,
    #[serde(default)]
    pub site_manager: Option<String>,
    #[serde(default, with = "crate::time::opt")]
    pub created: Option<DateTime<Utc>>,
}

impl LogEntry {
    /// Operator recorded on the entry, if it is an operator trail.
    pub fn actor(&self) -> Option<&str> {
        self.grantee
            .as_deref()
            .or(self.administrator.as_deref())
            .or(self.site_manager.as_deref())
    }

    pub fn citizen_label(&self) -> String {
        super::ref_label(&self.citizen)
    }
}

impl Labelled for LogEntry {
    fn uuid(&self) -> Uuid {
        *self.id.as_uuid()
    }

    fn label(&self) -> String {
        format!("{} {}", self.method, self.object)
    }
}

/// Newest first, entries without a timestamp last, keeping at most `limit`.
pub fn most_recent(mut entries: Vec<LogEntry>, limit: usize) -> Vec<LogEntry> {
    entries.sort_by(|a, b| b.created.cmp(&a.created));
    entries.truncate(limit);
    entries
}
