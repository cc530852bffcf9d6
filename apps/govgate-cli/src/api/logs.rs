//! Audit logs under `/api/{role}/log/{kind}/`

use crate::api::resource::ListEnvelope;
use crate::api::ApiClient;
use crate::error::{CliError, CliResult};
use govgate_core::models::{LogEntry, LogKind};

/// Fail early when the role has no view of this log.
pub fn ensure_available(client: &ApiClient, kind: LogKind) -> CliResult<()> {
    if LogKind::available_to(client.role()).contains(&kind) {
        Ok(())
    } else {
        Err(CliError::Forbidden(format!(
            "{} logs are not available to the {} role",
            kind,
            client.role()
        )))
    }
}

pub async fn list_logs(client: &ApiClient, kind: LogKind) -> CliResult<Vec<LogEntry>> {
    ensure_available(client, kind)?;
    let url = client.url(&format!("log/{}", kind.segment()));
    let envelope: ListEnvelope<LogEntry> = client.get_json(&url, "logs").await?;
    Ok(envelope.into_vec())
}
