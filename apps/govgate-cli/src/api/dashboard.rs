//! Per-role dashboard summary
//!
//! Each role's collections are fetched concurrently. Any failed fetch fails
//! the whole dashboard; there is no partial summary.

use crate::api::logs::list_logs;
use crate::api::resource::list;
use crate::api::ApiClient;
use crate::error::CliResult;
use chrono::{DateTime, Utc};
use govgate_core::models::{
    most_recent, Administrator, Association, Citizen, Department, Grant, Grantee, Labelled,
    LogEntry, LogKind, PublicService, Request,
};
use govgate_core::{Decided, Role, StatusCounts};
use serde::Serialize;

/// Log entries shown on a dashboard.
pub const RECENT_LOG_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionCount {
    pub name: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub role: Role,
    pub generated_at: DateTime<Utc>,
    pub collections: Vec<CollectionCount>,
    pub requests: StatusCounts,
    pub grants: StatusCounts,
    /// Newest first; empty for roles without log access
    pub recent_logs: Vec<LogEntry>,
}

impl DashboardSummary {
    pub fn build(
        role: Role,
        collections: Vec<(&'static str, usize)>,
        requests: &[Request],
        grants: &[Grant],
        logs: Vec<LogEntry>,
        now: DateTime<Utc>,
    ) -> Self {
        log_conflicts("request", requests, now);
        log_conflicts("grant", grants, now);

        let mut counts: Vec<CollectionCount> = collections
            .into_iter()
            .map(|(name, count)| CollectionCount { name, count })
            .collect();
        counts.push(CollectionCount {
            name: "requests",
            count: requests.len(),
        });
        counts.push(CollectionCount {
            name: "grants",
            count: grants.len(),
        });

        Self {
            role,
            generated_at: now,
            collections: counts,
            requests: StatusCounts::tally(requests, now),
            grants: StatusCounts::tally(grants, now),
            recent_logs: most_recent(logs, RECENT_LOG_LIMIT),
        }
    }

    pub fn count(&self, name: &str) -> Option<usize> {
        self.collections
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.count)
    }
}

/// Warn about records carrying both `Granted` and `Decline`.
pub fn log_conflicts<T: Decided + Labelled>(kind: &str, records: &[T], now: DateTime<Utc>) {
    for record in records {
        if record.decision(now).is_conflicting() {
            tracing::warn!(
                kind,
                id = %record.uuid(),
                "Record is both granted and declined; treating it as declined"
            );
        }
    }
}

pub async fn load_dashboard(client: &ApiClient) -> CliResult<DashboardSummary> {
    let role = client.role();
    tracing::info!(role = %role, "Loading dashboard");

    let (collections, requests, grants, logs) = match role {
        Role::Manager => {
            let (citizens, administrators, grantees, departments, services, requests, grants, logs) = tokio::try_join!(
                list::<Citizen>(client),
                list::<Administrator>(client),
                list::<Grantee>(client),
                list::<Department>(client),
                list::<PublicService>(client),
                list::<Request>(client),
                list::<Grant>(client),
                list_logs(client, LogKind::Citizen),
            )?;
            (
                vec![
                    ("citizens", citizens.len()),
                    ("administrators", administrators.len()),
                    ("grantees", grantees.len()),
                    ("departments", departments.len()),
                    ("services", services.len()),
                ],
                requests,
                grants,
                logs,
            )
        }
        Role::Admin => {
            let (citizens, grantees, departments, associations, services, requests, grants, logs) = tokio::try_join!(
                list::<Citizen>(client),
                list::<Grantee>(client),
                list::<Department>(client),
                list::<Association>(client),
                list::<PublicService>(client),
                list::<Request>(client),
                list::<Grant>(client),
                list_logs(client, LogKind::Citizen),
            )?;
            (
                vec![
                    ("citizens", citizens.len()),
                    ("grantees", grantees.len()),
                    ("departments", departments.len()),
                    ("associations", associations.len()),
                    ("services", services.len()),
                ],
                requests,
                grants,
                logs,
            )
        }
        Role::Grantee => {
            let (citizens, requests, grants) = tokio::try_join!(
                list::<Citizen>(client),
                list::<Request>(client),
                list::<Grant>(client),
            )?;
            (vec![("citizens", citizens.len())], requests, grants, Vec::new())
        }
        Role::Citizen => {
            let (requests, grants) =
                tokio::try_join!(list::<Request>(client), list::<Grant>(client))?;
            (Vec::new(), requests, grants, Vec::new())
        }
    };

    Ok(DashboardSummary::build(
        role,
        collections,
        &requests,
        &grants,
        logs,
        Utc::now(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn request(n: u128, fields: serde_json::Value) -> Request {
        let mut value = json!({"id": uuid::Uuid::from_u128(n).to_string(), "Subject": "s"});
        if let (Some(target), Some(extra)) = (value.as_object_mut(), fields.as_object()) {
            target.extend(extra.clone());
        }
        serde_json::from_value(value).unwrap()
    }

    fn log(n: u128, created: &str) -> LogEntry {
        serde_json::from_value(json!({
            "id": uuid::Uuid::from_u128(n).to_string(),
            "Method": "GET",
            "Object": "Request",
            "Created": created,
        }))
        .unwrap()
    }

    #[test]
    fn test_build_counts_requests_by_status() {
        let requests = vec![
            request(1, json!({})),
            request(2, json!({"Granted": true})),
            request(3, json!({"Granted": true, "EndDate": "2026-01-01"})),
            request(4, json!({"Decline": true})),
            request(5, json!({"Granted": true, "Decline": true})),
        ];
        let summary = DashboardSummary::build(
            Role::Admin,
            vec![("citizens", 7)],
            &requests,
            &[],
            Vec::new(),
            now(),
        );
        assert_eq!(summary.requests.pending, 1);
        assert_eq!(summary.requests.active, 1);
        assert_eq!(summary.requests.expired, 1);
        assert_eq!(summary.requests.declined, 2);
        assert_eq!(summary.count("citizens"), Some(7));
        assert_eq!(summary.count("requests"), Some(5));
        assert_eq!(summary.count("grants"), Some(0));
    }

    #[test]
    fn test_build_keeps_ten_newest_logs() {
        let logs: Vec<LogEntry> = (1..=12)
            .map(|day| log(day, &format!("2026-10-{day:02}T08:00:00Z")))
            .collect();
        let summary =
            DashboardSummary::build(Role::Manager, Vec::new(), &[], &[], logs, now());
        assert_eq!(summary.recent_logs.len(), RECENT_LOG_LIMIT);
        assert_eq!(
            summary.recent_logs[0].created.unwrap().to_rfc3339(),
            "2026-10-12T08:00:00+00:00"
        );
    }
}
