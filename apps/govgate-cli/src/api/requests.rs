//! Request workflow: create, amend, approve, reject, and detail with retry

use crate::api::resource::{self, item_path, Resource};
use crate::api::{ApiClient, RetryPolicy};
use crate::error::{CliError, CliResult};
use govgate_core::models::{DecisionPayload, NewRequest, Request, RequestUpdate};
use serde_json::Value;
use uuid::Uuid;

/// Submit a new request. Subject and message are trimmed first.
pub async fn create_request(client: &ApiClient, request: &NewRequest) -> CliResult<Request> {
    let request = request.trimmed();
    request.validate()?;
    resource::create::<Request, _>(client, &request).await
}

pub async fn update_request(
    client: &ApiClient,
    id: Uuid,
    update: &RequestUpdate,
) -> CliResult<Request> {
    if update.is_empty() {
        return Err(CliError::Validation("Nothing to update".to_string()));
    }
    update.validate()?;
    resource::update::<Request, _>(client, id, update).await
}

/// Request detail, retrying a 404 on the given schedule.
///
/// A request that was just created may not be readable yet.
pub async fn get_request_with_retry(
    client: &ApiClient,
    id: Uuid,
    policy: &RetryPolicy,
) -> CliResult<Request> {
    policy
        .execute(
            "get request",
            |error| matches!(error, CliError::NotFound(_)),
            || resource::get::<Request>(client, id),
        )
        .await
}

pub async fn approve(client: &ApiClient, id: Uuid, payload: &DecisionPayload) -> CliResult<Value> {
    decide(client, id, "approve", payload).await
}

pub async fn reject(client: &ApiClient, id: Uuid, payload: &DecisionPayload) -> CliResult<Value> {
    decide(client, id, "reject", payload).await
}

async fn decide(
    client: &ApiClient,
    id: Uuid,
    action: &str,
    payload: &DecisionPayload,
) -> CliResult<Value> {
    payload.validate()?;
    let url = client.url(&format!("{}/{action}", item_path(Request::COLLECTION, id)));
    let response: Value = client
        .post_json(&url, payload, &format!("request {id}"))
        .await?;
    tracing::info!(id = %id, action, "Request decided");
    Ok(response)
}
