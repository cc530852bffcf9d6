//! Grant decisions

use crate::api::resource;
use crate::api::ApiClient;
use crate::error::CliResult;
use govgate_core::models::{Grant, GrantUpdate};
use uuid::Uuid;

/// Record a decision on a grant with a partial update.
pub async fn decide_grant(client: &ApiClient, id: Uuid, update: &GrantUpdate) -> CliResult<Grant> {
    update.validate()?;
    let grant = resource::update::<Grant, _>(client, id, update).await?;
    tracing::info!(id = %id, decline = ?update.decline, "Grant decided");
    Ok(grant)
}
