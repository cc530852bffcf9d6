//! Generic CRUD over the role-scoped collections
//!
//! Every collection lives at `/api/{role}/{collection}/` with records at
//! `.../{id}/`. Whether a role may use a given verb is the backend's call;
//! a refusal comes back as [`CliError::Forbidden`](crate::error::CliError).

use crate::api::ApiClient;
use crate::error::CliResult;
use govgate_core::models::{
    Administrator, Association, Citizen, Department, Grant, Grantee, PublicService, Request,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A backend collection and the record type it holds.
pub trait Resource: DeserializeOwned + Send {
    /// URL segment under `/api/{role}/`
    const COLLECTION: &'static str;
    /// Singular name used in messages
    const NOUN: &'static str;
}

macro_rules! resource {
    ($ty:ty, $collection:literal, $noun:literal) => {
        impl Resource for $ty {
            const COLLECTION: &'static str = $collection;
            const NOUN: &'static str = $noun;
        }
    };
}

resource!(Department, "department", "department");
resource!(Association, "association", "association");
resource!(PublicService, "service", "service");
resource!(Request, "request", "request");
resource!(Grant, "grant", "grant");
resource!(Citizen, "citizen", "citizen");
resource!(Grantee, "grantee", "grantee");
resource!(Administrator, "administrator", "administrator");

/// List responses come either bare or wrapped in a paginated envelope.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> ListEnvelope<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Plain(items) | ListEnvelope::Paged { results: items } => items,
        }
    }
}

pub(crate) fn item_path(collection: &str, id: Uuid) -> String {
    format!("{collection}/{id}")
}

fn describe<R: Resource>(id: Uuid) -> String {
    format!("{} {id}", R::NOUN)
}

pub async fn list<R: Resource>(client: &ApiClient) -> CliResult<Vec<R>> {
    let url = client.url(R::COLLECTION);
    let envelope: ListEnvelope<R> = client.get_json(&url, R::COLLECTION).await?;
    let items = envelope.into_vec();
    tracing::info!(collection = R::COLLECTION, count = items.len(), "Fetched collection");
    Ok(items)
}

pub async fn get<R: Resource>(client: &ApiClient, id: Uuid) -> CliResult<R> {
    let url = client.url(&item_path(R::COLLECTION, id));
    client.get_json(&url, &describe::<R>(id)).await
}

pub async fn create<R, B>(client: &ApiClient, body: &B) -> CliResult<R>
where
    R: Resource,
    B: Serialize + ?Sized,
{
    let url = client.url(R::COLLECTION);
    let created: R = client.post_json(&url, body, R::NOUN).await?;
    tracing::info!(collection = R::COLLECTION, "Created record");
    Ok(created)
}

/// Partial update; only the fields present in `body` change.
pub async fn update<R, B>(client: &ApiClient, id: Uuid, body: &B) -> CliResult<R>
where
    R: Resource,
    B: Serialize + ?Sized,
{
    let url = client.url(&item_path(R::COLLECTION, id));
    let updated: R = client.patch_json(&url, body, &describe::<R>(id)).await?;
    tracing::info!(collection = R::COLLECTION, id = %id, "Updated record");
    Ok(updated)
}

pub async fn delete<R: Resource>(client: &ApiClient, id: Uuid) -> CliResult<()> {
    let url = client.url(&item_path(R::COLLECTION, id));
    client.delete(&url, &describe::<R>(id)).await?;
    tracing::info!(collection = R::COLLECTION, id = %id, "Deleted record");
    Ok(())
}
