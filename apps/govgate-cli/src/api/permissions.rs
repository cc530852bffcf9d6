//! Scoped permissions under `/api/{role}/permission/{scope}/`

use crate::api::resource::ListEnvelope;
use crate::api::ApiClient;
use crate::error::CliResult;
use govgate_core::models::{NewPermission, Permission, PermissionScope};
use uuid::Uuid;

fn collection(scope: PermissionScope) -> String {
    format!("permission/{}", scope.segment())
}

pub async fn list_permissions(
    client: &ApiClient,
    scope: PermissionScope,
) -> CliResult<Vec<Permission>> {
    let url = client.url(&collection(scope));
    let envelope: ListEnvelope<Permission> = client.get_json(&url, "permissions").await?;
    Ok(envelope.into_vec())
}

pub async fn get_permission(
    client: &ApiClient,
    scope: PermissionScope,
    id: Uuid,
) -> CliResult<Permission> {
    let url = client.url(&format!("{}/{id}", collection(scope)));
    client.get_json(&url, &format!("permission {id}")).await
}

/// Create a permission in the collection matching its target.
pub async fn create_permission(
    client: &ApiClient,
    scope: PermissionScope,
    permission: &NewPermission,
) -> CliResult<Permission> {
    permission.validate()?;
    let url = client.url(&collection(scope));
    client.post_json(&url, permission, "permission").await
}

pub async fn delete_permission(
    client: &ApiClient,
    scope: PermissionScope,
    id: Uuid,
) -> CliResult<()> {
    let url = client.url(&format!("{}/{id}", collection(scope)));
    client.delete(&url, &format!("permission {id}")).await
}
