//! Tenant extraction for multi-tenancy.
//!
//! The fronting authentication layer resolves the session and forwards the
//! account's tenant id in the `X-Tenant-ID` header. Every handler scopes its
//! data access to this id; rows of other tenants are unreachable.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use club_core::error::AppError;
use uuid::Uuid;

/// The tenant (account) a request acts on behalf of.
#[derive(Debug, Clone, Copy)]
pub struct TenantId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for TenantId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get("X-Tenant-ID")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::AuthError(anyhow::anyhow!(
                    "Missing X-Tenant-ID header (required from auth layer)"
                ))
            })?;

        let tenant_id = raw.parse::<Uuid>().map_err(|_| {
            AppError::AuthError(anyhow::anyhow!("Invalid X-Tenant-ID header"))
        })?;

        tracing::Span::current().record("tenant_id", raw);

        Ok(TenantId(tenant_id))
    }
}
