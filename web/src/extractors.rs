//! Request extractors.
//!
//! Identity is resolved upstream by the auth proxy, which forwards the
//! caller as `X-User-Id` and `X-User-Roles` headers. The extractor here
//! turns those headers into an [`Actor`]; it never validates
//! credentials itself.

use crate::error::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use stayhub_inventory::{Actor, Role, UserId};

/// The authenticated caller, extracted from proxy headers.
///
/// Write paths require this extractor; a request without a valid
/// `X-User-Id` header is rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthenticatedActor(pub Actor);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedActor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("x-user-id")
            .and_then(|value| value.to_str().ok())
            .and_then(|raw| raw.parse::<uuid::Uuid>().ok())
            .ok_or_else(|| AppError::unauthorized("Missing or invalid X-User-Id header"))?;

        let roles: Vec<Role> = parts
            .headers
            .get("x-user-roles")
            .and_then(|value| value.to_str().ok())
            .map(|raw| {
                raw.split(',')
                    .filter_map(|role| Role::parse(role.trim()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self(Actor::new(UserId(user_id), roles)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<AuthenticatedActor, AppError> {
        let (mut parts, ()) = request.into_parts();
        AuthenticatedActor::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_actor_from_headers() {
        let user_id = uuid::Uuid::new_v4();
        let request = Request::builder()
            .header("x-user-id", user_id.to_string())
            .header("x-user-roles", "HOTEL_OWNER, GUEST")
            .body(())
            .unwrap();

        let actor = extract(request).await.unwrap().0;
        assert_eq!(actor.user_id, UserId(user_id));
        assert_eq!(actor.roles, vec![Role::HotelOwner, Role::Guest]);
    }

    #[tokio::test]
    async fn test_missing_user_id_rejected() {
        let request = Request::builder()
            .header("x-user-roles", "ADMIN")
            .body(())
            .unwrap();

        let err = extract(request).await.unwrap_err();
        assert_eq!(err.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_user_id_rejected() {
        let request = Request::builder()
            .header("x-user-id", "not-a-uuid")
            .body(())
            .unwrap();

        assert!(extract(request).await.is_err());
    }

    #[tokio::test]
    async fn test_unknown_roles_skipped() {
        let user_id = uuid::Uuid::new_v4();
        let request = Request::builder()
            .header("x-user-id", user_id.to_string())
            .header("x-user-roles", "SUPERUSER,ADMIN")
            .body(())
            .unwrap();

        let actor = extract(request).await.unwrap().0;
        assert_eq!(actor.roles, vec![Role::Admin]);
    }
}
