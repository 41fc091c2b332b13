use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::TypedHeader;
use headers::Authorization;
use headers::authorization::Bearer;
use tracing::debug;

use crate::db::models::UserId;
use crate::error::StudyError;
use crate::service::AuthService;

/// Identity of the caller, taken from `Authorization: Bearer <token>`.
///
/// Extraction fails with 401 on a missing header, a bad signature or an expired token,
/// so a protected handler never runs without a verified identity.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub email: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AuthService: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|rejection| {
                    debug!(reason = %rejection, "missing bearer token");
                    StudyError::Unauthenticated("missing bearer token".to_string())
                        .into_response()
                })?;

        let auth = AuthService::from_ref(state);
        let claims = auth.authenticate(bearer.token()).map_err(|e| {
            debug!(error = %e, "rejected bearer token");
            e.into_response()
        })?;

        Ok(Self {
            id: claims.id,
            email: claims.email,
        })
    }
}
