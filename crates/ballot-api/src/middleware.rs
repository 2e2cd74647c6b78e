use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::{header, request::Parts},
};
use ballot_core::AppState;

use crate::error::ApiError;

/// Body extractor that reports malformed or mis-shaped JSON as a 400 in
/// the standard error envelope instead of axum's plain-text 422.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(JsonBody(value))
    }
}

/// The authenticated caller. Extraction fails with 403 when the bearer
/// token is missing, invalid, expired, or names a user that no longer
/// exists (deleting a user invalidates their outstanding tokens).
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::AuthenticationRequired)?;

        let claims = ballot_core::auth::validate_token(token, &state.config.jwt_secret)
            .map_err(|_| ApiError::AuthenticationRequired)?;

        let user = ballot_db::users::get_user_by_id(&state.db, claims.sub)
            .await
            .map_err(|_| ApiError::Internal(anyhow::anyhow!("database error")))?
            .ok_or(ApiError::AuthenticationRequired)?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
        })
    }
}
