//! `CurrentUser` extractor
//!
//! Handlers behind [`super::require_auth`] find the user already parked in
//! the request extensions; routes mounted outside that middleware fall back
//! to validating the bearer token themselves through the same code path.

use axum::{extract::FromRequestParts, http::request::Parts};

use super::middleware::verify_bearer;
use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let user = verify_bearer(&state.get_jwt_service(), auth_header, &parts.uri)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
