//! JWT Extractor
//!
//! Handlers behind [`require_auth`](super::require_auth) take [`CurrentUser`]
//! as an argument to learn who is acting.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;

use super::middleware::authenticate;
use crate::auth::CurrentUser;
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // 中间件已经验证过
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let user = authenticate(&parts.headers, &parts.uri, &state.jwt_service)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
