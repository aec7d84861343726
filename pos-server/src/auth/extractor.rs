//! CurrentUser extractor
//!
//! Handlers take `user: CurrentUser` to get the acting staff member. The
//! middleware normally resolved it already; otherwise the headers are
//! validated here.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::auth::middleware::authenticate;
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

        let user = authenticate(&state.jwt_service, &parts.headers, &parts.uri)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
