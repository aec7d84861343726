//! 认证中间件
//!
//! Validates `Authorization: Bearer <token>` on every `/pos/` request and
//! rejects roles outside [`POS_ROLES`](super::POS_ROLES).

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService, is_pos_role};
use crate::core::ServerState;
use crate::security_log;

/// Only this prefix is protected; `/health` and unknown paths pass through
const PROTECTED_PREFIX: &str = "/pos/";

/// Resolve the caller from request headers
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 NotAuthenticated |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 TokenInvalid |
/// | 角色不允许 | 403 PermissionDenied |
pub fn authenticate(
    jwt_service: &JwtService,
    headers: &HeaderMap,
    uri: &http::Uri,
) -> Result<CurrentUser, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => match JwtService::extract_from_header(header) {
            Some(token) => token,
            None => {
                security_log!("WARN", "auth_malformed", uri = format!("{:?}", uri));
                return Err(AppError::invalid_token("Invalid authorization header"));
            }
        },
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", uri));
            return Err(AppError::unauthorized());
        }
    };

    let claims = match jwt_service.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", uri)
            );
            return Err(match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            });
        }
    };

    if !is_pos_role(&claims.role) {
        security_log!(
            "WARN",
            "role_denied",
            user_id = claims.sub.clone(),
            role = claims.role.clone(),
            uri = format!("{:?}", uri)
        );
        return Err(AppError::forbidden(format!(
            "Role '{}' may not use the POS",
            claims.role
        )));
    }

    Ok(CurrentUser::from(claims))
}

/// 认证中间件
///
/// Injects [`CurrentUser`] into request extensions on success.
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS 预检
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if !req.uri().path().starts_with(PROTECTED_PREFIX) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state.jwt_service, req.headers(), req.uri())?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use http::HeaderValue;
    use shared::error::ErrorCode;

    fn service() -> JwtService {
        JwtService::with_config(JwtConfig::with_secret("middleware-test-secret-0123456789abcdef"))
    }

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(http::header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn uri() -> http::Uri {
        http::Uri::from_static("/pos/bootstrap")
    }

    #[test]
    fn test_missing_header_is_not_authenticated() {
        let err = authenticate(&service(), &HeaderMap::new(), &uri()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_malformed_header_is_invalid_token() {
        let err = authenticate(&service(), &headers("Basic dXNlcjpwYXNz"), &uri()).unwrap_err();
        assert_eq!(err.code, ErrorCode::TokenInvalid);
        assert_eq!(err.message, "Invalid authorization header");
    }

    #[test]
    fn test_role_outside_pos_is_forbidden() {
        let jwt = service();
        let token = jwt.generate_token("u-1", "Sam", "guest").unwrap();
        let err = authenticate(&jwt, &headers(&format!("Bearer {token}")), &uri()).unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);

        let token = jwt.generate_token("u-1", "Sam", "manager").unwrap();
        let user = authenticate(&jwt, &headers(&format!("Bearer {token}")), &uri()).unwrap();
        assert_eq!(user.id, "u-1");
    }
}
