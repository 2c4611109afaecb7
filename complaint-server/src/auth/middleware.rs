//! 认证中间件
//!
//! 为 JWT 认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{HeaderMap, Method, Uri};
use shared::error::AppError;

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 公共路由 (无需认证)
///
/// | 方法 | 路径 |
/// |------|------|
/// | POST | /api/auth/login |
/// | POST | /api/complaints |
/// | POST | /api/complaints/form |
fn is_public_api_route(method: &Method, path: &str) -> bool {
    *method == Method::POST
        && matches!(
            path,
            "/api/auth/login" | "/api/complaints" | "/api/complaints/form"
        )
}

/// 认证中间件 - 要求管理员登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径
/// - 公共提交和登录接口
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 NotAuthenticated |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 TokenInvalid |
/// | 非管理员角色 | 403 AdminRequired |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 非 API 路由跳过认证 (让它们正常返回 404)
    if !path.starts_with("/api/") || is_public_api_route(req.method(), path) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(req.headers(), req.uri(), &state.jwt_service)?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Bearer token → admin [`CurrentUser`]
///
/// Shared by the middleware and the extractor.
pub(crate) fn authenticate(
    headers: &HeaderMap,
    uri: &Uri,
    jwt: &JwtService,
) -> Result<CurrentUser, AppError> {
    let Some(header) = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    else {
        security_log!("WARN", "auth_missing", uri = uri.to_string());
        return Err(AppError::unauthorized());
    };

    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = jwt.validate_token(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = e.to_string(),
            uri = uri.to_string()
        );
        match e {
            JwtError::ExpiredToken => AppError::token_expired(),
            _ => AppError::invalid_token("Invalid token"),
        }
    })?;

    let user = CurrentUser::from(claims);
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            username = user.username.clone(),
            user_role = user.role.clone()
        );
        return Err(AppError::admin_required());
    }
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_routes() {
        assert!(is_public_api_route(&Method::POST, "/api/complaints"));
        assert!(is_public_api_route(&Method::POST, "/api/complaints/form"));
        assert!(is_public_api_route(&Method::POST, "/api/auth/login"));
        assert!(!is_public_api_route(&Method::GET, "/api/complaints"));
        assert!(!is_public_api_route(&Method::PUT, "/api/complaints"));
        assert!(!is_public_api_route(&Method::POST, "/api/admin/complaints"));
    }
}
