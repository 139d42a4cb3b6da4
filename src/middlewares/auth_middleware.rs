use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use bson::oid::ObjectId;
use std::sync::Arc;
use tracing::debug;

use crate::model::user::UserRole;
use crate::service::user_service::{UserService, UserServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

pub struct AuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
    pub user_service: Arc<UserServiceImpl>,
}

/// Authenticated identity attached to the request after token
/// verification. Never carries the password hash.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: ObjectId,
    pub email: String,
    pub role: UserRole,
}

fn unauthorized(message: &str) -> HandlerError {
    HandlerError {
        error: HandlerErrorKind::Unauthorized,
        message: message.to_string(),
        details: None,
    }
}

/// Bearer-token gate: verifies the token, loads the referenced user and
/// attaches it to the request extensions. Any failure is a 401.
pub async fn authenticate(
    State(state): State<Arc<AuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| unauthorized("Not authorized, no token"))?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| unauthorized("Not authorized, no token"))?;

    let claims = state
        .jwt_utils
        .validate_access_token(&token)
        .map_err(|_| unauthorized("Not authorized, token failed"))?;

    let user = state
        .user_service
        .find_auth_user(&claims.sub)
        .await
        .map_err(|_| unauthorized("Not authorized, token failed"))?
        .ok_or_else(|| unauthorized("Not authorized, user not found"))?;

    let id = user
        .id
        .ok_or_else(|| unauthorized("Not authorized, user not found"))?;

    debug!(user = %user.email, "Request authenticated");
    req.extensions_mut().insert(AuthUser {
        id,
        email: user.email,
        role: user.role,
    });

    Ok(next.run(req).await)
}

/// Role allow-list for a route group; used behind `authenticate`.
pub struct RoleGuard {
    pub allowed: Vec<UserRole>,
}

pub async fn authorize(
    State(guard): State<Arc<RoleGuard>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, HandlerError> {
    let user = req
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| unauthorized("Not authorized"))?;

    if !guard.allowed.contains(&user.role) {
        return Err(HandlerError {
            error: HandlerErrorKind::Forbidden,
            message: "Forbidden: Access denied".to_string(),
            details: None,
        });
    }

    Ok(next.run(req).await)
}
