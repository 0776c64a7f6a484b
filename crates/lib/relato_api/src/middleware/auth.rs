//! Authentication middleware — Bearer token extraction and identity
//! resolution.
//!
//! Per request the gate moves Unauthenticated → Authenticated or Rejected
//! before any handler runs. The resolved identity is attached to request
//! extensions; handlers take it via `Extension` and pass it explicitly into
//! services, so nothing downstream reaches back into ambient state.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use relato_core::auth::access::{self, AccessDecision};
use relato_core::models::user::{Identity, Role};

use crate::AppState;
use crate::error::AppError;

/// Request-scoped identity injected by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

/// Extract the token from an `Authorization: Bearer <token>` header. An
/// absent header or any other scheme counts as no credential presented.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Require a valid bearer token: resolve it to a fresh identity and inject
/// [`CurrentUser`] into request extensions. Any failure rejects with 401
/// before the handler runs.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())
        .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;

    let identity = state.auth.resolve(token).await?;

    request.extensions_mut().insert(CurrentUser(identity));
    Ok(next.run(request).await)
}

/// Like [`require_auth`], but every failure proceeds anonymously instead of
/// rejecting. Used on endpoints with both public and enhanced-when-
/// authenticated behavior.
pub async fn optional_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(request.headers())
        && let Ok(identity) = state.auth.resolve(token).await
    {
        request.extensions_mut().insert(CurrentUser(identity));
    }
    next.run(request).await
}

/// Require the admin role. Must be layered after [`require_auth`]; an
/// absent identity denies as unauthenticated rather than forbidden.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let decision = {
        let identity = request.extensions().get::<CurrentUser>().map(|c| &c.0);
        access::require_role(identity, Role::Admin)
    };
    if let AccessDecision::Deny(reason) = decision {
        return Err(reason.into());
    }
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(
            bearer_token(&headers(Some("Bearer abc.def.ghi"))),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn missing_header_is_no_credential() {
        assert_eq!(bearer_token(&headers(None)), None);
    }

    #[test]
    fn non_bearer_scheme_is_no_credential() {
        assert_eq!(bearer_token(&headers(Some("Basic dXNlcjpwdw=="))), None);
        assert_eq!(bearer_token(&headers(Some("bearer abc"))), None);
        assert_eq!(bearer_token(&headers(Some("abc"))), None);
    }
}
