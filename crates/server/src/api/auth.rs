use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;

use super::AppState;

/// `GET /verifyJWT` -- check the `Authorization` header's token, returning
/// a bare boolean. Raw tokens and `Bearer `-prefixed values are accepted.
pub async fn verify_jwt(State(state): State<AppState>, headers: HeaderMap) -> Json<bool> {
    let valid = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.strip_prefix("Bearer ").unwrap_or(s))
        .is_some_and(|token| state.jwt.validate_token(token).is_ok());
    Json(valid)
}
