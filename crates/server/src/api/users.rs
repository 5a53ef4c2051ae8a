use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use stockroom_core::NewUser;

use super::AppState;
use crate::auth::password::{hash_password, verify_password};
use crate::error::ServerError;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub new_user: RegisterUserBody,
}

#[derive(Deserialize)]
pub struct RegisterUserBody {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// Inline encoded profile image; empty means no image.
    #[serde(default)]
    pub user_image: String,
}

/// `POST /register` -- create a user and issue a token.
///
/// The raw password is hashed here; nothing downstream ever sees it.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let password_hash = hash_password(&body.new_user.password).map_err(ServerError::Config)?;

    let new_user = NewUser {
        first_name: body.new_user.first_name,
        last_name: body.new_user.last_name,
        email: body.new_user.email,
        password_hash,
    };

    let user = state
        .registry
        .create_user(&new_user, &body.new_user.user_image)
        .await?;

    let (token, _expires_in) = state
        .jwt
        .issue_token(&user)
        .map_err(ServerError::Config)?;

    Ok(Json(serde_json::json!({ "user": user, "token": token })))
}

#[derive(Deserialize)]
pub struct SigninRequest {
    pub signin_packet: SigninPacket,
}

#[derive(Deserialize)]
pub struct SigninPacket {
    pub email: String,
    pub password: String,
}

/// `POST /signin` -- authenticate with email and password.
///
/// Failures return 401 with `auth: false` and a message distinguishing an
/// unknown email from a wrong password, matching the existing clients.
pub async fn signin(
    State(state): State<AppState>,
    Json(body): Json<SigninRequest>,
) -> Result<impl IntoResponse, ServerError> {
    let packet = body.signin_packet;
    let Some(user) = state.registry.user_by_email(&packet.email).await? else {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "auth": false,
                "msg": "No user found for that email",
            })),
        ));
    };

    if !verify_password(&user.password_hash, &packet.password) {
        return Ok((
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "auth": false,
                "msg": "Incorrect password",
            })),
        ));
    }

    let (token, _expires_in) = state
        .jwt
        .issue_token(&user)
        .map_err(ServerError::Config)?;

    Ok((
        StatusCode::OK,
        Json(serde_json::json!({
            "auth": true,
            "token": token,
            "user": user,
        })),
    ))
}
