use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, SignupRequest, UserResponse},
        services,
    },
    error::{method_not_allowed, AccountError, ApiError, ErrorKind},
    state::AppState,
};

pub const SIGNUP_OK: &str = "Usuário criado!";
pub const LOGIN_OK: &str = "Login realizado!";
const LOGIN_SERVER_ERROR: &str = "Erro no servidor.";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup).fallback(method_not_allowed))
        .route("/login", post(login).fallback(method_not_allowed))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let Json(payload) = payload.map_err(rejected)?;
    let new_user = payload.validate().map_err(invalid)?;

    let user = services::register(state.users.as_ref(), &new_user)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::StorageError => ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Erro no banco: {e}"),
            ),
            _ => invalid(e),
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            message: SIGNUP_OK,
            user,
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, ApiError> {
    let Json(payload) = payload.map_err(rejected)?;
    let creds = payload.validate().map_err(invalid)?;

    let user = services::authenticate(state.users.as_ref(), &creds.email, &creds.password)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::InvalidCredentials => ApiError::new(StatusCode::UNAUTHORIZED, e.to_string()),
            ErrorKind::StorageError => {
                ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, LOGIN_SERVER_ERROR)
            }
            ErrorKind::ValidationError => invalid(e),
        })?;

    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(Json(UserResponse {
        message: LOGIN_OK,
        user,
    }))
}

fn rejected(rejection: JsonRejection) -> ApiError {
    warn!(error = %rejection.body_text(), "request body rejected");
    ApiError::from(rejection)
}

fn invalid(e: AccountError) -> ApiError {
    warn!(error = %e, "invalid request");
    ApiError::new(StatusCode::BAD_REQUEST, e.to_string())
}
