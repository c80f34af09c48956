//! Authentication route handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::cart::merge_session_cart_into_account;
use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::services::events::AuthEvent;
use crate::state::AppState;

/// Request body for POST /auth/register and POST /auth/login.
#[derive(Deserialize)]
pub struct CredentialsForm {
    pub email: String,
    pub password: String,
}

/// Response body for the signed-in user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: tangerine_core::UserId,
    pub email: String,
}

impl From<&CurrentUser> for UserResponse {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
        }
    }
}

/// POST /auth/register - create an account and sign it in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CredentialsForm>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let service = AuthService::new(state.pool());
    let user = service
        .register(&form.email, &form.password)
        .await?;

    let current = CurrentUser {
        id: user.id,
        email: user.email,
    };
    sign_in(&state, &session, &current).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&current))))
}

/// POST /auth/login - sign in with email and password.
///
/// Whatever the visitor collected in their session cart folds into the
/// account cart as part of signing in.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CredentialsForm>,
) -> Result<Json<UserResponse>> {
    let service = AuthService::new(state.pool());
    let user = service
        .login(&form.email, &form.password)
        .await?;

    let current = CurrentUser {
        id: user.id,
        email: user.email,
    };
    sign_in(&state, &session, &current).await?;

    Ok(Json(UserResponse::from(&current)))
}

/// POST /auth/logout - sign out and drop the session.
pub async fn logout(
    State(state): State<AppState>,
    auth: OptionalAuth,
    session: Session,
) -> Result<StatusCode> {
    if let Some(user) = auth.0 {
        state.auth_events().publish(AuthEvent::SignedOut(user.id));
    }
    clear_current_user(&session).await?;
    session.flush().await?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// GET /auth/me - the current signed-in user.
pub async fn me(RequireAuth(user): RequireAuth) -> Json<UserResponse> {
    Json(UserResponse::from(&user))
}

/// Shared sign-in tail: cycle the session ID, store the user, merge the
/// visitor cart, announce the event.
async fn sign_in(state: &AppState, session: &Session, user: &CurrentUser) -> Result<()> {
    // Fresh session ID on privilege change
    session.cycle_id().await?;

    merge_session_cart_into_account(session, state.pool(), user.id).await?;
    set_current_user(session, user).await?;

    state.auth_events().publish(AuthEvent::SignedIn(user.id));
    set_sentry_user(&user.id, Some(user.email.as_str()));

    Ok(())
}
