// ABOUTME: Login and logout routes for the admin panel
// ABOUTME: These sit outside the session guard so anonymous visitors can reach them

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use serde::Deserialize;
use tower_sessions::Session;

use super::auth::{self, DASHBOARD_PATH, LOGIN_PATH, SESSION_USER_KEY};
use super::flash::{self, Flash};
use super::templates::LoginTemplate;
use crate::response::{AppResult, HtmlTemplate};
use crate::server::AppState;

/// Build the router for /admin/login and /admin/logout
pub fn login_router() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_view).post(login_submit))
        .route("/admin/logout", get(logout))
}

async fn login_view(session: Session) -> AppResult<Response> {
    let flashes = flash::take(&session).await?;
    Ok(HtmlTemplate(LoginTemplate { flashes }).into_response())
}

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

async fn login_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    if !auth::authenticate(&state.store, &form.username, &form.password)? {
        tracing::warn!(username = %form.username, "Admin login failed");
        let mut flashes = flash::take(&session).await?;
        flashes.push(Flash::danger("Invalid credentials!"));
        return Ok(HtmlTemplate(LoginTemplate { flashes }).into_response());
    }

    // Fresh session id on privilege change
    session.cycle_id().await?;
    session
        .insert(SESSION_USER_KEY, form.username.clone())
        .await?;
    flash::push(&session, Flash::success("Login successful!")).await?;

    tracing::info!(username = %form.username, "Admin logged in");
    Ok(Redirect::to(DASHBOARD_PATH).into_response())
}

async fn logout(session: Session) -> AppResult<Redirect> {
    let username: Option<String> = session.remove(SESSION_USER_KEY).await?;
    if let Some(username) = username {
        tracing::info!(username = %username, "Admin logged out");
    }
    Ok(Redirect::to(LOGIN_PATH))
}
