//! Registration, login and profile endpoints

use api_types::user::{ProfileUpdate, UserLogin, UserRegister, UserView};
use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use engine::{CurrencyCode, NewUser, ProfileChanges, User};

use crate::{ServerError, server::ServerState};

fn user_view(user: User) -> UserView {
    UserView {
        id: user.id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        currency: user.currency.code().to_string(),
    }
}

fn parse_currency(currency: Option<String>) -> Result<Option<CurrencyCode>, ServerError> {
    Ok(match currency.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => Some(CurrencyCode::try_from(code)?),
        _ => None,
    })
}

pub async fn register(
    State(state): State<ServerState>,
    payload: Result<Json<UserRegister>, JsonRejection>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let Json(payload) = payload?;
    let user = state
        .engine
        .register_user(NewUser {
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
            currency: parse_currency(payload.currency)?,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user_view(user))))
}

/// Check credentials without keeping any session: later requests carry them
/// as HTTP Basic authorization.
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<UserLogin>, JsonRejection>,
) -> Result<Json<UserView>, ServerError> {
    let Json(payload) = payload?;
    let user = state
        .engine
        .authenticate(&payload.email, &payload.password)
        .await?
        .ok_or(ServerError::Unauthorized)?;

    Ok(Json(user_view(user)))
}

pub async fn me(Extension(user): Extension<User>) -> Json<UserView> {
    Json(user_view(user))
}

pub async fn update_me(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    payload: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<UserView>, ServerError> {
    let Json(payload) = payload?;
    let changes = ProfileChanges {
        first_name: payload.first_name,
        last_name: payload.last_name,
        currency: parse_currency(payload.currency)?,
    };
    let user = state.engine.update_profile(user.id, changes).await?;

    Ok(Json(user_view(user)))
}
