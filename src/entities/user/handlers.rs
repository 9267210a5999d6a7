//! User HTTP handlers: signup, login and read access

use super::model::{AuthResponse, LoginRequest, SignupRequest, User, UserView};
use crate::core::auth::{hash_password, verify_password};
use crate::core::entity::Document;
use crate::core::error::{EntityError, RequestError, ServiceError, ServiceResult};
use crate::core::query::{PaginatedResponse, QueryParams, paginate};
use crate::core::validation::Validated;
use crate::server::AppState;
use crate::storage::{Filter, Repository};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{Map, Value};

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ServiceResult<Json<PaginatedResponse<UserView>>> {
    let window = params.window(state.default_page_size);
    let page = paginate::<User>(&state.repository, window).await?;
    Ok(Json(page.map(UserView::from)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> ServiceResult<Json<UserView>> {
    let user = state.repository.get::<User>(&user_id).await?;
    Ok(Json(user.into()))
}

pub async fn signup(
    State(state): State<AppState>,
    Validated(payload): Validated<SignupRequest>,
) -> ServiceResult<(StatusCode, Json<AuthResponse>)> {
    ensure_unique(&state.repository, "email", &payload.email).await?;
    ensure_unique(&state.repository, "phone", &payload.phone).await?;

    let password = hash_password(&payload.password)?;
    let mut user = User::new(
        payload.first_name,
        payload.last_name,
        password,
        payload.email,
        payload.avatar,
        payload.phone,
        None,
        None,
    );

    let tokens = state.auth.issue_tokens(&user.subject())?;
    user.token = Some(tokens.token.clone());
    user.refresh_token = Some(tokens.refresh_token.clone());
    state.repository.insert(&user).await?;

    tracing::info!(user_id = %user.key(), "user signed up");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            token: tokens.token,
            refresh_token: tokens.refresh_token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Validated(payload): Validated<LoginRequest>,
) -> ServiceResult<Json<AuthResponse>> {
    let user = state
        .repository
        .find_by::<User>(&Filter::by("email", payload.email.as_str()))
        .await?
        .ok_or_else(|| ServiceError::not_found(User::entity_type(), &payload.email))?;

    if !verify_password(&payload.password, &user.password) {
        tracing::warn!(user_id = %user.key(), "login rejected");
        return Err(RequestError::Unauthorized {
            message: "email or password is incorrect".to_string(),
        }
        .into());
    }

    let tokens = state.auth.issue_tokens(&user.subject())?;
    let mut set = Map::new();
    set.insert("token".to_string(), Value::String(tokens.token.clone()));
    set.insert(
        "refresh_token".to_string(),
        Value::String(tokens.refresh_token.clone()),
    );
    let user = state.repository.update::<User>(&user.user_id, set).await?;

    tracing::info!(user_id = %user.key(), "user logged in");
    Ok(Json(AuthResponse {
        user: user.into(),
        token: tokens.token,
        refresh_token: tokens.refresh_token,
    }))
}

async fn ensure_unique(repository: &Repository, field: &str, value: &str) -> ServiceResult<()> {
    if repository.count::<User>(&Filter::by(field, value)).await? > 0 {
        return Err(EntityError::AlreadyExists {
            entity_type: User::entity_type().to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
        .into());
    }
    Ok(())
}
