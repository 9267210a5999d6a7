//! Menu HTTP handlers

use super::model::{Menu, MenuUpdate, NewMenu, in_time_span};
use crate::core::entity::{Document, changes, now};
use crate::core::error::{ServiceError, ServiceResult};
use crate::core::validation::Validated;
use crate::server::AppState;
use crate::storage::Filter;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_menus(State(state): State<AppState>) -> ServiceResult<Json<Vec<Menu>>> {
    let menus = state.repository.list::<Menu>(&Filter::all()).await?;
    Ok(Json(menus))
}

pub async fn get_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<String>,
) -> ServiceResult<Json<Menu>> {
    state.repository.get::<Menu>(&menu_id).await.map(Json)
}

pub async fn create_menu(
    State(state): State<AppState>,
    Validated(payload): Validated<NewMenu>,
) -> ServiceResult<(StatusCode, Json<Menu>)> {
    let menu = Menu::new(
        payload.name,
        payload.category,
        payload.start_date,
        payload.end_date,
    );
    state.repository.insert(&menu).await?;

    tracing::info!(menu_id = %menu.key(), "menu created");
    Ok((StatusCode::CREATED, Json(menu)))
}

pub async fn update_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<String>,
    Validated(payload): Validated<MenuUpdate>,
) -> ServiceResult<Json<Menu>> {
    match (payload.start_date, payload.end_date) {
        (Some(start), Some(end)) if !in_time_span(start, end, now()) => {
            return Err(ServiceError::invalid_field("start_date", "invalid time"));
        }
        (Some(_), None) | (None, Some(_)) => {
            return Err(ServiceError::invalid_field(
                "end_date",
                "start_date and end_date must be updated together",
            ));
        }
        _ => {}
    }

    let set = changes(&payload)?;
    state.repository.update::<Menu>(&menu_id, set).await.map(Json)
}
