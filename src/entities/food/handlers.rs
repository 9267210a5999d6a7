//! Food HTTP handlers

use super::model::{Food, FoodUpdate, NewFood};
use crate::core::entity::{Document, changes};
use crate::core::error::{ServiceError, ServiceResult};
use crate::core::query::{PaginatedResponse, QueryParams, paginate};
use crate::core::validation::Validated;
use crate::entities::menu::Menu;
use crate::server::AppState;
use crate::storage::Repository;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

pub async fn list_foods(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ServiceResult<Json<PaginatedResponse<Food>>> {
    let window = params.window(state.default_page_size);
    paginate::<Food>(&state.repository, window).await.map(Json)
}

pub async fn get_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
) -> ServiceResult<Json<Food>> {
    state.repository.get::<Food>(&food_id).await.map(Json)
}

pub async fn create_food(
    State(state): State<AppState>,
    Validated(payload): Validated<NewFood>,
) -> ServiceResult<(StatusCode, Json<Food>)> {
    ensure_menu(&state.repository, &payload.menu_id).await?;

    let food = Food::new(payload.name, payload.price, payload.food_image, payload.menu_id);
    state.repository.insert(&food).await?;

    tracing::info!(food_id = %food.key(), menu_id = %food.menu_id, "food created");
    Ok((StatusCode::CREATED, Json(food)))
}

pub async fn update_food(
    State(state): State<AppState>,
    Path(food_id): Path<String>,
    Validated(payload): Validated<FoodUpdate>,
) -> ServiceResult<Json<Food>> {
    if let Some(menu_id) = &payload.menu_id {
        ensure_menu(&state.repository, menu_id).await?;
    }

    let set = changes(&payload)?;
    state.repository.update::<Food>(&food_id, set).await.map(Json)
}

async fn ensure_menu(repository: &Repository, menu_id: &str) -> ServiceResult<()> {
    if repository.exists::<Menu>(menu_id).await? {
        Ok(())
    } else {
        Err(ServiceError::not_found(Menu::entity_type(), menu_id))
    }
}
