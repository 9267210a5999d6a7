//! Entity descriptor for Food

use super::handlers::{create_food, get_food, list_foods, update_food};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Food entity
pub struct FoodDescriptor;

impl EntityDescriptor for FoodDescriptor {
    fn entity_type(&self) -> &str {
        "food"
    }

    fn plural(&self) -> &str {
        "foods"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/foods", get(list_foods).post(create_food))
            .route("/foods/{food_id}", get(get_food).patch(update_food))
    }
}
