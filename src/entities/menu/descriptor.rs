//! Entity descriptor for Menu

use super::handlers::{create_menu, get_menu, list_menus, update_menu};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Menu entity
pub struct MenuDescriptor;

impl EntityDescriptor for MenuDescriptor {
    fn entity_type(&self) -> &str {
        "menu"
    }

    fn plural(&self) -> &str {
        "menus"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/menus", get(list_menus).post(create_menu))
            .route("/menus/{menu_id}", get(get_menu).patch(update_menu))
    }
}
