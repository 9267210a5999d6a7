//! Entity descriptor for Table

use super::handlers::{create_table, get_table, list_tables, update_table};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Table entity
pub struct TableDescriptor;

impl EntityDescriptor for TableDescriptor {
    fn entity_type(&self) -> &str {
        "table"
    }

    fn plural(&self) -> &str {
        "tables"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/tables", get(list_tables).post(create_table))
            .route("/tables/{table_id}", get(get_table).patch(update_table))
    }
}
