//! Entity descriptor for Invoice

use super::handlers::{create_invoice, get_invoice_view, list_invoices, update_invoice};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Invoice entity
pub struct InvoiceDescriptor;

impl EntityDescriptor for InvoiceDescriptor {
    fn entity_type(&self) -> &str {
        "invoice"
    }

    fn plural(&self) -> &str {
        "invoices"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/invoices", get(list_invoices).post(create_invoice))
            .route(
                "/invoices/{invoice_id}",
                get(get_invoice_view).patch(update_invoice),
            )
    }
}
