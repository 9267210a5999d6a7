//! Invoice entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod view;

pub use descriptor::InvoiceDescriptor;
pub use model::Invoice;
pub use view::{InvoiceView, build_invoice_view};
