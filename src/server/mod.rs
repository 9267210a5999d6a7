//! Server module for building the HTTP application
//!
//! `ServerBuilder` assembles:
//! - health routes (`/`, `/health`)
//! - the routes of every entity declared in registered modules
//! - the auth middleware in front of protected routes

pub mod builder;
pub mod entity_registry;
pub mod state;

pub use builder::{ServerBuilder, require_auth};
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use state::AppState;
