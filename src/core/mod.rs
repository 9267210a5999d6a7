//! Core module containing the cross-cutting types of the service

pub mod auth;
pub mod entity;
pub mod error;
pub mod module;
pub mod money;
pub mod query;
pub mod validation;

pub use auth::{AuthContext, AuthProvider, JwtAuthProvider, NoAuthProvider, TokenPair};
pub use entity::Document;
pub use error::{ServiceError, ServiceResult};
pub use module::Module;
pub use money::round_to;
pub use query::{PaginatedResponse, QueryParams, Window, paginate};
