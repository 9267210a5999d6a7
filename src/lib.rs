//! # restaurant
//!
//! Back-office service for a restaurant: menus, foods, tables, orders,
//! order items, invoices and users, served as a JSON HTTP API over a
//! document store.
//!
//! ## Layout
//!
//! - [`core`]: errors, auth providers, validation, pagination, money rounding
//! - [`storage`]: the [`DocumentStore`](storage::DocumentStore) adapter and its
//!   backends, wrapped by the timeout-bounded [`Repository`](storage::Repository)
//! - [`entities`]: one module per entity, plus the order-item join pipeline
//!   and the invoice view built on it
//! - [`server`]: router assembly, auth middleware, graceful shutdown
//! - [`config`]: YAML and environment configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restaurant::prelude::*;
//!
//! let repository = Repository::new(Arc::new(InMemoryStore::new()), StoreTimeouts::default());
//! let app = ServerBuilder::new()
//!     .with_repository(repository)
//!     .with_auth_provider(JwtAuthProvider::new(settings))
//!     .register_module(RestaurantModule)?
//!     .build()?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthContext, AuthProvider, JwtAuthProvider, JwtSettings, NoAuthProvider, TokenPair},
        entity::Document,
        error::{ServiceError, ServiceResult},
        module::Module,
        query::{PaginatedResponse, QueryParams},
        validation::{EntityValidationConfig, ValidatableEntity, Validated},
    };

    // === Macros ===
    pub use crate::impl_document;

    // === Entities ===
    pub use crate::entities::RestaurantModule;
    pub use crate::entities::invoice::{InvoiceView, build_invoice_view};
    pub use crate::entities::order_item::{OrderGroup, OrderRow, items_by_order};

    // === Storage ===
    pub use crate::storage::{DocumentStore, Filter, InMemoryStore, Repository, StoreTimeouts};
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
