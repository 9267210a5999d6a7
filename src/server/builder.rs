//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::EntityRegistry;
use super::state::AppState;
use crate::core::auth::{AuthProvider, NoAuthProvider, token_from_headers};
use crate::core::error::ServiceError;
use crate::core::module::Module;
use crate::storage::Repository;
use anyhow::Result;
use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

const SERVICE_NAME: &str = "restaurant";

/// Builder for creating the HTTP application with auto-registered routes
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_repository(repository)
///     .with_auth_provider(JwtAuthProvider::new(settings))
///     .register_module(RestaurantModule)?
///     .build()?;
/// ```
pub struct ServerBuilder {
    repository: Option<Repository>,
    auth: Arc<dyn AuthProvider>,
    default_page_size: u64,
    entity_registry: EntityRegistry,
    modules: Vec<Arc<dyn Module>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            repository: None,
            auth: Arc::new(NoAuthProvider),
            default_page_size: 10,
            entity_registry: EntityRegistry::new(),
            modules: Vec::new(),
        }
    }

    /// Set the store capability (required)
    pub fn with_repository(mut self, repository: Repository) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set the auth provider (defaults to [`NoAuthProvider`])
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth = Arc::new(provider);
        self
    }

    /// Page size for listings that do not specify one
    pub fn with_default_page_size(mut self, page_size: u64) -> Self {
        self.default_page_size = page_size.max(1);
        self
    }

    /// Register a module and all of its entities
    pub fn register_module(mut self, module: impl Module + 'static) -> Result<Self> {
        let module = Arc::new(module);
        if self.modules.iter().any(|m| m.name() == module.name()) {
            anyhow::bail!("Module '{}' is already registered", module.name());
        }

        module.register_entities(&mut self.entity_registry);
        tracing::debug!(
            module = module.name(),
            version = module.version(),
            entities = ?module.entity_types(),
            "registered module"
        );

        self.modules.push(module);
        Ok(self)
    }

    /// Build the final router
    ///
    /// Entity routes run behind [`require_auth`]; health and entity public
    /// routes do not.
    pub fn build(self) -> Result<Router> {
        let repository = self
            .repository
            .ok_or_else(|| anyhow::anyhow!("Repository is required. Call .with_repository()"))?;

        let state = AppState {
            repository,
            auth: self.auth,
            default_page_size: self.default_page_size,
        };

        let mut protected = self.entity_registry.build_routes();
        if !self.entity_registry.is_empty() {
            protected =
                protected.route_layer(middleware::from_fn_with_state(state.clone(), require_auth));
        }

        let app = health_routes(SERVICE_NAME)
            .merge(self.entity_registry.build_public_routes())
            .merge(protected);

        Ok(app
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(state))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn health_routes(service: &'static str) -> Router<AppState> {
    let health = move || async move { Json(health_body(service)) };

    Router::new()
        .route("/", get(health.clone()))
        .route("/health", get(health))
}

/// Middleware resolving the caller through the configured [`AuthProvider`]
///
/// On success the [`AuthContext`](crate::core::auth::AuthContext) is stored in
/// the request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let token = token_from_headers(request.headers()).map(str::to_owned);
    let context = state.auth.authenticate(token.as_deref()).await?;

    tracing::trace!(user_id = ?context.user_id(), path = %request.uri().path(), "authenticated");
    request.extensions_mut().insert(context);

    Ok(next.run(request).await)
}

/// JSON body returned by the health routes
pub fn health_body(service: &str) -> Value {
    json!({ "status": "ok", "service": service })
}

/// Signal handler for graceful shutdown
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
