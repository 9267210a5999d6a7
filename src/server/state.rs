//! Shared application state handed to every handler

use crate::core::auth::AuthProvider;
use crate::storage::Repository;
use std::sync::Arc;

/// State shared by all routes
#[derive(Clone)]
pub struct AppState {
    /// Store capability, bounded by the configured timeouts
    pub repository: Repository,

    /// Verifies request tokens and issues new ones
    pub auth: Arc<dyn AuthProvider>,

    /// Page size used when a listing request does not give one
    pub default_page_size: u64,
}
