//! Entity descriptor for User

use super::handlers::{get_user, list_users, login, signup};
use crate::server::{AppState, EntityDescriptor};
use axum::{
    Router,
    routing::{get, post},
};

/// Descriptor for the User entity
///
/// Signup and login are the only routes reachable without a token.
pub struct UserDescriptor;

impl EntityDescriptor for UserDescriptor {
    fn entity_type(&self) -> &str {
        "user"
    }

    fn plural(&self) -> &str {
        "users"
    }

    fn build_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/users", get(list_users))
            .route("/users/{user_id}", get(get_user))
    }

    fn public_routes(&self) -> Router<AppState> {
        Router::new()
            .route("/users/signup", post(signup))
            .route("/users/login", post(login))
    }
}
