use crate::core::auth::TokenSubject;
use crate::core::validation::{EntityValidationConfig, ValidatableEntity, filters, validators};
use crate::impl_document;
use serde::{Deserialize, Serialize};

impl_document!(
    User,
    collection = "user",
    entity_type = "user",
    key = user_id,
    {
        first_name: String,
        last_name: String,
        /// Argon2 PHC string, never the plain password
        password: String,
        email: String,
        #[serde(default)]
        avatar: Option<String>,
        phone: String,
        #[serde(default)]
        token: Option<String>,
        #[serde(default)]
        refresh_token: Option<String>,
    }
);

impl User {
    pub fn subject(&self) -> TokenSubject {
        TokenSubject {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// User as returned to clients; credentials and tokens stay server side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserView {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub phone: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            avatar: user.avatar,
            phone: user.phone,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Body returned by signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserView,
    pub token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    pub phone: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl ValidatableEntity for SignupRequest {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        EntityValidationConfig::new(operation)
            .filter("first_name", filters::trim())
            .validate("first_name", validators::required())
            .validate("first_name", validators::string_length(2, 100))
            .filter("last_name", filters::trim())
            .validate("last_name", validators::required())
            .validate("last_name", validators::string_length(2, 100))
            .filter("email", filters::trim())
            .filter("email", filters::lowercase())
            .validate("email", validators::required())
            .validate("email", validators::email())
            .validate("password", validators::required())
            .validate("password", validators::string_length(6, 128))
            .filter("phone", filters::trim())
            .validate("phone", validators::required())
            .validate("phone", validators::phone())
            .filter("avatar", filters::trim())
    }
}

impl ValidatableEntity for LoginRequest {
    fn validation_config(operation: &str) -> EntityValidationConfig {
        EntityValidationConfig::new(operation)
            .filter("email", filters::trim())
            .filter("email", filters::lowercase())
            .validate("email", validators::required())
            .validate("password", validators::required())
    }
}
