use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::User;

/// New operator account. Passwords need at least 8 characters.
#[derive(Deserialize, Debug, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "operator@warehouse.local")]
    pub email: String,
    #[schema(example = "changeme123")]
    pub password: String,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin@warehouse.local")]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    /// Unix seconds.
    pub expires_at: i64,
    pub user_id: i32,
    /// `admin` or `staff`.
    pub role: String,
}

/// JWT payload. `sub` carries the user id used as the audit actor.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub items: Vec<User>,
}
