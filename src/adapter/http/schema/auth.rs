use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// `picture` serializes as an explicit `null` when absent; the dashboard
/// client distinguishes "no avatar" from a missing field.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct LoginQuery {
    /// Relative path to land on after login; defaults to the dashboard.
    pub return_to: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CallbackQuery {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
}
