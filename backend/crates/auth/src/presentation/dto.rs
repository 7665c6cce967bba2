//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::credentials::Credentials;

/// Signup / login request body
///
/// Missing fields decode as empty strings so they fail the "required" rules.
#[derive(Clone, Default, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl From<CredentialsRequest> for Credentials {
    fn from(req: CredentialsRequest) -> Self {
        Credentials {
            email: req.email,
            password: req.password,
        }
    }
}

/// Sign up response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpResponse {
    pub id: i64,
    pub email: String,
}
