use serde::{Deserialize, Serialize};

/// Body of `POST /auth/signup`. The confirmation field never leaves the client.
#[derive(Debug, Serialize)]
pub struct SignupIn {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SignupOut {
    #[serde(default)]
    pub message: Option<String>,
}
