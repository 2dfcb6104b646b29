//! Session acquisition from a mini-app launch query.

use std::fmt;

use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::io::config::ApiConfig;
use crate::io::error::GatewayError;
use crate::io::http::{ApiClient, RawResponse};

/// Authenticated session. Read-only once acquired.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    bearer: String,
}

impl Session {
    pub fn from_access_token(access: &str) -> Self {
        Self {
            bearer: format!("Bearer {access}"),
        }
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> &str {
        &self.bearer
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("bearer", &"<redacted>").finish()
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: TokenBody,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    access: String,
}

/// Exchange the launch query for a bearer session.
#[instrument(skip_all)]
pub fn authenticate(
    client: &ApiClient,
    api: &ApiConfig,
    query_id: &str,
) -> Result<Session, GatewayError> {
    let payload = json!({
        "query": query_id,
        "referralToken": api.referral_token,
    });
    let response = client.post(&api.auth_url, Some(&payload))?.require_success()?;
    let session = decode_session(&response)?;
    info!("session acquired");
    Ok(session)
}

fn decode_session(response: &RawResponse) -> Result<Session, GatewayError> {
    let token: TokenResponse = response.json("auth token")?;
    Ok(Session::from_access_token(&token.token.access))
}
