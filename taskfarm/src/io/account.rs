//! Account, farming and game endpoints.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

use crate::io::error::GatewayError;
use crate::io::gateway::HttpGateway;
use crate::io::http::RawResponse;

/// Balance snapshot returned by `user/balance`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    #[serde(default)]
    pub available_balance: String,
    #[serde(default)]
    pub play_passes: u32,
    #[serde(default)]
    pub is_fast_farming_enabled: bool,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub farming: Option<FarmingSession>,
}

/// Current farming cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmingSession {
    #[serde(default)]
    pub start_time: i64,
    #[serde(default)]
    pub end_time: i64,
    #[serde(default)]
    pub earnings_rate: String,
    #[serde(default)]
    pub balance: String,
}

/// Remote operations used by the farming and game routines.
pub trait AccountGateway {
    fn username(&self) -> Result<String, GatewayError>;
    fn balance(&self) -> Result<Balance, GatewayError>;
    /// Claim the finished farming cycle; returns the service's message.
    fn claim_farming(&self) -> Result<String, GatewayError>;
    fn start_farming(&self) -> Result<FarmingSession, GatewayError>;
    /// Claim the daily check-in reward; returns the service's message.
    fn claim_daily_reward(&self) -> Result<String, GatewayError>;
    /// Begin a game round; returns its id.
    fn start_game(&self) -> Result<String, GatewayError>;
    /// Submit the points for a finished round; returns the service's reply.
    fn claim_game(&self, game_id: &str, points: u32) -> Result<String, GatewayError>;
}

#[derive(Debug, Deserialize)]
struct UserBody {
    username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GamePlayBody {
    game_id: String,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

impl HttpGateway {
    fn game_url(&self, suffix: &str) -> String {
        format!(
            "{}/{}",
            self.api().game_base_url.trim_end_matches('/'),
            suffix
        )
    }
}

impl AccountGateway for HttpGateway {
    #[instrument(skip(self))]
    fn username(&self) -> Result<String, GatewayError> {
        let response = self.client().get(&self.api().user_url)?.require_success()?;
        let user: UserBody = response.json("user profile")?;
        Ok(user.username)
    }

    #[instrument(skip(self))]
    fn balance(&self) -> Result<Balance, GatewayError> {
        let response = self
            .client()
            .get(&self.game_url("user/balance"))?
            .require_success()?;
        response.json("balance")
    }

    #[instrument(skip(self))]
    fn claim_farming(&self) -> Result<String, GatewayError> {
        let response = self.client().post(&self.game_url("farming/claim"), None)?;
        message_of(response)
    }

    #[instrument(skip(self))]
    fn start_farming(&self) -> Result<FarmingSession, GatewayError> {
        let response = self
            .client()
            .post(&self.game_url("farming/start"), None)?
            .require_success()?;
        response.json("farming session")
    }

    #[instrument(skip(self))]
    fn claim_daily_reward(&self) -> Result<String, GatewayError> {
        let response = self
            .client()
            .post(&self.game_url("daily-reward?offset=-420"), None)?;
        message_of(response)
    }

    #[instrument(skip(self))]
    fn start_game(&self) -> Result<String, GatewayError> {
        let response = self
            .client()
            .post(&self.game_url("game/play"), None)?
            .require_success()?;
        let body: GamePlayBody = response.json("game play")?;
        Ok(body.game_id)
    }

    #[instrument(skip(self))]
    fn claim_game(&self, game_id: &str, points: u32) -> Result<String, GatewayError> {
        let payload = json!({ "gameId": game_id, "points": points });
        let response = self
            .client()
            .post(&self.game_url("game/claim"), Some(&payload))?
            .require_success()?;
        Ok(response.body.trim().to_string())
    }
}

/// Extract the human-readable message from a farming/daily response.
///
/// These endpoints report refusals ("It's too early to claim") as 4xx with a
/// `message` body, and success as either a message or a bare `OK`.
fn message_of(response: RawResponse) -> Result<String, GatewayError> {
    if response.is_unauthorized() || !(response.is_success() || response.is_client_error()) {
        return Err(response.into_error());
    }
    if let Ok(body) = serde_json::from_str::<MessageBody>(&response.body) {
        return Ok(body.message);
    }
    let text = response.body.trim();
    if response.is_success() {
        debug!(body = text, "plain-text reply");
        let message = if text.is_empty() { "OK" } else { text };
        return Ok(message.to_string());
    }
    Err(response.into_error())
}
