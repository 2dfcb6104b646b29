//! Farming cycle: reward claims and farming restart.

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::io::account::{AccountGateway, Balance, FarmingSession};

/// Farm-claim reply meaning no farming cycle is running.
pub const NEED_TO_START_FARM: &str = "Need to start farm";

/// What a farming cycle observed and did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FarmSummary {
    pub username: String,
    /// Balance read before any claim.
    pub balance: Balance,
    pub farm_claim: String,
    pub daily_reward: String,
    /// New farming session, when one had to be started.
    pub restarted: Option<FarmingSession>,
}

/// Claim the farming and daily rewards, restarting farming when idle.
#[instrument(skip_all)]
pub fn run_farm_cycle<A: AccountGateway + ?Sized>(account: &A) -> Result<FarmSummary> {
    let username = account.username().context("fetch username")?;
    let balance = account.balance().context("fetch balance")?;
    let farm_claim = account.claim_farming().context("claim farm reward")?;
    let daily_reward = account
        .claim_daily_reward()
        .context("claim daily reward")?;

    let restarted = if farm_claim == NEED_TO_START_FARM {
        let session = account.start_farming().context("start farming session")?;
        info!(balance = %session.balance, "farming session started");
        Some(session)
    } else {
        None
    };

    Ok(FarmSummary {
        username,
        balance,
        farm_claim,
        daily_reward,
        restarted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedAccount;

    #[test]
    fn restarts_farming_when_idle() {
        let mut account = ScriptedAccount::new(0);
        account.farm_claim_message = NEED_TO_START_FARM.to_string();

        let summary = run_farm_cycle(&account).expect("farm");
        assert!(summary.restarted.is_some());
        assert!(*account.farming_started.borrow());
    }

    #[test]
    fn leaves_running_farm_alone() {
        let mut account = ScriptedAccount::new(0);
        account.farm_claim_message = "It's too early to claim".to_string();

        let summary = run_farm_cycle(&account).expect("farm");
        assert_eq!(summary.username, "farmer");
        assert_eq!(summary.farm_claim, "It's too early to claim");
        assert!(summary.restarted.is_none());
        assert!(!*account.farming_started.borrow());
    }
}
