//! Game rounds paid for with play passes.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{debug, info, instrument};

use crate::io::account::AccountGateway;
use crate::io::config::GameConfig;

#[derive(Debug, Clone)]
pub struct GameOptions {
    pub min_points: u32,
    pub max_points: u32,
    /// A round must last this long before its points are accepted.
    pub round_wait: Duration,
    pub max_rounds: u32,
}

impl From<&GameConfig> for GameOptions {
    fn from(cfg: &GameConfig) -> Self {
        Self {
            min_points: cfg.min_points,
            max_points: cfg.max_points,
            round_wait: Duration::from_secs(cfg.round_wait_secs),
            max_rounds: cfg.max_rounds,
        }
    }
}

/// One finished round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRound {
    pub game_id: String,
    pub points: u32,
    pub reply: String,
}

/// Play as many rounds as passes and `max_rounds` allow.
///
/// Returns an empty list when no play passes are left.
#[instrument(skip_all, fields(max_rounds = options.max_rounds))]
pub fn play_games<A, R>(account: &A, options: &GameOptions, rng: &mut R) -> Result<Vec<GameRound>>
where
    A: AccountGateway + ?Sized,
    R: Rng,
{
    let passes = account.balance().context("fetch balance")?.play_passes;
    let rounds = passes.min(options.max_rounds);
    debug!(passes, rounds, "planning game rounds");

    let mut played = Vec::with_capacity(rounds as usize);
    for _ in 0..rounds {
        let game_id = account.start_game().context("start game round")?;
        let points = rng.gen_range(options.min_points..=options.max_points);
        info!(game_id = %game_id, points, "game round started");
        if !options.round_wait.is_zero() {
            thread::sleep(options.round_wait);
        }
        let reply = account
            .claim_game(&game_id, points)
            .with_context(|| format!("claim game {game_id}"))?;
        played.push(GameRound {
            game_id,
            points,
            reply,
        });
    }
    Ok(played)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedAccount;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn options(max_rounds: u32) -> GameOptions {
        GameOptions {
            min_points: 200,
            max_points: 240,
            round_wait: Duration::ZERO,
            max_rounds,
        }
    }

    #[test]
    fn no_passes_means_no_rounds() {
        let account = ScriptedAccount::new(0);
        let mut rng = StdRng::seed_from_u64(7);
        let rounds = play_games(&account, &options(5), &mut rng).expect("play");
        assert!(rounds.is_empty());
        assert!(account.game_claims.borrow().is_empty());
    }

    #[test]
    fn rounds_are_capped_and_points_in_range() {
        let account = ScriptedAccount::new(4);
        let mut rng = StdRng::seed_from_u64(7);
        let rounds = play_games(&account, &options(2), &mut rng).expect("play");

        assert_eq!(rounds.len(), 2);
        assert_eq!(rounds[0].game_id, "game-1");
        assert_eq!(rounds[1].game_id, "game-2");
        for round in &rounds {
            assert!((200..=240).contains(&round.points));
        }
        assert_eq!(account.game_claims.borrow().len(), 2);
    }
}
