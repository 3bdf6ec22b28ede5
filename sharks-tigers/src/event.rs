use crate::board::Mark;
use crate::types::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Audit-trail record appended by each successful mutating operation.
///
/// Events are the game's only history store: each carries the snapshot
/// fields an observer needs to reconstruct what happened without querying
/// state afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameCreated {
        game_id: u64,
        player_one: Uuid,
        player_one_mark: Mark,
        position: usize,
        play_clock_secs: i64,
        expires_at: Option<DateTime<Utc>>,
        wager: Amount,
    },
    PlayerTwoJoined {
        game_id: u64,
        player_two: Uuid,
        player_two_mark: Mark,
        position: usize,
        play_clock_secs: i64,
        wager: Amount,
    },
    MoveMade {
        game_id: u64,
        player_one: Uuid,
        player_two: Uuid,
        player_one_mark: Mark,
        player_two_mark: Mark,
        player: Uuid,
        position: usize,
        play_clock_secs: i64,
        played_at: DateTime<Utc>,
        wager: Amount,
    },
    /// Emitted when a game reaches Ended (win, draw, forfeiture or unjoined
    /// expiry) and again as the settlement record of a successful claim.
    GameEnded {
        game_id: u64,
        player_one: Uuid,
        player_two: Option<Uuid>,
        wager: Amount,
        winner: Option<Uuid>,
        is_draw: bool,
        payout: Amount,
    },
}
