use crate::board::{Mark, BOARD_CELLS};
use crate::clock::{Clock, SystemClock};
use crate::error::{GameError, Result};
use crate::game::Game;
use crate::types::Amount;
use chrono::{DateTime, Duration, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Shared handle to one game. Mutating calls serialize on the lock, so each
/// call is all-or-nothing with respect to the instance's state.
pub type GameHandle = Arc<Mutex<Game>>;

/// Creates games, assigns monotonically increasing ids, and keeps the
/// id-to-game registry. Holds no other per-game state.
pub struct GameFactory {
    clock: Arc<dyn Clock>,
    game_count: AtomicU64,
    games: RwLock<HashMap<u64, GameHandle>>,
}

impl GameFactory {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Build a factory around an injected clock; every game it creates
    /// shares that clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            game_count: AtomicU64::new(0),
            games: RwLock::new(HashMap::new()),
        }
    }

    /// Create a new Open game: validates the arguments, applies the
    /// creator's first move, escrows the creator's stake and registers the
    /// game under the next id.
    pub fn create_game(
        &self,
        creator: Uuid,
        position: usize,
        creator_mark: Mark,
        play_clock: Duration,
        expires_at: Option<DateTime<Utc>>,
        wager: Amount,
    ) -> Result<GameHandle> {
        if creator_mark.is_empty() {
            return Err(GameError::InvalidMark);
        }
        if wager.is_zero() {
            return Err(GameError::NoWager);
        }
        if wager > Amount::MAX_WAGER {
            return Err(GameError::ExcessiveWager);
        }
        if position >= BOARD_CELLS {
            return Err(GameError::PositionOutOfRange(position));
        }
        if play_clock <= Duration::zero() {
            return Err(GameError::InvalidClock);
        }
        if let Some(deadline) = expires_at {
            if deadline <= self.clock.now() {
                return Err(GameError::InvalidClock);
            }
        }

        // all checks passed, so the count advances exactly once per game
        let id = self.game_count.fetch_add(1, Ordering::SeqCst) + 1;
        let game = Game::create(
            id,
            creator,
            position,
            creator_mark,
            play_clock,
            expires_at,
            wager,
            Arc::clone(&self.clock),
        )?;
        let handle = Arc::new(Mutex::new(game));
        self.games.write().insert(id, Arc::clone(&handle));

        tracing::info!("Game {} created by {} with wager {}", id, creator, wager);
        Ok(handle)
    }

    /// Number of games created so far. Never decreases.
    pub fn game_count(&self) -> u64 {
        self.game_count.load(Ordering::SeqCst)
    }

    pub fn game(&self, id: u64) -> Option<GameHandle> {
        self.games.read().get(&id).cloned()
    }
}

impl Default for GameFactory {
    fn default() -> Self {
        Self::new()
    }
}
