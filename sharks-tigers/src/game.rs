use crate::board::{Board, Mark};
use crate::clock::Clock;
use crate::error::{GameError, Result};
use crate::event::GameEvent;
use crate::types::Amount;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Lifecycle of a wagered match. Only ever advances:
/// Open -> Active -> Ended, or Open -> Ended on unjoined expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Open,
    Active,
    Ended,
}

/// One wagered match. Owns its board, players, marks, escrowed balances
/// and lifecycle state; created only through the factory.
pub struct Game {
    id: u64,
    wager: Amount,
    play_clock: Duration,
    expires_at: Option<DateTime<Utc>>,
    last_move_at: Option<DateTime<Utc>>,
    player_one: Uuid,
    player_two: Option<Uuid>,
    player_one_mark: Mark,
    player_two_mark: Mark,
    board: Board,
    current_player: Option<Uuid>,
    winner: Option<Uuid>,
    is_draw: bool,
    is_reward_claimed: bool,
    balances: HashMap<Uuid, Amount>,
    state: GameState,
    clock: Arc<dyn Clock>,
    events: Vec<GameEvent>,
}

impl Game {
    /// Build a new Open game with the creator's first move applied and the
    /// creator's stake escrowed. Argument validation beyond board placement
    /// is the factory's job.
    pub(crate) fn create(
        id: u64,
        creator: Uuid,
        position: usize,
        creator_mark: Mark,
        play_clock: Duration,
        expires_at: Option<DateTime<Utc>>,
        wager: Amount,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let mut board = Board::new();
        board.place(position, creator_mark)?;

        let mut balances = HashMap::new();
        balances.insert(creator, wager);

        let events = vec![GameEvent::GameCreated {
            game_id: id,
            player_one: creator,
            player_one_mark: creator_mark,
            position,
            play_clock_secs: play_clock.num_seconds(),
            expires_at,
            wager,
        }];

        Ok(Self {
            id,
            wager,
            play_clock,
            expires_at,
            last_move_at: None,
            player_one: creator,
            player_two: None,
            player_one_mark: creator_mark,
            player_two_mark: creator_mark.other(),
            board,
            current_player: None,
            winner: None,
            is_draw: false,
            is_reward_claimed: false,
            balances,
            state: GameState::Open,
            clock,
            events,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn wager(&self) -> Amount {
        self.wager
    }

    pub fn play_clock(&self) -> Duration {
        self.play_clock
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn last_move_at(&self) -> Option<DateTime<Utc>> {
        self.last_move_at
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn player_one(&self) -> Uuid {
        self.player_one
    }

    pub fn player_two(&self) -> Option<Uuid> {
        self.player_two
    }

    pub fn player_one_mark(&self) -> Mark {
        self.player_one_mark
    }

    pub fn player_two_mark(&self) -> Mark {
        self.player_two_mark
    }

    pub fn current_player(&self) -> Option<Uuid> {
        self.current_player
    }

    pub fn winner(&self) -> Option<Uuid> {
        self.winner
    }

    pub fn is_draw(&self) -> bool {
        self.is_draw
    }

    pub fn is_reward_claimed(&self) -> bool {
        self.is_reward_claimed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Escrowed amount currently owed to `player`.
    pub fn balance_of(&self, player: Uuid) -> Amount {
        self.balances.get(&player).copied().unwrap_or(Amount::ZERO)
    }

    /// Sum of all escrowed balances held by this game.
    pub fn total_escrowed(&self) -> Amount {
        self.balances.values().copied().sum()
    }

    /// Ordered audit trail of everything that happened to this game.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Join an Open game as the second player, escrowing a matching stake.
    /// Starts the play clock and hands the first turn to the creator.
    pub fn join_game(&mut self, caller: Uuid, position: usize, paid: Amount) -> Result<()> {
        if self.state != GameState::Open {
            return Err(GameError::NotOpen);
        }
        if let Some(deadline) = self.expires_at {
            if self.clock.now() > deadline {
                return Err(GameError::Expired);
            }
        }
        if paid != self.wager {
            return Err(GameError::WrongWager {
                expected: self.wager,
                paid,
            });
        }
        self.board.place(position, self.player_two_mark)?;

        let now = self.clock.now();
        self.player_two = Some(caller);
        *self.balances.entry(caller).or_insert(Amount::ZERO) += paid;
        self.current_player = Some(self.player_one);
        self.last_move_at = Some(now);
        self.state = GameState::Active;

        self.events.push(GameEvent::PlayerTwoJoined {
            game_id: self.id,
            player_two: caller,
            player_two_mark: self.player_two_mark,
            position,
            play_clock_secs: self.play_clock.num_seconds(),
            wager: self.wager,
        });

        tracing::info!("Player {} joined game {}", caller, self.id);
        Ok(())
    }

    /// Place the caller's mark. Ends the game on a completed line or a full
    /// board, otherwise passes the turn and restarts the play clock.
    pub fn make_move(&mut self, caller: Uuid, position: usize) -> Result<()> {
        if self.state != GameState::Active {
            return Err(GameError::NotActive);
        }
        if Some(caller) != self.current_player {
            return Err(GameError::NotYourTurn);
        }
        self.board.check(position)?;

        let now = self.clock.now();
        if self.play_clock_lapsed(now) {
            // The move is rejected outright; settlement on timeout happens
            // only through the opponent's claim_reward.
            return Err(GameError::TimeExpired);
        }

        let player_two = self.player_two.ok_or(GameError::NotActive)?;
        let mark = if caller == self.player_one {
            self.player_one_mark
        } else {
            self.player_two_mark
        };
        self.board.place(position, mark)?;

        self.events.push(GameEvent::MoveMade {
            game_id: self.id,
            player_one: self.player_one,
            player_two,
            player_one_mark: self.player_one_mark,
            player_two_mark: self.player_two_mark,
            player: caller,
            position,
            play_clock_secs: self.play_clock.num_seconds(),
            played_at: now,
            wager: self.wager,
        });

        if self.board.winning_mark().is_some() {
            self.winner = Some(caller);
            self.state = GameState::Ended;
            self.push_game_ended(Amount::ZERO);
            tracing::info!("Game {} won by {}", self.id, caller);
        } else if self.board.is_full() {
            self.is_draw = true;
            self.state = GameState::Ended;
            self.push_game_ended(Amount::ZERO);
            tracing::info!("Game {} ended in a draw", self.id);
        } else {
            self.current_player = Some(if caller == self.player_one {
                player_two
            } else {
                self.player_one
            });
            self.last_move_at = Some(now);
        }

        Ok(())
    }

    /// Pay the winner both stakes, exactly once.
    ///
    /// Also the forfeiture path: while the game is Active and the play clock
    /// has lapsed, the waiting player may claim, which declares the
    /// delinquent player's opponent the winner before paying out.
    pub fn claim_reward(&mut self, caller: Uuid) -> Result<Amount> {
        match self.state {
            GameState::Ended => self.settle_claim(caller),
            GameState::Active => {
                let now = self.clock.now();
                if !self.play_clock_lapsed(now) {
                    return Err(GameError::NotEnded);
                }
                let delinquent = self.current_player.ok_or(GameError::NotEnded)?;
                if caller == delinquent {
                    return Err(GameError::NotWinner);
                }
                let player_two = self.player_two.ok_or(GameError::NotEnded)?;
                let opponent = if delinquent == self.player_one {
                    player_two
                } else {
                    self.player_one
                };
                if caller != opponent {
                    return Err(GameError::NotWinner);
                }

                self.winner = Some(opponent);
                self.state = GameState::Ended;
                tracing::warn!(
                    "Game {}: play clock lapsed, {} forfeits to {}",
                    self.id,
                    delinquent,
                    opponent
                );

                self.settle_claim(caller)
            }
            GameState::Open => Err(GameError::NotEnded),
        }
    }

    /// Winner payout on an Ended game. Drains both balances to the caller.
    fn settle_claim(&mut self, caller: Uuid) -> Result<Amount> {
        if self.is_draw {
            return Err(GameError::NoWinnerDraw);
        }
        let winner = self.winner.ok_or(GameError::NotEnded)?;
        if caller != winner {
            return Err(GameError::NotWinner);
        }
        if self.is_reward_claimed {
            return Err(GameError::AlreadyClaimed);
        }

        let payout = self.total_escrowed();
        for balance in self.balances.values_mut() {
            *balance = Amount::ZERO;
        }
        self.is_reward_claimed = true;
        self.push_game_ended(payout);

        tracing::info!("Game {}: {} claimed reward of {}", self.id, caller, payout);
        Ok(payout)
    }

    /// Refund the caller's own stake: a draw refund on an Ended game, or the
    /// creator reclaiming an unjoined game past its expiration deadline
    /// (which transitions Open -> Ended with no winner and no draw).
    pub fn withdraw_wager(&mut self, caller: Uuid) -> Result<Amount> {
        let via_expiry = match self.state {
            GameState::Ended => false,
            GameState::Open => match self.expires_at {
                Some(deadline) if self.clock.now() > deadline => true,
                _ => return Err(GameError::NotEnded),
            },
            GameState::Active => return Err(GameError::NotEnded),
        };

        if self.winner.is_some() {
            return Err(GameError::WinnerMustClaim);
        }

        let refund = self.balance_of(caller);
        if refund.is_zero() {
            return Err(GameError::NothingToWithdraw);
        }
        if let Some(balance) = self.balances.get_mut(&caller) {
            *balance = Amount::ZERO;
        }

        if via_expiry {
            self.state = GameState::Ended;
            self.push_game_ended(refund);
            tracing::info!(
                "Game {} expired unjoined; {} reclaimed {}",
                self.id,
                caller,
                refund
            );
        } else {
            tracing::info!("Game {}: draw refund of {} to {}", self.id, refund, caller);
        }

        Ok(refund)
    }

    /// Read-only full snapshot of the game. No side effects.
    pub fn info(&self) -> GameInfo {
        GameInfo {
            id: self.id,
            wager: self.wager,
            play_clock_secs: self.play_clock.num_seconds(),
            expires_at: self.expires_at,
            last_move_at: self.last_move_at,
            player_one: self.player_one,
            player_two: self.player_two,
            player_one_mark: self.player_one_mark,
            player_two_mark: self.player_two_mark,
            current_player: self.current_player,
            winner: self.winner,
            is_draw: self.is_draw,
            is_reward_claimed: self.is_reward_claimed,
            state: self.state,
            board: self.board,
        }
    }

    fn play_clock_lapsed(&self, now: DateTime<Utc>) -> bool {
        match self.last_move_at {
            Some(last) => now.signed_duration_since(last) > self.play_clock,
            None => false,
        }
    }

    fn push_game_ended(&mut self, payout: Amount) {
        self.events.push(GameEvent::GameEnded {
            game_id: self.id,
            player_one: self.player_one,
            player_two: self.player_two,
            wager: self.wager,
            winner: self.winner,
            is_draw: self.is_draw,
            payout,
        });
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("wager", &self.wager)
            .field("player_one", &self.player_one)
            .field("player_two", &self.player_two)
            .field("current_player", &self.current_player)
            .field("winner", &self.winner)
            .field("is_draw", &self.is_draw)
            .field("is_reward_claimed", &self.is_reward_claimed)
            .finish()
    }
}

/// Full snapshot of a game, also the persisted per-game record shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub id: u64,
    pub wager: Amount,
    pub play_clock_secs: i64,
    pub expires_at: Option<DateTime<Utc>>,
    pub last_move_at: Option<DateTime<Utc>>,
    pub player_one: Uuid,
    pub player_two: Option<Uuid>,
    pub player_one_mark: Mark,
    pub player_two_mark: Mark,
    pub current_player: Option<Uuid>,
    pub winner: Option<Uuid>,
    pub is_draw: bool,
    pub is_reward_claimed: bool,
    pub state: GameState,
    pub board: Board,
}
