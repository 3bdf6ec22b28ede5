//! Sharks vs Tigers: wager-escrowing two-player tic-tac-toe.
//!
//! A [`GameFactory`] creates independent [`Game`] instances. Each instance
//! escrows both players' stakes, enforces turn order and a per-move play
//! clock, detects wins and draws on the 3x3 board, and settles the escrow
//! exactly once through [`Game::claim_reward`] (winner payout, including
//! forfeiture when the player on the clock fails to move) or
//! [`Game::withdraw_wager`] (draw refund, or the creator reclaiming an
//! unjoined game past its join deadline).
//!
//! Time never comes from the environment: the factory is built around a
//! [`Clock`] shared by all of its games, so play-clock and expiration
//! behavior is deterministic under test via [`ManualClock`].

pub mod board;
pub mod clock;
pub mod error;
pub mod event;
pub mod factory;
pub mod game;
pub mod types;

pub use board::{Board, Mark, BOARD_CELLS};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{GameError, Result};
pub use event::GameEvent;
pub use factory::{GameFactory, GameHandle};
pub use game::{Game, GameInfo, GameState};
pub use types::Amount;
