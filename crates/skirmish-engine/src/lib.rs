//! Rules engine for a grid tactics game in the chess family.
//!
//! This crate provides:
//! - [`Board`] - tiles, turn order, leadership and the turn state machine
//! - [`Tile`] and [`Piece`] - the board contents
//! - [`Action`] - the rule abstraction, with the built-in rule set in [`rules`]
//! - [`Outcome`] - the state changes rules offer, realized through the board
//! - [`Bot`] - the contract for automated players
//!
//! # Example
//!
//! ```
//! use skirmish_engine::{legal_decisions, Board, TurnState};
//! use skirmish_core::Faction;
//!
//! let mut board = Board::standard().unwrap();
//! let decision = legal_decisions(&board, Faction::White).remove(0);
//! let state = board.realize(&decision.outcome).unwrap();
//! assert_eq!(state, TurnState::Turn(Faction::Black));
//! ```

mod action;
mod board;
mod driver;
mod error;
mod outcome;
mod piece;
pub mod rules;
mod tile;

pub use action::{Action, OutcomeSink};
pub use board::{Board, Check, GameStatus, TurnState};
pub use driver::{legal_decisions, Bot, Decision};
pub use error::EngineError;
pub use outcome::{Effect, Outcome, OutcomeKind, Outcomes, PieceRef};
pub use piece::{orient_vector, LineCast, LineHit, Piece, PieceId};
pub use tile::Tile;
