//! Game execution logic for running bots against each other.
//!
//! This module provides the [`GameRunner`] struct, which drives a [`Board`]
//! from its current state until the game ends, asking each faction's bot for
//! a decision in turn.

use serde::Serialize;
use skirmish_core::{Faction, Position, SnapshotError, StateSnapshot};
use skirmish_engine::{Board, Bot, EngineError, GameStatus, Outcome};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::{ArenaConfig, ConfigError};

/// Errors that can occur while setting up or running a game.
#[derive(Error, Debug)]
pub enum RunError {
    /// The engine rejected a decision or a board mutation failed.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
    /// A state file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A state file held an invalid snapshot.
    #[error("Invalid state: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A single decision, or pass, taken during the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    /// Board turn counter when the decision was taken.
    pub turn: u32,
    pub faction: String,
    /// Name of the bot that decided.
    pub bot: String,
    /// Outcome name ("move", "capture", ...) or "pass".
    pub kind: String,
    /// Acting piece position as `[x, y]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<[i32; 2]>,
    /// Target position as `[x, y]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<[i32; 2]>,
    pub description: String,
}

impl MoveRecord {
    fn played(turn: u32, bot: &str, outcome: &Outcome) -> Self {
        MoveRecord {
            turn,
            faction: outcome.faction().to_string(),
            bot: bot.to_string(),
            kind: outcome.name().to_string(),
            from: Some(coords(outcome.actor().position)),
            to: Some(coords(outcome.target())),
            description: outcome.to_string(),
        }
    }

    fn passed(turn: u32, faction: Faction, bot: &str) -> Self {
        MoveRecord {
            turn,
            faction: faction.to_string(),
            bot: bot.to_string(),
            kind: "pass".to_string(),
            from: None,
            to: None,
            description: format!("{faction} passes"),
        }
    }

    pub fn is_pass(&self) -> bool {
        self.kind == "pass"
    }
}

fn coords(position: Position) -> [i32; 2] {
    [position.x, position.y]
}

/// Why a game stopped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum EndReason {
    /// No faction could act any more.
    Stalemate,
    /// At most one faction still holds pieces. `None` when the board is empty.
    LastStanding { faction: Option<String> },
    /// The configured decision limit was reached.
    TurnLimit { limit: u32 },
}

/// The record of a finished game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    /// Bot name per faction, in turn order.
    pub bots: Vec<(String, String)>,
    pub moves: Vec<MoveRecord>,
    pub end: EndReason,
    /// Board turn counter at the end of the game.
    pub turns: u32,
    pub final_state: StateSnapshot,
}

/// Loads the starting board: the snapshot at `state`, or the standard setup.
pub fn load_board(state: Option<&Path>) -> Result<Board, RunError> {
    match state {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let snapshot = StateSnapshot::from_json(&json)?;
            Ok(Board::from_snapshot(&snapshot)?)
        }
        None => Ok(Board::standard()?),
    }
}

/// Drives a board with one bot per faction.
///
/// Factions without a bot pass whenever their turn comes up.
///
/// # Example
///
/// ```
/// use skirmish_arena::config::ArenaConfig;
/// use skirmish_arena::game_runner::GameRunner;
/// use skirmish_engine::Board;
///
/// let config = ArenaConfig { max_turns: 10, ..Default::default() };
/// let mut runner = GameRunner::from_config(&config, Board::standard().unwrap()).unwrap();
/// let record = runner.play_game().unwrap();
/// assert_eq!(record.moves.len(), 10);
/// ```
pub struct GameRunner {
    board: Board,
    bots: Vec<Box<dyn Bot>>,
    max_turns: u32,
    thinking_delay: Duration,
}

impl GameRunner {
    pub fn new(board: Board, bots: Vec<Box<dyn Bot>>, max_turns: u32) -> Self {
        GameRunner {
            board,
            bots,
            max_turns,
            thinking_delay: Duration::ZERO,
        }
    }

    /// Builds bots for every faction in the board's turn order from `config`.
    pub fn from_config(config: &ArenaConfig, board: Board) -> Result<Self, RunError> {
        let bots = config.build_bots(board.turn_order())?;
        Ok(Self::new(board, bots, config.max_turns)
            .with_thinking_delay(Duration::from_millis(config.thinking_delay_ms)))
    }

    /// Sets the pause taken before each bot decision is committed.
    pub fn with_thinking_delay(mut self, delay: Duration) -> Self {
        self.thinking_delay = delay;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Plays until stalemate, until at most one faction holds pieces, or until
    /// `max_turns` decisions have been taken.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Engine`] if the board rejects a bot's decision.
    pub fn play_game(&mut self) -> Result<GameRecord, RunError> {
        let mut moves: Vec<MoveRecord> = Vec::new();

        let end = loop {
            if let Some(end) = self.game_over() {
                break end;
            }
            if moves.len() as u32 >= self.max_turns {
                break EndReason::TurnLimit {
                    limit: self.max_turns,
                };
            }

            let faction = self.board.current_turn();
            let turn = self.board.turn();
            let bot = self.bots.iter_mut().find(|bot| bot.faction() == faction);
            let (bot_name, decision) = match bot {
                Some(bot) => (bot.name().to_string(), bot.play(&self.board)),
                None => ("none".to_string(), None),
            };

            match decision {
                Some(decision) => {
                    if !self.thinking_delay.is_zero() {
                        std::thread::sleep(self.thinking_delay);
                    }
                    debug!(%faction, bot = %bot_name, outcome = %decision.outcome, "bot decided");
                    self.board.realize(&decision.outcome)?;
                    moves.push(MoveRecord::played(turn, &bot_name, &decision.outcome));
                }
                None => {
                    debug!(%faction, bot = %bot_name, "bot passed");
                    self.board.pass()?;
                    moves.push(MoveRecord::passed(turn, faction, &bot_name));
                }
            }
        };

        info!(?end, decisions = moves.len(), "game finished");
        Ok(GameRecord {
            bots: self
                .bots
                .iter()
                .map(|bot| (bot.faction().to_string(), bot.name().to_string()))
                .collect(),
            moves,
            end,
            turns: self.board.turn(),
            final_state: self.board.get_state(),
        })
    }

    fn game_over(&self) -> Option<EndReason> {
        if self.board.status() == GameStatus::Stalemate {
            return Some(EndReason::Stalemate);
        }
        let holding: BTreeSet<Faction> = self.board.pieces().map(|p| p.faction()).collect();
        if holding.len() <= 1 {
            return Some(EndReason::LastStanding {
                faction: holding.iter().next().map(Faction::to_string),
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_bots::Strategy;
    use skirmish_core::PieceKind;

    fn duel() -> StateSnapshot {
        StateSnapshot::empty(4, 4, &[Faction::White, Faction::Black], 3)
            .with_piece(Position::new(0, 3), PieceKind::Rook, Faction::White)
            .with_piece(Position::new(0, 0), PieceKind::Pawn, Faction::Black)
    }

    #[test]
    fn test_turn_limit_stops_the_game() {
        let config = ArenaConfig {
            max_turns: 6,
            ..Default::default()
        };
        let mut runner = GameRunner::from_config(&config, Board::standard().unwrap()).unwrap();
        let record = runner.play_game().unwrap();

        assert_eq!(record.moves.len(), 6);
        assert_eq!(record.end, EndReason::TurnLimit { limit: 6 });
        assert_eq!(record.final_state, runner.board().get_state());
        assert_eq!(record.bots.len(), 2);
    }

    #[test]
    fn test_capture_ends_with_last_standing() {
        let board = Board::from_snapshot(&duel()).unwrap();
        let bots = vec![
            Strategy::Aggro.build(Faction::White, 0),
            Strategy::Random.build(Faction::Black, 0),
        ];
        let mut runner = GameRunner::new(board, bots, 10);
        let record = runner.play_game().unwrap();

        assert_eq!(
            record.end,
            EndReason::LastStanding {
                faction: Some("White".to_string())
            }
        );
        assert_eq!(record.moves.len(), 1);
        assert_eq!(record.moves[0].kind, "capture");
        assert_eq!(record.moves[0].from, Some([0, 3]));
        assert_eq!(record.moves[0].to, Some([0, 0]));
    }

    #[test]
    fn test_missing_bot_passes() {
        let board = Board::from_snapshot(&duel()).unwrap();
        let bots = vec![Strategy::Random.build(Faction::Black, 0)];
        let mut runner = GameRunner::new(board, bots, 1);
        let record = runner.play_game().unwrap();

        assert_eq!(record.moves.len(), 1);
        assert!(record.moves[0].is_pass());
        assert_eq!(record.moves[0].faction, "White");
        assert_eq!(record.moves[0].bot, "none");
    }

    #[test]
    fn test_stalemate_ends_the_game() {
        // Two pawns blocking each other on a 1x2 board cannot act.
        let snapshot = StateSnapshot::empty(1, 2, &[Faction::White, Faction::Black], 0)
            .with_piece(Position::new(0, 1), PieceKind::Pawn, Faction::White)
            .with_piece(Position::new(0, 0), PieceKind::Pawn, Faction::Black);
        let board = Board::from_snapshot(&snapshot).unwrap();
        let mut runner = GameRunner::from_config(&ArenaConfig::default(), board).unwrap();
        let record = runner.play_game().unwrap();

        assert_eq!(record.end, EndReason::Stalemate);
        assert_eq!(record.moves.len(), 1);
        assert!(record.moves[0].is_pass());
    }

    #[test]
    fn test_same_seed_same_game() {
        let config = ArenaConfig {
            max_turns: 40,
            seed: 17,
            ..Default::default()
        };
        let a = GameRunner::from_config(&config, Board::standard().unwrap())
            .unwrap()
            .play_game()
            .unwrap();
        let b = GameRunner::from_config(&config, Board::standard().unwrap())
            .unwrap()
            .play_game()
            .unwrap();
        assert_eq!(a.moves, b.moves);
        assert_eq!(a.final_state, b.final_state);
    }

    #[test]
    fn test_load_board_defaults_to_standard() {
        let board = load_board(None).unwrap();
        assert_eq!(board.get_state(), StateSnapshot::standard());
    }

    #[test]
    fn test_load_board_reads_snapshot_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duel.json");
        std::fs::write(&path, duel().to_json().unwrap()).unwrap();

        let board = load_board(Some(&path)).unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.pieces().count(), 2);
    }

    #[test]
    fn test_load_board_rejects_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"tiles\": []}").unwrap();

        assert!(matches!(
            load_board(Some(&path)),
            Err(RunError::Snapshot(_))
        ));
    }

    #[test]
    fn test_load_board_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_board(Some(&dir.path().join("absent.json")));
        assert!(matches!(result, Err(RunError::Io(_))));
    }
}
