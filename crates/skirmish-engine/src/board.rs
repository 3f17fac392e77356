//! The board: tiles, turn order, leadership and the turn state machine.
//!
//! A [`Board`] owns every tile, and every tile owns its occupant. All state
//! changes go through a handful of primitives ([`Board::move_piece`],
//! [`Board::remove_piece`], [`Board::spawn_piece`]) that keep a piece's
//! recorded position equal to the position of the tile holding it.
//!
//! # Turn flow
//!
//! After every mutation the board recomputes the outcome cache of every piece.
//! A driver picks one cached outcome of the side to move and hands it to
//! [`Board::realize`], which applies it and advances the turn, skipping
//! factions that have nothing to play.

use crate::outcome::{Effect, Outcome, PieceRef};
use crate::{EngineError, Piece, PieceId, Tile};
use skirmish_core::{Faction, GeometryError, PieceKind, Position, StateSnapshot, TileKind};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info};

/// A leader under attack: `attacker` has a capture on `leader`'s tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    pub leader: PieceRef,
    pub attacker: PieceRef,
    pub outcome: Outcome,
}

/// Whose turn it is after a turn transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// The given faction is to move and has at least one outcome.
    Turn(Faction),
    /// No faction in the turn order can act.
    Stalemate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameStatus {
    #[default]
    Ongoing,
    Stalemate,
}

/// The game state.
#[derive(Debug, Clone)]
pub struct Board {
    width: usize,
    height: usize,
    /// Row-major: index `y * width + x`.
    tiles: Vec<Tile>,
    turn_order: Vec<Faction>,
    /// Turns taken or skipped so far.
    turn: u32,
    leadership: BTreeMap<Faction, i32>,
    history: Vec<Outcome>,
    checks: Vec<Check>,
    controlled: BTreeSet<Faction>,
    status: GameStatus,
    next_id: PieceId,
    state_cache: Vec<Option<StateSnapshot>>,
}

impl Board {
    /// Upper bound of every faction's leadership.
    pub const MAX_LEADERSHIP: i32 = 5;

    /// Builds a board from a snapshot and computes the initial outcomes.
    ///
    /// Leadership missing from the snapshot starts at 0; values outside
    /// `[0, MAX_LEADERSHIP]` are clamped.
    pub fn from_snapshot(snapshot: &StateSnapshot) -> Result<Self, EngineError> {
        snapshot.validate()?;
        let width = snapshot.width();
        let height = snapshot.height();
        let turn_order = snapshot.decoded_turn_order()?;

        let mut tiles = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let position = Position::new(x as i32, y as i32);
                let kind = snapshot.tile_at(x, y).unwrap_or_default();
                tiles.push(Tile::new(position, kind));
            }
        }

        let leadership = turn_order
            .iter()
            .map(|faction| {
                let points = snapshot
                    .leadership
                    .get(&(faction.code() as i32))
                    .copied()
                    .unwrap_or(0);
                (*faction, points.clamp(0, Self::MAX_LEADERSHIP))
            })
            .collect();

        let mut board = Board {
            width,
            height,
            tiles,
            turn_order,
            turn: snapshot.turn,
            leadership,
            history: Vec::new(),
            checks: Vec::new(),
            controlled: BTreeSet::new(),
            status: GameStatus::Ongoing,
            next_id: 1,
            state_cache: Vec::new(),
        };

        for y in 0..height {
            for x in 0..width {
                if let Some((kind, faction)) = snapshot.decode_piece(x, y)? {
                    board.spawn_piece(Position::new(x as i32, y as i32), kind, faction)?;
                }
            }
        }

        board.update(false);
        Ok(board)
    }

    /// The standard 8x8 setup.
    pub fn standard() -> Result<Self, EngineError> {
        Self::from_snapshot(&StateSnapshot::standard())
    }

    /// Replaces the whole game state with `snapshot`.
    ///
    /// History is cleared; the controlled factions and the state cache are kept.
    pub fn load_state(&mut self, snapshot: &StateSnapshot) -> Result<(), EngineError> {
        let mut loaded = Self::from_snapshot(snapshot)?;
        loaded.controlled = std::mem::take(&mut self.controlled);
        loaded.state_cache = std::mem::take(&mut self.state_cache);
        *self = loaded;
        Ok(())
    }

    /// Captures the current state as a snapshot.
    pub fn get_state(&self) -> StateSnapshot {
        let rows = |cell: &dyn Fn(&Tile) -> i32| -> Vec<Vec<i32>> {
            self.tiles
                .chunks(self.width)
                .map(|row| row.iter().map(cell).collect())
                .collect()
        };
        StateSnapshot {
            tiles: rows(&|t: &Tile| t.kind().code() as i32),
            pieces: rows(&|t: &Tile| t.piece().map_or(0, |p| p.kind().code() as i32)),
            factions: rows(&|t: &Tile| t.piece().map_or(0, |p| p.faction().code() as i32)),
            turn_order: self.turn_order.iter().map(|f| f.code() as i32).collect(),
            turn: self.turn,
            leadership: self
                .leadership
                .iter()
                .map(|(f, points)| (f.code() as i32, *points))
                .collect(),
        }
    }

    /// Stores the current state in slot `index`, or in a new slot at the end.
    /// Returns the slot used.
    pub fn cache_state(&mut self, index: Option<usize>) -> usize {
        let index = index.unwrap_or(self.state_cache.len());
        if self.state_cache.len() <= index {
            self.state_cache.resize(index + 1, None);
        }
        self.state_cache[index] = Some(self.get_state());
        index
    }

    pub fn cached_state(&self, index: usize) -> Option<&StateSnapshot> {
        self.state_cache.get(index)?.as_ref()
    }

    /// Restores the state stored in slot `index`. Returns false if the slot is empty.
    pub fn load_cached_state(&mut self, index: usize) -> Result<bool, EngineError> {
        let Some(snapshot) = self.cached_state(index).cloned() else {
            debug!(index, "no cached state");
            return Ok(false);
        };
        self.load_state(&snapshot)?;
        Ok(true)
    }

    pub fn clear_cache(&mut self) {
        self.state_cache.clear();
    }

    /// Marks factions as driven by local input rather than bots.
    pub fn with_controlled(mut self, factions: impl IntoIterator<Item = Faction>) -> Self {
        self.controlled = factions.into_iter().collect();
        self
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The longest straight line that fits on the board.
    pub fn extent(&self) -> i32 {
        self.width.max(self.height) as i32
    }

    pub fn turn_order(&self) -> &[Faction] {
        &self.turn_order
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The faction to move.
    pub fn current_turn(&self) -> Faction {
        self.turn_order[self.turn as usize % self.turn_order.len()]
    }

    /// Returns true if the faction to move is driven locally.
    pub fn controlled_turn(&self) -> bool {
        self.controlled.contains(&self.current_turn())
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Realized outcomes, oldest first.
    pub fn history(&self) -> &[Outcome] {
        &self.history
    }

    /// Checks against the faction to move, as of the latest update.
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    fn index(&self, position: Position) -> Option<usize> {
        position
            .in_bounds(self.width, self.height)
            .then(|| position.y as usize * self.width + position.x as usize)
    }

    /// Returns the tile at `position`, or `None` off the board.
    pub fn get_tile(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|i| &self.tiles[i])
    }

    /// Looks up a tile from a raw coordinate list.
    pub fn get_tile_at(&self, coords: &[i32]) -> Result<Option<&Tile>, GeometryError> {
        Ok(self.get_tile(Position::try_from(coords)?))
    }

    /// Returns the tile and occupant at `position`.
    pub fn at_pos(&self, position: Position) -> (Option<&Tile>, Option<&Piece>) {
        let tile = self.get_tile(position);
        (tile, tile.and_then(Tile::piece))
    }

    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.get_tile(position)?.piece()
    }

    /// Every tile, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Every piece, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.tiles.iter().filter_map(Tile::piece)
    }

    pub fn find_piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces().find(|p| p.id() == id)
    }

    pub fn loyal_pieces(&self, faction: Faction) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.faction() == faction)
    }

    pub fn disloyal_pieces(&self, faction: Faction) -> impl Iterator<Item = &Piece> {
        self.pieces().filter(move |p| p.faction() != faction)
    }

    pub fn loyal_leaders(&self, faction: Faction) -> impl Iterator<Item = &Piece> {
        self.loyal_pieces(faction).filter(|p| p.is_leader())
    }

    /// Returns true if any piece of `faction` has an outcome.
    pub fn has_playable(&self, faction: Faction) -> bool {
        self.loyal_pieces(faction).any(|p| !p.outcomes().is_empty())
    }

    pub fn leadership(&self, faction: Faction) -> Result<i32, EngineError> {
        self.leadership
            .get(&faction)
            .copied()
            .ok_or(EngineError::UnknownFaction(faction))
    }

    /// Adds `delta` to a faction's leadership, clamped to `[0, MAX_LEADERSHIP]`.
    pub(crate) fn update_leadership(&mut self, faction: Faction, delta: i32) -> Result<i32, EngineError> {
        let points = self
            .leadership
            .get_mut(&faction)
            .ok_or(EngineError::UnknownFaction(faction))?;
        *points = (*points + delta).clamp(0, Self::MAX_LEADERSHIP);
        Ok(*points)
    }

    /// Scans enemy outcomes for captures on `faction`'s leaders.
    pub fn get_checks(&self, faction: Faction) -> Vec<Check> {
        let leaders: Vec<&Piece> = self.loyal_leaders(faction).collect();
        let mut checks = Vec::new();
        for attacker in self.disloyal_pieces(faction) {
            for leader in &leaders {
                if let Some(outcome) = attacker.outcomes().get(&leader.position()) {
                    if outcome.is_capture() {
                        checks.push(Check {
                            leader: leader.as_ref(),
                            attacker: attacker.as_ref(),
                            outcome: outcome.clone(),
                        });
                    }
                }
            }
        }
        checks
    }

    /// Re-derives the board's dynamic state.
    ///
    /// Applies tile hazards, runs turn hooks when the turn just changed,
    /// recomputes every piece's outcomes and refreshes the checks against
    /// the faction to move.
    pub fn update(&mut self, turn_changed: bool) {
        for tile in &mut self.tiles {
            tile.update();
        }

        if turn_changed {
            let current = self.current_turn();
            for tile in &mut self.tiles {
                if let Some(piece) = tile.piece_mut() {
                    piece.turn_changed(current);
                }
            }
        }

        let computed: Vec<(usize, _)> = self
            .tiles
            .iter()
            .enumerate()
            .filter_map(|(i, tile)| tile.piece().map(|p| (i, p.compute_outcomes(self))))
            .collect();
        for (i, outcomes) in computed {
            if let Some(piece) = self.tiles[i].piece_mut() {
                piece.set_outcomes(outcomes);
            }
        }

        self.checks = self.get_checks(self.current_turn());
    }

    /// Applies an outcome of the faction to move and advances the game.
    ///
    /// The outcome must be one currently cached on its acting piece. If it
    /// ends the turn the next playable faction is found; otherwise the same
    /// faction keeps the turn as long as it has something left to play.
    pub fn realize(&mut self, outcome: &Outcome) -> Result<TurnState, EngineError> {
        if self.status == GameStatus::Stalemate {
            return Err(EngineError::GameOver);
        }
        let current = self.current_turn();
        if outcome.faction() != current {
            return Err(EngineError::OutOfTurn {
                expected: current,
                found: outcome.faction(),
            });
        }
        let actor = outcome.actor();
        let offered = self
            .piece_at(actor.position)
            .filter(|p| p.id() == actor.id)
            .and_then(|p| p.outcomes().get(&outcome.target()))
            .is_some_and(|cached| cached == outcome);
        if !offered {
            return Err(EngineError::StaleOutcome(format!(
                "{outcome} is not among the current outcomes"
            )));
        }

        let end_turn = outcome.realize(self)?;
        self.history.push(outcome.clone());

        if end_turn {
            return Ok(self.next_turn());
        }
        self.clear_outcomes();
        self.update(false);
        if self.has_playable(current) {
            Ok(TurnState::Turn(current))
        } else {
            Ok(self.next_turn())
        }
    }

    /// Gives up the turn without playing.
    pub fn pass(&mut self) -> Result<TurnState, EngineError> {
        if self.status == GameStatus::Stalemate {
            return Err(EngineError::GameOver);
        }
        debug!(faction = %self.current_turn(), "pass");
        Ok(self.next_turn())
    }

    /// Advances to the next faction with something to play.
    ///
    /// Gives up after one full cycle of the turn order, marking the game as a
    /// stalemate.
    pub fn next_turn(&mut self) -> TurnState {
        self.clear_outcomes();
        for _ in 0..self.turn_order.len() {
            self.turn += 1;
            self.update(true);
            let faction = self.current_turn();
            if self.has_playable(faction) {
                debug!(turn = self.turn, %faction, "turn");
                return TurnState::Turn(faction);
            }
            debug!(turn = self.turn, %faction, "nothing to play, skipping");
        }
        info!(turn = self.turn, "stalemate");
        self.status = GameStatus::Stalemate;
        TurnState::Stalemate
    }

    fn clear_outcomes(&mut self) {
        for tile in &mut self.tiles {
            if let Some(piece) = tile.piece_mut() {
                piece.clear_outcomes();
            }
        }
    }

    /// Moves the piece on `from` to `to`, returning whatever stood on `to`.
    ///
    /// Moving a piece onto its own tile captures nothing but still counts as
    /// a move.
    pub(crate) fn move_piece(&mut self, from: Position, to: Position) -> Result<Option<Piece>, EngineError> {
        let source = self.index(from).ok_or(EngineError::OutOfBounds(from))?;
        let target = self.index(to).ok_or(EngineError::OutOfBounds(to))?;
        let mut piece = self.tiles[source]
            .take_piece()
            .ok_or(EngineError::NoPieceAt(from))?;
        let captured = self.tiles[target].take_piece();
        piece.moved_to(to);
        self.tiles[target].put_piece(piece);
        Ok(captured)
    }

    pub(crate) fn remove_piece(&mut self, position: Position) -> Result<Piece, EngineError> {
        let index = self.index(position).ok_or(EngineError::OutOfBounds(position))?;
        self.tiles[index]
            .take_piece()
            .ok_or(EngineError::NoPieceAt(position))
    }

    /// Creates a piece on an empty tile.
    pub(crate) fn spawn_piece(
        &mut self,
        position: Position,
        kind: PieceKind,
        faction: Faction,
    ) -> Result<PieceId, EngineError> {
        if !self.turn_order.contains(&faction) {
            return Err(EngineError::UnknownFaction(faction));
        }
        let index = self.index(position).ok_or(EngineError::OutOfBounds(position))?;
        if !self.tiles[index].is_empty() {
            return Err(EngineError::Occupied(position));
        }
        let id = self.next_id;
        self.next_id += 1;
        self.tiles[index].put_piece(Piece::new(id, kind, faction, position));
        Ok(id)
    }

    /// Applies a per-piece effect to the piece on `position`.
    pub(crate) fn apply_effect(&mut self, position: Position, effect: Effect) -> Result<(), EngineError> {
        if effect == Effect::None {
            return Ok(());
        }
        if effect == Effect::SelfDestruct {
            let piece = self.remove_piece(position)?;
            info!(piece = %piece, at = %position, "self-destructed");
            return Ok(());
        }
        let index = self.index(position).ok_or(EngineError::OutOfBounds(position))?;
        let piece = self.tiles[index]
            .piece_mut()
            .ok_or(EngineError::NoPieceAt(position))?;
        match effect {
            Effect::FlagEnPassant => piece.set_en_passantable(true),
            Effect::EnableLurk => piece.set_lurking(true),
            Effect::DisableLurk => piece.set_lurking(false),
            Effect::JumpCooldown(turns) => {
                piece.set_lurking(false);
                piece.set_jump_timer(turns);
            }
            Effect::None | Effect::SelfDestruct => {}
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    /// Draws the board as text: one row per line, pieces over terrain.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width) {
            let line: Vec<String> = row
                .iter()
                .map(|tile| match tile.piece() {
                    Some(piece) => piece.kind().glyph(piece.faction()).to_string(),
                    None => tile.kind().glyph().to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
