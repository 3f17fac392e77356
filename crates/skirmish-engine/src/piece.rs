//! Pieces and the line-casting helper every rule is built on.

use crate::action::{Action, OutcomeSink};
use crate::outcome::{Outcomes, PieceRef};
use crate::{rules, Board, Tile};
use skirmish_core::{Faction, PieceKind, Position, Vector};
use std::fmt;

/// Board-unique piece identifier.
pub type PieceId = u32;

/// Ray-cast policy for [`Piece::get_line`].
///
/// The defaults match a plain sliding move: land on empty tiles and enemies,
/// stop at the first obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineCast {
    /// Where the ray starts; `None` means the piece's own position.
    pub start: Option<Position>,
    /// Maximum number of steps.
    pub length: i32,
    /// Record empty tiles.
    pub can_move: bool,
    /// Record tiles holding an enemy.
    pub enemy_ok: bool,
    /// Record tiles holding an ally.
    pub ally_ok: bool,
    /// Continue past an enemy instead of stopping.
    pub jump_enemy: bool,
    /// Continue past an ally instead of stopping.
    pub jump_ally: bool,
    /// Continue past void tiles instead of stopping.
    pub jump_gap: bool,
}

impl LineCast {
    pub const fn new(length: i32) -> Self {
        LineCast {
            start: None,
            length,
            can_move: true,
            enemy_ok: true,
            ally_ok: false,
            jump_enemy: false,
            jump_ally: false,
            jump_gap: false,
        }
    }

    pub const fn start(mut self, start: Position) -> Self {
        self.start = Some(start);
        self
    }

    pub const fn can_move(mut self, can_move: bool) -> Self {
        self.can_move = can_move;
        self
    }

    pub const fn enemy_ok(mut self, enemy_ok: bool) -> Self {
        self.enemy_ok = enemy_ok;
        self
    }

    pub const fn ally_ok(mut self, ally_ok: bool) -> Self {
        self.ally_ok = ally_ok;
        self
    }

    pub const fn jump_enemy(mut self, jump_enemy: bool) -> Self {
        self.jump_enemy = jump_enemy;
        self
    }

    pub const fn jump_ally(mut self, jump_ally: bool) -> Self {
        self.jump_ally = jump_ally;
        self
    }

    pub const fn jump_gap(mut self, jump_gap: bool) -> Self {
        self.jump_gap = jump_gap;
        self
    }
}

/// One tile reached by a line cast.
#[derive(Debug, Clone, Copy)]
pub struct LineHit<'b> {
    pub position: Position,
    pub tile: &'b Tile,
    pub piece: Option<&'b Piece>,
}

/// A faction-owned piece.
///
/// A piece is owned by the tile it stands on; its `position` always equals
/// that tile's position.
#[derive(Debug, Clone)]
pub struct Piece {
    id: PieceId,
    kind: PieceKind,
    faction: Faction,
    facing: Vector,
    position: Position,
    move_count: u32,
    position_history: Vec<Position>,
    move_history: Vec<Vector>,
    en_passantable: bool,
    lurking: bool,
    jump_timer: u8,
    actions: &'static [&'static dyn Action],
    outcomes: Outcomes,
}

impl Piece {
    /// Creates a piece with the rule set of its kind. Facing comes from the faction.
    pub(crate) fn new(id: PieceId, kind: PieceKind, faction: Faction, position: Position) -> Self {
        Piece {
            id,
            kind,
            faction,
            facing: faction.facing(),
            position,
            move_count: 0,
            position_history: vec![position],
            move_history: Vec::new(),
            en_passantable: false,
            lurking: false,
            jump_timer: 0,
            actions: rules::actions_for(kind),
            outcomes: Outcomes::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline]
    pub fn faction(&self) -> Faction {
        self.faction
    }

    #[inline]
    pub fn facing(&self) -> Vector {
        self.facing
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline]
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn position_history(&self) -> &[Position] {
        &self.position_history
    }

    pub fn move_history(&self) -> &[Vector] {
        &self.move_history
    }

    /// True right after a double step, until this faction's next turn starts.
    #[inline]
    pub fn en_passantable(&self) -> bool {
        self.en_passantable
    }

    /// True while a sentry lies in ambush.
    #[inline]
    pub fn is_lurking(&self) -> bool {
        self.lurking
    }

    /// Own turns left before a sentry may jump again.
    #[inline]
    pub fn jump_timer(&self) -> u8 {
        self.jump_timer
    }

    #[inline]
    pub fn is_leader(&self) -> bool {
        self.kind.is_leader()
    }

    pub fn is_ally(&self, other: &Piece) -> bool {
        self.faction == other.faction
    }

    pub fn is_enemy(&self, other: &Piece) -> bool {
        self.faction != other.faction
    }

    /// The rules this piece acts with, in registration order.
    pub fn actions(&self) -> &'static [&'static dyn Action] {
        self.actions
    }

    /// Outcomes computed by the latest board update, keyed by target tile.
    pub fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    /// Reference to this piece as it stands now.
    pub fn as_ref(&self) -> PieceRef {
        PieceRef {
            id: self.id,
            position: self.position,
        }
    }

    /// Runs every rule in order and collects their outcomes.
    ///
    /// Pure: it reads the board and never mutates it, so two calls without an
    /// intervening mutation return equal maps.
    pub fn compute_outcomes(&self, board: &Board) -> Outcomes {
        let budget = board.leadership(self.faction).unwrap_or(0);
        let mut sink = OutcomeSink::new(self.faction, budget);
        for action in self.actions {
            sink.set_action(action.name());
            action.update(self, board, &mut sink);
        }
        sink.into_outcomes()
    }

    /// Maps a vector in this piece's forward/right frame onto the board.
    pub fn orient_vector(&self, vector: Vector) -> Vector {
        orient_vector(vector, self.facing)
    }

    /// Looks up the tile one oriented offset away.
    pub fn at_vec<'b>(
        &self,
        board: &'b Board,
        vector: Vector,
    ) -> (Position, Option<&'b Tile>, Option<&'b Piece>) {
        let position = self.position + self.orient_vector(vector);
        let (tile, piece) = board.at_pos(position);
        (position, tile, piece)
    }

    /// Casts a ray from `cast.start` along the oriented `direction`.
    ///
    /// Hits are returned nearest first. The walk stops on leaving the board,
    /// on a void tile (unless `jump_gap`), on a blocked tile, and on an
    /// occupied tile unless the matching jump flag is set. Occupied tiles are
    /// recorded when the allegiance flag allows; empty tiles are recorded
    /// only with `can_move`, but never stop the walk.
    pub fn get_line<'b>(&self, board: &'b Board, direction: Vector, cast: LineCast) -> Vec<LineHit<'b>> {
        let step = self.orient_vector(direction);
        let mut position = cast.start.unwrap_or(self.position);
        let mut hits = Vec::new();

        for _ in 0..cast.length {
            position += step;
            let Some(tile) = board.get_tile(position) else {
                break;
            };
            if tile.is_void() {
                if cast.jump_gap {
                    continue;
                }
                break;
            }
            if tile.is_blocked() {
                break;
            }
            match tile.piece() {
                Some(other) if self.is_enemy(other) => {
                    if cast.enemy_ok {
                        hits.push(LineHit {
                            position,
                            tile,
                            piece: Some(other),
                        });
                    }
                    if !cast.jump_enemy {
                        break;
                    }
                }
                Some(other) => {
                    if cast.ally_ok {
                        hits.push(LineHit {
                            position,
                            tile,
                            piece: Some(other),
                        });
                    }
                    if !cast.jump_ally {
                        break;
                    }
                }
                None => {
                    if cast.can_move {
                        hits.push(LineHit {
                            position,
                            tile,
                            piece: None,
                        });
                    }
                }
            }
        }

        hits
    }

    pub(crate) fn set_outcomes(&mut self, outcomes: Outcomes) {
        self.outcomes = outcomes;
    }

    pub(crate) fn clear_outcomes(&mut self) {
        self.outcomes.clear();
    }

    /// Records a relocation. The caller moves the piece between tiles.
    pub(crate) fn moved_to(&mut self, position: Position) {
        self.move_history.push(position - self.position);
        self.position = position;
        self.position_history.push(position);
        self.move_count += 1;
    }

    /// Start-of-turn hook: a piece's own turn clears its en-passant flag and
    /// ticks its jump cooldown.
    pub(crate) fn turn_changed(&mut self, current: Faction) {
        if current == self.faction {
            self.en_passantable = false;
            self.jump_timer = self.jump_timer.saturating_sub(1);
        }
    }

    pub(crate) fn set_en_passantable(&mut self, value: bool) {
        self.en_passantable = value;
    }

    pub(crate) fn set_lurking(&mut self, value: bool) {
        self.lurking = value;
    }

    pub(crate) fn set_jump_timer(&mut self, turns: u8) {
        self.jump_timer = turns;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.faction, self.kind)
    }
}

/// Rotates a forward/right-frame vector into board coordinates.
///
/// `facing` is an axis-aligned unit vector, so this is a quarter-turn rotation
/// (or a half turn for `(0, -1)`).
pub fn orient_vector(vector: Vector, facing: Vector) -> Vector {
    vector * facing.y + vector.reversed() * facing.x
}
