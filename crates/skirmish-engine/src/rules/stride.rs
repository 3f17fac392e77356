//! Sliding and leaping rules shared by most pieces.

use super::SENTRY_JUMP_COOLDOWN;
use crate::outcome::Effect;
use crate::piece::LineCast;
use crate::{Action, Board, Outcome, OutcomeSink, Piece};
use skirmish_core::{dir, Vector};

/// Restricts a rule to pieces whose move count has the given parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Any,
    Even,
    Odd,
}

impl Parity {
    fn admits(self, move_count: u32) -> bool {
        match self {
            Parity::Any => true,
            Parity::Even => move_count % 2 == 0,
            Parity::Odd => move_count % 2 == 1,
        }
    }
}

/// Moves along lines until blocked, capturing the first enemy in the way.
#[derive(Debug, Clone, Copy)]
pub struct Slide {
    pub name: &'static str,
    /// Directions in the piece's own frame.
    pub directions: &'static [Vector],
    /// Maximum steps; `None` reaches across the whole board.
    pub length: Option<i32>,
    /// Whether the slide may end on an enemy.
    pub capture: bool,
    pub parity: Parity,
}

impl Slide {
    pub const BISHOP: Slide = Slide::unbounded("bishop-slide", &dir::DIAGONAL);
    pub const ROOK: Slide = Slide::unbounded("rook-slide", &dir::CARDINAL);
    pub const QUEEN: Slide = Slide::unbounded("queen-slide", &dir::ALL);
    pub const KING: Slide = Slide {
        name: "king-step",
        directions: &dir::ALL,
        length: Some(1),
        capture: true,
        parity: Parity::Any,
    };
    pub const JESTER_DIAGONAL: Slide = Slide {
        parity: Parity::Even,
        ..Slide::unbounded("jester-diagonal", &dir::DIAGONAL)
    };
    pub const JESTER_CARDINAL: Slide = Slide {
        parity: Parity::Odd,
        ..Slide::unbounded("jester-cardinal", &dir::CARDINAL)
    };

    const fn unbounded(name: &'static str, directions: &'static [Vector]) -> Slide {
        Slide {
            name,
            directions,
            length: None,
            capture: true,
            parity: Parity::Any,
        }
    }
}

impl Action for Slide {
    fn name(&self) -> &'static str {
        self.name
    }

    fn update(&self, piece: &Piece, board: &Board, sink: &mut OutcomeSink) {
        if !self.parity.admits(piece.move_count()) {
            return;
        }
        let cast = LineCast::new(self.length.unwrap_or_else(|| board.extent())).enemy_ok(self.capture);
        for &direction in self.directions {
            for hit in piece.get_line(board, direction, cast) {
                let outcome = match hit.piece {
                    None => Outcome::move_to(piece.as_ref(), piece.faction(), hit.position),
                    Some(victim) => Outcome::capture(
                        piece.as_ref(),
                        piece.faction(),
                        hit.position,
                        vec![victim.as_ref()],
                    ),
                };
                sink.add_outcome(hit.position, outcome);
            }
        }
    }
}

/// Jumps straight to fixed offsets, ignoring anything in between.
#[derive(Debug, Clone, Copy)]
pub struct Leap {
    pub name: &'static str,
    pub vectors: &'static [Vector],
    /// Applied to the leaping piece after every leap.
    pub effect: Effect,
    /// Whether a running jump cooldown disables the leap.
    pub gated: bool,
}

impl Leap {
    pub const KNIGHT: Leap = Leap {
        name: "knight-leap",
        vectors: &dir::KNIGHT,
        effect: Effect::None,
        gated: false,
    };
    pub const SENTRY: Leap = Leap {
        name: "sentry-jump",
        vectors: &dir::KNIGHT,
        effect: Effect::JumpCooldown(SENTRY_JUMP_COOLDOWN),
        gated: true,
    };
}

impl Action for Leap {
    fn name(&self) -> &'static str {
        self.name
    }

    fn update(&self, piece: &Piece, board: &Board, sink: &mut OutcomeSink) {
        if self.gated && piece.jump_timer() > 0 {
            return;
        }
        for &vector in self.vectors {
            let (position, tile, occupant) = piece.at_vec(board, vector);
            let Some(tile) = tile else { continue };
            if !tile.can_enter() {
                continue;
            }
            let outcome = match occupant {
                None => Outcome::move_to(piece.as_ref(), piece.faction(), position),
                Some(other) if piece.is_enemy(other) => Outcome::capture(
                    piece.as_ref(),
                    piece.faction(),
                    position,
                    vec![other.as_ref()],
                ),
                Some(_) => continue,
            };
            sink.add_outcome(position, outcome.with_effect(self.effect));
        }
    }
}
