//! The rule set: which actions each piece kind acts with.
//!
//! Every rule is a stateless [`Action`] value. A piece kind maps to a static
//! slice of rules, run in order on every board update; when two rules offer
//! the same target, the later one wins.

mod berserker;
mod king;
mod pawn;
mod sentry;
mod stride;
mod summoner;

pub use berserker::Frenzy;
pub use king::Castle;
pub use pawn::{Advance, EnPassant, Strike};
pub use sentry::{Ambush, Lurk};
pub use stride::{Leap, Parity, Slide};
pub use summoner::{Shamble, Summon};

use crate::Action;
use skirmish_core::{dir, PieceKind};

/// Leadership a summon consumes.
pub const SUMMON_COST: i32 = 2;

/// Leadership an en-passant capture grants.
pub const EN_PASSANT_GRANT: i32 = 1;

/// Leadership a berserker frenzy consumes.
pub const FRENZY_COST: i32 = 1;

/// Own turns a sentry waits after jumping.
pub const SENTRY_JUMP_COOLDOWN: u8 = 2;

/// Reach of a lurking sentry's ambush.
pub const AMBUSH_RANGE: i32 = 4;

static PAWN: &[&dyn Action] = &[&Advance::PAWN, &Strike, &EnPassant];
static KNIGHT: &[&dyn Action] = &[&Leap::KNIGHT];
static BISHOP: &[&dyn Action] = &[&Slide::BISHOP];
static ROOK: &[&dyn Action] = &[&Slide::ROOK];
static QUEEN: &[&dyn Action] = &[&Slide::QUEEN];
static KING: &[&dyn Action] = &[&Slide::KING, &Castle];
static SUMMONER: &[&dyn Action] = &[
    &Slide {
        name: "summoner-step",
        directions: &[dir::FL, dir::FR, dir::B],
        length: Some(1),
        capture: false,
        parity: Parity::Any,
    },
    &Summon,
];
static ZOMBIE: &[&dyn Action] = &[&Shamble];
static JESTER: &[&dyn Action] = &[&Slide::JESTER_DIAGONAL, &Slide::JESTER_CARDINAL];
static SENTRY: &[&dyn Action] = &[&Leap::SENTRY, &Ambush, &Lurk];
static BERSERKER: &[&dyn Action] = &[&Advance::BERSERKER, &Strike, &Frenzy];

/// Returns the rules a piece of `kind` acts with, in registration order.
pub fn actions_for(kind: PieceKind) -> &'static [&'static dyn Action] {
    match kind {
        PieceKind::Pawn => PAWN,
        PieceKind::Knight => KNIGHT,
        PieceKind::Bishop => BISHOP,
        PieceKind::Rook => ROOK,
        PieceKind::Queen => QUEEN,
        PieceKind::King => KING,
        PieceKind::Summoner => SUMMONER,
        PieceKind::Zombie => ZOMBIE,
        PieceKind::Jester => JESTER,
        PieceKind::Sentry => SENTRY,
        PieceKind::Berserker => BERSERKER,
    }
}
