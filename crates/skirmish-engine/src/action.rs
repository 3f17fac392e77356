//! The rule abstraction pieces are built from.

use crate::outcome::{Outcome, Outcomes};
use crate::{Board, Piece};
use skirmish_core::{Faction, Position};
use std::fmt;
use tracing::warn;

/// A single rule a piece kind acts with.
///
/// Rules are stateless: everything they need lives on the piece and the
/// board. A rule reads both and registers the outcomes it offers with the
/// sink; it never mutates the board.
pub trait Action: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Registers every outcome this rule offers `piece` on `board`.
    fn update(&self, piece: &Piece, board: &Board, sink: &mut OutcomeSink);
}

/// Collects the outcomes of one piece's rules.
///
/// Registration enforces the leadership budget of the acting faction and
/// resolves two rules offering the same target tile in favour of the later
/// one.
#[derive(Debug)]
pub struct OutcomeSink {
    faction: Faction,
    budget: i32,
    action: &'static str,
    outcomes: Outcomes,
}

impl OutcomeSink {
    /// Creates a sink for `faction`, which currently holds `budget` leadership.
    pub fn new(faction: Faction, budget: i32) -> Self {
        OutcomeSink {
            faction,
            budget,
            action: "",
            outcomes: Outcomes::new(),
        }
    }

    pub fn faction(&self) -> Faction {
        self.faction
    }

    pub fn budget(&self) -> i32 {
        self.budget
    }

    pub(crate) fn set_action(&mut self, name: &'static str) {
        self.action = name;
    }

    /// Registers `outcome` on `target`.
    ///
    /// Returns false if the faction cannot afford it. An earlier outcome on
    /// the same target is replaced.
    pub fn add_outcome(&mut self, target: Position, outcome: Outcome) -> bool {
        if self.budget + outcome.leadership_delta() < 0 {
            warn!(
                action = self.action,
                faction = %self.faction,
                budget = self.budget,
                cost = -outcome.leadership_delta(),
                %target,
                "outcome not affordable"
            );
            return false;
        }
        if let Some(previous) = self.outcomes.insert(target, outcome) {
            warn!(
                action = self.action,
                %target,
                replaced = previous.name(),
                "outcome overwritten"
            );
        }
        true
    }

    pub fn outcomes(&self) -> &Outcomes {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Outcomes {
        self.outcomes
    }
}
