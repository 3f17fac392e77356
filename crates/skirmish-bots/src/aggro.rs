use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use skirmish_core::Faction;
use skirmish_engine::{Board, Bot, Decision, Piece};
use tracing::debug;

/// Captures whenever it can.
///
/// Pieces are visited in a random order; the first one with a capture plays
/// a random capture. Failing that, the first piece with any outcome plays a
/// random one.
#[derive(Debug, Clone)]
pub struct AggroBot {
    faction: Faction,
    rng: StdRng,
}

impl AggroBot {
    pub fn new(faction: Faction, seed: u64) -> Self {
        AggroBot {
            faction,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn pick(&mut self, piece: &Piece, captures_only: bool) -> Option<Decision> {
        let choices: Vec<_> = piece
            .outcomes()
            .iter()
            .filter(|(_, outcome)| !captures_only || outcome.is_capture())
            .collect();
        choices
            .choose(&mut self.rng)
            .map(|(target, outcome)| Decision {
                target: **target,
                outcome: (*outcome).clone(),
            })
    }
}

impl Bot for AggroBot {
    fn faction(&self) -> Faction {
        self.faction
    }

    fn name(&self) -> &str {
        "aggro"
    }

    fn play(&mut self, board: &Board) -> Option<Decision> {
        let mut pieces: Vec<&Piece> = board
            .loyal_pieces(self.faction)
            .filter(|p| !p.outcomes().is_empty())
            .collect();
        pieces.shuffle(&mut self.rng);

        for piece in &pieces {
            if let Some(decision) = self.pick(piece, true) {
                return Some(decision);
            }
        }
        let decision = match pieces.first() {
            Some(piece) => self.pick(piece, false),
            None => None,
        };
        if decision.is_none() {
            debug!(faction = %self.faction, "aggro bot has nothing to play");
        }
        decision
    }
}
