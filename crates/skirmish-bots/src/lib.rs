//! Reference bot strategies.
//!
//! - [`RandomBot`] plays a uniformly random outcome.
//! - [`AggroBot`] captures whenever it can, otherwise moves at random.
//!
//! Both draw from a seeded [`StdRng`](rand::rngs::StdRng), so a game between
//! bots is reproducible from its seed.

mod aggro;
mod random;

pub use aggro::AggroBot;
pub use random::RandomBot;

use skirmish_core::Faction;
use skirmish_engine::Bot;
use std::fmt;

/// The available strategies, by configuration name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    #[default]
    Random,
    Aggro,
}

impl Strategy {
    pub const ALL: [Strategy; 2] = [Strategy::Random, Strategy::Aggro];

    /// Parses a strategy name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "random" => Some(Strategy::Random),
            "aggro" => Some(Strategy::Aggro),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Aggro => "aggro",
        }
    }

    /// Creates a bot for `faction`.
    ///
    /// Each faction's RNG is derived from `seed` and the faction code, so two
    /// bots sharing a seed still play independently.
    pub fn build(self, faction: Faction, seed: u64) -> Box<dyn Bot> {
        let seed = seed.wrapping_mul(31).wrapping_add(faction.code() as u64);
        match self {
            Strategy::Random => Box::new(RandomBot::new(faction, seed)),
            Strategy::Aggro => Box::new(AggroBot::new(faction, seed)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_roundtrip() {
        for strategy in Strategy::ALL {
            assert_eq!(Strategy::from_name(strategy.name()), Some(strategy));
        }
        assert_eq!(Strategy::from_name("AGGRO"), Some(Strategy::Aggro));
        assert_eq!(Strategy::from_name("minimax"), None);
    }

    #[test]
    fn build_sets_faction_and_name() {
        let bot = Strategy::Aggro.build(Faction::Black, 7);
        assert_eq!(bot.faction(), Faction::Black);
        assert_eq!(bot.name(), "aggro");
    }
}
