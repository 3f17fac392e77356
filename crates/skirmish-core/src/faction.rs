//! Faction (side) representation.

use crate::Vector;

/// A side taking turns on the board.
///
/// The automated variants are separate factions that share a visual side and
/// a facing with their human counterpart. They are used for pieces driven by
/// scripted logic, such as summoned zombies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Faction {
    White = 1,
    Black = 2,
    WhiteAuto = 3,
    BlackAuto = 4,
}

impl Faction {
    /// All factions in code order.
    pub const ALL: [Faction; 4] = [
        Faction::White,
        Faction::Black,
        Faction::WhiteAuto,
        Faction::BlackAuto,
    ];

    /// Returns the snapshot code (1-4). Code 0 is reserved for "no faction".
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Creates a faction from its snapshot code.
    #[inline]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Faction::White),
            2 => Some(Faction::Black),
            3 => Some(Faction::WhiteAuto),
            4 => Some(Faction::BlackAuto),
            _ => None,
        }
    }

    /// Returns the human-visible side this faction belongs to.
    #[inline]
    pub const fn side(self) -> Faction {
        match self {
            Faction::White | Faction::WhiteAuto => Faction::White,
            Faction::Black | Faction::BlackAuto => Faction::Black,
        }
    }

    /// Returns the automated counterpart of this faction's side.
    #[inline]
    pub const fn automated(self) -> Faction {
        match self.side() {
            Faction::White => Faction::WhiteAuto,
            _ => Faction::BlackAuto,
        }
    }

    /// Returns the board direction this faction's pieces consider forward.
    ///
    /// White starts on the high-y edge and advances toward y = 0.
    #[inline]
    pub const fn facing(self) -> Vector {
        match self.side() {
            Faction::White => Vector::new(0, -1),
            _ => Vector::new(0, 1),
        }
    }

    /// Parses a faction from its display name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace(['-', '_', ' '], "").as_str() {
            "white" => Some(Faction::White),
            "black" => Some(Faction::Black),
            "whiteauto" => Some(Faction::WhiteAuto),
            "blackauto" => Some(Faction::BlackAuto),
            _ => None,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::White => write!(f, "White"),
            Faction::Black => write!(f, "Black"),
            Faction::WhiteAuto => write!(f, "WhiteAuto"),
            Faction::BlackAuto => write!(f, "BlackAuto"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        for faction in Faction::ALL {
            assert_eq!(Faction::from_code(faction.code() as i64), Some(faction));
        }
        assert_eq!(Faction::from_code(0), None);
        assert_eq!(Faction::from_code(5), None);
    }

    #[test]
    fn automated_pairs_share_side_and_facing() {
        assert_eq!(Faction::WhiteAuto.side(), Faction::White);
        assert_eq!(Faction::BlackAuto.side(), Faction::Black);
        assert_eq!(Faction::White.facing(), Faction::WhiteAuto.facing());
        assert_eq!(Faction::Black.facing(), Faction::BlackAuto.facing());
        assert_ne!(Faction::White.facing(), Faction::Black.facing());
    }

    #[test]
    fn automated_counterpart() {
        assert_eq!(Faction::White.automated(), Faction::WhiteAuto);
        assert_eq!(Faction::BlackAuto.automated(), Faction::BlackAuto);
    }

    #[test]
    fn from_name() {
        assert_eq!(Faction::from_name("white"), Some(Faction::White));
        assert_eq!(Faction::from_name("Black_Auto"), Some(Faction::BlackAuto));
        assert_eq!(Faction::from_name("white-auto"), Some(Faction::WhiteAuto));
        assert_eq!(Faction::from_name("red"), None);
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Faction::White), "White");
        assert_eq!(format!("{}", Faction::BlackAuto), "BlackAuto");
    }
}
