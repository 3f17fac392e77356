//! Piece kind representation.

use crate::Faction;

/// The kinds of pieces that can stand on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
    Summoner = 7,
    Zombie = 8,
    Jester = 9,
    Sentry = 10,
    Berserker = 11,
}

impl PieceKind {
    /// All piece kinds in code order.
    pub const ALL: [PieceKind; 11] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Summoner,
        PieceKind::Zombie,
        PieceKind::Jester,
        PieceKind::Sentry,
        PieceKind::Berserker,
    ];

    /// Returns the snapshot code. Code 0 is reserved for "no piece".
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Creates a piece kind from its snapshot code.
    ///
    /// Negative codes are accepted and read by magnitude.
    pub const fn from_code(code: i64) -> Option<Self> {
        match code.abs() {
            1 => Some(PieceKind::Pawn),
            2 => Some(PieceKind::Knight),
            3 => Some(PieceKind::Bishop),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Queen),
            6 => Some(PieceKind::King),
            7 => Some(PieceKind::Summoner),
            8 => Some(PieceKind::Zombie),
            9 => Some(PieceKind::Jester),
            10 => Some(PieceKind::Sentry),
            11 => Some(PieceKind::Berserker),
            _ => None,
        }
    }

    /// Returns true if losing this piece is what a check threatens.
    #[inline]
    pub const fn is_leader(self) -> bool {
        matches!(self, PieceKind::King)
    }

    /// Returns the single-character board glyph for this kind and faction.
    ///
    /// White-side pieces are uppercase, black-side pieces lowercase.
    pub const fn glyph(self, faction: Faction) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
            PieceKind::Summoner => 's',
            PieceKind::Zombie => 'z',
            PieceKind::Jester => 'j',
            PieceKind::Sentry => 'e',
            PieceKind::Berserker => 'x',
        };
        match faction.side() {
            Faction::White => c.to_ascii_uppercase(),
            _ => c,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
            PieceKind::Summoner => "Summoner",
            PieceKind::Zombie => "Zombie",
            PieceKind::Jester => "Jester",
            PieceKind::Sentry => "Sentry",
            PieceKind::Berserker => "Berserker",
        };
        write!(f, "{}", name)
    }
}
