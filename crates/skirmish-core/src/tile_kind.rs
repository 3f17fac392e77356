//! Tile kind representation.

/// The terrain of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i8)]
pub enum TileKind {
    /// Outside the playable area. Cannot be entered; lines stop here unless
    /// they jump gaps.
    Void = -1,
    #[default]
    Default = 0,
    /// Blocks movement and crushes anything standing on it.
    Wall = 1,
    /// Can be entered, but a piece ending a turn here falls.
    Chasm = 2,
    Floor = 3,
}

impl TileKind {
    /// All tile kinds in code order.
    pub const ALL: [TileKind; 5] = [
        TileKind::Void,
        TileKind::Default,
        TileKind::Wall,
        TileKind::Chasm,
        TileKind::Floor,
    ];

    /// Returns the snapshot code.
    #[inline]
    pub const fn code(self) -> i8 {
        self as i8
    }

    /// Creates a tile kind from its snapshot code.
    #[inline]
    pub const fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(TileKind::Void),
            0 => Some(TileKind::Default),
            1 => Some(TileKind::Wall),
            2 => Some(TileKind::Chasm),
            3 => Some(TileKind::Floor),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_blocked(self) -> bool {
        matches!(self, TileKind::Wall)
    }

    #[inline]
    pub const fn is_void(self) -> bool {
        matches!(self, TileKind::Void)
    }

    #[inline]
    pub const fn is_deadly(self) -> bool {
        matches!(self, TileKind::Chasm)
    }

    /// Returns true if a piece may move onto a tile of this kind.
    #[inline]
    pub const fn can_enter(self) -> bool {
        !self.is_blocked() && !self.is_void()
    }

    /// Returns true if a piece standing here is removed by the per-turn update.
    #[inline]
    pub const fn evicts_occupant(self) -> bool {
        matches!(self, TileKind::Void | TileKind::Wall | TileKind::Chasm)
    }

    /// Returns the character used when drawing an empty tile of this kind.
    pub const fn glyph(self) -> char {
        match self {
            TileKind::Void => ' ',
            TileKind::Default | TileKind::Floor => '.',
            TileKind::Wall => '#',
            TileKind::Chasm => 'o',
        }
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TileKind::Void => "Void",
            TileKind::Default => "Default",
            TileKind::Wall => "Wall",
            TileKind::Chasm => "Chasm",
            TileKind::Floor => "Floor",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_roundtrip() {
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_code(kind.code() as i64), Some(kind));
        }
        assert_eq!(TileKind::from_code(4), None);
    }

    #[test]
    fn entry_flags() {
        assert!(TileKind::Default.can_enter());
        assert!(TileKind::Floor.can_enter());
        assert!(TileKind::Chasm.can_enter());
        assert!(!TileKind::Wall.can_enter());
        assert!(!TileKind::Void.can_enter());
    }

    #[test]
    fn hazard_flags() {
        assert!(TileKind::Chasm.is_deadly());
        assert!(TileKind::Wall.is_blocked());
        assert!(TileKind::Void.is_void());
        assert!(!TileKind::Floor.evicts_occupant());
        assert!(TileKind::Wall.evicts_occupant());
    }
}
