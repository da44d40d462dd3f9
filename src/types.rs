use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::A => "A",
            Side::B => "B",
        })
    }
}

/// Movement class of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PieceClass {
    Pawn,
    Hero,
}

impl PieceClass {
    /// Exact number of cells a piece of this class travels per move.
    pub fn steps(self) -> i32 {
        match self {
            PieceClass::Pawn => 1,
            PieceClass::Hero => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Role {
    P1,
    P2,
    P3,
    H1,
    H2,
}

impl Role {
    /// Home-row order, left to right.
    pub const HOME_ROW: [Role; 5] = [Role::P1, Role::P2, Role::H1, Role::H2, Role::P3];

    pub fn class(self) -> PieceClass {
        match self {
            Role::P1 | Role::P2 | Role::P3 => PieceClass::Pawn,
            Role::H1 | Role::H2 => PieceClass::Hero,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::P1 => "P1",
            Role::P2 => "P2",
            Role::P3 => "P3",
            Role::H1 => "H1",
            Role::H2 => "H2",
        })
    }
}

/// Identity of a piece. Never changes once a game starts; only its cell does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceId {
    pub side: Side,
    pub role: Role,
}

impl PieceId {
    pub const fn new(side: Side, role: Role) -> Self {
        Self { side, role }
    }

    /// Stable numeric id in `0..10`: A's pieces first, roles in declaration order.
    pub fn index(self) -> u8 {
        let side = match self.side {
            Side::A => 0,
            Side::B => 5,
        };
        side + self.role as u8
    }

    pub fn steps(self) -> i32 {
        self.role.class().steps()
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.side, self.role)
    }
}

/// A cell coordinate: `x` is the column, `y` the row (row 0 is A's home row).
///
/// Signed so that destinations past the edge can be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(self) -> bool {
        let range = 0..crate::board::BOARD_SIZE as i32;
        range.contains(&self.x) && range.contains(&self.y)
    }

    /// Maps a pointer position to a cell, with cell size `board_extent / 5`.
    ///
    /// Returns `None` for a degenerate extent or non-finite input. The result
    /// may be out of bounds when the pointer lies outside the board.
    pub fn from_pixel(px: f64, py: f64, board_extent: f64) -> Option<Self> {
        if !(board_extent.is_finite() && board_extent > 0.0 && px.is_finite() && py.is_finite()) {
            return None;
        }
        let cell = board_extent / crate::board::BOARD_SIZE as f64;
        Some(Self::new(
            (px / cell).floor() as i32,
            (py / cell).floor() as i32,
        ))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight movement directions. Forward is toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    L,
    R,
    F,
    B,
    FL,
    FR,
    BL,
    BR,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::L,
        Direction::R,
        Direction::F,
        Direction::B,
        Direction::FL,
        Direction::FR,
        Direction::BL,
        Direction::BR,
    ];

    /// Unit `(dx, dy)` for one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::L => (-1, 0),
            Direction::R => (1, 0),
            Direction::F => (0, -1),
            Direction::B => (0, 1),
            Direction::FL => (-1, -1),
            Direction::FR => (1, -1),
            Direction::BL => (-1, 1),
            Direction::BR => (1, 1),
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Direction::L => "L",
            Direction::R => "R",
            Direction::F => "F",
            Direction::B => "B",
            Direction::FL => "FL",
            Direction::FR => "FR",
            Direction::BL => "BL",
            Direction::BR => "BR",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown direction code: '{0}'")]
pub struct ParseDirectionError(pub String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .into_iter()
            .find(|dir| dir.code() == s)
            .ok_or_else(|| ParseDirectionError(s.to_string()))
    }
}

/// Why a move attempt left the game untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum RejectReason {
    #[error("game is already over")]
    GameOver,
    #[error("no piece selected")]
    NoSelection,
    #[error("selected piece {0} is not on the board")]
    PieceMissing(PieceId),
    #[error("move out of bounds: {0}")]
    OutOfBounds(Coord),
    #[error("destination held by own piece {0}")]
    OccupiedByOwnPiece(PieceId),
}

/// Result of `Game::apply_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum MoveOutcome {
    Moved {
        piece: PieceId,
        to: Coord,
    },
    Captured {
        piece: PieceId,
        captured: PieceId,
        to: Coord,
    },
    Rejected {
        reason: RejectReason,
    },
}

impl MoveOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected { .. })
    }
}

/// One executed move, kept in the game history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub to: Coord,
    pub captured: Option<PieceId>,
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.captured {
            Some(captured) => write!(f, "{} captured {} to {}", self.piece, captured, self.to),
            None => write!(f, "{} moved to {}", self.piece, self.to),
        }
    }
}

/// Read-only view handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Rows top to bottom; each cell is a piece label such as `A-H1` or `None`.
    pub grid: Vec<Vec<Option<String>>>,
    pub current_player: Side,
    pub selected: Option<String>,
    /// Most recent history entries, oldest first.
    pub history_tail: Vec<String>,
    pub game_over: bool,
    pub winner: Option<Side>,
}
