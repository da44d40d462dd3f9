use crate::types::{Coord, Direction, PieceId, Role, Side};

pub const BOARD_SIZE: usize = 5;
pub const PIECES_PER_SIDE: usize = 5;

/// 5×5 grid of optional pieces, indexed `cells[y][x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<PieceId>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the starting layout:
    /// row 0 = A's P1,P2,H1,H2,P3, row 4 = B's in the same order.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (x, role) in Role::HOME_ROW.into_iter().enumerate() {
            board.cells[0][x] = Some(PieceId::new(Side::A, role));
            board.cells[BOARD_SIZE - 1][x] = Some(PieceId::new(Side::B, role));
        }
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Returns the piece on `pos`, or `None` for an empty or off-board cell.
    pub fn piece_at(&self, pos: Coord) -> Option<PieceId> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.y as usize][pos.x as usize]
    }

    /// Finds the cell holding `piece`. `None` once it has been captured.
    pub fn locate(&self, piece: PieceId) -> Option<Coord> {
        self.iter()
            .find_map(|(pos, cell)| (cell == piece).then_some(pos))
    }

    pub fn count(&self, side: Side) -> usize {
        self.iter().filter(|(_, piece)| piece.side == side).count()
    }

    pub fn has_pieces(&self, side: Side) -> bool {
        self.iter().any(|(_, piece)| piece.side == side)
    }

    /// Occupied cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, PieceId)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().filter_map(move |(x, cell)| {
                cell.map(|piece| (Coord::new(x as i32, y as i32), piece))
            })
        })
    }

    /// Rows top to bottom.
    pub fn rows(&self) -> &[[Option<PieceId>; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Moves whatever sits on `from` to `to`, returning the piece it replaced.
    /// Caller contract: both cells are in bounds.
    pub(crate) fn relocate(&mut self, from: Coord, to: Coord) -> Option<PieceId> {
        debug_assert!(from.in_bounds() && to.in_bounds());
        let moving = self.cells[from.y as usize][from.x as usize].take();
        std::mem::replace(&mut self.cells[to.y as usize][to.x as usize], moving)
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, pos: Coord, piece: Option<PieceId>) {
        self.cells[pos.y as usize][pos.x as usize] = piece;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Destination after travelling `steps` cells in `direction`. No bounds check.
pub fn compute_destination(origin: Coord, direction: Direction, steps: i32) -> Coord {
    let (dx, dy) = direction.delta();
    Coord::new(origin.x + dx * steps, origin.y + dy * steps)
}
