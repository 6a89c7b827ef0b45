use crate::error::MoveError;
use crate::model::{Cell, Position, Side};
use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 3;

/// Every row, column and diagonal, as (row, col) triples.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    #[serde(rename = "ongoing")]
    Ongoing,
    #[serde(rename = "X wins")]
    XWins,
    #[serde(rename = "O wins")]
    OWins,
    #[serde(rename = "draw")]
    Draw,
}

impl GameStatus {
    pub fn win_for(side: Side) -> Self {
        match side {
            Side::X => GameStatus::XWins,
            Side::O => GameStatus::OWins,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameStatus::XWins => Some(Side::X),
            GameStatus::OWins => Some(Side::O),
            GameStatus::Ongoing | GameStatus::Draw => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }
}

/// 3x3 grid, serialized as nested arrays of `"X"`, `"O"` and `""`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board([[Cell; BOARD_SIZE]; BOARD_SIZE]);

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, position: Position) -> Option<Cell> {
        let (row, col) = Self::index(position)?;
        Some(self.0[row][col])
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.0
    }

    /// Writes `side` into the target cell and returns the new board.
    ///
    /// No rule checks happen here; see [`Board::check_move`]. Positions
    /// outside the grid leave the board untouched.
    pub fn apply_move(mut self, position: Position, side: Side) -> Board {
        if let Some((row, col)) = Self::index(position) {
            self.0[row][col] = side.into();
        }
        self
    }

    /// Checks that `position` is on the board and still empty.
    pub fn check_move(&self, position: Position) -> Result<(), MoveError> {
        let Position { row, col } = position;
        match self.get(position) {
            None => Err(MoveError::OutOfBounds { row, col }),
            Some(cell) if !cell.is_empty() => Err(MoveError::Occupied { row, col }),
            Some(_) => Ok(()),
        }
    }

    /// Grid indices of `position`, if it lies on the board.
    fn index(position: Position) -> Option<(usize, usize)> {
        let row = usize::try_from(position.row).ok()?;
        let col = usize::try_from(position.col).ok()?;
        (row < BOARD_SIZE && col < BOARD_SIZE).then_some((row, col))
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Win on any complete line, draw once the grid is full, otherwise ongoing.
    pub fn evaluate(&self) -> GameStatus {
        for line in LINES {
            let [a, b, c] = line.map(|(row, col)| self.0[row][col]);
            if a == b && b == c {
                if let Some(side) = a.side() {
                    return GameStatus::win_for(side);
                }
            }
        }

        if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::Ongoing
        }
    }
}

impl From<[[Cell; BOARD_SIZE]; BOARD_SIZE]> for Board {
    fn from(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Self(cells)
    }
}
