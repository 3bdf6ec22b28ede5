use crate::error::{GameError, Result};
use serde::{Deserialize, Serialize};

/// Number of cells on the board, indexed 0-8 row-major.
pub const BOARD_CELLS: usize = 9;

/// A single cell symbol. Shark and Tiger are the two playable marks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    Shark,
    Tiger,
}

impl Mark {
    /// The opposing playable mark. `Empty` has no opponent.
    pub fn other(self) -> Mark {
        match self {
            Mark::Empty => Mark::Empty,
            Mark::Shark => Mark::Tiger,
            Mark::Tiger => Mark::Shark,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, Mark::Empty)
    }
}

/// The eight winning lines: three rows, three columns, two diagonals.
const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The 3x3 game board. Pure data, no lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board([Mark; BOARD_CELLS]);

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[Mark; BOARD_CELLS] {
        &self.0
    }

    pub fn cell(&self, position: usize) -> Result<Mark> {
        self.0
            .get(position)
            .copied()
            .ok_or(GameError::PositionOutOfRange(position))
    }

    /// Validate a placement without writing it.
    pub fn check(&self, position: usize) -> Result<()> {
        let mark = self.cell(position)?;
        if !mark.is_empty() {
            return Err(GameError::PositionTaken(position));
        }
        Ok(())
    }

    pub fn place(&mut self, position: usize, mark: Mark) -> Result<()> {
        self.check(position)?;
        self.0[position] = mark;
        Ok(())
    }

    /// The mark completing the first winning line, scanning rows, then
    /// columns, then diagonals.
    pub fn winning_mark(&self) -> Option<Mark> {
        WINNING_LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.0[a];
            (!mark.is_empty() && self.0[b] == mark && self.0[c] == mark).then_some(mark)
        })
    }

    /// A full board with no winning line is a draw.
    pub fn is_full(&self) -> bool {
        self.0.iter().all(|mark| !mark.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(marks: &[(usize, Mark)]) -> Board {
        let mut board = Board::new();
        for &(position, mark) in marks {
            board.place(position, mark).unwrap();
        }
        board
    }

    #[test]
    fn test_empty_board_has_no_winner() {
        let board = Board::new();

        assert_eq!(board.winning_mark(), None);
        assert!(!board.is_full());
    }

    #[test]
    fn test_all_eight_lines_win() {
        for line in WINNING_LINES {
            for mark in [Mark::Shark, Mark::Tiger] {
                let board = board_from(&[(line[0], mark), (line[1], mark), (line[2], mark)]);
                assert_eq!(board.winning_mark(), Some(mark), "line {:?}", line);
            }
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = board_from(&[(0, Mark::Shark), (1, Mark::Shark), (2, Mark::Tiger)]);

        assert_eq!(board.winning_mark(), None);
    }

    #[test]
    fn test_full_board_without_line_is_draw_shaped() {
        // | S | T | S |
        // | T | T | S |
        // | S | S | T |
        let board = board_from(&[
            (0, Mark::Shark),
            (1, Mark::Tiger),
            (2, Mark::Shark),
            (3, Mark::Tiger),
            (4, Mark::Tiger),
            (5, Mark::Shark),
            (6, Mark::Shark),
            (7, Mark::Shark),
            (8, Mark::Tiger),
        ]);

        assert!(board.is_full());
        assert_eq!(board.winning_mark(), None);
    }

    #[test]
    fn test_place_rejects_out_of_range() {
        let mut board = Board::new();

        assert_eq!(
            board.place(9, Mark::Shark),
            Err(GameError::PositionOutOfRange(9))
        );
    }

    #[test]
    fn test_place_rejects_taken_cell() {
        let mut board = Board::new();
        board.place(4, Mark::Shark).unwrap();

        assert_eq!(
            board.place(4, Mark::Tiger),
            Err(GameError::PositionTaken(4))
        );
        assert_eq!(board.cell(4).unwrap(), Mark::Shark);
    }

    #[test]
    fn test_mark_other() {
        assert_eq!(Mark::Shark.other(), Mark::Tiger);
        assert_eq!(Mark::Tiger.other(), Mark::Shark);
        assert_eq!(Mark::Empty.other(), Mark::Empty);
    }
}
