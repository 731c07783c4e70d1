//! Immutable rectangular board of cells.
//!
//! A [`Board`] never changes once built. Move execution works on a scratch
//! copy (see [`crate::rules`]) and wraps the result in a new position, so
//! sibling positions never share mutable state.

use std::fmt;
use std::str::FromStr;

use crate::constants::*;
use crate::error::ConfigError;

/// One of the two players. Black is Left, White is Right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Player {
    Black,
    White,
}

impl Player {
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Board-file code of this player's stone (`1` or `-1`).
    #[inline]
    pub fn code(self) -> i8 {
        match self {
            Player::Black => CODE_BLACK,
            Player::White => CODE_WHITE,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

/// A point on the board as `(row, col)`.
pub type Point = (usize, usize);

/// Contents of a single point.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Stone(Player),
    /// Vacant point that only the given player may occupy.
    Reserved(Player),
}

impl Cell {
    /// Decode a board-file cell code.
    pub fn from_code(code: i64) -> Option<Cell> {
        match code {
            c if c == CODE_EMPTY as i64 => Some(Cell::Empty),
            c if c == CODE_BLACK as i64 => Some(Cell::Stone(Player::Black)),
            c if c == CODE_WHITE as i64 => Some(Cell::Stone(Player::White)),
            c if c == CODE_BLACK_RESERVED as i64 => Some(Cell::Reserved(Player::Black)),
            c if c == CODE_WHITE_RESERVED as i64 => Some(Cell::Reserved(Player::White)),
            _ => None,
        }
    }

    /// Board-file code of this cell.
    pub fn code(self) -> i8 {
        match self {
            Cell::Empty => CODE_EMPTY,
            Cell::Stone(p) => p.code(),
            Cell::Reserved(p) => p.code() * 2,
        }
    }

    fn glyph(self) -> char {
        match self {
            Cell::Empty => GLYPH_EMPTY,
            Cell::Stone(Player::Black) => GLYPH_BLACK,
            Cell::Stone(Player::White) => GLYPH_WHITE,
            Cell::Reserved(Player::Black) => GLYPH_BLACK_RESERVED,
            Cell::Reserved(Player::White) => GLYPH_WHITE_RESERVED,
        }
    }

    /// Whether `player` may place a stone here.
    ///
    /// With `reserved_points` off, reserved markers are plain empty points
    /// for everyone.
    #[inline]
    pub fn is_vacant_for(self, player: Player, reserved_points: bool) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Stone(_) => false,
            Cell::Reserved(owner) => !reserved_points || owner == player,
        }
    }

    /// Whether this point counts as a liberty of an adjacent group.
    ///
    /// A reserved marker is not empty, so it is never a liberty while
    /// reserved points are in force, not even for its owner.
    #[inline]
    pub fn is_liberty(self, reserved_points: bool) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Stone(_) => false,
            Cell::Reserved(_) => !reserved_points,
        }
    }
}

/// Whether a board must be square.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Shape {
    Square,
    Rectangular,
}

/// A `rows x cols` grid of cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// An empty `size x size` board.
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        Self::with_dimensions(size, size)
    }

    /// An empty `rows x cols` board.
    pub fn with_dimensions(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::Empty);
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        })
    }

    /// Build a board from rows of cells.
    pub fn from_cells(grid: Vec<Vec<Cell>>, shape: Shape) -> Result<Self, ConfigError> {
        let rows = grid.len();
        let cols = grid.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(ConfigError::Empty);
        }
        if let Some((row, r)) = grid.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(ConfigError::Ragged {
                row,
                expected: cols,
                found: r.len(),
            });
        }
        if shape == Shape::Square && rows != cols {
            return Err(ConfigError::NotSquare { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            cells: grid.into_iter().flatten().collect(),
        })
    }

    /// Build a board from rows of board-file codes.
    pub fn from_codes(grid: &[Vec<i64>], shape: Shape) -> Result<Self, ConfigError> {
        let cells = grid
            .iter()
            .enumerate()
            .map(|(row, codes)| {
                codes
                    .iter()
                    .enumerate()
                    .map(|(col, &value)| {
                        Cell::from_code(value).ok_or(ConfigError::CellOutOfRange { row, col, value })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(cells, shape)
    }

    /// Parse board text: one row per line, cells separated by commas and/or
    /// whitespace. Blank lines are skipped.
    pub fn parse(text: &str, shape: Shape) -> Result<Self, ConfigError> {
        let grid = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .enumerate()
            .map(|(row, line)| {
                line.split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|token| !token.is_empty())
                    .enumerate()
                    .map(|(col, token)| {
                        token.parse::<i64>().map_err(|_| ConfigError::InvalidCell {
                            row,
                            col,
                            token: token.to_string(),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_codes(&grid, shape)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn idx(&self, (row, col): Point) -> usize {
        row * self.cols + col
    }

    /// The cell at `pt`, or `None` off the board.
    #[inline]
    pub fn get(&self, pt: Point) -> Option<Cell> {
        if pt.0 >= self.rows || pt.1 >= self.cols {
            return None;
        }
        Some(self.cells[self.idx(pt)])
    }

    /// Overwrite one cell. Only used on scratch copies during move execution.
    pub(crate) fn set(&mut self, pt: Point, cell: Cell) {
        let i = self.idx(pt);
        self.cells[i] = cell;
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.cols).map(move |c| (r, c)))
    }

    /// Orthogonal neighbours of `pt` that lie on the board.
    pub fn neighbors(&self, (row, col): Point) -> impl Iterator<Item = Point> + '_ {
        DELTA.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < self.rows && c < self.cols).then_some((r, c))
        })
    }

    /// Flood-fill the group containing the stone at `start`.
    ///
    /// Returns the group's points and its number of distinct liberties.
    /// An empty or reserved `start` yields an empty group with no liberties.
    pub fn group_and_liberties(&self, start: Point, reserved_points: bool) -> (Vec<Point>, usize) {
        let Some(Cell::Stone(color)) = self.get(start) else {
            return (Vec::new(), 0);
        };
        let mut stack = vec![start];
        let mut visited = vec![false; self.cells.len()];
        let mut liberty_visited = vec![false; self.cells.len()];
        let mut group = Vec::new();
        let mut liberties = 0;

        while let Some(pt) = stack.pop() {
            let i = self.idx(pt);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            group.push(pt);

            for n in self.neighbors(pt) {
                let ni = self.idx(n);
                match self.cells[ni] {
                    Cell::Stone(c) if c == color => {
                        if !visited[ni] {
                            stack.push(n);
                        }
                    }
                    cell if cell.is_liberty(reserved_points) => {
                        if !liberty_visited[ni] {
                            liberty_visited[ni] = true;
                            liberties += 1;
                        }
                    }
                    _ => {}
                }
            }
        }
        (group, liberties)
    }

    /// Copy of the board as rows of board-file codes.
    pub fn to_codes(&self) -> Vec<Vec<i8>> {
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|c| c.code()).collect())
            .collect()
    }

    /// Number of points holding a stone of `player`.
    pub fn count_stones(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::Stone(player))
            .count()
    }
}

impl FromStr for Board {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::parse(s, Shape::Square)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            for cell in row {
                write!(f, "{} ", cell.glyph())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_and_whitespace() {
        let board: Board = "0,1,-1\n2 -2 0\n0, 0 ,1\n".parse().unwrap();
        assert_eq!(board.rows(), 3);
        assert_eq!(board.get((0, 1)), Some(Cell::Stone(Player::Black)));
        assert_eq!(board.get((0, 2)), Some(Cell::Stone(Player::White)));
        assert_eq!(board.get((1, 0)), Some(Cell::Reserved(Player::Black)));
        assert_eq!(board.get((1, 1)), Some(Cell::Reserved(Player::White)));
        assert_eq!(board.get((3, 0)), None);
        assert_eq!(
            board.to_codes(),
            vec![vec![0, 1, -1], vec![2, -2, 0], vec![0, 0, 1]]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Board::parse("", Shape::Square), Err(ConfigError::Empty));
        assert_eq!(
            Board::parse("0,0\n0\n", Shape::Square),
            Err(ConfigError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Board::parse("0,0,0\n0,0,0\n", Shape::Square),
            Err(ConfigError::NotSquare { rows: 2, cols: 3 })
        );
        assert!(Board::parse("0,0,0\n0,0,0\n", Shape::Rectangular).is_ok());
        assert_eq!(
            Board::parse("0,x\n0,0\n", Shape::Square),
            Err(ConfigError::InvalidCell {
                row: 0,
                col: 1,
                token: "x".to_string()
            })
        );
        assert_eq!(
            Board::parse("0,3\n0,0\n", Shape::Square),
            Err(ConfigError::CellOutOfRange {
                row: 0,
                col: 1,
                value: 3
            })
        );
    }

    #[test]
    fn test_neighbors_at_corner_and_center() {
        let board = Board::new(3).unwrap();
        let corner: Vec<_> = board.neighbors((0, 0)).collect();
        assert_eq!(corner, vec![(0, 1), (1, 0)]);
        assert_eq!(board.neighbors((1, 1)).count(), 4);
    }

    #[test]
    fn test_group_liberties() {
        // X X .
        // O X .
        // . O .
        let board: Board = "1,1,0\n-1,1,0\n0,-1,0\n".parse().unwrap();
        let (group, libs) = board.group_and_liberties((0, 0), true);
        assert_eq!(group.len(), 3);
        assert_eq!(libs, 2, "liberties at (0,2) and (1,2)");

        let (group, libs) = board.group_and_liberties((1, 0), true);
        assert_eq!(group, vec![(1, 0)]);
        assert_eq!(libs, 1);

        assert_eq!(board.group_and_liberties((2, 2), true), (Vec::new(), 0));
    }

    #[test]
    fn test_reserved_points_are_not_liberties() {
        // X b
        // . O
        let board: Board = "1,2\n0,-1\n".parse().unwrap();
        assert_eq!(board.group_and_liberties((0, 0), true).1, 1);
        assert_eq!(board.group_and_liberties((0, 0), false).1, 2);
        // O's only empty neighbour is (1,0); the Black marker does not count.
        assert_eq!(board.group_and_liberties((1, 1), true).1, 1);
        assert_eq!(board.group_and_liberties((1, 1), false).1, 2);

        assert!(Cell::Reserved(Player::Black).is_vacant_for(Player::Black, true));
        assert!(!Cell::Reserved(Player::Black).is_liberty(true));
        assert!(Cell::Reserved(Player::Black).is_liberty(false));
    }

    #[test]
    fn test_display() {
        let board: Board = "1,-1\n2,0\n".parse().unwrap();
        assert_eq!(board.to_string(), "X O \nb . \n");
    }
}
