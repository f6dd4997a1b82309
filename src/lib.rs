use std::ops::Index;

use arrayvec::ArrayVec;

mod fmt;
pub mod generate;
mod parse;
pub mod service;
pub mod solve;
pub mod store;

pub use fmt::Overlay;
pub use parse::{parse, ParseError, Violation};
pub use solve::{solve, Path, Strategy, UnknownStrategy};

/// Size bounds a maze must fit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_rows: u8,
    pub max_cols: u8,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_rows: 20,
            max_cols: 20,
        }
    }
}

/// A parsed maze: the grid plus the unique start and goal cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Maze {
    pub grid: Grid,
    pub start: Pos,
    pub goal: Pos,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    height: u8,
    width: u8,
    cells: Box<[Cell]>,
}

impl Index<Pos> for Grid {
    type Output = Cell;
    fn index(&self, pos: Pos) -> &Self::Output {
        let idx = pos.0 as usize * self.width as usize + pos.1 as usize;
        &self.cells[idx]
    }
}

impl Grid {
    fn new(height: u8, width: u8, cells: Box<[Cell]>) -> Self {
        assert_eq!(
            cells.len(),
            height as usize * width as usize,
            "grid must be rectangular",
        );
        Self {
            height,
            width,
            cells,
        }
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn contains(&self, pos: Pos) -> bool {
        pos.0 < self.height && pos.1 < self.width
    }

    pub fn get(&self, pos: Pos) -> Option<Cell> {
        self.contains(pos).then(|| self[pos])
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, Cell)> + '_ {
        let width = self.width as usize;
        self.cells
            .iter()
            .copied()
            .enumerate()
            .map(move |(i, cell)| (Pos((i / width) as u8, (i % width) as u8), cell))
    }

    pub fn sibling_pos(&self, pos: Pos, dir: Direction) -> Option<Pos> {
        let (dr, dc) = dir.offset();
        let row = pos.0.checked_add_signed(dr)?;
        let col = pos.1.checked_add_signed(dc)?;
        let pos = Pos(row, col);
        self.contains(pos).then_some(pos)
    }

    /// Walkable neighbours of `pos`, in `Direction::ALL` order.
    pub fn neighbors(&self, pos: Pos) -> ArrayVec<Pos, 4> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.sibling_pos(pos, dir))
            .filter(|&next| self[next].is_walkable())
            .collect()
    }
}

/// A `(row, column)` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos(pub u8, pub u8);

impl Pos {
    pub fn is_adjacent(self, other: Pos) -> bool {
        self.0.abs_diff(other.0) + self.1.abs_diff(other.1) == 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Wall,
    Open,
    Start,
    Goal,
}

impl Cell {
    pub fn is_walkable(&self) -> bool {
        !matches!(self, Self::Wall)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Exploration order shared by every search strategy.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    fn offset(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn grid(text: &str) -> Grid {
        text.parse::<Maze>().unwrap().grid
    }

    #[rstest]
    #[case(Pos(0, 0), Direction::Up, None)]
    #[case(Pos(0, 0), Direction::Left, None)]
    #[case(Pos(0, 0), Direction::Down, Some(Pos(1, 0)))]
    #[case(Pos(1, 2), Direction::Right, None)]
    #[case(Pos(1, 2), Direction::Down, None)]
    #[case(Pos(1, 2), Direction::Up, Some(Pos(0, 2)))]
    fn sibling_stays_in_bounds(
        #[case] pos: Pos,
        #[case] dir: Direction,
        #[case] want: Option<Pos>,
    ) {
        assert_eq!(grid("S_X\n__G").sibling_pos(pos, dir), want);
    }

    #[test]
    fn neighbors_skip_walls_in_direction_order() {
        let grid = grid("_X_\n_S_\n_G_");
        assert_eq!(
            grid.neighbors(Pos(1, 1)).as_slice(),
            &[Pos(2, 1), Pos(1, 0), Pos(1, 2)],
        );
    }

    #[test]
    fn cells_are_row_major() {
        let grid = grid("SX\n_G");
        let cells = grid.cells().collect::<Vec<_>>();
        assert_eq!(
            cells,
            [
                (Pos(0, 0), Cell::Start),
                (Pos(0, 1), Cell::Wall),
                (Pos(1, 0), Cell::Open),
                (Pos(1, 1), Cell::Goal),
            ],
        );
    }

    #[rstest]
    #[case(255, 1)]
    #[case(1, 255)]
    #[case(255, 255)]
    fn cells_cover_the_largest_grids(#[case] height: u8, #[case] width: u8) {
        let limits = Limits {
            max_rows: height,
            max_cols: width,
        };
        let mut text = vec![vec!['_'; width as usize]; height as usize];
        text[0][0] = 'S';
        text[height as usize - 1][width as usize - 1] = 'G';
        let text = text
            .into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");
        let grid = crate::parse(&text, &limits).unwrap().grid;

        let cells = grid.cells().collect::<Vec<_>>();
        assert_eq!(cells.len(), height as usize * width as usize);
        assert_eq!(cells.last(), Some(&(Pos(height - 1, width - 1), Cell::Goal)));
        assert_eq!(grid.to_string(), text);
    }

    #[test]
    fn get_rejects_out_of_bounds() {
        let grid = grid("SG");
        assert_eq!(grid.get(Pos(0, 1)), Some(Cell::Goal));
        assert_eq!(grid.get(Pos(1, 0)), None);
        assert_eq!(grid.get(Pos(0, 2)), None);
    }

    #[rstest]
    #[case(Pos(1, 1), Pos(0, 1), true)]
    #[case(Pos(1, 1), Pos(1, 2), true)]
    #[case(Pos(1, 1), Pos(2, 2), false)]
    #[case(Pos(1, 1), Pos(1, 1), false)]
    #[case(Pos(1, 1), Pos(1, 3), false)]
    fn adjacency_is_four_directional(#[case] a: Pos, #[case] b: Pos, #[case] want: bool) {
        assert_eq!(a.is_adjacent(b), want);
    }
}
