use std::fmt;

use fxhash::FxHashSet;

use crate::{Cell, Grid, Maze, Path, Pos, Strategy};

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, cell) in self.cells() {
            if pos.1 == 0 && pos.0 != 0 {
                f.write_str("\n")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cell::Wall => "X",
            Cell::Open => "_",
            Cell::Start => "S",
            Cell::Goal => "G",
        })
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.0, self.1)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pos) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{pos}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renders a grid with the open cells of a path marked by `mark`.
pub struct Overlay<'a> {
    grid: &'a Grid,
    on_path: FxHashSet<Pos>,
    mark: char,
}

impl Grid {
    pub fn overlay(&self, path: &Path, mark: char) -> Overlay<'_> {
        Overlay {
            grid: self,
            on_path: path.iter().copied().collect(),
            mark,
        }
    }
}

impl fmt::Display for Overlay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (pos, cell) in self.grid.cells() {
            if pos.1 == 0 && pos.0 != 0 {
                f.write_str("\n")?;
            }
            if cell == Cell::Open && self.on_path.contains(&pos) {
                write!(f, "{}", self.mark)?;
            } else {
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}
