//! Random demo mazes. Not guaranteed to be solvable.

use anyhow::{ensure, Result};
use rand::Rng;

pub fn generate(width: u8, height: u8, rng: &mut impl Rng) -> Result<String> {
    let cells = width as usize * height as usize;
    ensure!(
        cells >= 2,
        "A {width}x{height} maze cannot hold both a start and a goal",
    );

    let mut grid = (0..cells)
        .map(|_| if rng.random_bool(0.5) { 'X' } else { '_' })
        .collect::<Vec<_>>();
    let start = rng.random_range(0..cells);
    let goal = loop {
        let goal = rng.random_range(0..cells);
        if goal != start {
            break goal;
        }
    };
    grid[start] = 'S';
    grid[goal] = 'G';

    let rows = grid
        .chunks(width as usize)
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>();
    Ok(rows.join("\n"))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    use super::*;
    use crate::{Limits, Maze};

    #[rstest]
    #[case(2, 1)]
    #[case(10, 10)]
    #[case(20, 7)]
    fn output_parses(#[case] width: u8, #[case] height: u8) {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let text = generate(width, height, &mut rng).unwrap();
            let maze = text.parse::<Maze>().unwrap();
            assert_eq!(maze.grid.width(), width);
            assert_eq!(maze.grid.height(), height);
        }
    }

    #[test]
    fn same_seed_same_maze() {
        let a = generate(12, 9, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate(12, 9, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn too_small() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate(1, 1, &mut rng).is_err());
        assert!(generate(0, 5, &mut rng).is_err());
    }

    #[test]
    fn default_limits_fit() {
        let limits = Limits::default();
        let text = generate(
            limits.max_cols,
            limits.max_rows,
            &mut StdRng::seed_from_u64(1),
        )
        .unwrap();
        assert!(crate::parse(&text, &limits).is_ok());
    }
}
