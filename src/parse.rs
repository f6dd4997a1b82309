use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{Cell, Grid, Limits, Maze, Pos};

/// A single reason a maze text was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("maze is empty")]
    Empty,
    #[error("maze has {rows} rows, at most {max} allowed")]
    TooManyRows { rows: usize, max: u8 },
    #[error("row {row} has {width} columns, at most {max} allowed")]
    RowTooWide { row: usize, width: usize, max: u8 },
    #[error("row {row} has {width} columns, expected {expected}")]
    Ragged {
        row: usize,
        width: usize,
        expected: usize,
    },
    #[error("invalid character {ch:?} at ({row},{col})")]
    InvalidChar { ch: char, row: usize, col: usize },
    #[error("expected exactly one start 'S', found {0}")]
    StartCount(usize),
    #[error("expected exactly one goal 'G', found {0}")]
    GoalCount(usize),
}

/// Every violation found in a rejected maze, in rule order: empty text, over-wide
/// rows, too many rows, ragged rows, invalid characters, start count, goal count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    violations: Vec<Violation>,
}

impl ParseError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i != 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl FromStr for Maze {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s, &Limits::default())
    }
}

pub fn parse(text: &str, limits: &Limits) -> Result<Maze, ParseError> {
    let text = text.trim_matches(&['\r', '\n'][..]);
    let rows = text
        .lines()
        .map(|line| line.chars().collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut violations = Vec::new();

    if text.is_empty() {
        violations.push(Violation::Empty);
    }

    for (row, line) in rows.iter().enumerate() {
        if line.len() > limits.max_cols as usize {
            violations.push(Violation::RowTooWide {
                row,
                width: line.len(),
                max: limits.max_cols,
            });
        }
    }
    if rows.len() > limits.max_rows as usize {
        violations.push(Violation::TooManyRows {
            rows: rows.len(),
            max: limits.max_rows,
        });
    }
    let width = rows.first().map_or(0, |line| line.len());
    for (row, line) in rows.iter().enumerate() {
        if line.len() != width {
            violations.push(Violation::Ragged {
                row,
                width: line.len(),
                expected: width,
            });
        }
    }

    let mut cells = Vec::with_capacity(rows.len() * width);
    let mut starts = Vec::new();
    let mut goals = Vec::new();
    for (row, line) in rows.iter().enumerate() {
        for (col, &ch) in line.iter().enumerate() {
            let cell = match ch {
                'X' => Cell::Wall,
                '_' => Cell::Open,
                'S' => {
                    starts.push((row, col));
                    Cell::Start
                }
                'G' => {
                    goals.push((row, col));
                    Cell::Goal
                }
                _ => {
                    violations.push(Violation::InvalidChar { ch, row, col });
                    continue;
                }
            };
            cells.push(cell);
        }
    }

    if starts.len() != 1 {
        violations.push(Violation::StartCount(starts.len()));
    }
    if goals.len() != 1 {
        violations.push(Violation::GoalCount(goals.len()));
    }

    if !violations.is_empty() {
        return Err(ParseError { violations });
    }

    // Both limits fit in `u8`, so every coordinate does too.
    let to_pos = |(row, col): (usize, usize)| Pos(row as u8, col as u8);
    Ok(Maze {
        grid: Grid::new(rows.len() as u8, width as u8, cells.into()),
        start: to_pos(starts[0]),
        goal: to_pos(goals[0]),
    })
}
