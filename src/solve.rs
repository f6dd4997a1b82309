use std::ops::Deref;
use std::str::FromStr;

use fxhash::FxHashSet;
use thiserror::Error;

use crate::{Grid, Pos};

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

/// A route from start to goal, both ends included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<Pos>);

impl Path {
    pub fn into_inner(self) -> Vec<Pos> {
        self.0
    }
}

impl Deref for Path {
    type Target = [Pos];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Level-order search; always returns a shortest path.
    Bfs,
    /// Stack-based search, each entry owning its partial path.
    Dfs,
    /// Backtracking search over a single shared path buffer.
    DfsRecursive,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown strategy {0:?}, expected one of: bfs, dfs, dfs-recursive")]
pub struct UnknownStrategy(String);

impl Strategy {
    pub const ALL: [Self; 3] = [Self::Bfs, Self::Dfs, Self::DfsRecursive];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "bfs",
            Strategy::Dfs => "dfs",
            Strategy::DfsRecursive => "dfs-recursive",
        }
    }

    /// Search `grid`, calling `on_step` once per expanded cell.
    pub fn solve(
        self,
        grid: &Grid,
        start: Pos,
        goal: Pos,
        mut on_step: impl FnMut(),
    ) -> Option<Path> {
        if !is_endpoint(grid, start) || !is_endpoint(grid, goal) {
            tracing::debug!(?start, ?goal, "start or goal is not a walkable cell");
            return None;
        }

        let mut explored = 0usize;
        let on_step = || {
            explored += 1;
            on_step();
        };
        let path = match self {
            Strategy::Bfs => bfs(grid, start, goal, on_step),
            Strategy::Dfs => dfs(grid, start, goal, on_step),
            Strategy::DfsRecursive => dfs_backtrack(grid, start, goal, on_step),
        };
        tracing::debug!(
            strategy = self.name(),
            explored,
            len = path.as_ref().map(|path| path.len()),
            "search finished",
        );
        path
    }
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| UnknownStrategy(s.to_owned()))
    }
}

pub fn solve(grid: &Grid, start: Pos, goal: Pos, strategy: Strategy) -> Option<Path> {
    strategy.solve(grid, start, goal, || {})
}

fn is_endpoint(grid: &Grid, pos: Pos) -> bool {
    grid.get(pos).map_or(false, |cell| cell.is_walkable())
}

/// Breadth-first search. The insertion-ordered parent map doubles as the queue.
pub fn bfs(grid: &Grid, start: Pos, goal: Pos, mut on_step: impl FnMut()) -> Option<Path> {
    let mut parent = IndexMap::default();
    parent.insert(start, !0usize); // Sentinel.

    let mut cursor = 0;
    loop {
        #[cfg(feature = "coz")]
        coz::scope!("Expand");

        let (&pos, _) = parent.get_index(cursor)?;
        on_step();

        if pos == goal {
            break;
        }
        for next in grid.neighbors(pos) {
            parent.entry(next).or_insert(cursor);
        }
        cursor += 1;
    }

    let mut path = std::iter::successors(Some(cursor), |&i| {
        let (_, &p) = parent.get_index(i)?;
        (p != !0usize).then_some(p)
    })
    .filter_map(|i| parent.get_index(i).map(|(&pos, _)| pos))
    .collect::<Vec<_>>();
    path.reverse();
    Some(Path(path))
}

/// Iterative depth-first search.
pub fn dfs(grid: &Grid, start: Pos, goal: Pos, mut on_step: impl FnMut()) -> Option<Path> {
    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut stack = vec![(start, vec![start])];

    while let Some((pos, path)) = stack.pop() {
        on_step();

        if pos == goal {
            return Some(Path(path));
        }
        for next in grid.neighbors(pos) {
            if visited.insert(next) {
                let mut next_path = path.clone();
                next_path.push(next);
                stack.push((next, next_path));
            }
        }
    }
    None
}

/// Backtracking depth-first search, run on an explicit frame stack.
///
/// `path[i]` is the cell entered at depth `i` and `next_dir[i]` the number of its
/// neighbours already tried. Both grow on entry and shrink on backtrack together.
/// Depth is capped at the cell count of the grid.
pub fn dfs_backtrack(
    grid: &Grid,
    start: Pos,
    goal: Pos,
    mut on_step: impl FnMut(),
) -> Option<Path> {
    let max_depth = grid.height() as usize * grid.width() as usize;

    let mut visited = FxHashSet::default();
    visited.insert(start);
    let mut path = vec![start];
    let mut next_dir = vec![0usize];
    on_step();
    if start == goal {
        return Some(Path(path));
    }

    while let (Some(&pos), Some(tried)) = (path.last(), next_dir.last_mut()) {
        let neighbors = grid.neighbors(pos);
        let Some(&next) = neighbors.get(*tried) else {
            // Backtrack.
            path.pop();
            next_dir.pop();
            continue;
        };
        *tried += 1;

        if !visited.insert(next) {
            continue;
        }
        if path.len() >= max_depth {
            tracing::warn!(max_depth, "search depth exceeded");
            return None;
        }

        on_step();
        path.push(next);
        next_dir.push(0);
        if next == goal {
            return Some(Path(path));
        }
    }
    None
}
