//! Parse, solve and record submitted mazes.

use thiserror::Error;
use uuid::Uuid;

use crate::store::{MazeRecord, Repository, StoreError};
use crate::{parse, Limits, ParseError, Strategy};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("invalid maze: {0}")]
    Invalid(#[from] ParseError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct MazeService<R> {
    repository: R,
    strategy: Strategy,
    limits: Limits,
}

impl<R: Repository> MazeService<R> {
    pub fn new(repository: R, strategy: Strategy, limits: Limits) -> Self {
        Self {
            repository,
            strategy,
            limits,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Solve `text` and store the result.
    ///
    /// Returns `Ok(None)` for a well-formed maze without a route; nothing is
    /// stored in that case.
    pub fn submit(&self, text: &str) -> Result<Option<MazeRecord>, ServiceError> {
        let maze = parse(text, &self.limits).map_err(|err| {
            tracing::warn!(%err, "rejected maze");
            err
        })?;

        let Some(path) = self.strategy.solve(&maze.grid, maze.start, maze.goal, || {}) else {
            tracing::info!(strategy = %self.strategy, "no path found");
            return Ok(None);
        };

        let record = MazeRecord::new(text, path.to_string());
        self.repository.add(record.clone())?;
        tracing::info!(id = %record.id, steps = path.len() - 1, "maze solved");
        Ok(Some(record))
    }

    pub fn get(&self, id: Uuid) -> Result<MazeRecord, ServiceError> {
        Ok(self.repository.get(id)?)
    }

    pub fn all(&self) -> Vec<MazeRecord> {
        self.repository.all()
    }
}
