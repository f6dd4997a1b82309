//! Keyed storage for solved mazes.

use parking_lot::RwLock;
use thiserror::Error;
use uuid::Uuid;

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

/// A submitted maze together with its formatted solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeRecord {
    pub id: Uuid,
    pub maze: String,
    pub solution: String,
}

impl MazeRecord {
    pub fn new(maze: impl Into<String>, solution: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            maze: maze.into(),
            solution: solution.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("maze {0} already exists")]
    Duplicate(Uuid),
    #[error("maze {0} not found")]
    NotFound(Uuid),
}

/// Storage backend shared across concurrent solves.
pub trait Repository: Send + Sync {
    /// Insert a new record. Fails if the id is taken.
    fn add(&self, record: MazeRecord) -> Result<(), StoreError>;
    /// Replace an existing record.
    fn update(&self, record: MazeRecord) -> Result<(), StoreError>;
    fn delete(&self, id: Uuid) -> Result<MazeRecord, StoreError>;
    fn get(&self, id: Uuid) -> Result<MazeRecord, StoreError>;
    /// Every record, oldest first.
    fn all(&self) -> Vec<MazeRecord>;
}

#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: RwLock<IndexMap<Uuid, MazeRecord>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Repository for InMemoryRepository {
    fn add(&self, record: MazeRecord) -> Result<(), StoreError> {
        let mut records = self.records.write();
        if records.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id));
        }
        records.insert(record.id, record);
        Ok(())
    }

    fn update(&self, record: MazeRecord) -> Result<(), StoreError> {
        let mut records = self.records.write();
        let slot = records
            .get_mut(&record.id)
            .ok_or(StoreError::NotFound(record.id))?;
        *slot = record;
        Ok(())
    }

    fn delete(&self, id: Uuid) -> Result<MazeRecord, StoreError> {
        self.records
            .write()
            .shift_remove(&id)
            .ok_or(StoreError::NotFound(id))
    }

    fn get(&self, id: Uuid) -> Result<MazeRecord, StoreError> {
        self.records
            .read()
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn all(&self) -> Vec<MazeRecord> {
        self.records.read().values().cloned().collect()
    }
}
