//! JSONL (JSON Lines) storage.
//!
//! Each line is a valid JSON object representing one entity.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};
use crate::models::{Application, Player};

/// Entity types for JSONL storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityType {
    Player,
    Application,
}

impl EntityType {
    /// Get the filename for this entity type.
    pub fn filename(&self) -> &'static str {
        match self {
            EntityType::Player => "players.jsonl",
            EntityType::Application => "applications.jsonl",
        }
    }
}

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a writer for an entity type's file.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.data_dir.join(entity.filename()))
    }

    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Append a single entity to the file.
    pub fn append(&self, entity: &T) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut writer = BufWriter::new(file);
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        debug!("Appended entity to {:?}", self.path);
        Ok(())
    }

    /// Append several entities in one open.
    pub fn append_batch(&self, entities: &[T]) -> Result<usize, StorageError> {
        if entities.is_empty() {
            return Ok(0);
        }
        self.ensure_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let count = write_lines(file, entities)?;

        info!("Appended {} entities to {:?}", count, self.path);
        Ok(count)
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let count = write_lines(File::create(&self.path)?, entities)?;

        info!("Wrote {} entities to {:?}", count, self.path);
        Ok(count)
    }
}

fn write_lines<T: Serialize>(file: File, entities: &[T]) -> Result<usize, StorageError> {
    let mut writer = BufWriter::new(file);
    for entity in entities {
        serde_json::to_writer(&mut writer, entity)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(entities.len())
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Create a reader for an entity type's file.
    pub fn for_entity(config: &StorageConfig, entity: EntityType) -> Self {
        Self::new(config.data_dir.join(entity.filename()))
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entities from the file. A missing file reads as empty;
    /// lines that fail to parse are skipped.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!("Failed to parse line {} in {:?}: {}", idx + 1, self.path, e);
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }

    /// Read entities matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }

    /// Count non-empty lines in the file.
    pub fn count(&self) -> Result<usize, StorageError> {
        if !self.path.exists() {
            return Err(StorageError::PathNotFound(self.path.clone()));
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let count = reader
            .lines()
            .map_while(Result::ok)
            .filter(|l| !l.trim().is_empty())
            .count();

        Ok(count)
    }
}

/// Remove duplicate entries, keeping the last occurrence of each key but
/// the position of its first.
pub fn dedup_by_key<T, F>(items: Vec<T>, key_fn: F) -> Vec<T>
where
    F: Fn(&T) -> String,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<T> = Vec::with_capacity(items.len());

    for item in items {
        let key = key_fn(&item);
        match positions.get(&key) {
            Some(&pos) => out[pos] = item,
            None => {
                positions.insert(key, out.len());
                out.push(item);
            }
        }
    }

    out
}

/// Read the local player snapshot, filling in missing IDs and dropping
/// duplicate players.
pub fn read_players(config: &StorageConfig) -> Result<Vec<Player>, StorageError> {
    let players = JsonlReader::<Player>::for_entity(config, EntityType::Player).read_all()?;
    let players: Vec<Player> = players.into_iter().map(Player::normalized).collect();
    Ok(dedup_by_key(players, |p| p.player_id().to_string()))
}

/// Replace the local player snapshot.
pub fn write_players(config: &StorageConfig, players: &[Player]) -> Result<usize, StorageError> {
    JsonlWriter::for_entity(config, EntityType::Player).write_all(players)
}

/// Append one application.
pub fn append_application(
    config: &StorageConfig,
    application: &Application,
) -> Result<(), StorageError> {
    JsonlWriter::for_entity(config, EntityType::Application).append(application)
}

/// All stored applications, newest first.
pub fn read_applications(config: &StorageConfig) -> Result<Vec<Application>, StorageError> {
    let mut apps =
        JsonlReader::<Application>::for_entity(config, EntityType::Application).read_all()?;
    apps.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    Ok(apps)
}
