use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::types::{Collection, RawCollections};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no snapshot at {}", .0.display())]
    NotFound(PathBuf),

    #[error("snapshot {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to read snapshot {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write snapshot {}: {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {collection} snapshot: {source}")]
    Encode {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

impl SnapshotError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, SnapshotError::NotFound(_))
    }
}

/// Outcome of saving all collections, one entry per collection.
#[derive(Debug, Default)]
pub struct SaveReport {
    pub saved: Vec<Collection>,
    pub failed: Vec<(Collection, SnapshotError)>,
}

impl SaveReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.saved.len() == Collection::ALL.len()
    }
}

/// One JSON file per collection inside a single directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.name()))
    }

    /// Serializes `data` and overwrites the collection's file.
    ///
    /// The JSON is written to a temporary sibling first and renamed into
    /// place, so a crash mid-write leaves the previous snapshot intact.
    pub async fn save<T: Serialize>(
        &self,
        collection: Collection,
        data: &T,
    ) -> Result<(), SnapshotError> {
        let path = self.path_for(collection);
        async_fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| SnapshotError::WriteFailed {
                path: self.dir.clone(),
                source,
            })?;

        let json = serde_json::to_vec_pretty(data)
            .map_err(|source| SnapshotError::Encode { collection, source })?;

        let tmp = path.with_extension("json.tmp");
        async_fs::write(&tmp, json)
            .await
            .map_err(|source| SnapshotError::WriteFailed {
                path: tmp.clone(),
                source,
            })?;
        async_fs::rename(&tmp, &path)
            .await
            .map_err(|source| SnapshotError::WriteFailed {
                path: path.clone(),
                source,
            })?;

        debug!(collection = %collection, path = %path.display(), "snapshot written");
        Ok(())
    }

    pub async fn load<T: DeserializeOwned>(
        &self,
        collection: Collection,
    ) -> Result<T, SnapshotError> {
        let path = self.path_for(collection);
        let content = match async_fs::read(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(SnapshotError::NotFound(path)),
            Err(source) => return Err(SnapshotError::ReadFailed { path, source }),
        };

        serde_json::from_slice(&content).map_err(|source| SnapshotError::Corrupt { path, source })
    }

    /// Saves the part of `raw` that belongs to `collection`.
    pub async fn save_collection(
        &self,
        collection: Collection,
        raw: &RawCollections,
    ) -> Result<(), SnapshotError> {
        match collection {
            Collection::Artists => self.save(collection, &raw.artists).await,
            Collection::Relations => self.save(collection, &raw.relations).await,
            Collection::Locations => self.save(collection, &raw.locations).await,
        }
    }

    /// Saves every collection, each attempt independent of the others.
    pub async fn save_all(&self, raw: &RawCollections) -> SaveReport {
        let mut report = SaveReport::default();
        for collection in Collection::ALL {
            match self.save_collection(collection, raw).await {
                Ok(()) => report.saved.push(collection),
                Err(e) => {
                    warn!(collection = %collection, error = %e, "snapshot save failed");
                    report.failed.push((collection, e));
                }
            }
        }
        report
    }

    /// Loads every collection that can be loaded.
    ///
    /// A missing or unreadable file leaves that collection at its default
    /// and is only logged, so startup always gets something to serve.
    pub async fn load_all(&self) -> RawCollections {
        let mut raw = RawCollections::default();

        match self.load(Collection::Artists).await {
            Ok(artists) => raw.artists = artists,
            Err(e) => log_load_failure(Collection::Artists, &e),
        }
        match self.load(Collection::Relations).await {
            Ok(relations) => raw.relations = relations,
            Err(e) => log_load_failure(Collection::Relations, &e),
        }
        match self.load(Collection::Locations).await {
            Ok(locations) => raw.locations = locations,
            Err(e) => log_load_failure(Collection::Locations, &e),
        }

        if !raw.is_empty() {
            info!(
                artists = raw.artists.len(),
                relations = raw.relations.index.len(),
                locations = raw.locations.index.len(),
                "snapshot loaded"
            );
        }
        raw
    }
}

fn log_load_failure(collection: Collection, error: &SnapshotError) {
    if error.is_not_found() {
        info!(collection = %collection, "no snapshot on disk, starting empty");
    } else {
        warn!(collection = %collection, error = %error, "snapshot unusable, starting empty");
    }
}
