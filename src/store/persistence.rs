//! Store persistence: load/save/clear with atomic writes

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::metadata::StoreMetadata;
use crate::models::Conversation;
use crate::utils::data_dir;

const METADATA_FILENAME: &str = "collection-meta.json";
const COLLECTION_FILENAME: &str = "collection.json";

/// Persistence failure. Recovered locally: the caller logs a warning and
/// proceeds with the in-memory collection.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("no usable data directory on this platform (set CHAT_ARCHIVE_DATA_DIR)")]
    Unavailable,
    #[error("stored collection is corrupt: {0}")]
    Corrupt(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Key-value blob store for the loaded collection.
///
/// One collection at a time: `save` replaces whatever was stored before.
pub struct CollectionStore {
    dir: PathBuf,
}

impl CollectionStore {
    /// Open the store at the platform data directory, creating it if missing
    pub fn open() -> Result<Self, StorageError> {
        let dir = data_dir().ok_or(StorageError::Unavailable)?;
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open the store at an explicit directory (used by tests)
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Whether a stored collection is present (both files exist)
    pub fn exists(&self) -> bool {
        self.metadata_path().exists() && self.collection_path().exists()
    }

    /// Load the stored collection.
    ///
    /// Returns `Ok(None)` when nothing is stored, either file is missing, or
    /// the schema version does not match (the caller should re-ingest).
    /// Undecodable data is reported as [`StorageError::Corrupt`].
    pub fn load(&self) -> Result<Option<Vec<Conversation>>, StorageError> {
        let metadata_path = self.metadata_path();
        let collection_path = self.collection_path();

        if !metadata_path.exists() || !collection_path.exists() {
            return Ok(None);
        }

        let metadata_json = fs::read_to_string(&metadata_path)?;
        let metadata: StoreMetadata = serde_json::from_str(&metadata_json)
            .map_err(|e| StorageError::Corrupt(format!("metadata: {}", e)))?;

        if !metadata.is_current() {
            eprintln!(
                "Warning: stored collection has schema version {}, expected {}; ignoring it",
                metadata.version,
                super::metadata::STORE_VERSION
            );
            return Ok(None);
        }

        let bytes = fs::read(&collection_path)?;
        let conversations: Vec<Conversation> = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::Corrupt(format!("collection: {}", e)))?;

        Ok(Some(conversations))
    }

    /// Save a collection, replacing any previous one.
    ///
    /// Both files are written atomically (temp file + rename) so a crash
    /// mid-save never leaves a half-written blob behind.
    pub fn save(&self, conversations: &[Conversation]) -> Result<(), StorageError> {
        let metadata = StoreMetadata::new(conversations.len());
        let metadata_json = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::Corrupt(format!("metadata: {}", e)))?;
        self.write_atomic(METADATA_FILENAME, metadata_json.as_bytes())?;

        let bytes = serde_json::to_vec(conversations)
            .map_err(|e| StorageError::Corrupt(format!("collection: {}", e)))?;
        self.write_atomic(COLLECTION_FILENAME, &bytes)?;

        Ok(())
    }

    /// Remove the stored collection. Idempotent: clearing an empty store is
    /// not an error.
    pub fn clear(&self) -> Result<(), StorageError> {
        for filename in [METADATA_FILENAME, COLLECTION_FILENAME] {
            match fs::remove_file(self.dir.join(filename)) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn write_atomic(&self, filename: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.dir.join(filename);
        let temp = self.dir.join(format!("{}.tmp", filename));
        fs::write(&temp, bytes)?;
        fs::rename(&temp, &path)?;
        Ok(())
    }

    fn metadata_path(&self) -> PathBuf {
        self.dir.join(METADATA_FILENAME)
    }

    fn collection_path(&self) -> PathBuf {
        self.dir.join(COLLECTION_FILENAME)
    }
}
