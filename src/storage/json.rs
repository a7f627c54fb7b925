//! JSON file storage implementation
//!
//! One pretty-printed file per page record, named after the page title, plus
//! a single checkpoint file, all inside the crawl's directory.

use crate::state::CrawlState;
use crate::storage::checkpoint::{CheckpointFile, CHECKPOINT_FILE_NAME};
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{sanitize_file_name, PageRecord};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory-backed storage for one crawl instance
#[derive(Debug, Clone)]
pub struct JsonStorage {
    directory: PathBuf,
}

impl JsonStorage {
    /// Opens storage rooted at `directory`, creating it if necessary
    ///
    /// # Arguments
    ///
    /// * `directory` - The crawl's output directory
    ///
    /// # Returns
    ///
    /// * `Ok(JsonStorage)` - The directory exists and is ready
    /// * `Err(StorageError)` - The directory could not be created
    pub fn open(directory: impl Into<PathBuf>) -> StorageResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory)?;
        Ok(Self { directory })
    }

    /// Returns the directory this storage writes into
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Returns the path of the checkpoint file
    pub fn checkpoint_path(&self) -> PathBuf {
        self.directory.join(CHECKPOINT_FILE_NAME)
    }

    /// Returns the path a record with `title` is written to
    pub fn page_path(&self, title: &str) -> PathBuf {
        self.directory
            .join(format!("{}.json", sanitize_file_name(title)))
    }

    /// Deletes the checkpoint so the next crawl starts from scratch
    ///
    /// Page records already written are left in place.
    pub fn reset(&self) -> StorageResult<()> {
        match fs::remove_file(self.checkpoint_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Storage for JsonStorage {
    fn store_page(&mut self, record: &PageRecord) -> StorageResult<PathBuf> {
        if record.title.is_empty() {
            return Err(StorageError::EmptyTitle {
                url: record.url.clone(),
            });
        }

        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        record.serialize(&mut serializer)?;

        let path = self.page_path(&record.title);
        fs::write(&path, buffer)?;

        Ok(path)
    }

    fn save_checkpoint(&mut self, state: &CrawlState) -> StorageResult<()> {
        let json = serde_json::to_vec(&CheckpointFile::from(state))?;

        // Write beside the real file and swap it in, so a crash mid-write
        // leaves the previous checkpoint intact.
        let path = self.checkpoint_path();
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;

        Ok(())
    }

    fn load_checkpoint(&self) -> StorageResult<Option<CrawlState>> {
        let content = match fs::read_to_string(self.checkpoint_path()) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let file: CheckpointFile = serde_json::from_str(&content)?;
        Ok(Some(file.into()))
    }
}
