//! Whole-document JSON file store with crash-safe replacement.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("malformed data in {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize {path}: {source}")]
    Serialize {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// A single JSON document of type `T` stored at `path`.
///
/// No locking is performed: two writers racing on the same file resolve as
/// last-write-wins.
#[derive(Debug, Clone)]
pub struct JsonFileStore<T> {
    path: PathBuf,
    _doc: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _doc: PhantomData,
        }
    }

    /// Write `default()` if the file is missing or empty. Returns true when the
    /// file was (re)initialized.
    pub fn ensure_initialized(&self, default: impl FnOnce() -> T) -> Result<bool, StoreError> {
        let needs_init = match fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(e) if e.kind() == io::ErrorKind::NotFound => true,
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if needs_init {
            log::info!("[STORE] Initializing {}", self.path.display());
            self.save(&default())?;
        }
        Ok(needs_init)
    }

    /// Read and parse the document. Fails on a missing file or malformed JSON.
    pub fn load(&self) -> Result<T, StoreError> {
        let raw = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Like `load`, but a missing or empty file is `None` instead of an error
    pub fn load_optional(&self) -> Result<Option<T>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(None),
            Ok(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StoreError::Malformed {
                    path: self.path.display().to_string(),
                    source,
                }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    /// Initialize the file with `default()` when needed, then load it
    pub fn load_or_init(&self, default: impl FnOnce() -> T) -> Result<T, StoreError> {
        self.ensure_initialized(default)?;
        self.load()
    }

    /// Replace the document on disk.
    ///
    /// The new content is written and fsynced to a temp file next to the target,
    /// then renamed over it, so readers never see a partially written document.
    pub fn save(&self, doc: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(doc).map_err(|source| StoreError::Serialize {
            path: self.path.display().to_string(),
            source,
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
            }
        }

        let temp_path = self.temp_path();
        let write_result = (|| -> io::Result<()> {
            let mut file = fs::File::create(&temp_path)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        })();

        if let Err(e) = write_result {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::io(&self.path, e));
        }
        Ok(())
    }

    /// A temp path unique to this save; concurrent saves never share one
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());
        self.path
            .with_file_name(format!("{}.tmp.{}", file_name, Uuid::new_v4().simple()))
    }
}
