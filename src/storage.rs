use crate::config;
use crate::error::AppError;
use crate::progress::UserProgress;
use log::warn;
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

/// Where the serialized ledger lives. The core only needs load/save over
/// one JSON document; anything from a file to a remote API can sit behind
/// this.
pub trait ProgressStore {
    /// `Ok(None)` means no record exists yet (a fresh install).
    fn load(&self) -> Result<Option<UserProgress>, AppError>;

    fn save(&self, progress: &UserProgress) -> Result<(), AppError>;
}

/// JSON file store, one pretty-printed document per user.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn at_default_location() -> Result<Self, AppError> {
        Ok(Self::new(config::progress_file_path()?))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<Option<UserProgress>, AppError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&content) {
            Ok(progress) => Ok(Some(progress)),
            Err(e) => {
                warn!("progress file {} is corrupt: {}", self.path.display(), e);
                Err(AppError::ParseError(e))
            }
        }
    }

    fn save(&self, progress: &UserProgress) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Serialize the whole document before touching the file; a save
        // must never write a partial record.
        let content = serde_json::to_string_pretty(progress)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Store used by tests and previews; keeps the last saved ledger in memory.
#[derive(Default)]
pub struct MemoryStore {
    saved: RefCell<Option<UserProgress>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(progress: UserProgress) -> Self {
        Self {
            saved: RefCell::new(Some(progress)),
        }
    }

    pub fn saved(&self) -> Option<UserProgress> {
        self.saved.borrow().clone()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<UserProgress>, AppError> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, progress: &UserProgress) -> Result<(), AppError> {
        *self.saved.borrow_mut() = Some(progress.clone());
        Ok(())
    }
}
