use crate::error::Result;
use crate::status::DeliverableStatus;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Persistence boundary for the deliverable aggregate.
///
/// `load` never reports a missing aggregate as an error: it returns an empty
/// one instead. `save` overwrites the whole aggregate. No locking is provided;
/// concurrent writers race and the last save wins.
pub trait DeliverableRepository {
    fn exists(&self) -> Result<bool>;
    fn load(&self) -> Result<DeliverableStatus>;
    fn save(&self, status: &DeliverableStatus) -> Result<()>;
}

impl<R: DeliverableRepository + ?Sized> DeliverableRepository for &R {
    fn exists(&self) -> Result<bool> {
        (**self).exists()
    }

    fn load(&self) -> Result<DeliverableStatus> {
        (**self).load()
    }

    fn save(&self, status: &DeliverableStatus) -> Result<()> {
        (**self).save(status)
    }
}

// ---------------------------------------------------------------------------
// FileRepository
// ---------------------------------------------------------------------------

/// Stores the aggregate as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Repository at the status file configured for `root`.
    pub fn for_root(root: &Path) -> Result<Self> {
        let cfg = crate::config::Config::load(root)?;
        Ok(Self::new(cfg.status_path(root)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeliverableRepository for FileRepository {
    fn exists(&self) -> Result<bool> {
        Ok(self.path.is_file())
    }

    fn load(&self) -> Result<DeliverableStatus> {
        if !self.path.exists() {
            return Ok(DeliverableStatus::new());
        }
        let data = std::fs::read_to_string(&self.path)?;
        let status: DeliverableStatus = serde_json::from_str(&data)?;
        Ok(status)
    }

    fn save(&self, status: &DeliverableStatus) -> Result<()> {
        let mut data = serde_json::to_string_pretty(status)?;
        data.push('\n');
        crate::io::atomic_write(&self.path, data.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// MemoryRepository
// ---------------------------------------------------------------------------

/// In-process repository. Counts saves so callers can check that rejected
/// commands never persisted anything.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    stored: Mutex<Option<DeliverableStatus>>,
    saves: AtomicUsize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(status: DeliverableStatus) -> Self {
        Self {
            stored: Mutex::new(Some(status)),
            saves: AtomicUsize::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<DeliverableStatus>> {
        // A poisoned lock still holds a complete aggregate: saves replace it whole.
        self.stored.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl DeliverableRepository for MemoryRepository {
    fn exists(&self) -> Result<bool> {
        Ok(self.lock().is_some())
    }

    fn load(&self) -> Result<DeliverableStatus> {
        Ok(self.lock().clone().unwrap_or_default())
    }

    fn save(&self, status: &DeliverableStatus) -> Result<()> {
        *self.lock() = Some(status.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
