//! Persistence slot for the item collection
//!
//! A slot is a single durable location holding the whole JSON-encoded
//! collection. It is read once at startup and overwritten on every mutation.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Result, TrackerError};

/// Key of the slot when none is configured
pub const DEFAULT_SLOT_KEY: &str = "ppe_items_v1";

/// Durable key-value location holding the serialized collection
pub trait Slot: Send + Sync {
    /// Read the slot content; `None` when nothing has been stored yet
    fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the slot content; must be durable when it returns `Ok`
    fn write(&self, bytes: &[u8]) -> Result<()>;

    /// Keep a copy of content that could not be decoded before it gets overwritten
    fn preserve_unreadable(&self, _bytes: &[u8]) -> Result<()> {
        Ok(())
    }

    /// Human-readable location for log messages
    fn describe(&self) -> String;
}

/// Slot backed by a single JSON file
pub struct FileSlot {
    file_path: PathBuf,
}

impl FileSlot {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Slot named `<key>.json` inside `dir`
    pub fn keyed(dir: impl AsRef<Path>, key: &str) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", key)))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn sibling(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.file_path.with_file_name(name)
    }
}

impl Slot for FileSlot {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.file_path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(TrackerError::persistence(
                format!("failed to read {}", self.file_path.display()),
                e,
            )),
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        let context = || format!("failed to write {}", self.file_path.display());

        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| TrackerError::persistence(context(), e))?;
        }

        // Temp file name includes the PID to avoid cross-process collisions
        let tmp_path = self.sibling(&format!(".tmp.{}", std::process::id()));
        let written = File::create(&tmp_path).and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|_| fs::rename(&tmp_path, &self.file_path)) {
            let _ = fs::remove_file(&tmp_path);
            return Err(TrackerError::persistence(context(), e));
        }
        Ok(())
    }

    fn preserve_unreadable(&self, bytes: &[u8]) -> Result<()> {
        let backup = self.sibling(".corrupt");
        fs::write(&backup, bytes).map_err(|e| {
            TrackerError::persistence(format!("failed to write {}", backup.display()), e)
        })
    }

    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }
}

/// In-memory slot; clones share the same content
#[derive(Clone, Default)]
pub struct MemorySlot {
    content: Arc<Mutex<Option<Vec<u8>>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot that starts out holding `bytes`
    pub fn with_content(bytes: impl Into<Vec<u8>>) -> Self {
        let slot = Self::default();
        *slot.lock() = Some(bytes.into());
        slot
    }

    /// Current content, if any
    pub fn content(&self) -> Option<Vec<u8>> {
        self.lock().clone()
    }

    /// Make every following write fail (e.g., to simulate a full disk)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<u8>>> {
        self.content.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Slot for MemorySlot {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.content())
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TrackerError::persistence(
                "memory slot rejected the write",
                std::io::Error::other("storage quota exceeded"),
            ));
        }
        *self.lock() = Some(bytes.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
