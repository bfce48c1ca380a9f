//! Token persistence capability
//!
//! The store maps cache keys to serialized tokens. The orchestrator never
//! cares what backs it: browser local storage, cookies, or the JSON file
//! implemented here for desktop hosts.
//!
//! `FileTokenStore` keeps the map in memory and rewrites the whole file on
//! every change using temp file + rename, so a crash mid-write never leaves
//! a truncated token file behind.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use common::settings::StoreSettings;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// String key/value persistence for serialized tokens.
pub trait TokenStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Remove every entry, not only those for one request.
    fn clear(&self) -> Result<()>;
}

/// Process-local store; contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.borrow_mut().clear();
        Ok(())
    }
}

/// JSON file store: `{ "<cache key>": "<token>-----<expires>", ... }`.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: RefCell<HashMap<String, String>>,
}

impl FileTokenStore {
    /// Open the token file, creating it as `{}` if it doesn't exist.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| Error::Io(format!("reading token file: {e}")))?;
            let entries: HashMap<String, String> = serde_json::from_str(&contents)
                .map_err(|e| Error::Store(format!("parsing token file: {e}")))?;
            info!(path = %path.display(), tokens = entries.len(), "loaded tokens");
            entries
        } else {
            info!(path = %path.display(), "token file not found, starting empty");
            let entries = HashMap::new();
            write_atomic(&path, &entries)?;
            entries
        };

        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    // The in-memory map only changes once the file write has succeeded.
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut next = self.entries.borrow().clone();
        next.insert(key.to_owned(), value.to_owned());
        write_atomic(&self.path, &next)?;
        *self.entries.borrow_mut() = next;
        debug!(key, "stored token");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        write_atomic(&self.path, &HashMap::new())?;
        self.entries.borrow_mut().clear();
        debug!(path = %self.path.display(), "cleared tokens");
        Ok(())
    }
}

/// Open the store described by the settings: file-backed when a path is set,
/// in-memory otherwise.
pub fn open(settings: &StoreSettings) -> Result<Rc<dyn TokenStore>> {
    Ok(match &settings.path {
        Some(path) => Rc::new(FileTokenStore::open(path.clone())?),
        None => Rc::new(MemoryTokenStore::new()),
    })
}

/// Write the token map atomically with 0600 permissions on unix.
fn write_atomic(path: &Path, entries: &HashMap<String, String>) -> Result<()> {
    let json = serde_json::to_string_pretty(entries)
        .map_err(|e| Error::Store(format!("serializing tokens: {e}")))?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let tmp_path = dir.join(format!(".tokens.tmp.{}", std::process::id()));

    std::fs::write(&tmp_path, json.as_bytes())
        .map_err(|e| Error::Io(format!("writing temp token file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))
            .map_err(|e| Error::Io(format!("setting token file permissions: {e}")))?;
    }

    std::fs::rename(&tmp_path, path)
        .map_err(|e| Error::Io(format!("renaming temp token file: {e}")))?;

    debug!(path = %path.display(), "persisted tokens");
    Ok(())
}
