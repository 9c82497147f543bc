//! JSON-file device storage.
//!
//! Values live in one JSON object keyed by storage key. Writes go to a
//! hidden temporary file in the same directory and are renamed over the
//! target, so readers never observe a partial file.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::debug;

use crate::domain::ports::{DeviceStorage, StorageError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Device storage persisted to a JSON file.
pub struct JsonFileStorage {
    dir: Dir,
    file_name: String,
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Open storage at `path`, creating the parent directory when missing.
    ///
    /// The file itself is created on first write.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when the path has no file name or the
    /// parent directory cannot be opened.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                StorageError::io(format!("'{}' must name a UTF-8 file", path.display()))
            })?
            .to_owned();
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(|err| {
            StorageError::io(format!("create '{}': {err}", parent.display()))
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| StorageError::io(format!("open '{}': {err}", parent.display())))?;
        Ok(Self {
            dir,
            file_name,
            write_lock: Mutex::new(()),
        })
    }

    fn read_values(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(StorageError::io(format!(
                    "read '{}': {err}",
                    self.file_name
                )));
            }
        };
        serde_json::from_str(&contents)
            .map_err(|err| StorageError::decode(format!("'{}': {err}", self.file_name)))
    }

    fn write_values(&self, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(values)
            .map_err(|err| StorageError::encode(format!("'{}': {err}", self.file_name)))?;
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(".{}.tmp.{}.{counter}", self.file_name, std::process::id());

        if let Err(err) = self.write_temp(&tmp_name, &contents) {
            drop(self.dir.remove_file(&tmp_name));
            return Err(StorageError::io(format!("write '{tmp_name}': {err}")));
        }
        self.dir
            .rename(&tmp_name, &self.dir, &self.file_name)
            .map_err(|err| {
                drop(self.dir.remove_file(&tmp_name));
                StorageError::io(format!("replace '{}': {err}", self.file_name))
            })?;
        debug!(file = %self.file_name, "device storage written");
        Ok(())
    }

    fn write_temp(&self, tmp_name: &str, contents: &str) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        let mut file = self.dir.open_with(tmp_name, &options)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    }
}

impl DeviceStorage for JsonFileStorage {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_values()?.remove(key))
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_strings(&[(key, value)])
    }

    fn set_strings(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut values = self.read_values()?;
        values.extend(
            entries
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned())),
        );
        self.write_values(&values)
    }
}
