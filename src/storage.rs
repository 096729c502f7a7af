use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Local;
use directories::ProjectDirs;
use log::warn;

use crate::{
    constants::{STORAGE_KEY, STORAGE_SETTINGS},
    error::StorageError,
};

/// Durable string storage addressed by a fixed key, the way the tracker
/// keeps its one snapshot.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// One JSON file per key inside a directory. Writes are atomic and the
/// previous value is rotated into `backups/`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        read_text_file(&path).map(Some)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        atomic_write(&self.path_for(key), value)
    }

    /// The removed value still lands in `backups/`.
    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        create_backup(&path)?;
        delete_file_if_exists(&path)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "sensei", "sensei-flow")
}

pub fn get_data_dir() -> PathBuf {
    let local_state = PathBuf::from(format!("./{}.json", STORAGE_KEY));
    if local_state.exists() {
        return PathBuf::from(".");
    }

    if let Some(proj_dirs) = project_dirs() {
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).ok();
        data_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_state_dir() -> Option<PathBuf> {
    let proj_dirs = project_dirs()?;
    let dir = proj_dirs.state_dir()?.to_path_buf();
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

pub fn read_text_file(path: &Path) -> Result<String, StorageError> {
    fs::read_to_string(path).map_err(|e| StorageError::io(path, e))
}

pub fn write_text_file(path: &Path, content: &str) -> Result<(), StorageError> {
    atomic_write(path, content)
}

pub fn delete_file_if_exists(path: &Path) -> Result<(), StorageError> {
    if path.exists() {
        fs::remove_file(path).map_err(|e| StorageError::io(path, e))?;
    }
    Ok(())
}

pub fn create_backup(path: &Path) -> Result<(), StorageError> {
    if !path.exists() {
        return Ok(());
    }

    let backup_dir = path
        .parent()
        .unwrap_or(Path::new("."))
        .join(STORAGE_SETTINGS.backup_dir);
    fs::create_dir_all(&backup_dir).map_err(|e| StorageError::io(&backup_dir, e))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S%.3f");
    let filename = format!(
        "{}.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        timestamp
    );
    let backup_path = backup_dir.join(&filename);
    fs::copy(path, &backup_path).map_err(|e| StorageError::io(&backup_path, e))?;

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    if let Ok(entries) = fs::read_dir(&backup_dir) {
        let mut backups: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(&*stem))
            .collect();
        backups.sort_by_key(|e| e.file_name());

        while backups.len() > STORAGE_SETTINGS.max_backups {
            let oldest = backups.remove(0);
            if let Err(e) = fs::remove_file(oldest.path()) {
                warn!(
                    "event=backup_prune status=error path={} error={}",
                    oldest.path().display(),
                    e
                );
            }
        }
    }

    Ok(())
}

pub fn atomic_write(path: &Path, content: &str) -> Result<(), StorageError> {
    if path.exists() {
        create_backup(path)?;
    }

    let tmp_path = path.with_extension("tmp");
    let mut tmp_file = File::create(&tmp_path).map_err(|e| StorageError::io(&tmp_path, e))?;
    tmp_file
        .write_all(content.as_bytes())
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    tmp_file
        .sync_all()
        .map_err(|e| StorageError::io(&tmp_path, e))?;
    fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
pub use memory::MemoryStore;

#[cfg(test)]
mod memory {
    use std::{collections::HashMap, io};

    use super::KeyValueStore;
    use crate::error::StorageError;

    #[derive(Default)]
    pub struct MemoryStore {
        pub entries: HashMap<String, String>,
        pub fail_writes: bool,
        pub writes: usize,
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(StorageError::io(
                    key,
                    io::Error::new(io::ErrorKind::Other, "write refused"),
                ));
            }
            self.writes += 1;
            self.entries.insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&mut self, key: &str) -> Result<(), StorageError> {
            self.entries.remove(key);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;

    fn unique_dir(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/{}_{}", prefix, now))
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = unique_dir("sensei_file_store");
        let mut store = FileStore::open(&dir).unwrap();

        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "{\"a\":1}").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("{\"a\":1}"));

        store.set("k", "{\"a\":2}").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("{\"a\":2}"));
        assert!(dir.join("backups").exists());

        store.remove("k").unwrap();
        assert_eq!(store.get("k").unwrap(), None);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_backups_are_pruned() {
        let dir = unique_dir("sensei_backup_prune");
        let mut store = FileStore::open(&dir).unwrap();
        for i in 0..(STORAGE_SETTINGS.max_backups + 4) {
            store.set("state", &i.to_string()).unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        let backups = fs::read_dir(dir.join("backups")).unwrap().count();
        assert!(backups <= STORAGE_SETTINGS.max_backups);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let dir = unique_dir("sensei_atomic");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("export.json");

        write_text_file(&path, "payload").unwrap();
        assert_eq!(read_text_file(&path).unwrap(), "payload");
        assert!(!path.with_extension("tmp").exists());

        fs::remove_dir_all(dir).ok();
    }
}
