use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::error::StorageError;

use super::Storage;

/// Durable storage: one `<key>.json` file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();

        self.dir.join(format!("{name}.json"))
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);

        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(unavailable("read", &path, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| unavailable("create", &self.dir, e))?;

        // Write to a sibling file first so a crash never leaves a truncated value behind.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|e| unavailable("write", &tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| unavailable("replace", &path, e))?;

        Ok(())
    }
}

fn unavailable(action: &str, path: &Path, err: io::Error) -> StorageError {
    StorageError::Unavailable(format!("failed to {action} {}: {err}", path.display()))
}
