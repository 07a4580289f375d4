use crate::{
    Config,
    error::StorageError,
    storage::{file::FileStorage, memory::MemoryStorage},
};
use std::{convert::TryFrom, fmt::Debug};

pub mod file;
pub mod memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    File,
    Memory,
}

impl StorageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKind::File => "file",
            StorageKind::Memory => "memory",
        }
    }

    pub const fn all() -> &'static [StorageKind] {
        &[StorageKind::File, StorageKind::Memory]
    }
}

impl std::fmt::Display for StorageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for StorageKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "file" => Ok(StorageKind::File),
            "memory" => Ok(StorageKind::Memory),
            _ => Err(anyhow::anyhow!(
                "Unknown storage backend '{value}'. Supported backends: file, memory."
            )),
        }
    }
}

/// Synchronous key-value string store the card collection is mirrored to.
pub trait Storage: Debug {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Construct the storage backend selected in config.
pub fn storage_from_config(config: &Config) -> anyhow::Result<Box<dyn Storage>> {
    let kind = config.storage_kind()?;

    let boxed: Box<dyn Storage> = match kind {
        StorageKind::File => Box::new(FileStorage::new(config.data_dir()?)),
        StorageKind::Memory => Box::new(MemoryStorage::new()),
    };

    Ok(boxed)
}
