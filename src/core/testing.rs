use crate::domain::ports::Storage;
use crate::utils::error::{PlannerError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory storage shared between clones.
#[derive(Clone, Default)]
pub struct MockStorage {
    files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    read_only: bool,
}

impl MockStorage {
    pub fn with_file(path: &str, contents: &str) -> Self {
        let storage = Self::default();
        storage.put(path, contents);
        storage
    }

    /// Every write and append fails.
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn put(&self, path: &str, contents: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), contents.as_bytes().to_vec());
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|data| String::from_utf8(data.clone()).unwrap())
    }

    fn check_writable(&self, path: &str) -> Result<()> {
        if self.read_only {
            return Err(PlannerError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("read-only: {}", path),
            )));
        }
        Ok(())
    }
}

impl Storage for MockStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            PlannerError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("File not found: {}", path),
            ))
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.check_writable(path)?;
        self.files.lock().unwrap().insert(path.to_string(), data.to_vec());
        Ok(())
    }

    fn append_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.check_writable(path)?;
        self.files
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .extend_from_slice(data);
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}
