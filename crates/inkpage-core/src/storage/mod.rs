//! Persistence of the page list.
//!
//! Every page lives in one ordered [`Notebook`] serialized under a single key
//! of a string [`Storage`] backend, so each save rewrites the whole list.

mod memory;
mod notebook;

pub use memory::MemoryStorage;
pub use notebook::Notebook;

pub use crate::image::BoxFuture;

use thiserror::Error;

/// Key the page list is stored under.
pub const PAGES_KEY: &str = "pages";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("No page at index {index} (notebook has {len})")]
    NoSuchPage { index: usize, len: usize },
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A string key-value store, such as browser local storage or a settings file.
pub trait Storage: Send + Sync {
    /// The value under `key`, or `None` if nothing was written yet.
    fn read(&self, key: &str) -> BoxFuture<'_, StorageResult<Option<String>>>;

    /// Replace the value under `key`.
    fn write(&self, key: &str, value: String) -> BoxFuture<'_, StorageResult<()>>;
}

/// Load the page list, starting empty when nothing was stored yet.
///
/// A stored list that does not parse is an error rather than an empty
/// notebook, so a later save cannot silently overwrite it.
pub async fn load_or_default<S: Storage + ?Sized>(storage: &S) -> StorageResult<Notebook> {
    match storage.read(PAGES_KEY).await? {
        Some(json) => {
            let notebook = Notebook::from_json(&json)?;
            log::info!("loaded {} pages", notebook.len());
            Ok(notebook)
        }
        None => {
            log::debug!("no stored pages, starting empty");
            Ok(Notebook::default())
        }
    }
}

/// Write the whole page list.
pub async fn save<S: Storage + ?Sized>(storage: &S, notebook: &Notebook) -> StorageResult<()> {
    let json = notebook.to_json()?;
    storage.write(PAGES_KEY, json).await?;
    log::debug!("saved {} pages", notebook.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use pollster::block_on;

    #[test]
    fn test_missing_list_starts_empty() {
        let storage = MemoryStorage::new();
        let notebook = block_on(load_or_default(&storage)).unwrap();
        assert!(notebook.is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_order() {
        let storage = MemoryStorage::new();
        let mut notebook = Notebook::new();
        notebook.push(Page::new("first"));
        notebook.push(Page::new("second"));

        block_on(save(&storage, &notebook)).unwrap();
        let loaded = block_on(load_or_default(&storage)).unwrap();
        assert_eq!(loaded, notebook);
        assert_eq!(loaded.get(1).map(|p| p.image.as_str()), Some("second"));
    }

    #[test]
    fn test_list_stored_under_single_key() {
        let storage = MemoryStorage::new();
        let mut notebook = Notebook::new();
        notebook.push(Page::new("img"));
        block_on(save(&storage, &notebook)).unwrap();

        let raw = block_on(storage.read(PAGES_KEY)).unwrap();
        assert_eq!(raw.as_deref(), Some(r#"[{"image":"img","strokes":null}]"#));
    }

    #[test]
    fn test_corrupt_list_is_error() {
        let storage = MemoryStorage::new();
        block_on(storage.write(PAGES_KEY, "[{\"image\":".to_string())).unwrap();

        let result = block_on(load_or_default(&storage));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
