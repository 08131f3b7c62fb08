//! The ordered list of annotated photos.

use super::{StorageError, StorageResult};
use crate::page::Page;
use crate::strokes::Stroke;
use serde::{Deserialize, Serialize};

/// Every page in display order. Serializes as a bare JSON array of pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notebook {
    pages: Vec<Page>,
}

impl Notebook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Append a page and return its index.
    pub fn push(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Store the strokes handed back when a page's session ends.
    pub fn set_strokes(&mut self, index: usize, strokes: Vec<Stroke>) -> StorageResult<()> {
        let len = self.pages.len();
        let page = self
            .pages
            .get_mut(index)
            .ok_or(StorageError::NoSuchPage { index, len })?;
        page.strokes = (!strokes.is_empty()).then_some(strokes);
        Ok(())
    }

    /// Take the page at `from` out and reinsert it at `to`.
    ///
    /// `to` indexes the list after removal; past the end means last.
    pub fn move_page(&mut self, from: usize, to: usize) -> StorageResult<()> {
        if from >= self.pages.len() {
            return Err(StorageError::NoSuchPage {
                index: from,
                len: self.pages.len(),
            });
        }
        let page = self.pages.remove(from);
        let to = to.min(self.pages.len());
        self.pages.insert(to, page);
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
