use std::path::{Path, PathBuf};

use lopdf::ObjectId;

use super::commands::{Command, CommandStack};
use crate::app::error::{AppError, Result};

/// One slot in the page arrangement.
///
/// `number` is the 1-based page number in the source file, `id` the source
/// object id, and `rotation` the user rotation in degrees, always a multiple
/// of 90 in `[0, 360)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub number: u32,
    pub id: ObjectId,
    pub rotation: i64,
}

impl Page {
    pub fn new(number: u32, id: ObjectId) -> Self {
        Self {
            number,
            id,
            rotation: 0,
        }
    }
}

/// An open PDF document: the loaded source plus the editable page arrangement
/// and its undo/redo history. The source is never mutated; every edit only
/// touches the arrangement, and saving assembles a fresh output document.
pub struct Document {
    source: lopdf::Document,
    path: PathBuf,
    pages: Vec<Page>,
    history: CommandStack,
}

impl Document {
    pub fn open(path: &Path) -> Result<Self> {
        let source = lopdf::Document::load(path)?;
        if source.is_encrypted() {
            return Err(AppError::Document(
                "encrypted documents are not supported".to_string(),
            ));
        }

        let pages = source
            .get_pages()
            .into_iter()
            .map(|(number, id)| Page::new(number, id))
            .collect();

        Ok(Self {
            source,
            path: path.to_path_buf(),
            pages,
            history: CommandStack::default(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn basename(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub(crate) fn source(&self) -> &lopdf::Document {
        &self.source
    }

    // --- Editing operations ---

    pub fn remove_pages(&mut self, indexes: &[usize]) {
        let mut sorted: Vec<usize> = indexes
            .iter()
            .copied()
            .filter(|&i| i < self.pages.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.is_empty() {
            return;
        }

        let slots = sorted
            .into_iter()
            .map(|i| (i, self.pages[i].clone()))
            .collect();
        self.history
            .execute(Command::Remove { slots }, &mut self.pages);
    }

    /// Remove the inclusive index range `first..=last`.
    pub fn remove_page_range(&mut self, first: usize, last: usize) {
        if first > last {
            return;
        }
        let indexes: Vec<usize> = (first..=last).collect();
        self.remove_pages(&indexes);
    }

    pub fn rotate_pages_right(&mut self, indexes: &[usize]) {
        self.rotate_pages(indexes, 90);
    }

    pub fn rotate_pages_left(&mut self, indexes: &[usize]) {
        self.rotate_pages(indexes, -90);
    }

    fn rotate_pages(&mut self, indexes: &[usize], degrees: i64) {
        let mut sorted: Vec<usize> = indexes
            .iter()
            .copied()
            .filter(|&i| i < self.pages.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        if sorted.is_empty() {
            return;
        }

        self.history.execute(
            Command::Rotate {
                indexes: sorted,
                degrees,
            },
            &mut self.pages,
        );
    }

    pub fn move_page(&mut self, from: usize, to: usize) {
        if from == to || from >= self.pages.len() || to >= self.pages.len() {
            return;
        }
        self.history
            .execute(Command::Move { from, to }, &mut self.pages);
    }

    // --- History ---

    pub fn undo(&mut self) -> bool {
        self.history.undo(&mut self.pages)
    }

    pub fn redo(&mut self) -> bool {
        self.history.redo(&mut self.pages)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}
