//! Raster previews via the external `pdftoppm` tool.
//!
//! Rendering is strictly optional: when the tool is missing the page grid
//! falls back to label-only tiles and editing keeps working.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::app::error::{AppError, Result};

static STORE_COUNTER: AtomicU64 = AtomicU64::new(0);

/// True when `pdftoppm` can be spawned at all.
pub fn renderer_available() -> bool {
    Command::new("pdftoppm").arg("-v").output().is_ok()
}

/// A directory of rendered page images, keyed by source page number.
/// The directory is deleted when the store is dropped.
pub struct ThumbnailStore {
    dir: PathBuf,
    pages: BTreeMap<u32, PathBuf>,
}

impl ThumbnailStore {
    /// Render every page of `source`, scaled so the larger edge is `scale_to`
    /// pixels.
    pub fn generate(source: &Path, scale_to: i32) -> Result<Self> {
        Self::run(source, None, scale_to)
    }

    /// Render a single page at preview size.
    pub fn generate_page(source: &Path, page: u32, scale_to: i32) -> Result<Self> {
        Self::run(source, Some(page), scale_to)
    }

    fn run(source: &Path, page: Option<u32>, scale_to: i32) -> Result<Self> {
        let dir = std::env::temp_dir().join(format!(
            "pdfslicer-{}-{}",
            std::process::id(),
            STORE_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        fs::create_dir_all(&dir)?;

        let mut cmd = Command::new("pdftoppm");
        cmd.arg("-png").arg("-scale-to").arg(scale_to.to_string());
        if let Some(number) = page {
            cmd.arg("-f")
                .arg(number.to_string())
                .arg("-l")
                .arg(number.to_string());
        }
        let status = cmd.arg(source).arg(dir.join("page")).status()?;
        if !status.success() {
            let _ = fs::remove_dir_all(&dir);
            return Err(AppError::Render(format!("pdftoppm exited with {status}")));
        }

        let mut pages = BTreeMap::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            let number = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(parse_page_number);
            if let Some(number) = number {
                pages.insert(number, path);
            }
        }

        Ok(Self { dir, pages })
    }

    pub fn path(&self, page: u32) -> Option<&Path> {
        self.pages.get(&page).map(PathBuf::as_path)
    }
}

impl Drop for ThumbnailStore {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

/// `pdftoppm` names its output `<prefix>-<n>.png`, zero-padding the page
/// number to the document's digit count.
fn parse_page_number(stem: &str) -> Option<u32> {
    stem.strip_prefix("page-")?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_number() {
        assert_eq!(parse_page_number("page-1"), Some(1));
        assert_eq!(parse_page_number("page-007"), Some(7));
        assert_eq!(parse_page_number("page-42"), Some(42));
    }

    #[test]
    fn test_parse_page_number_rejects_foreign_files() {
        assert_eq!(parse_page_number("page-"), None);
        assert_eq!(parse_page_number("page-abc"), None);
        assert_eq!(parse_page_number("cover-1"), None);
        assert_eq!(parse_page_number("page"), None);
    }
}
