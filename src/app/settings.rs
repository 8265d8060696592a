use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::error::Result;

/// Persisted geometry of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowState {
    #[serde(default = "default_width")]
    pub width: i32,

    #[serde(default = "default_height")]
    pub height: i32,

    #[serde(rename = "is-maximized", default)]
    pub is_maximized: bool,
}

fn default_width() -> i32 {
    800
}

fn default_height() -> i32 {
    600
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            is_maximized: false,
        }
    }
}

/// On-disk layout: a single `[window-state]` table.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsFile {
    #[serde(rename = "window-state", default)]
    window_state: Option<WindowState>,
}

/// Loads and saves the settings file under the per-user cache directory.
///
/// Any failure to read the file (missing, unparsable, wrong types, nonsense
/// dimensions) falls back to defaults; save failures are reported to the
/// caller, which logs and moves on.
pub struct SettingsManager {
    path: PathBuf,
}

impl SettingsManager {
    pub fn new() -> Self {
        let mut path = dirs::cache_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("pdfslicer");
        path.push("settings.toml");
        Self { path }
    }

    /// Use an explicit file path instead of the per-user location.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load_window_state(&self) -> WindowState {
        match self.try_load() {
            Ok(state) if state.width > 0 && state.height > 0 => state,
            Ok(state) => {
                tracing::debug!(
                    width = state.width,
                    height = state.height,
                    "ignoring persisted window state with non-positive dimensions"
                );
                WindowState::default()
            }
            Err(err) => {
                tracing::debug!(error = %err, path = %self.path.display(), "using default window state");
                WindowState::default()
            }
        }
    }

    fn try_load(&self) -> Result<WindowState> {
        let contents = fs::read_to_string(&self.path)?;
        let file: SettingsFile = toml::from_str(&contents)?;
        Ok(file.window_state.unwrap_or_default())
    }

    pub fn save_window_state(&self, state: &WindowState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = SettingsFile {
            window_state: Some(*state),
        };
        fs::write(&self.path, toml::to_string(&file)?)?;

        Ok(())
    }
}

impl Default for SettingsManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_in(dir: &tempfile::TempDir) -> SettingsManager {
        SettingsManager::with_path(dir.path().join("settings.toml"))
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let state = WindowState {
            width: 1280,
            height: 720,
            is_maximized: true,
        };

        manager_in(&dir).save_window_state(&state).unwrap();
        let loaded = manager_in(&dir).load_window_state();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = manager_in(&dir).load_window_state();
        assert_eq!(loaded, WindowState::default());
        assert_eq!(loaded.width, 800);
        assert_eq!(loaded.height, 600);
        assert!(!loaded.is_maximized);
    }

    #[test]
    fn test_corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = manager_in(&dir);
        manager.save_window_state(&WindowState::default()).unwrap();
        fs::write(dir.path().join("settings.toml"), "not toml at all {{{").unwrap();

        assert_eq!(manager.load_window_state(), WindowState::default());
    }

    #[test]
    fn test_type_mismatch_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("settings.toml"),
            "[window-state]\nwidth = \"wide\"\nheight = 600\nis-maximized = false\n",
        )
        .unwrap();

        assert_eq!(manager_in(&dir).load_window_state(), WindowState::default());
    }

    #[test]
    fn test_non_positive_dimensions_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let state = WindowState {
            width: 0,
            height: -5,
            is_maximized: false,
        };
        manager_in(&dir).save_window_state(&state).unwrap();

        assert_eq!(manager_in(&dir).load_window_state(), WindowState::default());
    }

    #[test]
    fn test_on_disk_format() {
        let dir = tempfile::tempdir().unwrap();
        manager_in(&dir)
            .save_window_state(&WindowState::default())
            .unwrap();

        let text = fs::read_to_string(dir.path().join("settings.toml")).unwrap();
        assert!(text.contains("[window-state]"));
        assert!(text.contains("width = 800"));
        assert!(text.contains("height = 600"));
        assert!(text.contains("is-maximized = false"));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deeply").join("nested").join("settings.toml");
        let manager = SettingsManager::with_path(nested.clone());

        manager.save_window_state(&WindowState::default()).unwrap();
        assert!(nested.exists());
    }
}
