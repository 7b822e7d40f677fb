//! Persisted theme preference.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::{Result, eyre::WrapErr};
use serde::{Deserialize, Deserializer, Serialize};
use skyfolio_core::Theme;

/// On-disk layout of `state.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct State {
    #[serde(default, deserialize_with = "known_theme")]
    theme: Option<Theme>,
}

/// Parse a theme name, treating unknown names as absent.
fn known_theme<'de, D>(deserializer: D) -> Result<Option<Theme>, D::Error>
where
    D: Deserializer<'de>,
{
    let name = Option::<String>::deserialize(deserializer)?;
    Ok(name.and_then(|name| name.parse().ok()))
}

/// Reads and writes the `theme` key of `state.toml`.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory.
    pub fn locate() -> Option<Self> {
        crate::state_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The saved theme, if any. Unknown values read as no preference.
    pub fn load(&self) -> Result<Option<Theme>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&self.path)
            .wrap_err_with(|| format!("failed to read {}", self.path.display()))?;
        let state: State = toml::from_str(&text)
            .wrap_err_with(|| format!("invalid state file {}", self.path.display()))?;
        Ok(state.theme)
    }

    /// Persist `theme`, creating the parent directory if needed.
    pub fn save(&self, theme: Theme) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let state = State { theme: Some(theme) };
        let text = toml::to_string(&state).wrap_err("failed to encode state")?;
        fs::write(&self.path, text)
            .wrap_err_with(|| format!("failed to write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        std::env::temp_dir().join(format!(
            "skyfolio-{name}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn test_missing_file_has_no_preference() {
        let store = ThemeStore::new(scratch_dir("missing").join("state.toml"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("roundtrip");
        let store = ThemeStore::new(dir.join("nested").join("state.toml"));

        store.save(Theme::Light).unwrap();
        assert_eq!(store.load().unwrap(), Some(Theme::Light));
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("theme = \"light\""));

        store.save(Theme::Dark).unwrap();
        assert_eq!(store.load().unwrap(), Some(Theme::Dark));

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_state_document_decoding() {
        let decode = |text: &str| toml::from_str::<State>(text).unwrap().theme;
        assert_eq!(decode("theme = \"Light\""), Some(Theme::Light));
        assert_eq!(decode("theme = \"sepia\""), None);
        assert_eq!(decode(""), None);
        assert!(toml::from_str::<State>("theme = 3").is_err());
        assert_eq!(
            toml::to_string(&State { theme: Some(Theme::Dark) }).unwrap(),
            "theme = \"dark\"\n"
        );
    }

    #[test]
    fn test_unknown_value_reads_as_none() {
        let dir = scratch_dir("unknown");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("state.toml");
        fs::write(&path, "theme = \"sepia\"\n").unwrap();
        assert_eq!(ThemeStore::new(&path).load().unwrap(), None);
        let _ = fs::remove_dir_all(dir);
    }
}
