use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Player preferences, persisted as JSON next to the user data. Field names
/// match the original stored schema; `version` exists for future migrations.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_version")]
    version: u32,

    #[serde(default = "default_true", rename = "soundEffectsEnabled")]
    pub sound_effects_enabled: bool,

    #[serde(default = "default_true", rename = "backgroundMusicEnabled")]
    pub background_music_enabled: bool,
}

fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            version: 1,
            sound_effects_enabled: true,
            background_music_enabled: true,
        }
    }
}

impl Settings {
    /// Loads settings from `data_dir`, falling back to (and writing out)
    /// defaults when the file is missing or unparsable.
    pub fn load(data_dir: &Path) -> Self {
        let path = settings_path(data_dir);
        if let Ok(contents) = fs::read_to_string(&path) {
            if let Ok(mut settings) = serde_json::from_str::<Settings>(&contents) {
                settings.migrate();
                return settings;
            }
        }
        let default = Settings::default();
        let _ = default.save(data_dir);
        default
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), std::io::Error> {
        let path = settings_path(data_dir);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let contents = serde_json::to_string(self)?;
        fs::write(path, contents)
    }

    fn migrate(&mut self) {
        match self.version {
            0 => {
                self.version = 1;
            }
            _ => (),
        }
    }
}

fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::tests::scratch_dir;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_defaults_when_missing() {
        let settings = Settings::load(&scratch_dir());
        assert!(settings.sound_effects_enabled);
        assert!(settings.background_music_enabled);
    }

    #[test]
    #[serial]
    fn test_roundtrip() {
        let dir = scratch_dir();
        let mut settings = Settings::default();
        settings.sound_effects_enabled = false;
        settings.save(&dir).unwrap();

        let loaded = Settings::load(&dir);
        assert!(!loaded.sound_effects_enabled);
        assert!(loaded.background_music_enabled);
    }

    #[test]
    #[serial]
    fn test_corrupt_file_falls_back_to_defaults() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("settings.json"), "][").unwrap();

        let settings = Settings::load(&dir);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    #[serial]
    fn test_legacy_key_names() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("settings.json"),
            r#"{"soundEffectsEnabled": false, "backgroundMusicEnabled": false}"#,
        )
        .unwrap();

        let settings = Settings::load(&dir);
        assert!(!settings.sound_effects_enabled);
        assert!(!settings.background_music_enabled);
    }
}
