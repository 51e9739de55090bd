//! Saved user settings: the two generation modifiers and an optional
//! backend override, kept as RON next to the downloaded thumbnails.

use std::fs;
use std::path::Path;

use client_logging::{client_error, client_info, client_warn};
use serde::{Deserialize, Serialize};
use thumbsmith_engine::AtomicFileWriter;

const SETTINGS_FILENAME: &str = ".thumbsmith_settings.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    pub include_human: bool,
    pub include_text: bool,
    pub backend_url: Option<String>,
}

pub fn load_settings(dir: &Path) -> Settings {
    let path = dir.join(SETTINGS_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Settings::default();
        }
        Err(err) => {
            client_warn!("Failed to read settings from {:?}: {}", path, err);
            return Settings::default();
        }
    };

    match ron::from_str(&content) {
        Ok(settings) => {
            client_info!("Loaded settings from {:?}", path);
            settings
        }
        Err(err) => {
            client_warn!("Failed to parse settings from {:?}: {}", path, err);
            Settings::default()
        }
    }
}

pub fn save_settings(dir: &Path, settings: &Settings) {
    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(settings, pretty) {
        Ok(text) => text,
        Err(err) => {
            client_error!("Failed to serialize settings: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(dir.to_path_buf());
    if let Err(err) = writer.write(SETTINGS_FILENAME, content.as_bytes()) {
        client_error!("Failed to write settings to {:?}: {}", dir, err);
    }
}
