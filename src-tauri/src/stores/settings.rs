use log::error;
use serde::Serialize;

use crate::db::{keys, LocalStorage, StorageError};
use crate::models::{AppSettings, SettingsUpdate, MAX_FONT_SIZE, MIN_FONT_SIZE};

/// CSS custom properties the reading screen applies to the document root
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CssVariable {
    pub name: &'static str,
    pub value: String,
}

pub struct SettingsStore {
    storage: LocalStorage,
    settings: AppSettings,
}

impl SettingsStore {
    /// Stored values are layered over the defaults, so settings saved by an
    /// older build that lack a field still load.
    pub fn load(storage: LocalStorage) -> Self {
        let settings = match storage.load_json::<AppSettings>(keys::SETTINGS) {
            Ok(Some(mut saved)) => {
                saved.font_size = saved.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
                saved
            }
            Ok(None) => AppSettings::default(),
            Err(e) => {
                error!("[settings] Error loading settings: {}", e);
                AppSettings::default()
            }
        };
        Self { storage, settings }
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) -> Result<AppSettings, StorageError> {
        if let Some(size) = update.font_size {
            self.settings.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        }
        if let Some(family) = update.font_family {
            self.settings.font_family = family;
        }
        if let Some(line_height) = update.line_height {
            if line_height.is_finite() && line_height > 0.0 {
                self.settings.line_height = line_height;
            }
        }
        if let Some(verse_numbers) = update.verse_numbers {
            self.settings.verse_numbers = verse_numbers;
        }
        if let Some(paragraph_view) = update.paragraph_view {
            self.settings.paragraph_view = paragraph_view;
        }
        self.persist()?;
        Ok(self.settings.clone())
    }

    pub fn reset_settings(&mut self) -> Result<AppSettings, StorageError> {
        self.settings = AppSettings::default();
        self.persist()?;
        Ok(self.settings.clone())
    }

    pub fn css_variables(&self) -> Vec<CssVariable> {
        vec![
            CssVariable {
                name: "--font-size-base",
                value: format!("{}px", self.settings.font_size),
            },
            CssVariable {
                name: "--line-height",
                value: self.settings.line_height.to_string(),
            },
            CssVariable {
                name: "--font-family-text",
                value: self.settings.font_family.clone(),
            },
        ]
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.storage.save_json(keys::SETTINGS, &self.settings)
    }
}
