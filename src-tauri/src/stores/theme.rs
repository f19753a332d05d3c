use log::{error, info};

use crate::db::{keys, LocalStorage, StorageError};
use crate::models::Theme;

pub struct ThemeStore {
    storage: LocalStorage,
    theme: Theme,
}

impl ThemeStore {
    /// Host color scheme wins over the saved choice, which wins over the
    /// system preference.
    pub fn load(storage: LocalStorage, host_scheme: Option<&str>, prefers_dark: bool) -> Self {
        let saved = match storage.get_item(keys::THEME) {
            Ok(saved) => saved.as_deref().and_then(Theme::parse),
            Err(e) => {
                error!("[theme] Error loading theme: {}", e);
                None
            }
        };
        let theme = host_scheme
            .and_then(Theme::parse)
            .or(saved)
            .unwrap_or(if prefers_dark { Theme::Dark } else { Theme::Light });
        info!("[theme] Initial theme: {}", theme.as_str());
        if let Err(e) = storage.set_item(keys::THEME, theme.as_str()) {
            error!("[theme] Error saving initial theme: {}", e);
        }
        Self { storage, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme, StorageError> {
        self.theme = theme;
        self.storage.set_item(keys::THEME, theme.as_str())?;
        Ok(theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, StorageError> {
        self.set_theme(self.theme.toggled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_scheme_takes_priority() {
        let storage = LocalStorage::open_in_memory().unwrap();
        storage.set_item(keys::THEME, "light").unwrap();
        let store = ThemeStore::load(storage, Some("Dark"), false);
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn saved_theme_then_system_preference() {
        let storage = LocalStorage::open_in_memory().unwrap();
        assert_eq!(ThemeStore::load(storage.clone(), None, true).theme(), Theme::Dark);

        storage.set_item(keys::THEME, "light").unwrap();
        assert_eq!(ThemeStore::load(storage, None, true).theme(), Theme::Light);
    }

    #[test]
    fn initial_theme_is_written_back() {
        let storage = LocalStorage::open_in_memory().unwrap();
        ThemeStore::load(storage.clone(), None, false);
        assert_eq!(storage.get_item(keys::THEME).unwrap().as_deref(), Some("light"));

        ThemeStore::load(storage.clone(), Some("dark"), false);
        assert_eq!(storage.get_item(keys::THEME).unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn toggle_persists() {
        let storage = LocalStorage::open_in_memory().unwrap();
        let mut store = ThemeStore::load(storage.clone(), None, false);
        assert_eq!(store.toggle_theme().unwrap(), Theme::Dark);
        assert_eq!(storage.get_item(keys::THEME).unwrap().as_deref(), Some("dark"));
    }
}
