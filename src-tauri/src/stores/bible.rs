//! Current reading location, selected translation and recently read
//! chapters

use log::{error, info};
use serde::Serialize;

use crate::bible_service::{self, default_translation};
use crate::config::DEFAULT_RECENT_LIMIT;
use crate::db::{keys, LocalStorage, StorageError};
use crate::models::{BibleLocation, Book, LocationUpdate, RecentLocation, Translation};
use crate::router::Route;

use super::now_millis;

/// Snapshot handed to the UI
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BibleState {
    pub current_location: BibleLocation,
    pub current_translation: Translation,
    pub recent_locations: Vec<RecentLocation>,
}

pub struct BibleStore {
    storage: LocalStorage,
    location: BibleLocation,
    translation: Translation,
    recent: Vec<RecentLocation>,
    recent_limit: usize,
}

impl BibleStore {
    /// Restores persisted state; unreadable entries are logged and the
    /// defaults kept
    pub fn load(storage: LocalStorage) -> Self {
        let mut store = Self {
            storage,
            location: BibleLocation::default(),
            translation: default_translation(),
            recent: Vec::new(),
            recent_limit: DEFAULT_RECENT_LIMIT,
        };

        match store.storage.load_json::<Vec<RecentLocation>>(keys::RECENT_LOCATIONS) {
            Ok(Some(recent)) => store.recent = recent,
            Ok(None) => {}
            Err(e) => error!("[bible] Error loading recent locations: {}", e),
        }
        match store.storage.load_json::<BibleLocation>(keys::LAST_LOCATION) {
            Ok(Some(location)) => store.location = location,
            Ok(None) => {}
            Err(e) => error!("[bible] Error loading last location: {}", e),
        }
        match store.storage.get_item(keys::LAST_TRANSLATION) {
            Ok(Some(id)) => {
                if let Some(translation) = bible_service::get_translation(&id) {
                    store.translation = translation;
                }
            }
            Ok(None) => {}
            Err(e) => error!("[bible] Error loading last translation: {}", e),
        }

        info!(
            "[bible] Restored {} {}:{} ({}), {} recent",
            store.location.book,
            store.location.chapter,
            store.location.verse,
            store.translation.id,
            store.recent.len()
        );
        store
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit.max(1);
        self.recent.truncate(self.recent_limit);
        self
    }

    pub fn state(&self) -> BibleState {
        BibleState {
            current_location: self.location.clone(),
            current_translation: self.translation.clone(),
            recent_locations: self.recent_locations().to_vec(),
        }
    }

    pub fn current_location(&self) -> &BibleLocation {
        &self.location
    }

    pub fn current_translation(&self) -> &Translation {
        &self.translation
    }

    pub fn recent_locations(&self) -> &[RecentLocation] {
        &self.recent
    }

    /// Merges a partial location into the current one. A navigation that
    /// names both book and chapter is also recorded as recent.
    pub fn set_location(&mut self, update: LocationUpdate) -> Result<(), StorageError> {
        self.set_location_at(update, now_millis())
    }

    pub(crate) fn set_location_at(
        &mut self,
        update: LocationUpdate,
        now: i64,
    ) -> Result<(), StorageError> {
        let previous_verse = self.location.verse;
        if let Some(book) = &update.book {
            self.location.book = book.clone();
        }
        if let Some(chapter) = update.chapter {
            self.location.chapter = chapter;
        }
        if let Some(verse) = update.verse {
            self.location.verse = verse;
        }
        self.storage.save_json(keys::LAST_LOCATION, &self.location)?;

        if let (Some(book), Some(chapter)) = (update.book, update.chapter) {
            if chapter != 0 {
                let verse = update.verse.filter(|v| *v != 0).unwrap_or(previous_verse);
                self.add_to_recent_at(BibleLocation { book, chapter, verse }, now)?;
            }
        }
        Ok(())
    }

    /// Unknown translation ids leave the selection unchanged
    pub fn set_translation(&mut self, translation_id: &str) -> Result<bool, StorageError> {
        match bible_service::get_translation(translation_id) {
            Some(translation) => {
                self.translation = translation;
                self.storage
                    .set_item(keys::LAST_TRANSLATION, &self.translation.id)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn add_to_recent(&mut self, location: BibleLocation) -> Result<(), StorageError> {
        self.add_to_recent_at(location, now_millis())
    }

    fn add_to_recent_at(&mut self, location: BibleLocation, now: i64) -> Result<(), StorageError> {
        self.recent
            .retain(|r| !(r.book == location.book && r.chapter == location.chapter));
        self.recent.insert(
            0,
            RecentLocation {
                book: location.book,
                chapter: location.chapter,
                verse: location.verse,
                translation_id: self.translation.id.clone(),
                timestamp: now,
            },
        );
        self.recent.truncate(self.recent_limit);
        self.storage.save_json(keys::RECENT_LOCATIONS, &self.recent)
    }

    pub fn book_by_id(&self, book_id: &str) -> Option<&'static Book> {
        bible_service::get_book(book_id)
    }

    /// Display name, or the id itself when the book is not in the catalog
    pub fn book_name(&self, book_id: &str) -> String {
        book_display_name(book_id)
    }

    pub fn chapter_count(&self, book_id: &str) -> u32 {
        self.book_by_id(book_id).map(|b| b.chapters).unwrap_or(0)
    }

    /// Chapter after the current one, crossing into the next book after a
    /// book's last chapter. `None` at Revelation 22 or for unknown books.
    pub fn next_chapter(&self) -> Option<Route> {
        let books = bible_service::get_books();
        let index = books.iter().position(|b| b.id == self.location.book)?;
        let book = &books[index];
        if self.location.chapter < book.chapters {
            return Some(chapter_route(book.id, self.location.chapter + 1));
        }
        books.get(index + 1).map(|next| chapter_route(next.id, 1))
    }

    /// Chapter before the current one, crossing into the last chapter of
    /// the previous book. `None` at Genesis 1 or for unknown books.
    pub fn prev_chapter(&self) -> Option<Route> {
        let books = bible_service::get_books();
        let index = books.iter().position(|b| b.id == self.location.book)?;
        if self.location.chapter > 1 {
            return Some(chapter_route(books[index].id, self.location.chapter - 1));
        }
        let prev = books.get(index.checked_sub(1)?)?;
        Some(chapter_route(prev.id, prev.chapters))
    }
}

fn chapter_route(book: &str, chapter: u32) -> Route {
    Route::Read {
        book: Some(book.to_string()),
        chapter: Some(chapter),
        verse: None,
    }
}

pub fn book_display_name(book_id: &str) -> String {
    bible_service::get_book(book_id)
        .map(|b| b.name.to_string())
        .unwrap_or_else(|| book_id.to_string())
}
