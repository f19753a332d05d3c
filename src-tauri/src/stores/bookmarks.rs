use log::{error, info};

use crate::db::{keys, LocalStorage, StorageError};
use crate::models::{Bookmark, BookmarkDraft, BookmarkUpdate};

use super::{matches_reference, next_id, now_millis};

pub struct BookmarksStore {
    storage: LocalStorage,
    bookmarks: Vec<Bookmark>,
}

impl BookmarksStore {
    pub fn load(storage: LocalStorage) -> Self {
        let bookmarks = match storage.load_json::<Vec<Bookmark>>(keys::BOOKMARKS) {
            Ok(bookmarks) => bookmarks.unwrap_or_default(),
            Err(e) => {
                error!("[bookmarks] Error loading bookmarks: {}", e);
                Vec::new()
            }
        };
        Self { storage, bookmarks }
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// Returns `None` when the verse is already bookmarked
    pub fn add_bookmark(&mut self, draft: BookmarkDraft) -> Result<Option<Bookmark>, StorageError> {
        self.add_bookmark_at(draft, now_millis())
    }

    pub(crate) fn add_bookmark_at(
        &mut self,
        draft: BookmarkDraft,
        now: i64,
    ) -> Result<Option<Bookmark>, StorageError> {
        if self.has_bookmark(&draft.book, draft.chapter, draft.verse) {
            info!(
                "[bookmarks] {} {}:{} already bookmarked",
                draft.book, draft.chapter, draft.verse
            );
            return Ok(None);
        }
        let bookmark = Bookmark {
            id: next_id(now, self.bookmarks.iter().map(|b| b.id.as_str())),
            book: draft.book,
            chapter: draft.chapter,
            verse: draft.verse,
            label: draft.label,
            color: draft.color,
            date: now,
        };
        self.bookmarks.insert(0, bookmark.clone());
        self.persist()?;
        Ok(Some(bookmark))
    }

    pub fn edit_bookmark(
        &mut self,
        id: &str,
        update: BookmarkUpdate,
    ) -> Result<Option<Bookmark>, StorageError> {
        let Some(bookmark) = self.bookmarks.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(book) = update.book {
            bookmark.book = book;
        }
        if let Some(chapter) = update.chapter {
            bookmark.chapter = chapter;
        }
        if let Some(verse) = update.verse {
            bookmark.verse = verse;
        }
        if let Some(label) = update.label {
            bookmark.label = Some(label);
        }
        if let Some(color) = update.color {
            bookmark.color = Some(color);
        }
        let edited = bookmark.clone();
        self.persist()?;
        Ok(Some(edited))
    }

    pub fn delete_bookmark(&mut self, id: &str) -> Result<bool, StorageError> {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        let removed = self.bookmarks.len() != before;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn has_bookmark(&self, book: &str, chapter: u32, verse: u32) -> bool {
        self.bookmarks
            .iter()
            .any(|b| b.book == book && b.chapter == chapter && b.verse == verse)
    }

    pub fn bookmarks_by_reference(
        &self,
        book: &str,
        chapter: u32,
        verse: Option<u32>,
    ) -> Vec<Bookmark> {
        self.bookmarks
            .iter()
            .filter(|b| matches_reference(&b.book, b.chapter, b.verse, book, chapter, verse))
            .cloned()
            .collect()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.storage.save_json(keys::BOOKMARKS, &self.bookmarks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(book: &str, chapter: u32, verse: u32) -> BookmarkDraft {
        BookmarkDraft {
            book: book.to_string(),
            chapter,
            verse,
            label: Some("Утро".to_string()),
            color: None,
        }
    }

    #[test]
    fn duplicate_verse_is_rejected() {
        let mut store = BookmarksStore::load(LocalStorage::open_in_memory().unwrap());
        assert!(store.add_bookmark_at(draft("Joh", 3, 16), 1).unwrap().is_some());
        assert!(store.add_bookmark_at(draft("Joh", 3, 16), 2).unwrap().is_none());
        assert!(store.add_bookmark_at(draft("Joh", 3, 17), 3).unwrap().is_some());
        assert_eq!(store.bookmarks().len(), 2);
        assert_eq!(store.bookmarks()[0].verse, 17);
    }

    #[test]
    fn edit_sets_label_and_color() {
        let mut store = BookmarksStore::load(LocalStorage::open_in_memory().unwrap());
        let bookmark = store.add_bookmark_at(draft("Psa", 90, 1), 9).unwrap().unwrap();
        let edited = store
            .edit_bookmark(
                &bookmark.id,
                BookmarkUpdate {
                    label: Some("Молитва Моисея".into()),
                    color: Some("#F5A623".into()),
                    ..BookmarkUpdate::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(edited.label.as_deref(), Some("Молитва Моисея"));
        assert_eq!(edited.color.as_deref(), Some("#F5A623"));
        assert_eq!(edited.date, 9);
    }

    #[test]
    fn lookup_helpers() {
        let mut store = BookmarksStore::load(LocalStorage::open_in_memory().unwrap());
        store.add_bookmark_at(draft("Gen", 1, 1), 1).unwrap();
        store.add_bookmark_at(draft("Gen", 1, 3), 2).unwrap();

        assert!(store.has_bookmark("Gen", 1, 3));
        assert!(!store.has_bookmark("Gen", 1, 2));
        assert_eq!(store.bookmarks_by_reference("Gen", 1, None).len(), 2);
        assert_eq!(store.bookmarks_by_reference("Gen", 1, Some(1)).len(), 1);
    }

    #[test]
    fn delete_then_reload() {
        let storage = LocalStorage::open_in_memory().unwrap();
        let mut store = BookmarksStore::load(storage.clone());
        let a = store.add_bookmark_at(draft("Rev", 22, 21), 1).unwrap().unwrap();
        store.add_bookmark_at(draft("Rev", 22, 20), 2).unwrap();
        assert!(store.delete_bookmark(&a.id).unwrap());

        let reloaded = BookmarksStore::load(storage);
        assert_eq!(reloaded.bookmarks().len(), 1);
        assert_eq!(reloaded.bookmarks()[0].verse, 20);
    }
}
