use log::error;

use crate::db::{keys, LocalStorage, StorageError};
use crate::models::{Note, NoteDraft, NoteUpdate};

use super::{matches_reference, next_id, now_millis};

pub struct NotesStore {
    storage: LocalStorage,
    notes: Vec<Note>,
}

impl NotesStore {
    pub fn load(storage: LocalStorage) -> Self {
        let notes = match storage.load_json::<Vec<Note>>(keys::NOTES) {
            Ok(notes) => notes.unwrap_or_default(),
            Err(e) => {
                error!("[notes] Error loading notes: {}", e);
                Vec::new()
            }
        };
        Self { storage, notes }
    }

    /// Newest first
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn add_note(&mut self, draft: NoteDraft) -> Result<Note, StorageError> {
        self.add_note_at(draft, now_millis())
    }

    pub(crate) fn add_note_at(&mut self, draft: NoteDraft, now: i64) -> Result<Note, StorageError> {
        let note = Note {
            id: next_id(now, self.notes.iter().map(|n| n.id.as_str())),
            book: draft.book,
            chapter: draft.chapter,
            verse: draft.verse,
            text: draft.text,
            tags: draft.tags,
            date: now,
        };
        self.notes.insert(0, note.clone());
        self.persist()?;
        Ok(note)
    }

    /// Applies the fields present in `update`. Returns the edited note, or
    /// `None` when no note has that id.
    pub fn edit_note(
        &mut self,
        id: &str,
        update: NoteUpdate,
    ) -> Result<Option<Note>, StorageError> {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(None);
        };
        if let Some(book) = update.book {
            note.book = book;
        }
        if let Some(chapter) = update.chapter {
            note.chapter = chapter;
        }
        if let Some(verse) = update.verse {
            note.verse = verse;
        }
        if let Some(text) = update.text {
            note.text = text;
        }
        if let Some(tags) = update.tags {
            note.tags = tags;
        }
        let edited = note.clone();
        self.persist()?;
        Ok(Some(edited))
    }

    pub fn delete_note(&mut self, id: &str) -> Result<bool, StorageError> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        let removed = self.notes.len() != before;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn notes_by_reference(&self, book: &str, chapter: u32, verse: Option<u32>) -> Vec<Note> {
        self.notes
            .iter()
            .filter(|n| matches_reference(&n.book, n.chapter, n.verse, book, chapter, verse))
            .cloned()
            .collect()
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.storage.save_json(keys::NOTES, &self.notes)
    }
}
