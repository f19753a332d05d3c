//! State containers mirrored to local storage. Every mutation writes the
//! whole container value back under its fixed key.

pub mod bible;
pub mod bookmarks;
pub mod notes;
pub mod settings;
pub mod theme;

pub use bible::BibleStore;
pub use bookmarks::BookmarksStore;
pub use notes::NotesStore;
pub use settings::SettingsStore;
pub use theme::ThemeStore;

/// Current wall-clock time in milliseconds since the epoch
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Ids are creation timestamps. Two records created in the same
/// millisecond get consecutive values instead of a duplicate id.
pub(crate) fn next_id<'a>(now: i64, existing: impl Iterator<Item = &'a str> + Clone) -> String {
    let mut candidate = now;
    loop {
        let id = candidate.to_string();
        if !existing.clone().any(|e| e == id) {
            return id;
        }
        candidate += 1;
    }
}

/// Reference filter shared by notes and bookmarks: verse 0 or `None`
/// matches the whole chapter
pub(crate) fn matches_reference(
    book: &str,
    chapter: u32,
    verse: u32,
    want_book: &str,
    want_chapter: u32,
    want_verse: Option<u32>,
) -> bool {
    if book != want_book || chapter != want_chapter {
        return false;
    }
    match want_verse {
        Some(v) if v != 0 => verse == v,
        _ => true,
    }
}
