//! Reading screen logic: chapter layout, share text, tag input and the
//! scroll-driven action panel

use chrono::Local;
use serde::Serialize;

use crate::models::{AppSettings, ChapterText};
use crate::stores::BookmarksStore;

/// One rendered verse
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseLine {
    pub verse: u32,
    /// Verse number label, `None` when verse numbers are hidden
    pub label: Option<String>,
    /// Verse text; may contain `word` spans for the word-study sheet
    pub html: String,
    /// Ids of the words that open the word-study sheet
    pub words: Vec<String>,
    pub bookmarked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedChapter {
    pub book: String,
    pub chapter: u32,
    pub paragraph_view: bool,
    pub lines: Vec<VerseLine>,
}

/// Lays out a chapter for the reading screen. Bookmark markers are looked
/// up against the requested reference, not the one the service echoed.
pub fn render_chapter(
    book: &str,
    chapter: u32,
    text: &ChapterText,
    bookmarks: &BookmarksStore,
    settings: &AppSettings,
) -> RenderedChapter {
    let lines = text
        .verses
        .iter()
        .map(|v| VerseLine {
            verse: v.verse,
            label: settings.verse_numbers.then(|| v.verse.to_string()),
            html: v.text.clone(),
            words: word_ids(&v.text),
            bookmarked: bookmarks.has_bookmark(book, chapter, v.verse),
        })
        .collect();
    RenderedChapter {
        book: book.to_string(),
        chapter,
        paragraph_view: settings.paragraph_view,
        lines,
    }
}

/// Drops markup tags, keeping their text content
pub fn strip_markup(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Word ids (`data-word-id`) present in a verse, in order of appearance
pub fn word_ids(html: &str) -> Vec<String> {
    const ATTR: &str = "data-word-id=\"";
    let mut ids = Vec::new();
    let mut rest = html;
    while let Some(start) = rest.find(ATTR) {
        rest = &rest[start + ATTR.len()..];
        let Some(end) = rest.find('"') else { break };
        ids.push(rest[..end].to_string());
        rest = &rest[end..];
    }
    ids
}

/// `Бытие 1:3 - "И сказал Бог..." (Синод.)`
pub fn share_text(
    book_name: &str,
    chapter: u32,
    verse: u32,
    verse_html: &str,
    short_name: &str,
) -> String {
    format!(
        "{} {}:{} - \"{}\" ({})",
        book_name,
        chapter,
        verse,
        strip_markup(verse_html).trim(),
        short_name
    )
}

/// Splits free-form tag input on commas and whitespace
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn format_relative_time(timestamp: i64, now: i64) -> String {
    let seconds = now.saturating_sub(timestamp).max(0) / 1000;
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{} дн. назад", days)
    } else if hours > 0 {
        format!("{} ч. назад", hours)
    } else if minutes > 0 {
        format!("{} мин. назад", minutes)
    } else {
        "только что".to_string()
    }
}

/// Date shown on note and bookmark cards, in the local time zone
pub fn format_card_date(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp)
        .map(|d| d.with_timezone(&Local).format("%d.%m.%Y").to_string())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavedItem {
    Note,
    Bookmark,
}

pub fn confirmation_message(item: SavedItem, book_name: &str, chapter: u32, verse: u32) -> String {
    let what = match item {
        SavedItem::Note => "Заметка сохранена",
        SavedItem::Bookmark => "Закладка добавлена",
    };
    format!("{} для {} {}:{}", what, book_name, chapter, verse)
}

/// Hides the bottom action panel while scrolling down past the header and
/// shows it again on any upward scroll.
#[derive(Debug, Clone)]
pub struct ActionPanel {
    visible: bool,
    last_scroll_top: f64,
}

impl Default for ActionPanel {
    fn default() -> Self {
        Self {
            visible: true,
            last_scroll_top: 0.0,
        }
    }
}

impl ActionPanel {
    const HIDE_AFTER: f64 = 50.0;

    pub fn on_scroll(&mut self, scroll_top: f64) -> bool {
        self.visible = !(scroll_top > self.last_scroll_top && scroll_top > Self::HIDE_AFTER);
        self.last_scroll_top = scroll_top.max(0.0);
        self.visible
    }

    pub fn visible(&self) -> bool {
        self.visible
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::db::LocalStorage;
    use crate::models::{BookmarkDraft, VerseText};

    fn chapter() -> ChapterText {
        ChapterText {
            book: "Gen".into(),
            chapter: 1,
            verses: vec![
                VerseText {
                    verse: 1,
                    text: r#"В <span class="word" data-word-id="g746">начале</span> сотворил Бог небо и землю."#.into(),
                },
                VerseText {
                    verse: 2,
                    text: "Земля же была безвидна и пуста.".into(),
                },
            ],
        }
    }

    #[test]
    fn chapter_lines_mark_bookmarked_verses() {
        let mut bookmarks = BookmarksStore::load(LocalStorage::open_in_memory().unwrap());
        bookmarks
            .add_bookmark(BookmarkDraft {
                book: "Gen".into(),
                chapter: 1,
                verse: 2,
                label: None,
                color: None,
            })
            .unwrap();
        let rendered = render_chapter("Gen", 1, &chapter(), &bookmarks, &AppSettings::default());

        assert_eq!(rendered.lines.len(), 2);
        assert!(!rendered.lines[0].bookmarked);
        assert!(rendered.lines[1].bookmarked);
        assert_eq!(rendered.lines[0].label.as_deref(), Some("1"));
        assert_eq!(rendered.lines[0].words, vec!["g746".to_string()]);
        assert!(rendered.lines[1].words.is_empty());
    }

    #[test]
    fn hidden_verse_numbers_and_paragraph_view() {
        let bookmarks = BookmarksStore::load(LocalStorage::open_in_memory().unwrap());
        let settings = AppSettings {
            verse_numbers: false,
            paragraph_view: true,
            ..AppSettings::default()
        };
        let rendered = render_chapter("Gen", 1, &chapter(), &bookmarks, &settings);
        assert!(rendered.paragraph_view);
        assert!(rendered.lines.iter().all(|l| l.label.is_none()));
    }

    #[test]
    fn share_text_strips_word_spans() {
        let verse = &chapter().verses[0].text;
        assert_eq!(
            share_text("Бытие", 1, 1, verse, "Синод."),
            "Бытие 1:1 - \"В начале сотворил Бог небо и землю.\" (Синод.)"
        );
        assert_eq!(word_ids(verse), vec!["g746".to_string()]);
    }

    #[test]
    fn tags_split_on_commas_and_spaces() {
        assert_eq!(
            parse_tags(" вера, надежда  любовь,,"),
            vec!["вера".to_string(), "надежда".to_string(), "любовь".to_string()]
        );
        assert!(parse_tags("  , ").is_empty());
    }

    #[test]
    fn relative_time_buckets() {
        let now = 10 * 24 * 3_600_000;
        assert_eq!(format_relative_time(now - 30_000, now), "только что");
        assert_eq!(format_relative_time(now - 5 * 60_000, now), "5 мин. назад");
        assert_eq!(format_relative_time(now - 3 * 3_600_000, now), "3 ч. назад");
        assert_eq!(format_relative_time(now - 2 * 24 * 3_600_000, now), "2 дн. назад");
        assert_eq!(format_relative_time(now + 1000, now), "только что");
    }

    #[test]
    fn relative_time_survives_extreme_timestamps() {
        let now = 1_700_000_000_000;
        assert_eq!(
            format_relative_time(i64::MIN, now),
            format!("{} дн. назад", i64::MAX / 1000 / 86_400)
        );
        assert_eq!(format_relative_time(i64::MAX, now), "только что");
        assert_eq!(format_relative_time(0, i64::MIN), "только что");
    }

    #[test]
    fn card_date_uses_local_calendar_day() {
        // noon on 2024-03-01 in whatever zone the tests run in
        let noon = Local
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .unwrap()
            .timestamp_millis();
        assert_eq!(format_card_date(noon), "01.03.2024");

        let late = Local
            .with_ymd_and_hms(2024, 3, 1, 23, 30, 0)
            .single()
            .unwrap()
            .timestamp_millis();
        assert_eq!(format_card_date(late), "01.03.2024");
    }

    #[test]
    fn action_panel_hides_on_downward_scroll() {
        let mut panel = ActionPanel::default();
        assert!(panel.on_scroll(30.0));
        assert!(!panel.on_scroll(120.0));
        assert!(!panel.on_scroll(200.0));
        assert!(panel.on_scroll(150.0));
        assert!(panel.visible());
    }

    #[test]
    fn confirmation_names_the_verse() {
        assert_eq!(
            confirmation_message(SavedItem::Bookmark, "От Иоанна", 3, 16),
            "Закладка добавлена для От Иоанна 3:16"
        );
    }
}
