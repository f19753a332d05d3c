//! Data models and structures used throughout the application

use serde::{Deserialize, Serialize};

/// A position in the text. Book codes are free-form; they are matched
/// against the catalog only when displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibleLocation {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
}

impl Default for BibleLocation {
    fn default() -> Self {
        Self {
            book: "Gen".to_string(),
            chapter: 1,
            verse: 1,
        }
    }
}

/// Partial location update coming from navigation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationUpdate {
    pub book: Option<String>,
    pub chapter: Option<u32>,
    pub verse: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentLocation {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub translation_id: String,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub language: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    Old,
    New,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    pub id: &'static str,
    pub name: &'static str,
    pub chapters: u32,
    pub testament: Testament,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseText {
    pub verse: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterText {
    pub book: String,
    pub chapter: u32,
    pub verses: Vec<VerseText>,
}

/// Lexical data shown in the word-study sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordData {
    pub id: String,
    pub original: String,
    pub transliteration: String,
    pub morphology: String,
    pub strong_number: String,
    pub definition: String,
    pub usage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub date: i64,
}

/// Fields supplied by the user when creating a note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub book: Option<String>,
    pub chapter: Option<u32>,
    pub verse: Option<u32>,
    pub text: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub date: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkDraft {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkUpdate {
    pub book: Option<String>,
    pub chapter: Option<u32>,
    pub verse: Option<u32>,
    pub label: Option<String>,
    pub color: Option<String>,
}

pub const MIN_FONT_SIZE: u32 = 12;
pub const MAX_FONT_SIZE: u32 = 24;

/// Display settings for the reading screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    pub font_size: u32,
    pub font_family: String,
    pub line_height: f32,
    pub verse_numbers: bool,
    pub paragraph_view: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            font_size: 16,
            font_family: "'PT Serif', serif".to_string(),
            line_height: 1.5,
            verse_numbers: true,
            paragraph_view: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub font_size: Option<u32>,
    pub font_family: Option<String>,
    pub line_height: Option<f32>,
    pub verse_numbers: Option<bool>,
    pub paragraph_view: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Accepts host color schemes in any case ("Dark", "light")
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReading {
    pub reference: &'static str,
    pub display_text: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPlan {
    pub id: &'static str,
    pub title: &'static str,
    pub progress: u8,
    pub day: u32,
    pub total_days: u32,
    pub current_reading: PlanReading,
}

/// User profile handed over by the host client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostUser {
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    pub photo_url: Option<String>,
    pub is_premium: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_fill_missing_fields_from_defaults() {
        let parsed: AppSettings = serde_json::from_str(r#"{"fontSize":20}"#).unwrap();
        assert_eq!(parsed.font_size, 20);
        assert_eq!(parsed.font_family, AppSettings::default().font_family);
        assert!(parsed.verse_numbers);
    }

    #[test]
    fn bookmark_without_label_omits_the_field() {
        let bookmark = Bookmark {
            id: "1".into(),
            book: "Joh".into(),
            chapter: 3,
            verse: 16,
            label: None,
            color: None,
            date: 1,
        };
        let json = serde_json::to_string(&bookmark).unwrap();
        assert!(!json.contains("label"));
    }

    #[test]
    fn theme_parses_host_color_scheme() {
        assert_eq!(Theme::parse("Dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }
}
