//! Reading plans and the profile statistics card

use serde::Serialize;

use crate::models::{HostUser, PlanReading, ReadingPlan};
use crate::router::{parse_reference, Route};

pub const TOTAL_BOOKS: u32 = 66;
pub const TOTAL_CHAPTERS: u32 = 1189;

// Progress shown on the profile until reading history is tracked
const READ_BOOKS: u32 = 12;
const READ_CHAPTERS: u32 = 120;

pub fn reading_plans() -> Vec<ReadingPlan> {
    vec![
        ReadingPlan {
            id: "year",
            title: "Библия за год",
            progress: 5,
            day: 18,
            total_days: 365,
            current_reading: PlanReading {
                reference: "Exo 5:1",
                display_text: "Исход 5-7",
            },
        },
        ReadingPlan {
            id: "nt90",
            title: "Новый Завет за 90 дней",
            progress: 12,
            day: 11,
            total_days: 90,
            current_reading: PlanReading {
                reference: "Mat 20:1",
                display_text: "Матфея 20-21",
            },
        },
    ]
}

/// Where "continue reading" takes the user for a plan
pub fn continue_plan(plan_id: &str) -> Option<Route> {
    reading_plans()
        .into_iter()
        .find(|p| p.id == plan_id)
        .and_then(|p| parse_reference(p.current_reading.reference))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStats {
    pub display_name: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub notes_count: usize,
    pub bookmarks_count: usize,
    pub read_books: u32,
    pub total_books: u32,
    pub read_chapters: u32,
    pub total_chapters: u32,
    pub progress_percent: u32,
}

pub fn account_stats(
    user: Option<&HostUser>,
    notes_count: usize,
    bookmarks_count: usize,
) -> AccountStats {
    let display_name = match user {
        Some(u) => match &u.last_name {
            Some(last) => format!("{} {}", u.first_name, last),
            None => u.first_name.clone(),
        },
        None => "Пользователь".to_string(),
    };
    AccountStats {
        display_name,
        username: user.and_then(|u| u.username.clone()),
        avatar_url: user.and_then(|u| u.photo_url.clone()),
        notes_count,
        bookmarks_count,
        read_books: READ_BOOKS,
        total_books: TOTAL_BOOKS,
        read_chapters: READ_CHAPTERS,
        total_chapters: TOTAL_CHAPTERS,
        progress_percent: (READ_CHAPTERS * 100 + TOTAL_CHAPTERS / 2) / TOTAL_CHAPTERS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::mock_user;

    #[test]
    fn continuing_a_plan_opens_its_reading() {
        assert_eq!(continue_plan("year"), Some(Route::read("Exo", 5, 1)));
        assert_eq!(continue_plan("nt90"), Some(Route::read("Mat", 20, 1)));
        assert_eq!(continue_plan("psalms"), None);
    }

    #[test]
    fn stats_use_host_profile() {
        let user = mock_user();
        let stats = account_stats(Some(&user), 3, 4);
        assert_eq!(stats.display_name, "Пользователь Telegram");
        assert_eq!(stats.notes_count, 3);
        assert_eq!(stats.read_chapters, 120);
        assert_eq!(stats.progress_percent, 10);

        let anonymous = account_stats(None, 0, 0);
        assert_eq!(anonymous.display_name, "Пользователь");
        assert!(anonymous.username.is_none());
    }
}
