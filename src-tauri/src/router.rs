//! Route table for the app screens, header titles and the footer tab bar

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum Route {
    Home,
    Read {
        book: Option<String>,
        chapter: Option<u32>,
        verse: Option<u32>,
    },
    Notes,
    Bookmarks,
    Plans,
    Account,
}

impl Route {
    pub fn read(book: &str, chapter: u32, verse: u32) -> Self {
        Route::Read {
            book: Some(book.to_string()),
            chapter: Some(chapter),
            verse: Some(verse),
        }
    }

    /// Resolves a path such as `/read/Gen/1/1`. Unknown paths yield `None`.
    /// Non-numeric chapter or verse segments are dropped, like an
    /// unparsable URL parameter.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').filter(|s| !s.is_empty());
        let route = match segments.next() {
            None => Route::Home,
            Some("read") => {
                let book = segments.next().map(str::to_string);
                let chapter = segments.next().and_then(|s| s.parse().ok());
                let verse = segments.next().and_then(|s| s.parse().ok());
                Route::Read {
                    book,
                    chapter,
                    verse,
                }
            }
            Some("notes") => Route::Notes,
            Some("bookmarks") => Route::Bookmarks,
            Some("plans") => Route::Plans,
            Some("account") => Route::Account,
            Some(_) => return None,
        };
        if segments.next().is_some() {
            return None;
        }
        Some(route)
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Read {
                book,
                chapter,
                verse,
            } => {
                let mut path = String::from("/read");
                if let Some(book) = book {
                    path.push('/');
                    path.push_str(book);
                    if let Some(chapter) = chapter {
                        path.push_str(&format!("/{}", chapter));
                        if let Some(verse) = verse {
                            path.push_str(&format!("/{}", verse));
                        }
                    }
                }
                path
            }
            Route::Notes => "/notes".to_string(),
            Route::Bookmarks => "/bookmarks".to_string(),
            Route::Plans => "/plans".to_string(),
            Route::Account => "/account".to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Библия",
            Route::Read { .. } => "Чтение",
            Route::Notes => "Мои заметки",
            Route::Bookmarks => "Мои закладки",
            Route::Plans => "Планы чтения",
            Route::Account => "Мой профиль",
        }
    }
}

/// Parses a human reference like `Exo 5:1` or `1Co 13` into a reading
/// route. Verse defaults to 1.
pub fn parse_reference(reference: &str) -> Option<Route> {
    let (book, rest) = reference.trim().split_once(char::is_whitespace)?;
    if !book.chars().all(|c| c.is_ascii_alphanumeric())
        || !book.chars().any(|c| c.is_ascii_alphabetic())
    {
        return None;
    }

    let (chapter_part, verse_part) = match rest.trim().split_once(':') {
        Some((c, v)) => (c.trim_end(), Some(v.trim_start())),
        None => (rest.trim(), None),
    };
    let chapter = leading_number(chapter_part)?;
    let verse = verse_part.and_then(leading_number).unwrap_or(1);
    Some(Route::read(book, chapter, verse))
}

fn leading_number(s: &str) -> Option<u32> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    /// `/` must match exactly, other tabs match any path under them
    pub exact: bool,
}

pub const FOOTER_ITEMS: [NavItem; 4] = [
    NavItem {
        path: "/",
        label: "Главная",
        exact: true,
    },
    NavItem {
        path: "/read",
        label: "Читать",
        exact: false,
    },
    NavItem {
        path: "/plans",
        label: "Планы",
        exact: false,
    },
    NavItem {
        path: "/account",
        label: "Профиль",
        exact: false,
    },
];

impl NavItem {
    pub fn is_active(&self, current_path: &str) -> bool {
        if self.exact {
            current_path == self.path
        } else {
            current_path == self.path
                || current_path
                    .strip_prefix(self.path)
                    .is_some_and(|rest| rest.starts_with('/'))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_every_screen() {
        assert_eq!(Route::parse("/"), Some(Route::Home));
        assert_eq!(Route::parse(""), Some(Route::Home));
        assert_eq!(Route::parse("/notes"), Some(Route::Notes));
        assert_eq!(Route::parse("/bookmarks/"), Some(Route::Bookmarks));
        assert_eq!(Route::parse("/plans"), Some(Route::Plans));
        assert_eq!(Route::parse("/account?tab=stats"), Some(Route::Account));
        assert_eq!(Route::parse("/settings"), None);
        assert_eq!(Route::parse("/notes/extra"), None);
    }

    #[test]
    fn read_route_parameters_are_optional() {
        assert_eq!(
            Route::parse("/read"),
            Some(Route::Read {
                book: None,
                chapter: None,
                verse: None
            })
        );
        assert_eq!(Route::parse("/read/Joh/3/16"), Some(Route::read("Joh", 3, 16)));
        assert_eq!(
            Route::parse("/read/Joh/x"),
            Some(Route::Read {
                book: Some("Joh".into()),
                chapter: None,
                verse: None
            })
        );
    }

    #[test]
    fn path_round_trips_through_parse() {
        let route = Route::read("1Co", 13, 4);
        assert_eq!(route.path(), "/read/1Co/13/4");
        assert_eq!(Route::parse(&route.path()), Some(route));
    }

    #[test]
    fn references_resolve_to_reading_routes() {
        assert_eq!(parse_reference("Exo 5:1"), Some(Route::read("Exo", 5, 1)));
        assert_eq!(parse_reference("Mat 20"), Some(Route::read("Mat", 20, 1)));
        assert_eq!(parse_reference("1Co 13:4"), Some(Route::read("1Co", 13, 4)));
        assert_eq!(parse_reference("Psa 118:1"), Some(Route::read("Psa", 118, 1)));
        assert_eq!(parse_reference("  Rev 22 : 21 "), Some(Route::read("Rev", 22, 21)));
        assert_eq!(parse_reference("Joh"), None);
        assert_eq!(parse_reference(""), None);
    }

    #[test]
    fn header_titles() {
        let titles: Vec<&str> = [
            Route::Home,
            Route::read("Gen", 1, 1),
            Route::Notes,
            Route::Bookmarks,
            Route::Plans,
            Route::Account,
        ]
        .iter()
        .map(Route::title)
        .collect();
        assert_eq!(
            titles,
            vec!["Библия", "Чтение", "Мои заметки", "Мои закладки", "Планы чтения", "Мой профиль"]
        );
    }

    #[test]
    fn footer_tabs_highlight_by_prefix() {
        let [home, read, plans, _] = &FOOTER_ITEMS;
        assert!(home.is_active("/"));
        assert!(!home.is_active("/read"));
        assert!(read.is_active("/read/Gen/1/1"));
        assert!(!read.is_active("/reading"));
        assert!(plans.is_active("/plans"));
    }
}
