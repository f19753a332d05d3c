//! Mock Bible data service: static catalogs and a sample passage served
//! with simulated network latency

use std::time::Duration;

use log::info;

use crate::models::{Book, ChapterText, Testament, Translation, Verse, VerseText, WordData};

macro_rules! book {
    ($id:literal, $name:literal, $chapters:literal, $t:ident) => {
        Book {
            id: $id,
            name: $name,
            chapters: $chapters,
            testament: Testament::$t,
        }
    };
}

pub static BOOKS: [Book; 66] = [
    book!("Gen", "Бытие", 50, Old),
    book!("Exo", "Исход", 40, Old),
    book!("Lev", "Левит", 27, Old),
    book!("Num", "Числа", 36, Old),
    book!("Deu", "Второзаконие", 34, Old),
    book!("Jos", "Иисус Навин", 24, Old),
    book!("Jdg", "Судьи", 21, Old),
    book!("Rut", "Руфь", 4, Old),
    book!("1Sa", "1-я Царств", 31, Old),
    book!("2Sa", "2-я Царств", 24, Old),
    book!("1Ki", "3-я Царств", 22, Old),
    book!("2Ki", "4-я Царств", 25, Old),
    book!("1Ch", "1-я Паралипоменон", 29, Old),
    book!("2Ch", "2-я Паралипоменон", 36, Old),
    book!("Ezr", "Ездра", 10, Old),
    book!("Neh", "Неемия", 13, Old),
    book!("Est", "Есфирь", 10, Old),
    book!("Job", "Иов", 42, Old),
    book!("Psa", "Псалтирь", 150, Old),
    book!("Pro", "Притчи", 31, Old),
    book!("Ecc", "Екклесиаст", 12, Old),
    book!("Sng", "Песнь песней", 8, Old),
    book!("Isa", "Исаия", 66, Old),
    book!("Jer", "Иеремия", 52, Old),
    book!("Lam", "Плач Иеремии", 5, Old),
    book!("Ezk", "Иезекииль", 48, Old),
    book!("Dan", "Даниил", 12, Old),
    book!("Hos", "Осия", 14, Old),
    book!("Jol", "Иоиль", 3, Old),
    book!("Amo", "Амос", 9, Old),
    book!("Oba", "Авдий", 1, Old),
    book!("Jon", "Иона", 4, Old),
    book!("Mic", "Михей", 7, Old),
    book!("Nah", "Наум", 3, Old),
    book!("Hab", "Аввакум", 3, Old),
    book!("Zep", "Софония", 3, Old),
    book!("Hag", "Аггей", 2, Old),
    book!("Zec", "Захария", 14, Old),
    book!("Mal", "Малахия", 4, Old),
    book!("Mat", "От Матфея", 28, New),
    book!("Mar", "От Марка", 16, New),
    book!("Luk", "От Луки", 24, New),
    book!("Joh", "От Иоанна", 21, New),
    book!("Act", "Деяния", 28, New),
    book!("Rom", "К Римлянам", 16, New),
    book!("1Co", "1-е Коринфянам", 16, New),
    book!("2Co", "2-е Коринфянам", 13, New),
    book!("Gal", "К Галатам", 6, New),
    book!("Eph", "К Ефесянам", 6, New),
    book!("Php", "К Филиппийцам", 4, New),
    book!("Col", "К Колоссянам", 4, New),
    book!("1Th", "1-е Фессалоникийцам", 5, New),
    book!("2Th", "2-е Фессалоникийцам", 3, New),
    book!("1Ti", "1-е Тимофею", 6, New),
    book!("2Ti", "2-е Тимофею", 4, New),
    book!("Tit", "К Титу", 3, New),
    book!("Phm", "К Филимону", 1, New),
    book!("Heb", "К Евреям", 13, New),
    book!("Jas", "Иакова", 5, New),
    book!("1Pe", "1-е Петра", 5, New),
    book!("2Pe", "2-е Петра", 3, New),
    book!("1Jo", "1-е Иоанна", 5, New),
    book!("2Jo", "2-е Иоанна", 1, New),
    book!("3Jo", "3-е Иоанна", 1, New),
    book!("Jud", "Иуды", 1, New),
    book!("Rev", "Откровение", 22, New),
];

/// (id, name, short name, language)
const TRANSLATIONS: [(&str, &str, &str, &str); 7] = [
    ("synodal", "Синодальный перевод", "Синод.", "ru"),
    ("rbo", "Современный перевод РБО", "РБО", "ru"),
    ("nrt", "Новый русский перевод", "НРП", "ru"),
    ("kjv", "King James Version", "KJV", "en"),
    ("niv", "New International Version", "NIV", "en"),
    ("wlc", "Древнееврейский (WLC)", "Heb", "he"),
    ("tr", "Древнегреческий (TR)", "Grk", "el"),
];

pub const DEFAULT_TRANSLATION_ID: &str = "synodal";

const SAMPLE_CHAPTER: [(u32, &str); 5] = [
    (1, r#"В <span class="word" data-word-id="g746">начале</span> сотворил Бог небо и землю."#),
    (2, "Земля же была безвидна и пуста, и тьма над бездною, и Дух Божий носился над водою."),
    (3, "И сказал Бог: да будет свет. И стал свет."),
    (4, "И увидел Бог свет, что он хорош, и отделил Бог свет от тьмы."),
    (5, "И назвал Бог свет днем, а тьму ночью. И был вечер, и было утро: день один."),
];

const JOHN_3_16: &str =
    "Ибо так возлюбил Бог мир, что отдал Сына Своего Единородного, дабы всякий верующий в Него, не погиб, но имел жизнь вечную.";
const ROMANS_8_28: &str =
    "Притом знаем, что любящим Бога, призванным по Его изволению, все содействует ко благу.";

fn to_translation(entry: &(&str, &str, &str, &str)) -> Translation {
    Translation {
        id: entry.0.to_string(),
        name: entry.1.to_string(),
        short_name: entry.2.to_string(),
        language: entry.3.to_string(),
    }
}

pub fn get_books() -> &'static [Book] {
    &BOOKS
}

pub fn get_books_by_testament(testament: Testament) -> Vec<&'static Book> {
    BOOKS.iter().filter(|b| b.testament == testament).collect()
}

pub fn get_book(id: &str) -> Option<&'static Book> {
    BOOKS.iter().find(|b| b.id == id)
}

pub fn get_translations() -> Vec<Translation> {
    TRANSLATIONS.iter().map(to_translation).collect()
}

pub fn get_translations_by_language(language: &str) -> Vec<Translation> {
    TRANSLATIONS
        .iter()
        .filter(|t| t.3 == language)
        .map(to_translation)
        .collect()
}

pub fn get_translation(id: &str) -> Option<Translation> {
    TRANSLATIONS.iter().find(|t| t.0 == id).map(to_translation)
}

pub fn default_translation() -> Translation {
    to_translation(&TRANSLATIONS[0])
}

fn verse_of_the_day() -> Verse {
    Verse {
        book: "Joh".to_string(),
        chapter: 3,
        verse: 16,
        text: JOHN_3_16.to_string(),
    }
}

/// Asynchronous lookups standing in for a remote text API
#[derive(Debug, Clone)]
pub struct BibleService {
    delay: Duration,
    search_delay: Duration,
}

impl Default for BibleService {
    fn default() -> Self {
        Self::new(Duration::from_millis(300), Duration::from_millis(500))
    }
}

impl BibleService {
    pub fn new(delay: Duration, search_delay: Duration) -> Self {
        Self {
            delay,
            search_delay,
        }
    }

    async fn simulate_latency(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    /// The mock only carries Genesis 1; every request gets it back.
    pub async fn get_chapter(&self, book: &str, chapter: u32, translation_id: &str) -> ChapterText {
        info!(
            "[bible_service] get_chapter {} {} ({})",
            book, chapter, translation_id
        );
        self.simulate_latency(self.delay).await;
        ChapterText {
            book: "Gen".to_string(),
            chapter: 1,
            verses: SAMPLE_CHAPTER
                .iter()
                .map(|(verse, text)| VerseText {
                    verse: *verse,
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    pub async fn get_verse(
        &self,
        book: &str,
        chapter: u32,
        verse: u32,
        _translation_id: &str,
    ) -> Option<Verse> {
        self.simulate_latency(self.delay).await;
        SAMPLE_CHAPTER
            .iter()
            .find(|(number, _)| *number == verse)
            .map(|(number, text)| Verse {
                book: book.to_string(),
                chapter,
                verse: *number,
                text: text.to_string(),
            })
    }

    pub async fn get_word_data(&self, word_id: &str) -> Option<WordData> {
        self.simulate_latency(self.delay).await;
        match word_id {
            "g746" => Some(WordData {
                id: "g746".to_string(),
                original: "ἀρχῇ".to_string(),
                transliteration: "archē".to_string(),
                morphology: "Сущ., Дат.п., ед.ч., ж.р.".to_string(),
                strong_number: "G746".to_string(),
                definition: "начало, власть".to_string(),
                usage: 55,
            }),
            _ => None,
        }
    }

    pub async fn get_verse_of_the_day(&self) -> Verse {
        self.simulate_latency(self.delay).await;
        verse_of_the_day()
    }

    /// Returns the same two sample hits for any query
    pub async fn search(&self, query: &str, translation_id: &str) -> Vec<Verse> {
        info!("[bible_service] search {:?} ({})", query, translation_id);
        self.simulate_latency(self.search_delay).await;
        vec![
            verse_of_the_day(),
            Verse {
                book: "Rom".to_string(),
                chapter: 8,
                verse: 28,
                text: ROMANS_8_28.to_string(),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn instant() -> BibleService {
        BibleService::new(Duration::ZERO, Duration::ZERO)
    }

    #[test]
    fn catalog_splits_into_testaments() {
        assert_eq!(get_books().len(), 66);
        assert_eq!(get_books_by_testament(Testament::Old).len(), 39);
        assert_eq!(get_books_by_testament(Testament::New).len(), 27);
        assert_eq!(get_book("Psa").map(|b| b.chapters), Some(150));
        assert!(get_book("Xyz").is_none());
    }

    #[test]
    fn translations_by_language() {
        let ids: Vec<String> = get_translations_by_language("en")
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["kjv".to_string(), "niv".to_string()]);
        assert_eq!(default_translation().id, DEFAULT_TRANSLATION_ID);
        assert_eq!(get_translation("tr").map(|t| t.short_name), Some("Grk".to_string()));
    }

    #[tokio::test]
    async fn chapter_is_always_the_sample_passage() {
        let chapter = instant().get_chapter("Rev", 22, "kjv").await;
        assert_eq!(chapter.book, "Gen");
        assert_eq!(chapter.verses.len(), 5);
        assert!(chapter.verses[0].text.contains("data-word-id=\"g746\""));
    }

    #[tokio::test]
    async fn verse_lookup_keeps_requested_reference() {
        let service = instant();
        let verse = service.get_verse("Exo", 2, 3, "synodal").await.unwrap();
        assert_eq!(verse.book, "Exo");
        assert_eq!(verse.chapter, 2);
        assert_eq!(verse.text, "И сказал Бог: да будет свет. И стал свет.");
        assert!(service.get_verse("Gen", 1, 6, "synodal").await.is_none());
    }

    #[tokio::test]
    async fn word_data_and_search() {
        let service = instant();
        assert_eq!(
            service.get_word_data("g746").await.map(|w| w.usage),
            Some(55)
        );
        assert!(service.get_word_data("h1").await.is_none());

        let hits = service.search("любовь", "synodal").await;
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[1].book, "Rom");
        assert_eq!(service.get_verse_of_the_day().await.verse, 16);
    }

    #[tokio::test(start_paused = true)]
    async fn lookups_wait_for_simulated_latency() {
        let service = BibleService::default();
        let started = tokio::time::Instant::now();
        service.get_verse_of_the_day().await;
        assert!(started.elapsed() >= Duration::from_millis(300));
    }
}
