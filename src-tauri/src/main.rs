// Prevents additional console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

// Module declarations
mod bible_service;
mod config;
mod db;
mod host;
mod modal;
mod models;
mod paths;
mod plans;
mod reader;
mod router;
mod stores;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use log::{error, info, warn};
use serde::Serialize;
use serde_json::json;
use tauri::{command, AppHandle, Emitter, Manager, State};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use bible_service::BibleService;
use config::AppConfig;
use db::LocalStorage;
use host::{
    copy_with_feedback, init_host, share_or_copy, HostBridge, HostContext, MockHost, PopupParams,
    DARK_BACKGROUND, LIGHT_BACKGROUND,
};
use modal::{ModalEvent, ModalStack, ModalState};
use models::{
    AppSettings, BibleLocation, Book, Bookmark, BookmarkDraft, BookmarkUpdate, ChapterText,
    LocationUpdate, Note, NoteDraft, NoteUpdate, ReadingPlan, SettingsUpdate, Testament, Theme,
    Translation, Verse, WordData,
};
use paths::*;
use reader::{ActionPanel, RenderedChapter, SavedItem};
use router::{NavItem, Route, FOOTER_ITEMS};
use stores::bible::{book_display_name, BibleState};
use stores::settings::CssVariable;
use stores::{now_millis, BibleStore, BookmarksStore, NotesStore, SettingsStore, ThemeStore};

// ============ App State ============

pub struct AppState {
    pub config: AppConfig,
    pub service: BibleService,
    pub storage: LocalStorage,
    pub host: Box<dyn HostBridge>,
    pub host_context: HostContext,
    pub bible: Mutex<BibleStore>,
    pub notes: Mutex<NotesStore>,
    pub bookmarks: Mutex<BookmarksStore>,
    pub settings: Mutex<SettingsStore>,
    pub theme: Mutex<ThemeStore>,
    pub modals: Mutex<ModalStack>,
    pub action_panel: Mutex<ActionPanel>,
}

impl AppState {
    fn new(
        config: AppConfig,
        storage: LocalStorage,
        host: Box<dyn HostBridge>,
        prefers_dark: bool,
    ) -> Self {
        let host_context = init_host(host.as_ref());
        Self {
            service: config.bible_service(),
            bible: Mutex::new(
                BibleStore::load(storage.clone()).with_recent_limit(config.recent_limit),
            ),
            notes: Mutex::new(NotesStore::load(storage.clone())),
            bookmarks: Mutex::new(BookmarksStore::load(storage.clone())),
            settings: Mutex::new(SettingsStore::load(storage.clone())),
            theme: Mutex::new(ThemeStore::load(
                storage.clone(),
                Some(host_context.color_scheme.as_str()),
                prefers_dark,
            )),
            modals: Mutex::new(ModalStack::new()),
            action_panel: Mutex::new(ActionPanel::default()),
            config,
            storage,
            host,
            host_context,
        }
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, String> {
    mutex
        .lock()
        .map_err(|_| format!("{} state is unavailable", what))
}

// ============ Host Bridge ============

/// Set by the host handshake; the main window then asks before closing
static CLOSING_CONFIRMATION: AtomicBool = AtomicBool::new(false);
/// Set once the user agreed to close, so the follow-up request goes through
static CLOSE_CONFIRMED: AtomicBool = AtomicBool::new(false);

/// Host bridge for the desktop shell: popups become native dialogs, share
/// and copy requests and background changes are forwarded to the webview.
struct DesktopHost {
    app: AppHandle,
    profile: MockHost,
}

impl DesktopHost {
    fn new(app: AppHandle, prefers_dark: bool) -> Self {
        Self {
            app,
            profile: MockHost::new(prefers_dark),
        }
    }
}

impl HostBridge for DesktopHost {
    fn context(&self) -> HostContext {
        self.profile.context()
    }

    fn ready(&self) {
        info!("[host] ready");
    }

    fn expand(&self) {
        if let Some(window) = self.app.get_webview_window("main") {
            if let Err(e) = window.maximize() {
                warn!("[host] Failed to expand main window: {}", e);
            }
        }
    }

    fn enable_closing_confirmation(&self) {
        CLOSING_CONFIRMATION.store(true, Ordering::SeqCst);
    }

    fn set_background_color(&self, color: &str) {
        if let Err(e) = self.app.emit("host-background", json!({ "color": color })) {
            warn!("[host] Failed to emit background color: {}", e);
        }
    }

    fn show_popup(&self, params: &PopupParams) {
        let mut dialog = self
            .app
            .dialog()
            .message(params.message.clone())
            .kind(MessageDialogKind::Info);
        if let Some(title) = &params.title {
            dialog = dialog.title(title.clone());
        }
        dialog.show(|_| {});
    }

    fn share_text(&self, text: &str) -> bool {
        info!("[host] share: {}", text);
        self.app.emit("host-share", json!({ "text": text })).is_ok()
    }

    fn copy_text(&self, text: &str) -> bool {
        match self.app.emit("host-copy", json!({ "text": text })) {
            Ok(()) => true,
            Err(e) => {
                warn!("[host] Failed to emit copy request: {}", e);
                false
            }
        }
    }
}

// ============ Init Commands ============

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitStatus {
    pub ready: bool,
    pub host: HostContext,
    pub theme: Theme,
    pub bible: BibleState,
    pub settings: AppSettings,
    pub css_variables: Vec<CssVariable>,
}

#[command]
fn init_app(state: State<'_, AppState>) -> Result<InitStatus, String> {
    let bible = lock(&state.bible, "bible")?.state();
    let settings_store = lock(&state.settings, "settings")?;
    let theme = lock(&state.theme, "theme")?.theme();
    Ok(InitStatus {
        ready: true,
        host: state.host_context.clone(),
        theme,
        bible,
        settings: settings_store.settings().clone(),
        css_variables: settings_store.css_variables(),
    })
}

#[command]
fn get_host_context(state: State<'_, AppState>) -> HostContext {
    state.host_context.clone()
}

#[command]
fn log_from_frontend(level: String, message: String) {
    match level.as_str() {
        "error" => error!("[Frontend] {}", message),
        "warn" => warn!("[Frontend] {}", message),
        _ => info!("[Frontend] {}", message),
    }
}

// ============ Catalog Commands ============

#[command]
fn get_books(testament: Option<Testament>) -> Vec<Book> {
    match testament {
        Some(t) => bible_service::get_books_by_testament(t)
            .into_iter()
            .cloned()
            .collect(),
        None => bible_service::get_books().to_vec(),
    }
}

#[command]
fn get_book(state: State<'_, AppState>, book_id: String) -> Result<Option<Book>, String> {
    Ok(lock(&state.bible, "bible")?.book_by_id(&book_id).cloned())
}

#[command]
fn get_book_name(book_id: String) -> String {
    book_display_name(&book_id)
}

#[command]
fn get_chapter_count(state: State<'_, AppState>, book_id: String) -> Result<u32, String> {
    Ok(lock(&state.bible, "bible")?.chapter_count(&book_id))
}

#[command]
fn get_translations(language: Option<String>) -> Vec<Translation> {
    match language {
        Some(lang) => bible_service::get_translations_by_language(&lang),
        None => bible_service::get_translations(),
    }
}

// ============ Bible Location Commands ============

#[command]
fn get_bible_state(state: State<'_, AppState>) -> Result<BibleState, String> {
    Ok(lock(&state.bible, "bible")?.state())
}

#[command]
fn set_location(state: State<'_, AppState>, update: LocationUpdate) -> Result<BibleState, String> {
    let mut bible = lock(&state.bible, "bible")?;
    bible.set_location(update).map_err(|e| e.to_string())?;
    Ok(bible.state())
}

#[command]
fn set_translation(
    state: State<'_, AppState>,
    translation_id: String,
) -> Result<BibleState, String> {
    let mut bible = lock(&state.bible, "bible")?;
    if !bible
        .set_translation(&translation_id)
        .map_err(|e| e.to_string())?
    {
        warn!("[bible] Unknown translation {}", translation_id);
    }
    Ok(bible.state())
}

#[command]
fn add_to_recent(
    state: State<'_, AppState>,
    location: BibleLocation,
) -> Result<BibleState, String> {
    let mut bible = lock(&state.bible, "bible")?;
    bible.add_to_recent(location).map_err(|e| e.to_string())?;
    Ok(bible.state())
}

/// Path of the chapter after the current location, `None` at the end
#[command]
fn next_chapter(state: State<'_, AppState>) -> Result<Option<String>, String> {
    Ok(lock(&state.bible, "bible")?.next_chapter().map(|r| r.path()))
}

#[command]
fn prev_chapter(state: State<'_, AppState>) -> Result<Option<String>, String> {
    Ok(lock(&state.bible, "bible")?.prev_chapter().map(|r| r.path()))
}

// ============ Reading Commands ============

/// Opens a chapter: missing route parameters fall back to the current
/// location, which is then updated to the resolved reference.
#[command]
async fn load_chapter(
    state: State<'_, AppState>,
    book: Option<String>,
    chapter: Option<u32>,
    verse: Option<u32>,
) -> Result<RenderedChapter, String> {
    let (book_id, chapter_num, translation_id) = {
        let mut bible = lock(&state.bible, "bible")?;
        let current = bible.current_location().clone();
        let book_id = book.unwrap_or(current.book);
        let chapter_num = chapter.unwrap_or(current.chapter);
        let verse_num = verse.unwrap_or(current.verse);
        bible
            .set_location(LocationUpdate {
                book: Some(book_id.clone()),
                chapter: Some(chapter_num),
                verse: Some(verse_num),
            })
            .map_err(|e| e.to_string())?;
        (book_id, chapter_num, bible.current_translation().id.clone())
    };

    let service = state.service.clone();
    let text: ChapterText = service
        .get_chapter(&book_id, chapter_num, &translation_id)
        .await;

    let bookmarks = lock(&state.bookmarks, "bookmarks")?;
    let settings = lock(&state.settings, "settings")?;
    Ok(reader::render_chapter(
        &book_id,
        chapter_num,
        &text,
        &bookmarks,
        settings.settings(),
    ))
}

/// Returns whether the bottom action panel should be shown
#[command]
fn reader_scrolled(state: State<'_, AppState>, scroll_top: f64) -> Result<bool, String> {
    Ok(lock(&state.action_panel, "action panel")?.on_scroll(scroll_top))
}

#[command]
async fn get_verse(
    state: State<'_, AppState>,
    book: String,
    chapter: u32,
    verse: u32,
) -> Result<Option<Verse>, String> {
    let translation_id = lock(&state.bible, "bible")?.current_translation().id.clone();
    let service = state.service.clone();
    Ok(service.get_verse(&book, chapter, verse, &translation_id).await)
}

#[command]
async fn get_word_data(
    state: State<'_, AppState>,
    word_id: String,
) -> Result<Option<WordData>, String> {
    info!("[reader] Analyzing word {}", word_id);
    let service = state.service.clone();
    Ok(service.get_word_data(&word_id).await)
}

#[derive(Serialize)]
pub struct VerseOfTheDay {
    pub text: String,
    pub reference: String,
    pub path: String,
}

#[command]
async fn get_verse_of_the_day(state: State<'_, AppState>) -> Result<VerseOfTheDay, String> {
    let service = state.service.clone();
    let verse = service.get_verse_of_the_day().await;
    let short_name = lock(&state.bible, "bible")?
        .current_translation()
        .short_name
        .clone();
    Ok(VerseOfTheDay {
        reference: format!(
            "{} {}:{} ({})",
            book_display_name(&verse.book),
            verse.chapter,
            verse.verse,
            short_name
        ),
        path: Route::read(&verse.book, verse.chapter, verse.verse).path(),
        text: verse.text,
    })
}

/// Full-text search is not offered yet; the host tells the user so
#[command]
async fn search(state: State<'_, AppState>, query: String) -> Result<Vec<Verse>, String> {
    let query = query.trim().to_string();
    if query.is_empty() {
        return Ok(Vec::new());
    }
    state.host.show_alert(&format!(
        "Поиск по запросу: \"{}\" будет доступен в следующей версии",
        query
    ));
    let translation_id = lock(&state.bible, "bible")?.current_translation().id.clone();
    let service = state.service.clone();
    Ok(service.search(&query, &translation_id).await)
}

fn verse_share_text(state: &AppState, verse: u32, verse_html: &str) -> Result<String, String> {
    let bible = lock(&state.bible, "bible")?;
    let location = bible.current_location();
    Ok(reader::share_text(
        &bible.book_name(&location.book),
        location.chapter,
        verse,
        verse_html,
        &bible.current_translation().short_name,
    ))
}

/// Shares a verse of the current chapter, copying it when the host
/// cannot share
#[command]
fn share_verse(
    state: State<'_, AppState>,
    verse: u32,
    verse_html: String,
) -> Result<String, String> {
    let text = verse_share_text(&state, verse, &verse_html)?;
    share_or_copy(state.host.as_ref(), &text);
    Ok(text)
}

#[command]
fn copy_verse(
    state: State<'_, AppState>,
    verse: u32,
    verse_html: String,
) -> Result<String, String> {
    let text = verse_share_text(&state, verse, &verse_html)?;
    copy_with_feedback(state.host.as_ref(), &text);
    Ok(text)
}

#[command]
fn show_popup(state: State<'_, AppState>, params: PopupParams) {
    state.host.show_popup(&params);
}

// ============ Notes Commands ============

#[command]
fn get_notes(state: State<'_, AppState>) -> Result<Vec<Note>, String> {
    Ok(lock(&state.notes, "notes")?.notes().to_vec())
}

#[command]
fn get_notes_by_reference(
    state: State<'_, AppState>,
    book: String,
    chapter: u32,
    verse: Option<u32>,
) -> Result<Vec<Note>, String> {
    Ok(lock(&state.notes, "notes")?.notes_by_reference(&book, chapter, verse))
}

/// Tags arrive as the raw text of the tag field
#[command]
fn add_note(
    state: State<'_, AppState>,
    book: String,
    chapter: u32,
    verse: u32,
    text: String,
    tags: String,
) -> Result<Note, String> {
    let note = lock(&state.notes, "notes")?
        .add_note(NoteDraft {
            book,
            chapter,
            verse,
            text,
            tags: reader::parse_tags(&tags),
        })
        .map_err(|e| e.to_string())?;
    state.host.show_popup(&PopupParams::done(reader::confirmation_message(
        SavedItem::Note,
        &book_display_name(&note.book),
        note.chapter,
        note.verse,
    )));
    Ok(note)
}

#[command]
fn edit_note(
    state: State<'_, AppState>,
    id: String,
    update: NoteUpdate,
    tags: Option<String>,
) -> Result<Option<Note>, String> {
    let mut update = update;
    if let Some(raw) = tags {
        update.tags = Some(reader::parse_tags(&raw));
    }
    lock(&state.notes, "notes")?
        .edit_note(&id, update)
        .map_err(|e| e.to_string())
}

#[command]
fn delete_note(state: State<'_, AppState>, id: String) -> Result<bool, String> {
    lock(&state.notes, "notes")?
        .delete_note(&id)
        .map_err(|e| e.to_string())
}

// ============ Bookmark Commands ============

#[command]
fn get_bookmarks(state: State<'_, AppState>) -> Result<Vec<Bookmark>, String> {
    Ok(lock(&state.bookmarks, "bookmarks")?.bookmarks().to_vec())
}

#[command]
fn get_bookmarks_by_reference(
    state: State<'_, AppState>,
    book: String,
    chapter: u32,
    verse: Option<u32>,
) -> Result<Vec<Bookmark>, String> {
    Ok(lock(&state.bookmarks, "bookmarks")?.bookmarks_by_reference(&book, chapter, verse))
}

#[command]
fn has_bookmark(
    state: State<'_, AppState>,
    book: String,
    chapter: u32,
    verse: u32,
) -> Result<bool, String> {
    Ok(lock(&state.bookmarks, "bookmarks")?.has_bookmark(&book, chapter, verse))
}

/// Returns `None` when the verse was already bookmarked
#[command]
fn add_bookmark(
    state: State<'_, AppState>,
    draft: BookmarkDraft,
) -> Result<Option<Bookmark>, String> {
    let added = lock(&state.bookmarks, "bookmarks")?
        .add_bookmark(draft)
        .map_err(|e| e.to_string())?;
    if let Some(bookmark) = &added {
        state.host.show_popup(&PopupParams::done(reader::confirmation_message(
            SavedItem::Bookmark,
            &book_display_name(&bookmark.book),
            bookmark.chapter,
            bookmark.verse,
        )));
    }
    Ok(added)
}

#[command]
fn edit_bookmark(
    state: State<'_, AppState>,
    id: String,
    update: BookmarkUpdate,
) -> Result<Option<Bookmark>, String> {
    lock(&state.bookmarks, "bookmarks")?
        .edit_bookmark(&id, update)
        .map_err(|e| e.to_string())
}

#[command]
fn delete_bookmark(state: State<'_, AppState>, id: String) -> Result<bool, String> {
    lock(&state.bookmarks, "bookmarks")?
        .delete_bookmark(&id)
        .map_err(|e| e.to_string())
}

// ============ Settings & Theme Commands ============

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub settings: AppSettings,
    pub css_variables: Vec<CssVariable>,
}

fn settings_response(store: &SettingsStore) -> SettingsResponse {
    SettingsResponse {
        settings: store.settings().clone(),
        css_variables: store.css_variables(),
    }
}

#[command]
fn get_settings(state: State<'_, AppState>) -> Result<SettingsResponse, String> {
    Ok(settings_response(&*lock(&state.settings, "settings")?))
}

#[command]
fn update_settings(
    state: State<'_, AppState>,
    update: SettingsUpdate,
) -> Result<SettingsResponse, String> {
    let mut store = lock(&state.settings, "settings")?;
    store.update_settings(update).map_err(|e| e.to_string())?;
    Ok(settings_response(&store))
}

#[command]
fn reset_settings(state: State<'_, AppState>) -> Result<SettingsResponse, String> {
    let mut store = lock(&state.settings, "settings")?;
    store.reset_settings().map_err(|e| e.to_string())?;
    Ok(settings_response(&store))
}

#[command]
fn get_theme(state: State<'_, AppState>) -> Result<Theme, String> {
    Ok(lock(&state.theme, "theme")?.theme())
}

fn apply_host_background(state: &AppState, theme: Theme) {
    state.host.set_background_color(match theme {
        Theme::Dark => DARK_BACKGROUND,
        Theme::Light => LIGHT_BACKGROUND,
    });
}

#[command]
fn set_theme(state: State<'_, AppState>, theme: Theme) -> Result<Theme, String> {
    let theme = lock(&state.theme, "theme")?
        .set_theme(theme)
        .map_err(|e| e.to_string())?;
    apply_host_background(&state, theme);
    Ok(theme)
}

#[command]
fn toggle_theme(state: State<'_, AppState>) -> Result<Theme, String> {
    let theme = lock(&state.theme, "theme")?
        .toggle_theme()
        .map_err(|e| e.to_string())?;
    apply_host_background(&state, theme);
    Ok(theme)
}

// ============ Routing Commands ============

#[derive(Serialize)]
pub struct ResolvedRoute {
    pub route: Route,
    pub title: &'static str,
    pub path: String,
}

#[command]
fn resolve_route(path: String) -> Result<ResolvedRoute, String> {
    let route = Route::parse(&path).ok_or_else(|| format!("Unknown route: {}", path))?;
    Ok(ResolvedRoute {
        title: route.title(),
        path: route.path(),
        route,
    })
}

#[command]
fn resolve_reference(reference: String) -> Option<String> {
    router::parse_reference(&reference).map(|r| r.path())
}

#[derive(Serialize)]
pub struct FooterItem {
    #[serde(flatten)]
    pub item: NavItem,
    pub active: bool,
}

#[command]
fn get_footer_items(current_path: String) -> Vec<FooterItem> {
    FOOTER_ITEMS
        .iter()
        .map(|item| FooterItem {
            active: item.is_active(&current_path),
            item: item.clone(),
        })
        .collect()
}

#[command]
fn get_reading_plans() -> Vec<ReadingPlan> {
    plans::reading_plans()
}

#[command]
fn continue_plan(plan_id: String) -> Option<String> {
    plans::continue_plan(&plan_id).map(|r| r.path())
}

#[command]
fn get_account_stats(state: State<'_, AppState>) -> Result<plans::AccountStats, String> {
    let notes_count = lock(&state.notes, "notes")?.notes().len();
    let bookmarks_count = lock(&state.bookmarks, "bookmarks")?.bookmarks().len();
    Ok(plans::account_stats(
        state.host_context.user.as_ref(),
        notes_count,
        bookmarks_count,
    ))
}

#[command]
fn format_relative_time(timestamp: i64) -> String {
    reader::format_relative_time(timestamp, now_millis())
}

#[command]
fn format_card_date(timestamp: i64) -> String {
    reader::format_card_date(timestamp)
}

// ============ Modal Commands ============

#[command]
fn open_modal(state: State<'_, AppState>, id: String, title: String) -> Result<ModalState, String> {
    let mut modals = lock(&state.modals, "modal")?;
    if modals.is_open(&id) {
        info!("[modal] Raising {}", id);
    }
    modals.open(&id, &title);
    Ok(modals.snapshot())
}

#[command]
fn close_modal(state: State<'_, AppState>, id: String) -> Result<ModalState, String> {
    let mut modals = lock(&state.modals, "modal")?;
    modals.close(&id);
    Ok(modals.snapshot())
}

/// Forwards a key press, pointer-down or close button to the modal stack.
/// Returns the id of the sheet that closed, if any.
#[command]
fn modal_event(state: State<'_, AppState>, event: ModalEvent) -> Result<Option<String>, String> {
    Ok(lock(&state.modals, "modal")?.handle(event))
}

#[command]
fn get_modal_state(state: State<'_, AppState>) -> Result<ModalState, String> {
    Ok(lock(&state.modals, "modal")?.snapshot())
}

// ============ Data Commands ============

#[command]
fn storage_keys(state: State<'_, AppState>) -> Result<Vec<String>, String> {
    state.storage.keys().map_err(|e| e.to_string())
}

#[command]
fn remove_storage_item(state: State<'_, AppState>, key: String) -> Result<(), String> {
    state.storage.remove_item(&key).map_err(|e| e.to_string())
}

/// Wipes local storage and puts every store back to its defaults
#[command]
fn clear_all_data(state: State<'_, AppState>) -> Result<(), String> {
    state.storage.clear().map_err(|e| e.to_string())?;
    let storage = state.storage.clone();
    *lock(&state.bible, "bible")? =
        BibleStore::load(storage.clone()).with_recent_limit(state.config.recent_limit);
    *lock(&state.notes, "notes")? = NotesStore::load(storage.clone());
    *lock(&state.bookmarks, "bookmarks")? = BookmarksStore::load(storage.clone());
    *lock(&state.settings, "settings")? = SettingsStore::load(storage.clone());
    *lock(&state.theme, "theme")? = ThemeStore::load(
        storage,
        Some(state.host_context.color_scheme.as_str()),
        state.host_context.is_dark_mode,
    );
    info!("[data] Local storage cleared");
    Ok(())
}

fn main() {
    let config = match get_config_path() {
        Ok(path) => {
            let config = AppConfig::load_from(&path);
            if !path.exists() {
                if let Err(e) = config.save_to(&path) {
                    eprintln!("Failed to write default config: {}", e);
                }
            }
            config
        }
        Err(_) => AppConfig::default(),
    };
    let log_level = config.log_level_filter();

    tauri::Builder::default()
        .setup(move |app| {
            info!("=== Scripture Mini Starting ===");

            let storage_path = get_storage_path(&config.storage_file)?;
            info!("[startup] Local storage: {:?}", storage_path);
            let storage = LocalStorage::open(&storage_path)?;

            let prefers_dark = app
                .get_webview_window("main")
                .and_then(|w| w.theme().ok())
                .map(|t| matches!(t, tauri::Theme::Dark))
                .unwrap_or(false);

            let host = DesktopHost::new(app.handle().clone(), prefers_dark);
            let state = AppState::new(config.clone(), storage, Box::new(host), prefers_dark);
            info!(
                "[startup] Host user: {:?}, theme: {}",
                state.host_context.user.as_ref().map(|u| u.first_name.as_str()),
                state.host_context.color_scheme
            );
            app.manage(state);
            Ok(())
        })
        .on_window_event(|window, event| {
            if window.label() != "main" {
                return;
            }
            if let tauri::WindowEvent::CloseRequested { api, .. } = event {
                let app = window.app_handle().clone();
                if !CLOSING_CONFIRMATION.load(Ordering::SeqCst)
                    || CLOSE_CONFIRMED.load(Ordering::SeqCst)
                {
                    return;
                }
                api.prevent_close();
                app.dialog()
                    .message("Закрыть приложение?")
                    .buttons(MessageDialogButtons::OkCancel)
                    .show(move |confirmed| {
                        if confirmed {
                            CLOSE_CONFIRMED.store(true, Ordering::SeqCst);
                            app.exit(0);
                        }
                    });
            }
        })
        .plugin(tauri_plugin_dialog::init())
        .plugin(
            tauri_plugin_log::Builder::new()
                .targets([
                    tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::Stdout),
                    tauri_plugin_log::Target::new(tauri_plugin_log::TargetKind::LogDir {
                        file_name: Some(LOG_FILE_NAME.into()),
                    }),
                ])
                .level(log_level)
                .build(),
        )
        .invoke_handler(tauri::generate_handler![
            init_app,
            get_host_context,
            log_from_frontend,
            get_books,
            get_book,
            get_book_name,
            get_chapter_count,
            get_translations,
            get_bible_state,
            set_location,
            set_translation,
            add_to_recent,
            next_chapter,
            prev_chapter,
            load_chapter,
            reader_scrolled,
            get_verse,
            get_word_data,
            get_verse_of_the_day,
            search,
            share_verse,
            copy_verse,
            show_popup,
            get_notes,
            get_notes_by_reference,
            add_note,
            edit_note,
            delete_note,
            get_bookmarks,
            get_bookmarks_by_reference,
            has_bookmark,
            add_bookmark,
            edit_bookmark,
            delete_bookmark,
            get_settings,
            update_settings,
            reset_settings,
            get_theme,
            set_theme,
            toggle_theme,
            resolve_route,
            resolve_reference,
            get_footer_items,
            get_reading_plans,
            continue_plan,
            get_account_stats,
            format_relative_time,
            format_card_date,
            open_modal,
            close_modal,
            modal_event,
            get_modal_state,
            storage_keys,
            remove_storage_item,
            clear_all_data,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
