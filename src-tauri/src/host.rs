//! Integration shim for the chat-client host that embeds the mini app.
//!
//! Outside a chat client the app runs against [`MockHost`], which supplies a
//! test user and theme parameters and logs native calls instead of
//! performing them.

use std::collections::BTreeMap;
use std::sync::Mutex;

use log::info;
use serde::{Deserialize, Serialize};

use crate::models::{HostUser, Theme};

pub const DARK_BACKGROUND: &str = "#121212";
pub const LIGHT_BACKGROUND: &str = "#F8F8F8";

/// What the host tells the app about itself on startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostContext {
    pub is_dark_mode: bool,
    pub color_scheme: String,
    pub theme_params: BTreeMap<String, String>,
    pub user: Option<HostUser>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PopupButtonKind {
    Ok,
    Close,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupParams {
    pub title: Option<String>,
    pub message: String,
    #[serde(default)]
    pub buttons: Vec<PopupButtonKind>,
}

impl PopupParams {
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            title: Some("Готово".to_string()),
            message: message.into(),
            buttons: vec![PopupButtonKind::Ok],
        }
    }

    pub fn alert(message: impl Into<String>) -> Self {
        Self {
            title: None,
            message: message.into(),
            buttons: vec![PopupButtonKind::Ok],
        }
    }
}

/// Native calls the mini app may make into its host
pub trait HostBridge: Send + Sync {
    fn context(&self) -> HostContext;
    fn ready(&self);
    fn expand(&self);
    fn enable_closing_confirmation(&self);
    fn set_background_color(&self, color: &str);
    fn show_popup(&self, params: &PopupParams);

    fn show_alert(&self, message: &str) {
        self.show_popup(&PopupParams::alert(message));
    }

    /// Returns false when the host cannot share
    fn share_text(&self, text: &str) -> bool;

    /// Puts text on the clipboard; false when that failed
    fn copy_text(&self, text: &str) -> bool;
}

/// Startup handshake: announce readiness, go full height, guard against
/// swipe-to-close and match the host background to the color scheme.
pub fn init_host(bridge: &dyn HostBridge) -> HostContext {
    let context = bridge.context();
    bridge.ready();
    bridge.expand();
    bridge.enable_closing_confirmation();
    bridge.set_background_color(if context.is_dark_mode {
        DARK_BACKGROUND
    } else {
        LIGHT_BACKGROUND
    });
    context
}

/// Copies text and tells the user whether it worked
pub fn copy_with_feedback(bridge: &dyn HostBridge, text: &str) -> bool {
    let copied = bridge.copy_text(text);
    let popup = if copied {
        PopupParams {
            title: Some("Скопировано".to_string()),
            message: "Текст скопирован в буфер обмена".to_string(),
            buttons: vec![PopupButtonKind::Ok],
        }
    } else {
        PopupParams {
            title: Some("Ошибка".to_string()),
            message: "Не удалось скопировать текст".to_string(),
            buttons: vec![PopupButtonKind::Ok],
        }
    };
    bridge.show_popup(&popup);
    copied
}

/// Shares through the host, falling back to the clipboard when the host
/// cannot share
pub fn share_or_copy(bridge: &dyn HostBridge, text: &str) -> bool {
    bridge.share_text(text) || copy_with_feedback(bridge, text)
}

pub fn mock_user() -> HostUser {
    HostUser {
        id: Some(123_456_789),
        first_name: "Пользователь".to_string(),
        last_name: Some("Telegram".to_string()),
        username: Some("telegram_user".to_string()),
        language_code: Some("ru".to_string()),
        photo_url: Some("https://avatars.githubusercontent.com/u/9919?s=200&v=4".to_string()),
        is_premium: Some(true),
    }
}

pub fn mock_theme_params(theme: Theme) -> BTreeMap<String, String> {
    let dark = theme == Theme::Dark;
    let pick = |d: &str, l: &str| if dark { d.to_string() } else { l.to_string() };
    BTreeMap::from([
        ("bg_color".to_string(), pick("#1A1D24", "#F7F9FC")),
        ("text_color".to_string(), pick("#E0E6ED", "#2C3E50")),
        ("hint_color".to_string(), pick("#90A4AE", "#7F8C8D")),
        ("link_color".to_string(), pick("#5DADE2", "#2980B9")),
        ("button_color".to_string(), pick("#38A1DB", "#3498DB")),
        ("button_text_color".to_string(), "#FFFFFF".to_string()),
    ])
}

/// A call recorded by [`MockHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Ready,
    Expand,
    EnableClosingConfirmation,
    SetBackgroundColor(String),
    Popup(PopupParams),
    Share(String),
    Copy(String),
}

pub struct MockHost {
    theme: Theme,
    can_share: bool,
    can_copy: bool,
    calls: Mutex<Vec<HostCall>>,
}

impl MockHost {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            theme: if prefers_dark { Theme::Dark } else { Theme::Light },
            can_share: true,
            can_copy: true,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Simulates a client without the share sheet or clipboard access
    #[cfg(test)]
    pub fn with_capabilities(mut self, can_share: bool, can_copy: bool) -> Self {
        self.can_share = can_share;
        self.can_copy = can_copy;
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: HostCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl HostBridge for MockHost {
    fn context(&self) -> HostContext {
        HostContext {
            is_dark_mode: self.theme == Theme::Dark,
            color_scheme: self.theme.as_str().to_string(),
            theme_params: mock_theme_params(self.theme),
            user: Some(mock_user()),
        }
    }

    fn ready(&self) {
        info!("[host] ready");
        self.record(HostCall::Ready);
    }

    fn expand(&self) {
        info!("[host] expanded to fullscreen");
        self.record(HostCall::Expand);
    }

    fn enable_closing_confirmation(&self) {
        info!("[host] closing confirmation enabled");
        self.record(HostCall::EnableClosingConfirmation);
    }

    fn set_background_color(&self, color: &str) {
        info!("[host] background color set to {}", color);
        self.record(HostCall::SetBackgroundColor(color.to_string()));
    }

    fn show_popup(&self, params: &PopupParams) {
        info!("[host] popup: {}", params.message);
        self.record(HostCall::Popup(params.clone()));
    }

    fn share_text(&self, text: &str) -> bool {
        info!("[host] share: {}", text);
        self.record(HostCall::Share(text.to_string()));
        self.can_share
    }

    fn copy_text(&self, text: &str) -> bool {
        info!("[host] copy: {}", text);
        self.record(HostCall::Copy(text.to_string()));
        self.can_copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_runs_the_handshake_in_order() {
        let host = MockHost::new(true);
        let context = init_host(&host);

        assert!(context.is_dark_mode);
        assert_eq!(context.color_scheme, "dark");
        assert_eq!(
            host.calls(),
            vec![
                HostCall::Ready,
                HostCall::Expand,
                HostCall::EnableClosingConfirmation,
                HostCall::SetBackgroundColor(DARK_BACKGROUND.to_string()),
            ]
        );
    }

    #[test]
    fn light_mock_supplies_user_and_palette() {
        let host = MockHost::new(false);
        let context = host.context();
        assert_eq!(context.theme_params["bg_color"], "#F7F9FC");
        assert_eq!(context.user.and_then(|u| u.username).as_deref(), Some("telegram_user"));
    }

    #[test]
    fn alert_goes_through_popup() {
        let host = MockHost::new(false);
        host.show_alert("Поиск скоро");
        assert_eq!(
            host.calls(),
            vec![HostCall::Popup(PopupParams::alert("Поиск скоро"))]
        );
    }

    #[test]
    fn sharing_uses_the_host_when_it_can() {
        let host = MockHost::new(false);
        assert!(share_or_copy(&host, "Быт 1:1"));
        assert_eq!(host.calls(), vec![HostCall::Share("Быт 1:1".into())]);
    }

    #[test]
    fn failed_share_falls_back_to_clipboard() {
        let host = MockHost::new(false).with_capabilities(false, true);
        assert!(share_or_copy(&host, "Ин 3:16"));

        let calls = host.calls();
        assert_eq!(calls[0], HostCall::Share("Ин 3:16".into()));
        assert_eq!(calls[1], HostCall::Copy("Ин 3:16".into()));
        match &calls[2] {
            HostCall::Popup(popup) => {
                assert_eq!(popup.title.as_deref(), Some("Скопировано"));
                assert_eq!(popup.message, "Текст скопирован в буфер обмена");
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn clipboard_failure_is_reported() {
        let host = MockHost::new(false).with_capabilities(false, false);
        assert!(!share_or_copy(&host, "Рим 8:28"));
        match host.calls().last() {
            Some(HostCall::Popup(popup)) => {
                assert_eq!(popup.message, "Не удалось скопировать текст")
            }
            other => panic!("unexpected call {:?}", other),
        }
    }
}
