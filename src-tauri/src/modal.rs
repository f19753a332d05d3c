//! Bottom-sheet modal stack.
//!
//! Several sheets can be open at once (word study on top of a note editor,
//! for instance). Only the topmost one reacts to Escape and to clicks
//! outside it, and owns focus. The page behind stays scroll-locked for as
//! long as any sheet is open.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModalEntry {
    pub id: String,
    pub title: String,
}

/// Input events the UI forwards while a sheet is visible
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum ModalEvent {
    KeyDown(String),
    /// Pointer down; `inside` names the sheet the target belongs to, if any
    PointerDown { inside: Option<String> },
    CloseButton(String),
}

/// What the UI needs to draw the sheets and the page behind them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalState {
    pub open: Vec<ModalEntry>,
    pub focused: Option<String>,
    pub lock_count: usize,
    pub scroll_locked: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ModalStack {
    stack: Vec<ModalEntry>,
}

impl ModalStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a sheet on top. Re-opening an already open id raises it.
    pub fn open(&mut self, id: &str, title: &str) {
        self.stack.retain(|m| m.id != id);
        self.stack.push(ModalEntry {
            id: id.to_string(),
            title: title.to_string(),
        });
    }

    pub fn close(&mut self, id: &str) -> bool {
        let before = self.stack.len();
        self.stack.retain(|m| m.id != id);
        self.stack.len() != before
    }

    pub fn close_top(&mut self) -> Option<ModalEntry> {
        self.stack.pop()
    }

    pub fn top(&self) -> Option<&ModalEntry> {
        self.stack.last()
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.stack.iter().any(|m| m.id == id)
    }

    /// Number of open sheets holding the body scroll lock
    pub fn lock_count(&self) -> usize {
        self.stack.len()
    }

    pub fn scroll_locked(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Id of the sheet that owns keyboard focus
    pub fn focused(&self) -> Option<&str> {
        self.top().map(|m| m.id.as_str())
    }

    pub fn snapshot(&self) -> ModalState {
        ModalState {
            open: self.stack.clone(),
            focused: self.focused().map(str::to_string),
            lock_count: self.lock_count(),
            scroll_locked: self.scroll_locked(),
        }
    }

    /// Applies an input event, returning the id of the sheet it closed
    pub fn handle(&mut self, event: ModalEvent) -> Option<String> {
        match event {
            ModalEvent::KeyDown(key) if key == "Escape" => self.close_top().map(|m| m.id),
            ModalEvent::KeyDown(_) => None,
            ModalEvent::PointerDown { inside } => {
                let top = self.top()?.id.clone();
                if inside.as_deref() == Some(top.as_str()) {
                    None
                } else {
                    self.close_top().map(|m| m.id)
                }
            }
            ModalEvent::CloseButton(id) => self.close(&id).then_some(id),
        }
    }
}
