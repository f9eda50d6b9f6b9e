//! UI Model
//!
//! Preferences, the folder dropdown, open forms, dialogs and notifications.

use std::time::Instant;

use super::types::{Dialog, FolderSelect, Form};

#[derive(Clone, Debug)]
pub struct UiModel {
    /// Whether vim keybindings are enabled
    pub vim_mode: bool,

    /// Folder dropdown of the upload modal. It lives outside the form
    /// because the page-load populate fills it before the modal opens.
    pub folder_select: FolderSelect,

    /// Open input form
    pub form: Option<Form>,

    /// Confirmation or result dialog
    pub dialog: Option<Dialog>,

    /// Blocking alert text; swallows the next key press
    pub alert: Option<String>,

    /// Toast message (text, timestamp)
    pub toast_message: Option<(String, Instant)>,

    /// Whether app should quit
    pub should_quit: bool,
}

impl UiModel {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            vim_mode,
            folder_select: FolderSelect::default(),
            form: None,
            dialog: None,
            alert: None,
            toast_message: None,
            should_quit: false,
        }
    }

    /// Check if any modal overlay is currently showing
    pub fn has_modal(&self) -> bool {
        self.form.is_some() || self.dialog.is_some() || self.alert.is_some()
    }

    pub fn close_all_modals(&mut self) {
        self.form = None;
        self.dialog = None;
        self.alert = None;
    }

    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub fn show_toast(&mut self, message: String) {
        self.toast_message = Some((message, Instant::now()));
    }

    pub fn should_dismiss_toast(&self) -> bool {
        if let Some((_, timestamp)) = &self.toast_message {
            crate::logic::ui::should_dismiss_toast(timestamp.elapsed().as_millis())
        } else {
            false
        }
    }

    pub fn dismiss_toast(&mut self) {
        self.toast_message = None;
    }
}
