//! Keyboard Input Handler
//!
//! Maps key presses to messages. Overlays take keys first, in order:
//! alert, dialog, form. Without an overlay the contents pane or the
//! folder list gets the key.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::messages::Msg;
use crate::model::{Dialog, Form, Model, UploadFocus};

/// Translate a key press into a message, or `None` if it means nothing here
pub fn key_to_msg(model: &Model, key: KeyEvent) -> Option<Msg> {
    // Ctrl-C always quits, even from inside a form
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Msg::Quit);
    }

    // Alerts swallow whatever key comes next
    if model.ui.alert.is_some() {
        return Some(Msg::DismissAlert);
    }

    if let Some(dialog) = &model.ui.dialog {
        return dialog_key(dialog, key);
    }

    if let Some(form) = &model.ui.form {
        return form_key(form, key);
    }

    if model.in_contents() {
        return contents_key(model.ui.vim_mode, key);
    }

    list_key(model.ui.vim_mode, key)
}

fn dialog_key(dialog: &Dialog, key: KeyEvent) -> Option<Msg> {
    match dialog {
        Dialog::Confirm(_) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Some(Msg::Confirm),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Msg::Cancel),
            // Ignore other keys while the prompt is showing
            _ => None,
        },
        Dialog::Result { .. } => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => Some(Msg::DismissDialog),
            _ => None,
        },
    }
}

fn form_key(form: &Form, key: KeyEvent) -> Option<Msg> {
    let on_dropdown = matches!(
        form,
        Form::Upload {
            focus: UploadFocus::FolderSelect,
            ..
        }
    );

    match key.code {
        KeyCode::Esc => Some(Msg::Cancel),
        KeyCode::Enter => Some(Msg::SubmitForm),
        KeyCode::Tab | KeyCode::BackTab if matches!(form, Form::Upload { .. }) => {
            Some(Msg::ToggleUploadFocus)
        }
        KeyCode::Down if on_dropdown => Some(Msg::SelectNext),
        KeyCode::Up if on_dropdown => Some(Msg::SelectPrev),
        KeyCode::Backspace => Some(Msg::InputBackspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Msg::InputChar(c))
        }
        _ => None,
    }
}

fn contents_key(vim_mode: bool, key: KeyEvent) -> Option<Msg> {
    match key.code {
        KeyCode::Esc | KeyCode::Left | KeyCode::Backspace => Some(Msg::CloseContents),
        KeyCode::Char('h') if vim_mode => Some(Msg::CloseContents),
        KeyCode::Char('x') | KeyCode::Delete => Some(Msg::RequestDeleteFile),
        KeyCode::Char('r') => Some(Msg::OpenRenameFile),
        _ => common_key(vim_mode, key),
    }
}

fn list_key(vim_mode: bool, key: KeyEvent) -> Option<Msg> {
    match key.code {
        KeyCode::Enter | KeyCode::Right => Some(Msg::OpenContents),
        KeyCode::Char('l') if vim_mode => Some(Msg::OpenContents),
        KeyCode::Char('n') => Some(Msg::OpenCreateFolder),
        KeyCode::Char('u') => Some(Msg::OpenUpload),
        KeyCode::Char('r') => Some(Msg::OpenRenameFolder),
        KeyCode::Char('d') => Some(Msg::DeleteFolderDirect),
        KeyCode::Char('D') | KeyCode::Delete => Some(Msg::RequestDeleteFolder),
        _ => common_key(vim_mode, key),
    }
}

/// Keys that mean the same thing in the list and the contents pane
fn common_key(vim_mode: bool, key: KeyEvent) -> Option<Msg> {
    match key.code {
        KeyCode::Char('q') => Some(Msg::Quit),
        KeyCode::F(5) | KeyCode::Char('R') => Some(Msg::Reload),
        KeyCode::Down => Some(Msg::SelectNext),
        KeyCode::Up => Some(Msg::SelectPrev),
        KeyCode::Char('j') if vim_mode => Some(Msg::SelectNext),
        KeyCode::Char('k') if vim_mode => Some(Msg::SelectPrev),
        _ => None,
    }
}
