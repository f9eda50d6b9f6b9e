//! Shared types for the Model
//!
//! View-level building blocks: text inputs, the folder dropdown, forms and
//! dialogs.

use crate::api::Folder;

/// Single-line text input
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextInput {
    pub value: String,
}

impl TextInput {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn push(&mut self, c: char) {
        self.value.push(c);
    }

    pub fn backspace(&mut self) {
        self.value.pop();
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}

/// One `<option>` of the folder dropdown
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderOption {
    pub value: i64,
    pub text: String,
}

impl From<&Folder> for FolderOption {
    fn from(folder: &Folder) -> Self {
        Self {
            value: folder.id,
            text: folder.name.clone(),
        }
    }
}

/// The upload modal's folder dropdown
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FolderSelect {
    pub options: Vec<FolderOption>,
    pub selected: Option<usize>,
}

impl FolderSelect {
    /// Drop every option and add one per folder. Returns the number added.
    pub fn replace_options(&mut self, folders: &[Folder]) -> usize {
        self.options.clear();
        self.selected = None;
        self.append_options(folders)
    }

    /// Add one option per folder after the existing ones. Returns the number added.
    pub fn append_options(&mut self, folders: &[Folder]) -> usize {
        self.options.extend(folders.iter().map(FolderOption::from));

        // A native select shows its first option when nothing was picked
        if self.selected.is_none() && !self.options.is_empty() {
            self.selected = Some(0);
        }

        folders.len()
    }

    pub fn clear(&mut self) {
        self.options.clear();
        self.selected = None;
    }

    /// Value of the selected option
    pub fn value(&self) -> Option<i64> {
        self.selected
            .and_then(|idx| self.options.get(idx))
            .map(|option| option.value)
    }

    pub fn select_next(&mut self) {
        self.selected = crate::logic::navigation::next_index(self.selected, self.options.len());
    }

    pub fn select_prev(&mut self) {
        self.selected = crate::logic::navigation::prev_index(self.selected, self.options.len());
    }
}

/// Which field of the upload modal receives keystrokes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadFocus {
    Path,
    FolderSelect,
}

/// Open input form (at most one at a time)
#[derive(Clone, Debug, PartialEq)]
pub enum Form {
    CreateFolder {
        name: TextInput,
    },
    RenameFolder {
        folder_id: i64,
        name: TextInput,
    },
    Upload {
        path: TextInput,
        focus: UploadFocus,
    },
    RenameFile {
        file_id: i64,
        name: TextInput,
    },
}

impl Form {
    /// The input currently receiving characters, if any
    pub fn active_input_mut(&mut self) -> Option<&mut TextInput> {
        match self {
            Form::CreateFolder { name }
            | Form::RenameFolder { name, .. }
            | Form::RenameFile { name, .. } => Some(name),
            Form::Upload { path, focus } => match focus {
                UploadFocus::Path => Some(path),
                UploadFocus::FolderSelect => None,
            },
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Form::CreateFolder { .. } => "Create Folder",
            Form::RenameFolder { .. } => "Rename Folder",
            Form::Upload { .. } => "Upload File",
            Form::RenameFile { .. } => "Rename File",
        }
    }
}

/// Destructive action waiting for confirmation
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteFolder { folder_id: i64, name: String },
    DeleteFile { folder_id: i64, file_id: i64, name: String },
}

/// What happens once a result dialog is dismissed
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DismissAction {
    Reload,
    ApplyFolderRename { folder_id: i64, name: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogKind {
    Success,
    Error,
}

/// Modal dialog overlay
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dialog {
    Confirm(ConfirmAction),
    Result {
        kind: DialogKind,
        title: String,
        text: String,
        on_dismiss: Option<DismissAction>,
    },
}

impl Dialog {
    pub fn success(title: &str, text: &str, on_dismiss: Option<DismissAction>) -> Self {
        Dialog::Result {
            kind: DialogKind::Success,
            title: title.to_string(),
            text: text.to_string(),
            on_dismiss,
        }
    }

    pub fn error(title: &str, text: &str) -> Self {
        Dialog::Result {
            kind: DialogKind::Error,
            title: title.to_string(),
            text: text.to_string(),
            on_dismiss: None,
        }
    }
}
