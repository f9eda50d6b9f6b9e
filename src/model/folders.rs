//! Folder Model
//!
//! Server data the view shows: the folder cards, the open folder's files
//! and the connection state.

use crate::api::{FileEntry, Folder, FolderStats};
use crate::logic::errors::ErrorType;
use crate::logic::navigation;

/// Connection state for the folder API
#[derive(Clone, Debug, PartialEq)]
pub enum ConnectionState {
    /// Last listing call succeeded
    Connected,
    /// No listing has completed yet
    Loading,
    /// Last listing call failed
    Disconnected {
        error_type: ErrorType,
        message: String,
    },
}

/// Contents pane for one open folder
#[derive(Clone, Debug, PartialEq)]
pub struct ContentsState {
    pub folder_id: i64,
    pub folder_name: String,
    pub files: Vec<FileEntry>,
    pub selected: Option<usize>,
    pub stats: Option<FolderStats>,
    pub loading: bool,
}

impl ContentsState {
    pub fn new(folder: &Folder) -> Self {
        Self {
            folder_id: folder.id,
            folder_name: folder.name.clone(),
            files: Vec::new(),
            selected: None,
            stats: None,
            loading: true,
        }
    }

    pub fn selected_file(&self) -> Option<&FileEntry> {
        self.selected.and_then(|idx| self.files.get(idx))
    }

    pub fn remove_file(&mut self, file_id: i64) -> bool {
        let before = self.files.len();
        self.files.retain(|file| file.id != file_id);
        let removed = self.files.len() != before;
        if removed {
            self.selected = navigation::clamp_after_removal(self.selected, self.files.len());
        }
        removed
    }

    pub fn rename_file(&mut self, file_id: i64, name: &str) -> bool {
        match self.files.iter_mut().find(|file| file.id == file_id) {
            Some(file) => {
                file.name = name.to_string();
                true
            }
            None => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct FolderModel {
    /// Folder cards, in server order (newest first)
    pub folders: Vec<Folder>,

    /// Selected card
    pub selected: Option<usize>,

    /// Open folder, if the contents pane is showing
    pub contents: Option<ContentsState>,

    pub connection_state: ConnectionState,

    /// Cards came from the local cache rather than the server
    pub from_cache: bool,

    /// At least one folder listing has arrived since startup
    pub loaded_once: bool,
}

impl FolderModel {
    pub fn new() -> Self {
        Self {
            folders: Vec::new(),
            selected: None,
            contents: None,
            connection_state: ConnectionState::Loading,
            from_cache: false,
            loaded_once: false,
        }
    }

    pub fn selected_folder(&self) -> Option<&Folder> {
        self.selected.and_then(|idx| self.folders.get(idx))
    }

    pub fn get(&self, folder_id: i64) -> Option<&Folder> {
        self.folders.iter().find(|folder| folder.id == folder_id)
    }

    /// Replace the cards, keeping the selection on the same folder if it survived
    pub fn set_folders(&mut self, folders: Vec<Folder>) {
        let previous_id = self.selected_folder().map(|folder| folder.id);
        self.folders = folders;
        self.selected = previous_id
            .and_then(|id| self.folders.iter().position(|folder| folder.id == id))
            .or_else(|| navigation::clamp_after_removal(None, self.folders.len()));
    }

    /// Remove a folder card. Returns whether a card was removed.
    pub fn remove_folder(&mut self, folder_id: i64) -> bool {
        let before = self.folders.len();
        self.folders.retain(|folder| folder.id != folder_id);
        let removed = self.folders.len() != before;

        if removed {
            self.selected = navigation::clamp_after_removal(self.selected, self.folders.len());
            if self
                .contents
                .as_ref()
                .is_some_and(|contents| contents.folder_id == folder_id)
            {
                self.contents = None;
            }
        }

        removed
    }

    /// Change a folder's displayed name in place. Returns whether the folder was found.
    pub fn rename_folder(&mut self, folder_id: i64, name: &str) -> bool {
        let Some(folder) = self.folders.iter_mut().find(|folder| folder.id == folder_id) else {
            return false;
        };
        folder.name = name.to_string();

        if let Some(contents) = self.contents.as_mut() {
            if contents.folder_id == folder_id {
                contents.folder_name = name.to_string();
            }
        }

        true
    }

    pub fn select_next(&mut self) {
        self.selected = navigation::next_index(self.selected, self.folders.len());
    }

    pub fn select_prev(&mut self) {
        self.selected = navigation::prev_index(self.selected, self.folders.len());
    }
}

impl Default for FolderModel {
    fn default() -> Self {
        Self::new()
    }
}
