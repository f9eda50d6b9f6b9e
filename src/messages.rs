//! Message types for the Elm Architecture pattern
//!
//! Every state change flows through a `Msg` into `update::update`, which
//! mutates the `Model` and hands back `Command`s for the runtime to execute.
//!
//! Message sources:
//! - User input (keyboard events, translated by `handlers::keyboard`)
//! - API responses (from the background API service)
//! - The runtime itself (page load, cache restore)

use crate::api::Folder;
use crate::services::api::{ApiRequest, ApiResponse};

#[derive(Debug)]
pub enum Msg {
    // ============================================
    // NAVIGATION
    // ============================================
    SelectNext,
    SelectPrev,
    /// Open the selected folder's contents pane
    OpenContents,
    /// Back from the contents pane to the folder cards
    CloseContents,

    // ============================================
    // FOLDER ACTIONS
    // ============================================
    /// Delete the selected folder without asking
    DeleteFolderDirect,
    /// Ask before deleting the selected folder
    RequestDeleteFolder,
    OpenCreateFolder,
    OpenRenameFolder,
    OpenUpload,

    // ============================================
    // FILE ACTIONS
    // ============================================
    RequestDeleteFile,
    OpenRenameFile,

    // ============================================
    // DIALOGS & FORMS
    // ============================================
    Confirm,
    Cancel,
    DismissDialog,
    DismissAlert,
    InputChar(char),
    InputBackspace,
    /// Switch focus between the upload path and the dropdown
    ToggleUploadFocus,
    SubmitForm,

    // ============================================
    // LIFECYCLE
    // ============================================
    /// Page load or user reload: refetch cards and refill the dropdown
    Reload,
    /// Folders read back from the local cache after a failed listing
    CachedFolders(Vec<Folder>),
    Quit,

    // ============================================
    // API
    // ============================================
    Api(ApiResponse),
}

/// Side effect requested by `update`
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Send a request to the API service
    Api(ApiRequest),
    /// Persist a fresh folder listing to the local cache
    CacheFolders(Vec<Folder>),
    /// Read the last known folder listing from the local cache
    RestoreCachedFolders,
}

impl Command {
    pub fn is_reload(&self) -> bool {
        matches!(self, Command::Api(ApiRequest::LoadFolders))
    }
}

/// Whether a batch of commands amounts to a page reload
pub fn contains_reload(commands: &[Command]) -> bool {
    commands.iter().any(Command::is_reload)
}
