//! Failure visibility per operation
//!
//! Every operation reports through the same `anyhow::Result`, but how loudly
//! a failure surfaces differs per operation. The mapping lives here so the
//! update loop and its tests agree on it.

/// User-facing operations that can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    DeleteFolderDirect,
    DeleteFolderConfirmed,
    PopulateSelectOnModalOpen,
    PopulateSelectOnPageLoad,
    CreateFolder,
    UploadFile,
    RenameFolder,
    LoadFolders,
    LoadFolderContents,
    LoadFolderStats,
    DeleteFile,
    RenameFile,
}

/// How a failure is shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureTier {
    /// Logged only
    Silent,
    /// Blocking alert that must be dismissed
    Alert,
    /// Styled error dialog with title and text
    Dialog,
}

pub fn tier_for(operation: Operation) -> FailureTier {
    match operation {
        Operation::DeleteFolderDirect
        | Operation::PopulateSelectOnPageLoad
        | Operation::CreateFolder
        | Operation::UploadFile
        | Operation::LoadFolderStats => FailureTier::Silent,
        Operation::PopulateSelectOnModalOpen
        | Operation::LoadFolders
        | Operation::LoadFolderContents => FailureTier::Alert,
        Operation::DeleteFolderConfirmed | Operation::RenameFolder | Operation::DeleteFile | Operation::RenameFile => {
            FailureTier::Dialog
        }
    }
}

// Dialog and alert copy
pub const CONFIRM_TITLE: &str = "Are you sure?";
pub const CONFIRM_TEXT: &str = "You won't be able to revert this!";
pub const CONFIRM_BUTTON: &str = "Yes, delete it!";

pub const FOLDER_DELETED_TITLE: &str = "Deleted!";
pub const FOLDER_DELETED_TEXT: &str = "Your folder has been deleted.";
pub const FOLDER_DELETE_REJECTED_TEXT: &str = "There was an error deleting your folder.";
pub const FOLDER_DELETE_FAILED_TEXT: &str = "Failed to delete the folder";

pub const FOLDER_RENAMED_TITLE: &str = "Success!";
pub const FOLDER_RENAMED_TEXT: &str = "Folder name updated successfully.";
pub const FOLDER_RENAME_FAILED_TEXT: &str = "An error occurred while updating the folder name.";

pub const FILE_DELETE_FAILED_TEXT: &str = "There was an error deleting your file.";
pub const FILE_RENAME_FAILED_TEXT: &str = "An error occurred while updating the file name.";

pub const FOLDER_CHOICES_FAILED_ALERT: &str = "Failed to fetch folder data.";
pub const FOLDERS_FAILED_ALERT: &str = "Failed to load folders.";
pub const CONTENTS_FAILED_ALERT: &str = "Failed to load folder contents.";

pub const ERROR_TITLE: &str = "Error!";
