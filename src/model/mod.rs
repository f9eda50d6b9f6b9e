//! Application Model
//!
//! The whole view state, owned by the runtime loop and changed only by
//! `update::update`:
//!
//! - **FolderModel**: folder cards, open folder contents, connection state
//! - **UiModel**: dropdown, forms, dialogs, alert, toast
//!
//! No I/O lives here; side effects leave `update` as `Command`s.

pub mod folders;
pub mod types;
pub mod ui;

pub use folders::{ConnectionState, ContentsState, FolderModel};
pub use types::*;
pub use ui::UiModel;

#[derive(Clone, Debug)]
pub struct Model {
    pub folders: FolderModel,
    pub ui: UiModel,
}

impl Model {
    pub fn new(vim_mode: bool) -> Self {
        Self {
            folders: FolderModel::new(),
            ui: UiModel::new(vim_mode),
        }
    }

    pub fn selected_folder(&self) -> Option<&crate::api::Folder> {
        self.folders.selected_folder()
    }

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }

    /// Whether the contents pane has focus
    pub fn in_contents(&self) -> bool {
        self.folders.contents.is_some()
    }

    /// Forget everything a page reload would throw away
    pub fn reset_for_reload(&mut self) {
        self.ui.close_all_modals();
        self.ui.folder_select.clear();
        self.folders.contents = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_creation() {
        let model = Model::new(false);
        assert!(model.folders.folders.is_empty());
        assert!(model.selected_folder().is_none());
        assert!(!model.has_modal());
        assert!(!model.in_contents());
    }

    #[test]
    fn test_reset_for_reload() {
        let mut model = Model::new(false);
        model.folders.set_folders(vec![crate::api::Folder::new(1, "A")]);
        model.ui.folder_select.append_options(&model.folders.folders.clone());
        model.folders.contents = Some(ContentsState::new(&crate::api::Folder::new(1, "A")));
        model.ui.show_alert("x");

        model.reset_for_reload();
        assert!(model.ui.folder_select.options.is_empty());
        assert!(!model.in_contents());
        assert!(!model.has_modal());
        // Cards stay until the fresh listing replaces them
        assert_eq!(model.folders.folders.len(), 1);
    }
}
