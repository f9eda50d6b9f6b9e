//! Update loop
//!
//! `update` is the only place the `Model` changes. It never performs I/O;
//! requests, cache writes and cache reads leave as `Command`s and their
//! results come back later as `Msg::Api` / `Msg::CachedFolders`.

use anyhow::Result;

use crate::api::{ApiReply, FILE_DELETED_MESSAGE, FOLDER_DELETED_MESSAGE};
use crate::logic::errors::{classify_error, format_error_message};
use crate::logic::feedback::{self, tier_for, FailureTier, Operation};
use crate::logic::navigation;
use crate::messages::{Command, Msg};
use crate::model::{
    ConfirmAction, ConnectionState, ContentsState, Dialog, DismissAction, Form, Model, TextInput,
    UploadFocus,
};
use crate::services::api::{ApiRequest, ApiResponse, DeleteMode, PopulateTrigger};

pub fn update(model: &mut Model, msg: Msg) -> Vec<Command> {
    match msg {
        Msg::SelectNext => {
            if upload_select_focused(model) {
                model.ui.folder_select.select_next();
                return vec![];
            }
            match model.folders.contents.as_mut() {
                Some(contents) => {
                    contents.selected = navigation::next_index(contents.selected, contents.files.len())
                }
                None => model.folders.select_next(),
            }
            vec![]
        }

        Msg::SelectPrev => {
            if upload_select_focused(model) {
                model.ui.folder_select.select_prev();
                return vec![];
            }
            match model.folders.contents.as_mut() {
                Some(contents) => {
                    contents.selected = navigation::prev_index(contents.selected, contents.files.len())
                }
                None => model.folders.select_prev(),
            }
            vec![]
        }

        Msg::OpenContents => {
            let Some(folder) = model.selected_folder().cloned() else {
                return vec![];
            };
            model.folders.contents = Some(ContentsState::new(&folder));
            vec![
                Command::Api(ApiRequest::LoadFolderContents {
                    folder_id: folder.id,
                }),
                Command::Api(ApiRequest::LoadFolderStats {
                    folder_id: folder.id,
                }),
            ]
        }

        Msg::CloseContents => {
            model.folders.contents = None;
            vec![]
        }

        Msg::DeleteFolderDirect => match model.selected_folder() {
            Some(folder) => vec![Command::Api(ApiRequest::DeleteFolder {
                folder_id: folder.id,
                mode: DeleteMode::Direct,
            })],
            None => vec![],
        },

        Msg::RequestDeleteFolder => {
            if let Some(folder) = model.folders.selected_folder() {
                model.ui.dialog = Some(Dialog::Confirm(ConfirmAction::DeleteFolder {
                    folder_id: folder.id,
                    name: folder.name.clone(),
                }));
            }
            vec![]
        }

        Msg::OpenCreateFolder => {
            model.ui.form = Some(Form::CreateFolder {
                name: TextInput::default(),
            });
            vec![]
        }

        Msg::OpenRenameFolder => {
            if let Some(folder) = model.folders.selected_folder() {
                model.ui.form = Some(Form::RenameFolder {
                    folder_id: folder.id,
                    name: TextInput::with_value(folder.name.clone()),
                });
            }
            vec![]
        }

        Msg::OpenUpload => {
            model.ui.form = Some(Form::Upload {
                path: TextInput::default(),
                focus: UploadFocus::Path,
            });
            vec![Command::Api(ApiRequest::PopulateFolderSelect {
                trigger: PopulateTrigger::ModalOpen,
            })]
        }

        Msg::RequestDeleteFile => {
            if let Some(contents) = &model.folders.contents {
                if let Some(file) = contents.selected_file() {
                    model.ui.dialog = Some(Dialog::Confirm(ConfirmAction::DeleteFile {
                        folder_id: contents.folder_id,
                        file_id: file.id,
                        name: file.name.clone(),
                    }));
                }
            }
            vec![]
        }

        Msg::OpenRenameFile => {
            let selected = model
                .folders
                .contents
                .as_ref()
                .and_then(|contents| contents.selected_file());
            if let Some(file) = selected {
                model.ui.form = Some(Form::RenameFile {
                    file_id: file.id,
                    name: TextInput::with_value(file.name.clone()),
                });
            }
            vec![]
        }

        Msg::Confirm => {
            let Some(Dialog::Confirm(action)) = model.ui.dialog.take() else {
                return vec![];
            };
            match action {
                ConfirmAction::DeleteFolder { folder_id, .. } => {
                    vec![Command::Api(ApiRequest::DeleteFolder {
                        folder_id,
                        mode: DeleteMode::Confirmed,
                    })]
                }
                ConfirmAction::DeleteFile {
                    folder_id, file_id, ..
                } => vec![Command::Api(ApiRequest::DeleteFile { folder_id, file_id })],
            }
        }

        Msg::Cancel => {
            if model.ui.dialog.is_some() {
                model.ui.dialog = None;
            } else {
                model.ui.form = None;
            }
            vec![]
        }

        Msg::DismissDialog => {
            let Some(Dialog::Result { on_dismiss, .. }) = model.ui.dialog.take() else {
                return vec![];
            };
            match on_dismiss {
                Some(DismissAction::Reload) => reload(model),
                Some(DismissAction::ApplyFolderRename { folder_id, name }) => {
                    model.folders.rename_folder(folder_id, &name);
                    vec![]
                }
                None => vec![],
            }
        }

        Msg::DismissAlert => {
            model.ui.alert = None;
            vec![]
        }

        Msg::InputChar(c) => {
            if let Some(input) = model.ui.form.as_mut().and_then(Form::active_input_mut) {
                input.push(c);
            }
            vec![]
        }

        Msg::InputBackspace => {
            if let Some(input) = model.ui.form.as_mut().and_then(Form::active_input_mut) {
                input.backspace();
            }
            vec![]
        }

        Msg::ToggleUploadFocus => {
            if let Some(Form::Upload { focus, .. }) = model.ui.form.as_mut() {
                *focus = match *focus {
                    UploadFocus::Path => UploadFocus::FolderSelect,
                    UploadFocus::FolderSelect => UploadFocus::Path,
                };
            }
            vec![]
        }

        Msg::SubmitForm => submit_form(model),

        Msg::Reload => reload(model),

        Msg::CachedFolders(folders) => {
            if model.folders.folders.is_empty() && !folders.is_empty() {
                tracing::info!(count = folders.len(), "showing cached folders");
                model.folders.set_folders(folders);
                model.folders.from_cache = true;
            }
            vec![]
        }

        Msg::Quit => {
            model.ui.should_quit = true;
            vec![]
        }

        Msg::Api(response) => handle_api_response(model, response),
    }
}

fn upload_select_focused(model: &Model) -> bool {
    matches!(
        model.ui.form,
        Some(Form::Upload {
            focus: UploadFocus::FolderSelect,
            ..
        })
    )
}

/// Throw away reload-scoped view state and redo the page-load fetches
fn reload(model: &mut Model) -> Vec<Command> {
    model.reset_for_reload();
    vec![
        Command::Api(ApiRequest::LoadFolders),
        Command::Api(ApiRequest::PopulateFolderSelect {
            trigger: PopulateTrigger::PageLoad,
        }),
    ]
}

fn submit_form(model: &mut Model) -> Vec<Command> {
    let Some(form) = model.ui.form.as_mut() else {
        return vec![];
    };

    // Forms stay open while their request is in flight; a reload or a
    // success response closes them.
    let request = match form {
        Form::CreateFolder { name } if !name.is_blank() => ApiRequest::CreateFolder {
            name: name.value.clone(),
        },
        Form::RenameFolder { folder_id, name } if !name.is_blank() => ApiRequest::RenameFolder {
            folder_id: *folder_id,
            name: name.value.clone(),
        },
        Form::Upload { path, focus } => match *focus {
            UploadFocus::FolderSelect => {
                // Enter on the dropdown hands focus back to the path
                *focus = UploadFocus::Path;
                return vec![];
            }
            UploadFocus::Path if path.is_blank() => return vec![],
            UploadFocus::Path => ApiRequest::UploadFile {
                folder_id: model.ui.folder_select.value(),
                path: path.value.trim().into(),
            },
        },
        Form::RenameFile { file_id, name } if !name.is_blank() => ApiRequest::RenameFile {
            file_id: *file_id,
            name: name.value.clone(),
        },
        _ => return vec![],
    };

    vec![Command::Api(request)]
}

/// Surface a failure the way its operation calls for
fn report_failure(model: &mut Model, operation: Operation, user_text: &str, detail: &str) {
    tracing::warn!(?operation, detail, "operation failed");

    match tier_for(operation) {
        FailureTier::Silent => {}
        FailureTier::Alert => model.ui.show_alert(user_text),
        FailureTier::Dialog => {
            model.ui.dialog = Some(Dialog::error(feedback::ERROR_TITLE, user_text));
        }
    }
}

fn error_detail(error: &anyhow::Error) -> String {
    format!("{}: {}", classify_error(error).label(), format_error_message(error))
}

/// Detail string for a reply the operation didn't accept
fn reply_detail(reply: &Result<ApiReply>) -> String {
    match reply {
        Ok(reply) => format!(
            "status {} message {:?}",
            reply.status,
            reply.message().unwrap_or("<none>")
        ),
        Err(e) => error_detail(e),
    }
}

pub fn handle_api_response(model: &mut Model, response: ApiResponse) -> Vec<Command> {
    match response {
        ApiResponse::FoldersLoaded { folders } => match folders {
            Ok(folders) => {
                tracing::debug!(count = folders.len(), "folders loaded");
                model.folders.set_folders(folders.clone());
                model.folders.connection_state = ConnectionState::Connected;
                model.folders.from_cache = false;
                model.folders.loaded_once = true;
                vec![Command::CacheFolders(folders)]
            }
            Err(e) => {
                let detail = error_detail(&e);
                model.folders.connection_state = ConnectionState::Disconnected {
                    error_type: classify_error(&e),
                    message: format_error_message(&e),
                };
                report_failure(
                    model,
                    Operation::LoadFolders,
                    &format!("{} ({})", feedback::FOLDERS_FAILED_ALERT, detail),
                    &detail,
                );

                if !model.folders.loaded_once && model.folders.folders.is_empty() {
                    vec![Command::RestoreCachedFolders]
                } else {
                    vec![]
                }
            }
        },

        ApiResponse::FolderSelectPopulated { trigger, folders } => {
            match (trigger, folders) {
                (PopulateTrigger::ModalOpen, Ok(folders)) => {
                    model.ui.folder_select.replace_options(&folders);
                }
                (PopulateTrigger::PageLoad, Ok(folders)) => {
                    model.ui.folder_select.append_options(&folders);
                }
                (PopulateTrigger::ModalOpen, Err(e)) => report_failure(
                    model,
                    Operation::PopulateSelectOnModalOpen,
                    feedback::FOLDER_CHOICES_FAILED_ALERT,
                    &error_detail(&e),
                ),
                (PopulateTrigger::PageLoad, Err(e)) => report_failure(
                    model,
                    Operation::PopulateSelectOnPageLoad,
                    "",
                    &error_detail(&e),
                ),
            }
            vec![]
        }

        ApiResponse::FolderDeleted {
            folder_id,
            mode: DeleteMode::Direct,
            reply,
        } => {
            match &reply {
                Ok(r) if r.is_success() => {
                    model.folders.remove_folder(folder_id);
                }
                _ => report_failure(model, Operation::DeleteFolderDirect, "", &reply_detail(&reply)),
            }
            vec![]
        }

        ApiResponse::FolderDeleted {
            mode: DeleteMode::Confirmed,
            reply,
            ..
        } => {
            match &reply {
                Ok(r) if r.message() == Some(FOLDER_DELETED_MESSAGE) => {
                    model.ui.dialog = Some(Dialog::success(
                        feedback::FOLDER_DELETED_TITLE,
                        feedback::FOLDER_DELETED_TEXT,
                        Some(DismissAction::Reload),
                    ));
                }
                // Server answered with JSON, just not the success message
                Ok(r) if r.is_json() => report_failure(
                    model,
                    Operation::DeleteFolderConfirmed,
                    feedback::FOLDER_DELETE_REJECTED_TEXT,
                    &reply_detail(&reply),
                ),
                _ => report_failure(
                    model,
                    Operation::DeleteFolderConfirmed,
                    feedback::FOLDER_DELETE_FAILED_TEXT,
                    &reply_detail(&reply),
                ),
            }
            vec![]
        }

        ApiResponse::FolderCreated { name, reply } => match &reply {
            Ok(r) if r.is_json() => {
                tracing::info!(%name, status = r.status, message = ?r.message(), "create folder answered");
                reload(model)
            }
            _ => {
                report_failure(model, Operation::CreateFolder, "", &reply_detail(&reply));
                vec![]
            }
        },

        ApiResponse::FileUploaded { path, reply } => match &reply {
            Ok(r) if r.is_json() => {
                tracing::info!(file = %crate::utils::display_file_name(&path), status = r.status, message = ?r.message(), "upload answered");
                reload(model)
            }
            _ => {
                report_failure(model, Operation::UploadFile, "", &reply_detail(&reply));
                vec![]
            }
        },

        ApiResponse::FolderRenamed {
            folder_id,
            name,
            reply,
        } => {
            match &reply {
                Ok(r) if r.is_success() => {
                    if matches!(model.ui.form, Some(Form::RenameFolder { folder_id: id, .. }) if id == folder_id)
                    {
                        model.ui.form = None;
                    }
                    model.ui.dialog = Some(Dialog::success(
                        feedback::FOLDER_RENAMED_TITLE,
                        feedback::FOLDER_RENAMED_TEXT,
                        Some(DismissAction::ApplyFolderRename { folder_id, name }),
                    ));
                }
                _ => report_failure(
                    model,
                    Operation::RenameFolder,
                    feedback::FOLDER_RENAME_FAILED_TEXT,
                    &reply_detail(&reply),
                ),
            }
            vec![]
        }

        ApiResponse::FolderContentsLoaded { folder_id, files } => {
            let Some(contents) = model
                .folders
                .contents
                .as_mut()
                .filter(|contents| contents.folder_id == folder_id)
            else {
                tracing::debug!(folder_id, "dropping contents for a folder no longer open");
                return vec![];
            };
            contents.loading = false;

            match files {
                Ok(files) => {
                    contents.files = files;
                    contents.selected = navigation::clamp_after_removal(contents.selected, contents.files.len());
                }
                Err(e) => {
                    let detail = error_detail(&e);
                    report_failure(
                        model,
                        Operation::LoadFolderContents,
                        &format!("{} ({})", feedback::CONTENTS_FAILED_ALERT, detail),
                        &detail,
                    );
                }
            }
            vec![]
        }

        ApiResponse::FolderStatsLoaded { folder_id, stats } => {
            match stats {
                Ok(stats) => {
                    if let Some(contents) = model.folders.contents.as_mut() {
                        if contents.folder_id == folder_id {
                            contents.stats = Some(stats);
                        }
                    }
                }
                Err(e) => report_failure(model, Operation::LoadFolderStats, "", &error_detail(&e)),
            }
            vec![]
        }

        ApiResponse::FileDeleted {
            folder_id,
            file_id,
            reply,
        } => match &reply {
            Ok(r) if r.message() == Some(FILE_DELETED_MESSAGE) => {
                if let Some(contents) = model.folders.contents.as_mut() {
                    if contents.folder_id == folder_id {
                        contents.remove_file(file_id);
                    }
                }
                model.ui.show_toast(FILE_DELETED_MESSAGE.to_string());
                vec![Command::Api(ApiRequest::LoadFolderStats { folder_id })]
            }
            _ => {
                report_failure(
                    model,
                    Operation::DeleteFile,
                    feedback::FILE_DELETE_FAILED_TEXT,
                    &reply_detail(&reply),
                );
                vec![]
            }
        },

        ApiResponse::FileRenamed {
            file_id,
            name,
            reply,
        } => {
            match &reply {
                Ok(r) if r.is_success() => {
                    if matches!(model.ui.form, Some(Form::RenameFile { file_id: id, .. }) if id == file_id) {
                        model.ui.form = None;
                    }
                    if let Some(contents) = model.folders.contents.as_mut() {
                        contents.rename_file(file_id, &name);
                    }
                    model.ui.show_toast(format!("Renamed to {}", name));
                }
                _ => report_failure(
                    model,
                    Operation::RenameFile,
                    feedback::FILE_RENAME_FAILED_TEXT,
                    &reply_detail(&reply),
                ),
            }
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Folder;

    fn model_with_folders() -> Model {
        let mut model = Model::new(false);
        model
            .folders
            .set_folders(vec![Folder::new(1, "Docs"), Folder::new(7, "Photos")]);
        model
    }

    #[test]
    fn test_open_upload_populates_from_modal_endpoint() {
        let mut model = model_with_folders();
        let commands = update(&mut model, Msg::OpenUpload);
        assert_eq!(
            commands,
            vec![Command::Api(ApiRequest::PopulateFolderSelect {
                trigger: PopulateTrigger::ModalOpen
            })]
        );
        assert!(matches!(model.ui.form, Some(Form::Upload { .. })));
    }

    #[test]
    fn test_upload_submit_injects_selected_folder() {
        let mut model = model_with_folders();
        update(&mut model, Msg::OpenUpload);
        model
            .ui
            .folder_select
            .replace_options(&[Folder::new(1, "Docs"), Folder::new(7, "Photos")]);
        model.ui.folder_select.select_next();
        for c in "/tmp/a.txt".chars() {
            update(&mut model, Msg::InputChar(c));
        }

        let commands = update(&mut model, Msg::SubmitForm);
        assert_eq!(
            commands,
            vec![Command::Api(ApiRequest::UploadFile {
                folder_id: Some(7),
                path: "/tmp/a.txt".into(),
            })]
        );
    }

    #[test]
    fn test_upload_focus_toggle_stops_text_input() {
        let mut model = model_with_folders();
        update(&mut model, Msg::OpenUpload);
        update(&mut model, Msg::ToggleUploadFocus);
        update(&mut model, Msg::InputChar('x'));

        match &model.ui.form {
            Some(Form::Upload { path, focus }) => {
                assert!(path.value.is_empty());
                assert_eq!(*focus, UploadFocus::FolderSelect);
            }
            other => panic!("unexpected form {:?}", other),
        }
    }

    #[test]
    fn test_blank_create_is_not_submitted() {
        let mut model = model_with_folders();
        update(&mut model, Msg::OpenCreateFolder);
        assert!(update(&mut model, Msg::SubmitForm).is_empty());
        assert!(model.ui.form.is_some());
    }

    #[test]
    fn test_direct_delete_removes_card_on_success() {
        let mut model = model_with_folders();
        let commands = update(&mut model, Msg::DeleteFolderDirect);
        assert_eq!(
            commands,
            vec![Command::Api(ApiRequest::DeleteFolder {
                folder_id: 1,
                mode: DeleteMode::Direct
            })]
        );

        update(
            &mut model,
            Msg::Api(ApiResponse::FolderDeleted {
                folder_id: 1,
                mode: DeleteMode::Direct,
                reply: Ok(ApiReply::new(200, None)),
            }),
        );
        assert!(model.folders.get(1).is_none());
        assert!(!model.has_modal());
    }

    #[test]
    fn test_direct_delete_failure_is_silent() {
        let mut model = model_with_folders();
        let commands = update(
            &mut model,
            Msg::Api(ApiResponse::FolderDeleted {
                folder_id: 1,
                mode: DeleteMode::Direct,
                reply: Err(anyhow::anyhow!("connection refused")),
            }),
        );
        assert!(commands.is_empty());
        assert!(model.folders.get(1).is_some());
        assert!(!model.has_modal());
    }

    #[test]
    fn test_confirmed_delete_non_json_failure_dialog() {
        let mut model = model_with_folders();
        update(
            &mut model,
            Msg::Api(ApiResponse::FolderDeleted {
                folder_id: 1,
                mode: DeleteMode::Confirmed,
                reply: Ok(ApiReply::new(500, None)),
            }),
        );
        match &model.ui.dialog {
            Some(Dialog::Result { text, .. }) => {
                assert_eq!(text, feedback::FOLDER_DELETE_FAILED_TEXT)
            }
            other => panic!("unexpected dialog {:?}", other),
        }
    }

    #[test]
    fn test_modal_populate_failure_alerts() {
        let mut model = model_with_folders();
        update(
            &mut model,
            Msg::Api(ApiResponse::FolderSelectPopulated {
                trigger: PopulateTrigger::ModalOpen,
                folders: Err(anyhow::anyhow!("boom")),
            }),
        );
        assert_eq!(
            model.ui.alert.as_deref(),
            Some(feedback::FOLDER_CHOICES_FAILED_ALERT)
        );
    }

    #[test]
    fn test_page_load_populate_failure_is_silent() {
        let mut model = model_with_folders();
        update(
            &mut model,
            Msg::Api(ApiResponse::FolderSelectPopulated {
                trigger: PopulateTrigger::PageLoad,
                folders: Err(anyhow::anyhow!("boom")),
            }),
        );
        assert!(!model.has_modal());
    }

    #[test]
    fn test_first_listing_failure_falls_back_to_cache() {
        let mut model = Model::new(false);
        let commands = update(
            &mut model,
            Msg::Api(ApiResponse::FoldersLoaded {
                folders: Err(anyhow::anyhow!("connection refused")),
            }),
        );
        assert_eq!(commands, vec![Command::RestoreCachedFolders]);
        assert!(matches!(
            model.folders.connection_state,
            ConnectionState::Disconnected { .. }
        ));

        update(
            &mut model,
            Msg::CachedFolders(vec![Folder::new(3, "Cached")]),
        );
        assert!(model.folders.from_cache);
        assert_eq!(model.folders.folders.len(), 1);
    }

    #[test]
    fn test_listing_success_caches_folders() {
        let mut model = Model::new(false);
        let folders = vec![Folder::new(1, "Docs")];
        let commands = update(
            &mut model,
            Msg::Api(ApiResponse::FoldersLoaded {
                folders: Ok(folders.clone()),
            }),
        );
        assert_eq!(commands, vec![Command::CacheFolders(folders)]);
        assert_eq!(model.folders.connection_state, ConnectionState::Connected);
        assert!(model.folders.loaded_once);
    }

    #[test]
    fn test_open_contents_requests_files_and_stats() {
        let mut model = model_with_folders();
        let commands = update(&mut model, Msg::OpenContents);
        assert_eq!(commands.len(), 2);
        assert!(model.in_contents());

        update(
            &mut model,
            Msg::Api(ApiResponse::FolderContentsLoaded {
                folder_id: 1,
                files: Ok(vec![]),
            }),
        );
        assert!(!model.folders.contents.as_ref().unwrap().loading);
    }

    #[test]
    fn test_stale_contents_response_dropped() {
        let mut model = model_with_folders();
        update(&mut model, Msg::OpenContents);
        update(&mut model, Msg::CloseContents);

        let commands = update(
            &mut model,
            Msg::Api(ApiResponse::FolderContentsLoaded {
                folder_id: 1,
                files: Err(anyhow::anyhow!("boom")),
            }),
        );
        assert!(commands.is_empty());
        assert!(!model.has_modal());
    }

    #[test]
    fn test_quit() {
        let mut model = Model::new(false);
        update(&mut model, Msg::Quit);
        assert!(model.ui.should_quit);
    }
}
