use anyhow::Result;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::api::{ApiReply, FileEntry, Folder, FolderClient, FolderStats};

/// Priority level for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,   // User-initiated writes (delete, rename, create, upload)
    Medium, // Listings the user is looking at
    Low,    // Supplementary info (folder stats)
}

/// What caused the folder dropdown to be (re)populated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulateTrigger {
    /// Upload modal opened: `GET /get_folders`, options replaced
    ModalOpen,
    /// Page load or reload: `GET /api/folders`, options appended
    PageLoad,
}

/// Which delete flow issued a folder delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    /// Straight from the card, no confirmation
    Direct,
    /// After the user accepted the confirmation dialog
    Confirmed,
}

/// API request types
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    /// Folder cards for the main view
    LoadFolders,

    /// Fill the upload modal's folder dropdown
    PopulateFolderSelect { trigger: PopulateTrigger },

    DeleteFolder { folder_id: i64, mode: DeleteMode },

    CreateFolder { name: String },

    RenameFolder { folder_id: i64, name: String },

    UploadFile {
        folder_id: Option<i64>,
        path: PathBuf,
    },

    /// Files inside one folder
    LoadFolderContents { folder_id: i64 },

    /// File count and total size for one folder
    LoadFolderStats { folder_id: i64 },

    DeleteFile { folder_id: i64, file_id: i64 },

    RenameFile { file_id: i64, name: String },
}

impl ApiRequest {
    /// Extract priority from request
    fn priority(&self) -> Priority {
        match self {
            ApiRequest::LoadFolders
            | ApiRequest::PopulateFolderSelect { .. }
            | ApiRequest::LoadFolderContents { .. } => Priority::Medium,
            ApiRequest::LoadFolderStats { .. } => Priority::Low,
            _ => Priority::High,
        }
    }
}

/// API response types
#[derive(Debug)]
pub enum ApiResponse {
    FoldersLoaded {
        folders: Result<Vec<Folder>>,
    },

    FolderSelectPopulated {
        trigger: PopulateTrigger,
        folders: Result<Vec<Folder>>,
    },

    FolderDeleted {
        folder_id: i64,
        mode: DeleteMode,
        reply: Result<ApiReply>,
    },

    FolderCreated {
        name: String,
        reply: Result<ApiReply>,
    },

    FolderRenamed {
        folder_id: i64,
        name: String,
        reply: Result<ApiReply>,
    },

    FileUploaded {
        path: PathBuf,
        reply: Result<ApiReply>,
    },

    FolderContentsLoaded {
        folder_id: i64,
        files: Result<Vec<FileEntry>>,
    },

    FolderStatsLoaded {
        folder_id: i64,
        stats: Result<FolderStats>,
    },

    FileDeleted {
        folder_id: i64,
        file_id: i64,
        reply: Result<ApiReply>,
    },

    FileRenamed {
        file_id: i64,
        name: String,
        reply: Result<ApiReply>,
    },
}

/// API service worker that processes requests in the background
pub struct ApiService {
    client: FolderClient,
    request_queue: VecDeque<(ApiRequest, Priority)>,
    in_flight: HashSet<u64>,
    next_ticket: u64,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<u64>,
    max_concurrent: usize,
}

impl ApiService {
    pub fn new(
        client: FolderClient,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<u64>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            in_flight: HashSet::new(),
            next_ticket: 0,
            response_tx,
            completion_tx,
            max_concurrent: 10,
        }
    }

    /// Add a request to the queue behind everything of equal or higher priority.
    /// Requests are never merged: pressing delete twice sends two deletes.
    fn enqueue(&mut self, request: ApiRequest) {
        let priority = request.priority();

        let insert_pos = self
            .request_queue
            .iter()
            .position(|(_, p)| *p > priority)
            .unwrap_or(self.request_queue.len());

        self.request_queue.insert(insert_pos, (request, priority));
    }

    /// Process the next request from the queue
    fn process_next(&mut self) {
        if self.in_flight.len() >= self.max_concurrent {
            return;
        }

        let Some((request, _)) = self.request_queue.pop_front() else {
            return;
        };

        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.in_flight.insert(ticket);

        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        // No per-request retries; a failure is final for that user action
        tokio::spawn(async move {
            tracing::debug!(?request, ticket, "executing request");
            let response = Self::execute_request(&client, request).await;
            let _ = response_tx.send(response);
            let _ = completion_tx.send(ticket);
        });
    }

    /// Execute an API request and return the response
    pub async fn execute_request(client: &FolderClient, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::LoadFolders => ApiResponse::FoldersLoaded {
                folders: client.list_folders().await,
            },

            ApiRequest::PopulateFolderSelect { trigger } => {
                let folders = match trigger {
                    PopulateTrigger::ModalOpen => client.list_folder_choices().await,
                    PopulateTrigger::PageLoad => client.list_folders().await,
                };
                ApiResponse::FolderSelectPopulated { trigger, folders }
            }

            ApiRequest::DeleteFolder { folder_id, mode } => ApiResponse::FolderDeleted {
                folder_id,
                mode,
                reply: client.delete_folder(folder_id).await,
            },

            ApiRequest::CreateFolder { name } => {
                let reply = client.create_folder(&name).await;
                ApiResponse::FolderCreated { name, reply }
            }

            ApiRequest::RenameFolder { folder_id, name } => {
                let reply = client.rename_folder(folder_id, &name).await;
                ApiResponse::FolderRenamed {
                    folder_id,
                    name,
                    reply,
                }
            }

            ApiRequest::UploadFile { folder_id, path } => {
                let reply = client.upload_file(folder_id, &path).await;
                ApiResponse::FileUploaded { path, reply }
            }

            ApiRequest::LoadFolderContents { folder_id } => ApiResponse::FolderContentsLoaded {
                folder_id,
                files: client.list_files(folder_id).await,
            },

            ApiRequest::LoadFolderStats { folder_id } => ApiResponse::FolderStatsLoaded {
                folder_id,
                stats: client.folder_stats(folder_id).await,
            },

            ApiRequest::DeleteFile { folder_id, file_id } => ApiResponse::FileDeleted {
                folder_id,
                file_id,
                reply: client.delete_file(file_id).await,
            },

            ApiRequest::RenameFile { file_id, name } => {
                let reply = client.rename_file(file_id, &name).await;
                ApiResponse::FileRenamed {
                    file_id,
                    name,
                    reply,
                }
            }
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: FolderClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<u64>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                request = request_rx.recv() => {
                    match request {
                        Some(request) => service.enqueue(request),
                        // Runtime dropped its sender, nothing more will arrive
                        None => break,
                    }
                }

                Some(ticket) = completion_rx.recv() => {
                    service.in_flight.remove(&ticket);
                }

                _ = tick.tick() => {
                    for _ in 0..5 {
                        if service.request_queue.is_empty() {
                            break;
                        }
                        service.process_next();
                    }
                }
            }
        }

        tracing::debug!("API service stopped");
    });

    (request_tx, response_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> ApiService {
        let client = FolderClient::new("http://127.0.0.1:9".to_string(), None).unwrap();
        let (response_tx, _response_rx) = mpsc::unbounded_channel();
        let (completion_tx, _completion_rx) = mpsc::unbounded_channel();
        ApiService::new(client, response_tx, completion_tx)
    }

    #[test]
    fn test_writes_jump_ahead_of_reads() {
        let mut service = service();
        service.enqueue(ApiRequest::LoadFolderStats { folder_id: 1 });
        service.enqueue(ApiRequest::LoadFolders);
        service.enqueue(ApiRequest::DeleteFolder {
            folder_id: 1,
            mode: DeleteMode::Confirmed,
        });

        let order: Vec<Priority> = service.request_queue.iter().map(|(_, p)| *p).collect();
        assert_eq!(order, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn test_same_priority_keeps_arrival_order() {
        let mut service = service();
        service.enqueue(ApiRequest::CreateFolder {
            name: "a".to_string(),
        });
        service.enqueue(ApiRequest::CreateFolder {
            name: "b".to_string(),
        });

        let names: Vec<&ApiRequest> = service.request_queue.iter().map(|(r, _)| r).collect();
        assert_eq!(
            names,
            vec![
                &ApiRequest::CreateFolder { name: "a".to_string() },
                &ApiRequest::CreateFolder { name: "b".to_string() },
            ]
        );
    }

    #[test]
    fn test_duplicate_deletes_are_not_merged() {
        let mut service = service();
        let delete = ApiRequest::DeleteFolder {
            folder_id: 4,
            mode: DeleteMode::Direct,
        };
        service.enqueue(delete.clone());
        service.enqueue(delete);
        assert_eq!(service.request_queue.len(), 2);
    }
}
