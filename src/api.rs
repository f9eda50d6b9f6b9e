use anyhow::{Context, Result};
use reqwest::{multipart, Client, RequestBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Message the server returns when a folder delete cascaded to its files
pub const FOLDER_DELETED_MESSAGE: &str = "Folder and associated files deleted";

/// Message the server returns when a single file was deleted
pub const FILE_DELETED_MESSAGE: &str = "File deleted";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Folder {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub is_zipped: bool,
}

impl Folder {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            created_at: None,
            is_zipped: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FileEntry {
    pub id: i64,
    pub name: String,
    /// Size in KB as reported by the server
    #[serde(default)]
    pub size: f64,
    #[serde(default)]
    pub file_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub folder_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FolderStats {
    pub file_count: u64,
    pub total_size_mb: f64,
    pub total_size_gb: f64,
}

#[derive(Debug, Deserialize)]
struct FileCountResponse {
    file_count: u64,
}

#[derive(Debug, Deserialize)]
struct TotalSizeResponse {
    #[serde(rename = "total_size_MB")]
    total_size_mb: f64,
    #[serde(rename = "total_size_GB")]
    total_size_gb: f64,
}

#[derive(Debug, Serialize)]
struct RenameFolderRequest<'a> {
    name: &'a str,
    folder_id: i64,
}

/// Raw outcome of a mutating call.
///
/// Mutating endpoints answer with a small JSON object (`{"message": ...}`),
/// but callers disagree on what counts as success: some only look at the
/// status, some only at the message, some at nothing but "was it JSON".
/// The body is therefore kept as parsed, or `None` when it wasn't JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

impl ApiReply {
    pub fn new(status: u16, body: Option<serde_json::Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.body.is_some()
    }

    /// The `message` field of the body, if any
    pub fn message(&self) -> Option<&str> {
        self.body
            .as_ref()
            .and_then(|body| body.get("message"))
            .and_then(|message| message.as_str())
    }
}

#[derive(Clone)]
pub struct FolderClient {
    base_url: String,
    api_token: Option<String>,
    client: Client,
}

impl FolderClient {
    pub fn new(base_url: String, api_token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.api_token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer token if one was resolved at startup
    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a mutating request and keep whatever came back
    async fn send_for_reply(&self, builder: RequestBuilder, what: &str) -> Result<ApiReply> {
        let response = self
            .authorized(builder)
            .send()
            .await
            .with_context(|| format!("Failed to {}", what))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read {} response", what))?;
        let body = serde_json::from_str(&text).ok();

        tracing::debug!(what, status, json = body.is_some(), "reply received");

        Ok(ApiReply::new(status, body))
    }

    /// Log in with form credentials. The session cookie lands in the
    /// client's cookie store and rides along on every later request.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let response = self
            .client
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .context("Failed to reach login endpoint")?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            anyhow::bail!("Login failed: {}", status);
        }

        // A rejected login redirects back to the login form
        if response.url().path().ends_with("/login") {
            anyhow::bail!("Login rejected for user '{}'", username);
        }

        Ok(())
    }

    /// List the user's folders (`GET /api/folders`)
    pub async fn list_folders(&self) -> Result<Vec<Folder>> {
        let response = self
            .authorized(self.client.get(self.url("/api/folders")))
            .header("Content-Type", "application/json")
            .send()
            .await
            .context("Failed to fetch folders")?
            .error_for_status()?;

        response.json().await.context("Failed to parse folder list")
    }

    /// List folders for the upload modal's dropdown (`GET /get_folders`)
    pub async fn list_folder_choices(&self) -> Result<Vec<Folder>> {
        let response = self
            .authorized(self.client.get(self.url("/get_folders")))
            .send()
            .await
            .context("Failed to fetch folder choices")?
            .error_for_status()?;

        response.json().await.context("Failed to parse folder choices")
    }

    pub async fn create_folder(&self, name: &str) -> Result<ApiReply> {
        let builder = self
            .client
            .post(self.url("/api/folders"))
            .json(&serde_json::json!({ "name": name }));

        self.send_for_reply(builder, "create folder").await
    }

    pub async fn rename_folder(&self, folder_id: i64, name: &str) -> Result<ApiReply> {
        let builder = self
            .client
            .put(self.url(&format!("/api/folders/{}", folder_id)))
            .json(&RenameFolderRequest { name, folder_id });

        self.send_for_reply(builder, "rename folder").await
    }

    pub async fn delete_folder(&self, folder_id: i64) -> Result<ApiReply> {
        let builder = self
            .client
            .delete(self.url(&format!("/api/folders/{}", folder_id)));

        self.send_for_reply(builder, "delete folder").await
    }

    /// Upload a local file into a folder as multipart form data.
    ///
    /// `folder_id` is whatever the dropdown currently holds; an empty
    /// selection is sent as an empty field and left for the server to reject.
    pub async fn upload_file(&self, folder_id: Option<i64>, path: &Path) -> Result<ApiReply> {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let form = multipart::Form::new()
            .text(
                "folder_id",
                folder_id.map(|id| id.to_string()).unwrap_or_default(),
            )
            .part("file", multipart::Part::bytes(data).file_name(file_name));

        let builder = self.client.post(self.url("/api/files")).multipart(form);

        self.send_for_reply(builder, "upload file").await
    }

    /// List files in a folder (`GET /api/folders/{id}/files`)
    pub async fn list_files(&self, folder_id: i64) -> Result<Vec<FileEntry>> {
        let url = self.url(&format!("/api/folders/{}/files", folder_id));
        let response = self
            .authorized(self.client.get(&url))
            .send()
            .await
            .context("Failed to fetch folder files")?
            .error_for_status()?;

        response.json().await.context("Failed to parse folder files")
    }

    /// File count and total size for a folder
    pub async fn folder_stats(&self, folder_id: i64) -> Result<FolderStats> {
        let count_url = self.url(&format!("/api/folders/{}/file_count", folder_id));
        let count: FileCountResponse = self
            .authorized(self.client.get(&count_url))
            .send()
            .await
            .context("Failed to fetch file count")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse file count")?;

        let size_url = self.url(&format!("/api/folders/{}/total_size", folder_id));
        let size: TotalSizeResponse = self
            .authorized(self.client.get(&size_url))
            .send()
            .await
            .context("Failed to fetch total size")?
            .error_for_status()?
            .json()
            .await
            .context("Failed to parse total size")?;

        Ok(FolderStats {
            file_count: count.file_count,
            total_size_mb: size.total_size_mb,
            total_size_gb: size.total_size_gb,
        })
    }

    pub async fn delete_file(&self, file_id: i64) -> Result<ApiReply> {
        let builder = self
            .client
            .delete(self.url(&format!("/api/files/{}", file_id)));

        self.send_for_reply(builder, "delete file").await
    }

    pub async fn rename_file(&self, file_id: i64, name: &str) -> Result<ApiReply> {
        let builder = self
            .client
            .put(self.url(&format!("/api/files/{}", file_id)))
            .json(&serde_json::json!({ "name": name }));

        self.send_for_reply(builder, "rename file").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_ignores_unknown_fields() {
        let json = r#"{"id": 3, "name": "Docs", "files": [], "children": [], "is_zipped": true}"#;
        let folder: Folder = serde_json::from_str(json).unwrap();
        assert_eq!(folder.id, 3);
        assert_eq!(folder.name, "Docs");
        assert!(folder.is_zipped);
        assert!(folder.created_at.is_none());
    }

    #[test]
    fn test_file_entry_defaults() {
        let json = r#"{"id": 9, "name": "a.pdf"}"#;
        let file: FileEntry = serde_json::from_str(json).unwrap();
        assert_eq!(file.size, 0.0);
        assert!(file.folder_id.is_none());
    }

    #[test]
    fn test_reply_message() {
        let reply = ApiReply::new(
            200,
            Some(serde_json::json!({ "message": FOLDER_DELETED_MESSAGE })),
        );
        assert!(reply.is_success());
        assert_eq!(reply.message(), Some(FOLDER_DELETED_MESSAGE));
    }

    #[test]
    fn test_reply_without_body() {
        let reply = ApiReply::new(500, None);
        assert!(!reply.is_success());
        assert!(!reply.is_json());
        assert_eq!(reply.message(), None);
    }

    #[test]
    fn test_reply_message_must_be_string() {
        let reply = ApiReply::new(200, Some(serde_json::json!({ "message": 5 })));
        assert_eq!(reply.message(), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = FolderClient::new("http://localhost:5000/".to_string(), None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert!(!client.has_token());
    }
}
