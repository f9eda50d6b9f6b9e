//! Wire-level tests for the folder client against a mock server
//!
//! Verifies methods, paths, bodies and headers the client puts on the wire,
//! and how replies are read back.

use foldertui::api::{FolderClient, FOLDER_DELETED_MESSAGE};
use foldertui::logic::errors::{classify_error, ErrorType};
use foldertui::services::api::{spawn_api_service, ApiRequest, ApiResponse, ApiService, DeleteMode, PopulateTrigger};
use serde_json::json;
use std::io::Write;
use std::time::Duration;
use wiremock::matchers::{body_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> FolderClient {
    FolderClient::new(server.uri(), Some("test-token".to_string())).unwrap()
}

#[tokio::test]
async fn test_list_folders_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/folders"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 2, "name": "Newest", "created_at": "2024-05-01 10:00:00", "is_zipped": false },
            { "id": 1, "name": "Oldest" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let folders = client(&server).list_folders().await.unwrap();
    assert_eq!(folders.len(), 2);
    assert_eq!(folders[0].name, "Newest");
    assert_eq!(folders[1].created_at, None);
}

#[tokio::test]
async fn test_no_token_means_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = FolderClient::new(server.uri(), None).unwrap();
    client.list_folder_choices().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_unauthorized_listing_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/folders"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client(&server).list_folders().await.unwrap_err();
    assert_eq!(classify_error(&err), ErrorType::Unauthorized);
}

#[tokio::test]
async fn test_create_folder_posts_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/folders"))
        .and(body_json(json!({ "name": "Receipts" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "message": "Folder created" })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server).create_folder("Receipts").await.unwrap();
    assert_eq!(reply.status, 201);
    assert!(reply.is_json());
}

#[tokio::test]
async fn test_rename_folder_puts_name_and_id() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/folders/7"))
        .and(body_json(json!({ "name": "X", "folder_id": 7 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Folder renamed" })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server).rename_folder(7, "X").await.unwrap();
    assert!(reply.is_success());
}

#[tokio::test]
async fn test_delete_folder_reads_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/folders/5"))
        .and(header("Authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": FOLDER_DELETED_MESSAGE })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = client(&server).delete_folder(5).await.unwrap();
    assert_eq!(reply.message(), Some(FOLDER_DELETED_MESSAGE));
}

#[tokio::test]
async fn test_non_json_reply_has_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/folders/5"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>Internal Server Error</html>"))
        .mount(&server)
        .await;

    let reply = client(&server).delete_folder(5).await.unwrap();
    assert_eq!(reply.status, 500);
    assert!(!reply.is_json());
    assert_eq!(reply.message(), None);
}

#[tokio::test]
async fn test_upload_sends_multipart_folder_id_and_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/files"))
        .and(body_string_contains("name=\"folder_id\"\r\n\r\n3\r\n"))
        .and(body_string_contains("filename=\"notes.txt\""))
        .and(body_string_contains("hello upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "File uploaded" })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("notes.txt");
    let mut file = std::fs::File::create(&file_path).unwrap();
    file.write_all(b"hello upload").unwrap();

    let reply = client(&server).upload_file(Some(3), &file_path).await.unwrap();
    assert!(reply.is_json());
}

#[tokio::test]
async fn test_upload_of_missing_file_fails_before_sending() {
    let server = MockServer::start().await;

    let result = client(&server)
        .upload_file(Some(3), std::path::Path::new("/does/not/exist.bin"))
        .await;
    assert!(result.is_err());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_folder_stats_combines_both_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/folders/4/file_count"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "file_count": 12 })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/folders/4/total_size"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "total_size_MB": 3.5, "total_size_GB": 0.003 })),
        )
        .mount(&server)
        .await;

    let stats = client(&server).folder_stats(4).await.unwrap();
    assert_eq!(stats.file_count, 12);
    assert_eq!(stats.total_size_mb, 3.5);
}

#[tokio::test]
async fn test_login_follows_redirect_away_from_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_string_contains("username=alice"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", "/")
                .insert_header("Set-Cookie", "session=abc; Path=/"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    client(&server).login("alice", "secret").await.unwrap();
}

#[tokio::test]
async fn test_login_rejected_stays_on_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<form>"))
        .mount(&server)
        .await;

    assert!(client(&server).login("alice", "wrong").await.is_err());
}

#[tokio::test]
async fn test_modal_populate_uses_choice_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get_folders"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1, "name": "A" }])))
        .expect(1)
        .mount(&server)
        .await;

    let response = ApiService::execute_request(
        &client(&server),
        ApiRequest::PopulateFolderSelect {
            trigger: PopulateTrigger::ModalOpen,
        },
    )
    .await;

    match response {
        ApiResponse::FolderSelectPopulated { trigger, folders } => {
            assert_eq!(trigger, PopulateTrigger::ModalOpen);
            assert_eq!(folders.unwrap().len(), 1);
        }
        other => panic!("unexpected response {:?}", other),
    }
}

/// Two identical deletes reach the server twice
#[tokio::test]
async fn test_service_does_not_merge_duplicate_requests() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/folders/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(2)
        .mount(&server)
        .await;

    let (api_tx, mut api_rx) = spawn_api_service(client(&server));
    for _ in 0..2 {
        api_tx
            .send(ApiRequest::DeleteFolder {
                folder_id: 9,
                mode: DeleteMode::Direct,
            })
            .unwrap();
    }

    for _ in 0..2 {
        let response = tokio::time::timeout(Duration::from_secs(5), api_rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(
            response,
            ApiResponse::FolderDeleted { folder_id: 9, .. }
        ));
    }
}
