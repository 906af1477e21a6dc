use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use devicefs_capabilities::{FileSystemError, FileSystemHost, LocalFileSystem, ProgressCallback, uri};
use devicefs_core::DownloadProgress;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn host_in(dir: &TempDir) -> LocalFileSystem {
    LocalFileSystem::with_roots(
        Some(dir.path().join("documents")),
        Some(dir.path().join("cache")),
    )
}

fn file_uri(path: &Path) -> String {
    uri::from_path(path, false)
}

/// 启动只应答一次的 HTTP 服务，返回请求地址。
async fn serve_once(response: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("listener should bind");
    let addr = listener.local_addr().expect("listener should have an address");

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("client should connect");
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.expect("request should be readable");
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(response.as_bytes())
            .await
            .expect("response should be written");
        socket.shutdown().await.ok();
    });

    format!("http://{addr}/file.bin")
}

const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Length: 5\r\nContent-Type: text/plain\r\nConnection: close\r\n\r\nhello";
const NOT_FOUND_RESPONSE: &str = "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n";

#[tokio::test]
async fn test_roots_are_reported_as_directory_uris() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    host.ensure_roots().await.expect("roots should be created");

    let documents = host.document_directory().expect("document root should be set");
    assert!(documents.starts_with("file://"));
    assert!(documents.ends_with("/documents/"));
    assert!(dir.path().join("cache").is_dir());
}

#[tokio::test]
async fn test_write_read_and_info() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    let target = file_uri(&dir.path().join("note.txt"));

    host.write_bytes(&target, b"hello").await.expect("write should succeed");
    let bytes = host.read_bytes(&target).await.expect("read should succeed");
    assert_eq!(bytes, b"hello");

    let info = host.get_info(&target).await.expect("info should succeed");
    assert!(info.exists);
    assert!(!info.is_directory);
    assert_eq!(info.size, 5);
    assert!(info.modification_time > 0);
}

#[tokio::test]
async fn test_missing_path_reports_not_exists() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    let missing = file_uri(&dir.path().join("missing.bin"));

    let info = host.get_info(&missing).await.expect("info should succeed");
    assert!(!info.exists);

    let err = host.read_bytes(&missing).await.expect_err("read should fail");
    assert!(matches!(err, FileSystemError::PathNotFound(_)));
}

#[tokio::test]
async fn test_directory_size_is_recursive() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    let nested = dir.path().join("tree/inner");
    std::fs::create_dir_all(&nested).expect("nested dir should be created");
    std::fs::write(dir.path().join("tree/a.bin"), [0u8; 10]).expect("write a");
    std::fs::write(nested.join("b.bin"), [0u8; 32]).expect("write b");

    let info = host
        .get_info(&uri::from_path(&dir.path().join("tree"), true))
        .await
        .expect("info should succeed");
    assert!(info.is_directory);
    assert_eq!(info.size, 42);
}

#[tokio::test]
async fn test_copy_directory_recursively() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    std::fs::create_dir_all(dir.path().join("src/sub")).expect("src dir");
    std::fs::write(dir.path().join("src/sub/file.txt"), "x").expect("write file");

    host.copy(
        &uri::from_path(&dir.path().join("src"), true),
        &uri::from_path(&dir.path().join("dst"), true),
    )
    .await
    .expect("copy should succeed");

    let copied = std::fs::read_to_string(dir.path().join("dst/sub/file.txt")).expect("copied file");
    assert_eq!(copied, "x");
}

#[tokio::test]
async fn test_move_and_delete() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    let from = file_uri(&dir.path().join("a.txt"));
    let to = file_uri(&dir.path().join("b.txt"));
    host.write_bytes(&from, b"data").await.expect("write should succeed");

    host.move_entry(&from, &to).await.expect("move should succeed");
    assert!(!dir.path().join("a.txt").exists());
    assert!(dir.path().join("b.txt").exists());

    host.delete(&to, false).await.expect("delete should succeed");
    host.delete(&to, true).await.expect("idempotent delete should succeed");
    let err = host.delete(&to, false).await.expect_err("strict delete should fail");
    assert!(matches!(err, FileSystemError::PathNotFound(_)));
}

#[tokio::test]
async fn test_make_and_read_directory() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    let deep = uri::from_path(&dir.path().join("a/b/c"), true);

    host.make_directory(&deep, false)
        .await
        .expect_err("missing parents should fail without intermediates");
    host.make_directory(&deep, true).await.expect("mkdir -p should succeed");

    std::fs::write(dir.path().join("a/z.txt"), "").expect("write z");
    let names = host
        .read_directory(&uri::from_path(&dir.path().join("a"), true))
        .await
        .expect("listing should succeed");
    assert_eq!(names, vec!["b", "z.txt"]);

    let err = host
        .read_directory(&file_uri(&dir.path().join("a/z.txt")))
        .await
        .expect_err("listing a file should fail");
    assert!(matches!(err, FileSystemError::NotADirectory(_)));
}

#[tokio::test]
async fn test_download_failure_leaves_no_partial_file() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let progress: ProgressCallback = Arc::new(move |_: DownloadProgress| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let result = host
        .download(
            "http://127.0.0.1:1/unreachable.bin",
            &file_uri(&dir.path().join("unreachable.bin")),
            Some(progress),
        )
        .await;

    assert!(matches!(result, Err(FileSystemError::Http(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(!dir.path().join("unreachable.bin").exists());
    assert!(!dir.path().join("tmp_unreachable.bin").exists());
}

#[tokio::test]
async fn test_foreign_scheme_is_invalid() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);

    let err = host
        .read_bytes("content://media/external/1")
        .await
        .expect_err("content uri should be rejected");
    assert!(matches!(err, FileSystemError::InvalidUri(_)));
}

#[tokio::test]
async fn test_download_renames_partial_file_on_success() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    let url = serve_once(OK_RESPONSE).await;
    let destination = file_uri(&dir.path().join("file.bin"));

    let result = host
        .download(&url, &destination, None)
        .await
        .expect("download should succeed");

    assert_eq!(result.uri, destination);
    assert_eq!(result.status, 200);
    assert_eq!(result.bytes_written, 5);
    assert_eq!(result.mime_type.as_deref(), Some("text/plain"));
    assert_eq!(std::fs::read_to_string(dir.path().join("file.bin")).expect("downloaded file"), "hello");
    assert!(!dir.path().join("tmp_file.bin").exists());
}

#[tokio::test]
async fn test_download_non_success_status_is_an_error() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    let url = serve_once(NOT_FOUND_RESPONSE).await;

    let err = host
        .download(&url, &file_uri(&dir.path().join("file.bin")), None)
        .await
        .expect_err("404 should fail");

    assert!(matches!(err, FileSystemError::Download(_)));
    assert!(!dir.path().join("file.bin").exists());
    assert!(!dir.path().join("tmp_file.bin").exists());
}

#[tokio::test]
async fn test_download_reports_progress_with_content_length() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    let url = serve_once(OK_RESPONSE).await;
    let updates = Arc::new(Mutex::new(Vec::new()));
    let sink = updates.clone();
    let progress: ProgressCallback = Arc::new(move |update: DownloadProgress| {
        sink.lock().unwrap().push(update);
    });

    host.download(&url, &file_uri(&dir.path().join("file.bin")), Some(progress))
        .await
        .expect("download should succeed");

    let updates = updates.lock().unwrap();
    let last = updates.last().expect("progress should be reported");
    assert_eq!(last.total_bytes_written, 5);
    assert_eq!(last.total_bytes_expected_to_write, 5);
    assert_eq!(last.progress, 1.0);
}

#[tokio::test]
async fn test_copy_directory_into_itself_is_rejected() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    let source = dir.path().join("src");
    std::fs::create_dir_all(&source).expect("src dir");
    std::fs::write(source.join("a.txt"), "a").expect("write a");

    let err = host
        .copy(&uri::from_path(&source, true), &uri::from_path(&source.join("inner"), true))
        .await
        .expect_err("copy into own subtree should fail");

    assert!(matches!(err, FileSystemError::CopyIntoSelf(_)));
    assert!(!source.join("inner").exists());
    let entries = std::fs::read_dir(&source).expect("src listing").count();
    assert_eq!(entries, 1);
}

#[tokio::test]
async fn test_move_does_not_merge_into_existing_directory() {
    let dir = TempDir::new().expect("temp dir should be created");
    let host = host_in(&dir);
    std::fs::create_dir_all(dir.path().join("from")).expect("from dir");
    std::fs::write(dir.path().join("from/a.txt"), "a").expect("write a");
    std::fs::create_dir_all(dir.path().join("to")).expect("to dir");
    std::fs::write(dir.path().join("to/b.txt"), "b").expect("write b");

    let err = host
        .move_entry(
            &uri::from_path(&dir.path().join("from"), true),
            &uri::from_path(&dir.path().join("to"), true),
        )
        .await
        .expect_err("moving onto a non-empty directory should fail");

    assert!(matches!(err, FileSystemError::AlreadyExists(_)));
    assert!(dir.path().join("from/a.txt").exists());
    assert!(!dir.path().join("to/a.txt").exists());
}
