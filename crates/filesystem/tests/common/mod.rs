use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use devicefs::{DownloadProgress, FileSystemError, FileSystemHost, HostFileInfo, ProgressCallback};
use devicefs_capabilities::{DownloadResult, Result};

pub const DOCUMENTS: &str = "mem:///documents/";
pub const CACHE: &str = "mem:///cache/";
const SCHEME_ROOT: &str = "mem://";
const MODIFIED_AT: u64 = 1_700_000_000;

#[derive(Default)]
struct State {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
}

fn key(uri: &str) -> String {
    uri.trim_end_matches('/').to_string()
}

fn parent(key: &str) -> &str {
    key.rsplit_once('/').map_or(SCHEME_ROOT, |(parent, _)| parent)
}

impl State {
    fn parent_exists(&self, key: &str) -> bool {
        let parent = parent(key);
        parent == SCHEME_ROOT || parent == "mem:/" || self.dirs.contains(parent)
    }

    fn children(&self, dir: &str) -> impl Iterator<Item = &String> {
        let prefix = format!("{dir}/");
        self.files
            .keys()
            .chain(self.dirs.iter())
            .filter(move |entry| entry.starts_with(&prefix))
    }
}

/// 内存宿主，用于驱动服务层测试。
#[derive(Clone)]
pub struct MemoryFileSystem {
    state: Arc<Mutex<State>>,
    with_roots: bool,
    fail_deletes: Arc<AtomicBool>,
    downloads: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        let mut state = State::default();
        state.dirs.insert(key(DOCUMENTS));
        state.dirs.insert(key(CACHE));
        Self {
            state: Arc::new(Mutex::new(state)),
            with_roots: true,
            fail_deletes: Arc::new(AtomicBool::new(false)),
            downloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn without_roots() -> Self {
        Self {
            with_roots: false,
            ..Self::new()
        }
    }

    pub fn fail_deletes(&self) {
        self.fail_deletes.store(true, Ordering::SeqCst);
    }

    pub fn put(&self, uri: &str, contents: &[u8]) {
        self.state
            .lock()
            .unwrap()
            .files
            .insert(key(uri), contents.to_vec());
    }

    pub fn contents(&self, uri: &str) -> Option<Vec<u8>> {
        self.state.lock().unwrap().files.get(&key(uri)).cloned()
    }

    pub fn downloads(&self) -> Vec<(String, String)> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileSystemHost for MemoryFileSystem {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get_info(&self, uri: &str) -> Result<HostFileInfo> {
        let state = self.state.lock().unwrap();
        let key = key(uri);

        if let Some(bytes) = state.files.get(&key) {
            return Ok(HostFileInfo {
                exists: true,
                size: bytes.len() as u64,
                is_directory: false,
                modification_time: MODIFIED_AT,
            });
        }

        if state.dirs.contains(&key) {
            let prefix = format!("{key}/");
            let size = state
                .files
                .iter()
                .filter(|(path, _)| path.starts_with(&prefix))
                .map(|(_, bytes)| bytes.len() as u64)
                .sum();
            return Ok(HostFileInfo {
                exists: true,
                size,
                is_directory: true,
                modification_time: MODIFIED_AT,
            });
        }

        Ok(HostFileInfo::missing())
    }

    async fn read_bytes(&self, uri: &str) -> Result<Vec<u8>> {
        self.contents(uri)
            .ok_or_else(|| FileSystemError::PathNotFound(uri.to_string()))
    }

    async fn write_bytes(&self, uri: &str, contents: &[u8]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let key = key(uri);
        if !state.parent_exists(&key) {
            return Err(FileSystemError::PathNotFound(parent(&key).to_string()));
        }
        state.files.insert(key, contents.to_vec());
        Ok(())
    }

    async fn copy(&self, from: &str, to: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let (from, to) = (key(from), key(to));
        if !state.parent_exists(&to) {
            return Err(FileSystemError::PathNotFound(parent(&to).to_string()));
        }

        if let Some(bytes) = state.files.get(&from).cloned() {
            state.files.insert(to, bytes);
            return Ok(());
        }

        if !state.dirs.contains(&from) {
            return Err(FileSystemError::PathNotFound(from));
        }

        let prefix = format!("{from}/");
        let files: Vec<(String, Vec<u8>)> = state
            .files
            .iter()
            .filter(|(path, _)| path.starts_with(&prefix))
            .map(|(path, bytes)| (format!("{to}/{}", &path[prefix.len()..]), bytes.clone()))
            .collect();
        let dirs: Vec<String> = state
            .dirs
            .iter()
            .filter(|path| path.starts_with(&prefix))
            .map(|path| format!("{to}/{}", &path[prefix.len()..]))
            .collect();

        state.dirs.insert(to);
        state.dirs.extend(dirs);
        state.files.extend(files);
        Ok(())
    }

    async fn move_entry(&self, from: &str, to: &str) -> Result<()> {
        self.copy(from, to).await?;
        self.delete(from, false).await
    }

    async fn delete(&self, uri: &str, idempotent: bool) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(FileSystemError::Io(std::io::Error::from(
                std::io::ErrorKind::PermissionDenied,
            )));
        }

        let mut state = self.state.lock().unwrap();
        let key = key(uri);

        if state.files.remove(&key).is_some() {
            return Ok(());
        }

        if state.dirs.remove(&key) {
            let prefix = format!("{key}/");
            state.files.retain(|path, _| !path.starts_with(&prefix));
            state.dirs.retain(|path| !path.starts_with(&prefix));
            return Ok(());
        }

        if idempotent {
            Ok(())
        } else {
            Err(FileSystemError::PathNotFound(uri.to_string()))
        }
    }

    async fn make_directory(&self, uri: &str, intermediates: bool) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        let key = key(uri);

        if intermediates {
            let mut current = key.as_str();
            while current != SCHEME_ROOT && current.len() > SCHEME_ROOT.len() {
                state.dirs.insert(current.to_string());
                current = parent(current);
            }
            return Ok(());
        }

        if !state.parent_exists(&key) {
            return Err(FileSystemError::PathNotFound(parent(&key).to_string()));
        }
        state.dirs.insert(key);
        Ok(())
    }

    async fn read_directory(&self, uri: &str) -> Result<Vec<String>> {
        let state = self.state.lock().unwrap();
        let key = key(uri);

        if state.files.contains_key(&key) {
            return Err(FileSystemError::NotADirectory(uri.to_string()));
        }
        if !state.dirs.contains(&key) {
            return Err(FileSystemError::PathNotFound(uri.to_string()));
        }

        let names: BTreeSet<String> = state
            .children(&key)
            .filter(|entry| parent(entry) == key)
            .filter_map(|entry| entry.rsplit('/').next().map(str::to_string))
            .collect();
        Ok(names.into_iter().collect())
    }

    async fn download(
        &self,
        url: &str,
        destination: &str,
        progress: Option<ProgressCallback>,
    ) -> Result<DownloadResult> {
        if url.contains("404") {
            return Err(FileSystemError::Download(format!("{url} 返回 404 Not Found")));
        }

        let body = format!("content of {url}").into_bytes();
        let total = body.len() as u64;
        if let Some(callback) = &progress {
            callback(DownloadProgress::new(total / 2, total));
            callback(DownloadProgress::new(total, total));
        }

        self.write_bytes(destination, &body).await?;
        self.downloads
            .lock()
            .unwrap()
            .push((url.to_string(), destination.to_string()));

        Ok(DownloadResult {
            uri: destination.to_string(),
            status: 200,
            bytes_written: total,
            mime_type: Some("text/plain".to_string()),
        })
    }

    fn document_directory(&self) -> Option<String> {
        self.with_roots.then(|| DOCUMENTS.to_string())
    }

    fn cache_directory(&self) -> Option<String> {
        self.with_roots.then(|| CACHE.to_string())
    }
}
