//! 构建期模块聚合。
//!
//! 扫描一个目录，把匹配的模块文件按名称汇总为一个集合：
//!
//! ```no_run
//! use devicefs::{DirectoryContext, load_json_modules};
//!
//! let context = DirectoryContext::json("locales/en").expect("locale directory should exist");
//! let translations = load_json_modules(&context);
//! // { "common": {...}, "errors": {...}, "settings": {...} }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// 模块名 -> 模块内容。
pub type ModuleCollection = BTreeMap<String, Value>;

const MODULE_EXTENSIONS: [&str; 4] = [".json", ".js", ".ts", ".tsx"];

#[derive(Debug, Error)]
pub enum ModuleLoaderError {
    #[error("模块不存在: {0}")]
    ModuleNotFound(String),

    #[error("无效的匹配模式: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 解析错误: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModuleLoaderError>;

/// 模块上下文：一组以 `./name.ext` 形式标识的模块。
pub trait ModuleContext {
    /// 上下文标识。
    fn id(&self) -> &str;

    /// 所有模块 key，形如 `./common.json`。
    fn keys(&self) -> Vec<String>;

    /// 解析 key 对应的文件路径。
    fn resolve(&self, key: &str) -> Result<PathBuf>;

    /// 加载 key 对应的模块内容。
    fn load(&self, key: &str) -> Result<Value>;
}

/// 基于目录扫描的模块上下文，key 在创建时确定。
#[derive(Debug, Clone)]
pub struct DirectoryContext {
    id: String,
    root: PathBuf,
    keys: Vec<String>,
}

impl DirectoryContext {
    /// 扫描 `root`，收集文件名匹配 `pattern`（glob）的文件。
    pub fn new(root: impl Into<PathBuf>, recursive: bool, pattern: &str) -> Result<Self> {
        let root = root.into();
        let pattern = glob::Pattern::new(pattern)?;
        let keys = scan_keys(&root, recursive, &pattern)?;

        debug!(root = %root.display(), count = keys.len(), "module context scanned");

        Ok(Self {
            id: root.display().to_string(),
            root,
            keys,
        })
    }

    /// 非递归地收集目录下的 `*.json`。
    pub fn json(root: impl Into<PathBuf>) -> Result<Self> {
        Self::new(root, false, "*.json")
    }
}

fn scan_keys(root: &Path, recursive: bool, pattern: &glob::Pattern) -> Result<Vec<String>> {
    let mut keys = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(if recursive { usize::MAX } else { 1 })
        .sort_by_file_name();

    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !pattern.matches(&entry.file_name().to_string_lossy()) {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect();
        keys.push(format!("./{}", segments.join("/")));
    }

    Ok(keys)
}

impl ModuleContext for DirectoryContext {
    fn id(&self) -> &str {
        &self.id
    }

    fn keys(&self) -> Vec<String> {
        self.keys.clone()
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        if !self.keys.iter().any(|known| known == key) {
            return Err(ModuleLoaderError::ModuleNotFound(key.to_string()));
        }
        Ok(self.root.join(key.trim_start_matches("./")))
    }

    fn load(&self, key: &str) -> Result<Value> {
        let path = self.resolve(key)?;
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// `./nested/common.json` -> `nested/common`
pub fn module_name(key: &str) -> String {
    let name = key.strip_prefix("./").unwrap_or(key);
    MODULE_EXTENSIONS
        .iter()
        .find_map(|ext| name.strip_suffix(*ext))
        .unwrap_or(name)
        .to_string()
}

/// 加载上下文中的全部模块，加载失败的模块会被跳过。
pub fn load_json_modules(context: &dyn ModuleContext) -> ModuleCollection {
    load_modules_with_transform(context, |name| name.to_string())
}

/// 加载全部模块，并用 `transform_name` 转换模块名。
pub fn load_modules_with_transform<F>(context: &dyn ModuleContext, transform_name: F) -> ModuleCollection
where
    F: Fn(&str) -> String,
{
    let mut modules = ModuleCollection::new();
    for key in context.keys() {
        match context.load(&key) {
            Ok(value) => {
                modules.insert(transform_name(&module_name(&key)), value);
            }
            Err(err) => {
                warn!(context = %context.id(), key = %key, error = %err, "skipping module");
            }
        }
    }
    modules
}

pub fn get_module_names(context: &dyn ModuleContext) -> Vec<String> {
    context.keys().iter().map(|key| module_name(key)).collect()
}
