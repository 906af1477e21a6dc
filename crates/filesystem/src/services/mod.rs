//! 按关注点拆分的文件服务。
//!
//! 每个函数只接收宿主引用，本身不持有状态。

pub mod cache;
pub mod directory;
pub mod download;
pub mod encoding;
pub mod info;
pub mod manager;
pub mod path;
pub mod reader;
pub mod writer;
