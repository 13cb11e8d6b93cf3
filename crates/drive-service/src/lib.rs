//! Drive Service - 驱动器目录服务。
//!
//! 在单一配置的根目录下提供目录浏览、树形列表、目录创建与条目删除能力，
//! 作为文件浏览 API 或界面的后端逻辑。

pub mod config;
pub mod error;
pub mod file;
pub mod service;

pub use config::{DEFAULT_ROOT, DriveConfig};
pub use error::{DriveError, Result};
pub use file::{File, format_size, to_slash};
pub use service::DirectoryService;
