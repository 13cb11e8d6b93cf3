//! 驱动器条目记录与格式化工具。

use std::fs::Metadata;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

const KB: u64 = 1 << 10;
const MB: u64 = 1 << 20;
const GB: u64 = 1 << 30;
const TB: u64 = 1 << 40;

/// 文件/目录条目。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    /// 名称。
    pub name: String,
    /// 以 `/` 分隔的完整路径（包含根目录前缀）。
    pub path: String,
    /// 是否为目录。
    pub is_folder: bool,
    /// 可读的大小字符串。
    pub size: String,
    /// 最后修改时间。
    pub last_modified: String,
    /// 子条目，仅在树形列表中填充。
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<File>,
}

impl File {
    /// 根据路径和元数据构造条目。
    pub(crate) fn from_metadata(path: String, name: &str, metadata: &Metadata) -> Result<Self> {
        let modified: DateTime<Utc> = metadata.modified()?.into();

        Ok(Self {
            name: name.to_string(),
            path,
            is_folder: metadata.is_dir(),
            size: format_size(metadata.len()),
            last_modified: modified.to_string(),
            items: Vec::new(),
        })
    }
}

/// 将字节数格式化为 bytes/KB/MB/GB/TB 字符串。
pub fn format_size(size: u64) -> String {
    let scaled = |unit: u64| size as f64 / unit as f64;

    match size {
        s if s >= TB => format!("{:.2} TB", scaled(TB)),
        s if s >= GB => format!("{:.2} GB", scaled(GB)),
        s if s >= MB => format!("{:.2} MB", scaled(MB)),
        s if s >= KB => format!("{:.2} KB", scaled(KB)),
        s => format!("{s} bytes"),
    }
}

/// 将平台路径分隔符统一为 `/`；路径不是合法 UTF-8 时返回 `None`。
pub fn to_slash(path: &Path) -> Option<String> {
    let raw = path.to_str()?;
    if std::path::MAIN_SEPARATOR == '/' {
        Some(raw.to_owned())
    } else {
        Some(raw.replace(std::path::MAIN_SEPARATOR, "/"))
    }
}
