//! 驱动器目录服务。
//!
//! 在配置的根目录下提供目录浏览、树形列表、创建目录与删除条目等能力。

use std::collections::HashMap;
use std::fs::DirBuilder;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::DriveConfig;
use crate::error::{DriveError, Result};
use crate::file::{File, to_slash};

/// 目录服务，所有操作都限定在配置的根目录内。
#[derive(Debug, Clone)]
pub struct DirectoryService {
    config: DriveConfig,
}

impl DirectoryService {
    /// 创建新的目录服务实例，不做任何 IO。
    pub fn new(config: DriveConfig) -> Self {
        Self { config }
    }

    /// 配置的根目录。
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    /// 列出根目录下的一级子目录（不包含根目录下的文件）。
    pub fn list_root_folders(&self) -> Result<Vec<File>> {
        debug!(root = %self.root().display(), "Listing root folders");

        let mut folders = Vec::new();
        for entry in shallow_walk(self.root()) {
            let entry = entry?;
            if !entry.file_type().is_dir() {
                continue;
            }
            if let Some(folder) = entry_to_file(&entry)? {
                folders.push(folder);
            }
        }

        Ok(folders)
    }

    /// 列出指定目录的直接子条目（文件与目录），不包含目录自身。
    pub fn list_folder_items(&self, folder_path: impl AsRef<Path>) -> Result<Vec<File>> {
        let folder_path = folder_path.as_ref();
        self.ensure_within_root(folder_path)?;

        debug!(path = %folder_path.display(), "Listing folder items");

        let mut items = Vec::new();
        for entry in shallow_walk(folder_path) {
            if let Some(item) = entry_to_file(&entry?)? {
                items.push(item);
            }
        }

        Ok(items)
    }

    /// 构建根目录的树形列表。
    ///
    /// 每个目录（任意深度，包括根目录本身）都是结果中的一条顶层记录，
    /// 文件挂在其父目录记录的 `items` 下。目录之间不嵌套。
    pub fn build_root_tree(&self) -> Result<Vec<File>> {
        debug!(root = %self.root().display(), "Building root tree");

        let mut folders: Vec<File> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut files: Vec<(Option<String>, File)> = Vec::new();

        for entry in WalkDir::new(self.root()).sort_by_file_name() {
            let entry = entry?;
            let Some(record) = entry_to_file(&entry)? else {
                continue;
            };

            if record.is_folder {
                if let Some(key) = path_key(entry.path()) {
                    index.insert(key, folders.len());
                    folders.push(record);
                }
            } else {
                let parent = entry.path().parent().and_then(path_key);
                files.push((parent, record));
            }
        }

        for (parent, file) in files {
            match parent.and_then(|key| index.get(&key).copied()) {
                Some(slot) => folders[slot].items.push(file),
                None => debug!(path = %file.path, "Dropping file without a recorded parent folder"),
            }
        }

        Ok(folders)
    }

    /// 在根目录下创建单级目录。
    pub fn create_folder(&self, name: &str) -> Result<()> {
        validate_folder_name(name)?;

        let path = self.root().join(name);
        let mut builder = DirBuilder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(self.config.folder_mode);
        }
        builder.create(&path)?;

        info!(path = %path.display(), "Created folder");
        Ok(())
    }

    /// 删除之前列表中出现过的条目。
    ///
    /// 只在 `known_files` 及其一级 `items` 中查找路径完全相同的记录。
    /// 目录递归删除，文件单独删除；目标必须位于根目录内部。
    pub fn delete_item(&self, known_files: &[File], path: &str) -> Result<()> {
        let target = find_entry(known_files, path)
            .ok_or_else(|| DriveError::NotFound(path.to_string()))?;
        let resolved = self.resolve_delete_target(Path::new(path))?;

        if target.is_folder {
            std::fs::remove_dir_all(&resolved)?;
        } else {
            std::fs::remove_file(&resolved)?;
        }

        info!(path, is_folder = target.is_folder, "Deleted drive item");
        Ok(())
    }

    /// 检查路径是否为根目录或位于根目录内。
    fn ensure_within_root(&self, path: &Path) -> Result<()> {
        let root = self.root().canonicalize()?;
        let resolved = path.canonicalize()?;

        if resolved.starts_with(&root) {
            Ok(())
        } else {
            warn!(path = %path.display(), "Rejected path outside drive root");
            Err(DriveError::OutsideRoot(path.display().to_string()))
        }
    }

    /// 解析删除目标：父目录规范化后拼接条目名，因此符号链接本身被删除而不是其指向。
    fn resolve_delete_target(&self, path: &Path) -> Result<PathBuf> {
        let outside = || {
            warn!(path = %path.display(), "Rejected delete target outside drive root");
            DriveError::OutsideRoot(path.display().to_string())
        };

        let name = path.file_name().ok_or_else(outside)?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let root = self.root().canonicalize()?;
        let resolved = parent.canonicalize()?.join(name);

        if resolved != root && resolved.starts_with(&root) {
            Ok(resolved)
        } else {
            Err(outside())
        }
    }
}

/// 深度为一的遍历，按名称排序，不包含起点本身。
fn shallow_walk(path: &Path) -> WalkDir {
    WalkDir::new(path)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
}

/// 将遍历条目转换为记录；名称不是合法 UTF-8 的条目被跳过。
fn entry_to_file(entry: &DirEntry) -> Result<Option<File>> {
    let (Some(path), Some(name)) = (to_slash(entry.path()), entry.file_name().to_str()) else {
        warn!(path = %entry.path().display(), "Skipping entry with a non UTF-8 name");
        return Ok(None);
    };

    let metadata = entry.metadata()?;
    File::from_metadata(path, name, &metadata).map(Some)
}

/// 目录路径的查找键，去掉 `.` 段与末尾分隔符。
fn path_key(path: &Path) -> Option<String> {
    to_slash(&path.components().collect::<PathBuf>())
}

fn find_entry<'a>(files: &'a [File], path: &str) -> Option<&'a File> {
    files.iter().find_map(|file| {
        if file.path == path {
            Some(file)
        } else {
            file.items.iter().find(|item| item.path == path)
        }
    })
}

fn validate_folder_name(name: &str) -> Result<()> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );

    if !single_normal || name.contains(['/', '\\', '\0']) {
        return Err(DriveError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn record(path: &str, is_folder: bool, items: Vec<File>) -> File {
        File {
            name: path.rsplit('/').next().unwrap_or_default().to_string(),
            path: path.to_string(),
            is_folder,
            size: "0 bytes".to_string(),
            last_modified: String::new(),
            items,
        }
    }

    #[test]
    fn folder_names_must_be_single_segments() {
        for name in ["new", "with space", "report.v2", ".hidden"] {
            assert!(validate_folder_name(name).is_ok(), "{name} should be valid");
        }

        for name in ["", ".", "..", "a/b", "../escape", "/abs", "a\\b", "nul\0"] {
            let err = validate_folder_name(name).expect_err("name should be rejected");
            assert!(matches!(err, DriveError::InvalidName(_)), "{name}: {err}");
        }
    }

    #[test]
    fn find_entry_searches_two_levels_only() {
        let deep = record("./drive/a/b/c.txt", false, Vec::new());
        let nested = record("./drive/a/b", true, vec![deep]);
        let files = vec![record("./drive/a", true, vec![nested])];

        assert!(find_entry(&files, "./drive/a").is_some());
        assert!(find_entry(&files, "./drive/a/b").is_some());
        assert!(find_entry(&files, "./drive/a/b/c.txt").is_none());
        assert!(find_entry(&files, "./drive/missing").is_none());
    }

    #[test]
    fn path_key_normalizes_trailing_separators() {
        assert_eq!(path_key(Path::new("./drive/")).as_deref(), Some("./drive"));
        assert_eq!(
            path_key(Path::new("/srv/drive/./a")).as_deref(),
            Some("/srv/drive/a")
        );
    }
}
