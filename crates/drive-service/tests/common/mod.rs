use std::fs;
use std::path::{Path, PathBuf};

use drive_service::{DirectoryService, DriveConfig, to_slash};
use tempfile::TempDir;

/// A drive root inside a temporary directory, removed on drop.
pub struct TestDrive {
    _tmp: TempDir,
    root: PathBuf,
}

impl TestDrive {
    pub fn new() -> Self {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = tmp.path().join("drive");
        fs::create_dir(&root).expect("create drive root");
        Self { _tmp: tmp, root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn service(&self) -> DirectoryService {
        DirectoryService::new(DriveConfig::with_root(&self.root))
    }

    /// Slash-normalized path of `relative` under the root, as listings report it.
    pub fn path_of(&self, relative: &str) -> String {
        to_slash(&self.root.join(relative)).expect("temp paths are UTF-8")
    }

    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.root.join(relative)).expect("create test directory");
    }

    pub fn write(&self, relative: &str, contents: &[u8]) {
        fs::write(self.root.join(relative), contents).expect("write test file");
    }
}
