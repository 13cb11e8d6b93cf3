use thiserror::Error;

/// 驱动器操作错误类型。
#[derive(Debug, Error)]
pub enum DriveError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("文件或目录未找到: {0}")]
    NotFound(String),

    #[error("路径超出驱动器根目录: {0}")]
    OutsideRoot(String),

    #[error("无效的目录名称: {0}")]
    InvalidName(String),
}

impl From<walkdir::Error> for DriveError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(|p| p.display().to_string());
        match err.into_io_error() {
            Some(io) => DriveError::Io(io),
            None => DriveError::Io(std::io::Error::other(format!(
                "filesystem loop detected at {}",
                path.unwrap_or_default()
            ))),
        }
    }
}

impl DriveError {
    /// 若为 IO 错误，返回其错误种类。
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            DriveError::Io(e) => Some(e.kind()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DriveError>;

#[cfg(test)]
mod tests {
    use super::DriveError;

    #[test]
    fn io_kind_is_exposed_for_io_errors_only() {
        let err = DriveError::from(std::io::Error::from(std::io::ErrorKind::AlreadyExists));
        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::AlreadyExists));

        let err = DriveError::NotFound("./drive/missing".to_string());
        assert_eq!(err.io_kind(), None);
        assert_eq!(err.to_string(), "文件或目录未找到: ./drive/missing");
    }
}
