use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("dispatch called outside the store's owner thread")]
    WrongThread,

    #[error("pending action queue is full (capacity {capacity})")]
    QueueOverflow { capacity: usize },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("flag file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("flag file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("no surface registered for screen type {0:?}")]
    UnknownScreen(String),

    #[error("no surface registered for overlay type {0:?}")]
    UnknownOverlay(String),

    #[error("surface does not belong to this factory")]
    UnknownSurface,
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_convert_into_store_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: StoreError = StorageError::from(io).into();
        assert!(matches!(err, StoreError::Storage(StorageError::Io(_))));
        assert!(err.to_string().starts_with("storage error: flag file I/O failed"));
    }

    #[test]
    fn overflow_message_names_capacity() {
        let err = StoreError::QueueOverflow { capacity: 8 };
        assert_eq!(err.to_string(), "pending action queue is full (capacity 8)");
    }
}
