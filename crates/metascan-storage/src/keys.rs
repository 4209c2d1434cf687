//! Shared key validation for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Reject keys that could escape the storage area.
pub fn validate_storage_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if storage_key.contains("..")
        || storage_key.contains('/')
        || storage_key.contains('\\')
        || storage_key.contains('\0')
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_accepted() {
        assert!(validate_storage_key("IMG_0001_report.pdf").is_ok());
        assert!(validate_storage_key("3f2a_photo.jpeg").is_ok());
    }

    #[test]
    fn test_traversal_rejected() {
        for key in ["", "../etc/passwd", "a/b.pdf", "..", "a\\b", "x\0y", "/etc/passwd"] {
            assert!(
                matches!(validate_storage_key(key), Err(StorageError::InvalidKey(_))),
                "expected {:?} to be rejected",
                key
            );
        }
    }
}
