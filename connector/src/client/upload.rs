//! Multipart payloads for firmware uploads.

use std::io;
use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};

use crate::error::ConnectorError;

/// Form field name the controller expects the image under.
pub const UPLOAD_FIELD_NAME: &str = "data";

/// Content type declared on the uploaded part.
pub const UPLOAD_PART_CONTENT_TYPE: &str = "multipart/form-data";

/// A local file read fully into memory, ready to be sent as a multipart form.
///
/// The whole file is buffered before the request starts; there is no streaming.
#[derive(Debug)]
pub struct FirmwareUpload {
    file_name: String,
    bytes: Vec<u8>,
}

impl FirmwareUpload {
    /// Reads `path` into memory.
    ///
    /// ## Errors
    ///
    /// Returns [`ConnectorError::FileAccess`] if the file is missing, cannot be
    /// read, or the path has no file name component.
    pub async fn read(path: impl AsRef<Path>) -> Result<Self, ConnectorError> {
        let path = path.as_ref();
        let file_access = |source: io::Error| ConnectorError::FileAccess {
            path: PathBuf::from(path),
            source,
        };

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                file_access(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "path has no file name",
                ))
            })?;

        let bytes = tokio::fs::read(path).await.map_err(file_access)?;

        Ok(Self { file_name, bytes })
    }

    /// The base name sent as the part's filename.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Size of the buffered file in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the file was empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes the upload and builds a single-part form.
    pub fn into_form(self) -> Result<Form, ConnectorError> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(UPLOAD_PART_CONTENT_TYPE)?;

        Ok(Form::new().part(UPLOAD_FIELD_NAME, part))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[tokio::test]
    async fn test_read_existing_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"firmware-bytes").unwrap();

        let upload = FirmwareUpload::read(file.path()).await.unwrap();
        assert_eq!(upload.len(), 14);
        assert!(!upload.is_empty());
        assert_eq!(
            upload.file_name(),
            file.path().file_name().unwrap().to_string_lossy()
        );
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.bin");

        let result = FirmwareUpload::read(&missing).await;
        match result {
            Err(ConnectorError::FileAccess { path, source }) => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("expected FileAccess, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_path_without_file_name() {
        let result = FirmwareUpload::read("/").await;
        assert!(matches!(
            result,
            Err(ConnectorError::FileAccess { ref source, .. })
                if source.kind() == io::ErrorKind::InvalidInput
        ));
    }

    #[tokio::test]
    async fn test_read_directory_fails() {
        let dir = TempDir::new().unwrap();

        let result = FirmwareUpload::read(dir.path()).await;
        assert!(matches!(result, Err(ConnectorError::FileAccess { .. })));
    }

    #[tokio::test]
    async fn test_into_form() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"abc").unwrap();

        let upload = FirmwareUpload::read(file.path()).await.unwrap();
        let form = upload.into_form().unwrap();
        assert!(!form.boundary().is_empty());
    }
}
