//! # Media Adapters
//!
//! Filesystem implementation of the [`domains::ports::FileReader`] port:
//! reads a selected file and hands back its contents as a `data:` URL for
//! previewing attachments before upload.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use domains::error::FileError;
use domains::models::SelectedFile;
use domains::ports::FileReader;

/// Reads the whole file into memory and base64-encodes it. The media type
/// is guessed from the file extension, falling back to an opaque octet
/// stream.
#[derive(Debug, Default)]
pub struct DataUrlReader;

impl DataUrlReader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileReader for DataUrlReader {
    async fn read_as_data_url(&self, file: &SelectedFile) -> Result<String, FileError> {
        let bytes = tokio::fs::read(file.path()).await?;
        let mime = mime_guess::from_path(file.path()).first_or(mime::APPLICATION_OCTET_STREAM);
        Ok(format!(
            "data:{};base64,{}",
            mime.essence_str(),
            STANDARD.encode(&bytes)
        ))
    }
}
