//! Local file access for attachments and downloads

use std::path::{Path, PathBuf};

use books_core::payload::Attachment;
use books_core::response::BinaryFile;
use books_core::{Error, Result};

/// Read a file into an attachment sent under `field`
///
/// The file is read once; the MIME type comes from its extension.
pub async fn attachment_from_path(field: &str, path: &Path) -> Result<Attachment> {
    let bytes = tokio::fs::read(path).await.map_err(|source| Error::Io {
        path: path.display().to_string(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());

    Ok(Attachment::new(field, file_name, bytes))
}

/// Write a download to disk and return where it landed
///
/// Without `output` the file goes to the temp directory, named after the
/// server's file name or `fallback`.
pub async fn save_file(
    file: &BinaryFile,
    output: Option<PathBuf>,
    fallback: &str,
) -> Result<PathBuf> {
    let path = match output {
        Some(path) => path,
        None => std::env::temp_dir().join(download_name(file, fallback)),
    };

    tokio::fs::write(&path, &file.bytes)
        .await
        .map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;

    Ok(path)
}

/// Last component of the server's file name, or `fallback`
///
/// Server names never pick a directory: separators, `..` and empty names
/// all fall back.
fn download_name(file: &BinaryFile, fallback: &str) -> String {
    file.file_name
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
