use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::models::Conversation;

/// Name of the export payload inside a zip archive
const ARCHIVE_ENTRY: &str = "conversations.json";

/// Maximum export size: 256MB. Exports are large but bounded; anything
/// bigger is almost certainly not a conversation export.
const MAX_ARCHIVE_SIZE_BYTES: u64 = 256 * 1024 * 1024;

/// Malformed or unrecognized export input. Surfaced to the user as an
/// actionable message; the search engine is never invoked on failure.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unsupported file type: {path} (expected .json or .zip)")]
    UnsupportedFile { path: String },
    #[error("file too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },
    #[error("{entry} not found in zip archive")]
    MissingEntry { entry: &'static str },
    #[error("failed to read zip archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("export must contain a JSON array of conversations")]
    NotAnArray,
    #[error("invalid conversation format: first entry has no uuid field")]
    MissingUuid,
    #[error("failed to parse conversations: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Load a conversation collection from an export file.
///
/// Accepts either a bare `conversations.json` or a `.zip` export containing
/// one at the archive root. Extension matching is case-insensitive.
///
/// # Errors
///
/// Returns a [`FormatError`] if the file has an unsupported extension, is
/// larger than 256MB, the zip has no `conversations.json` entry, or the
/// payload fails validation (see [`parse_collection`]).
pub fn load_archive(path: &Path) -> Result<Vec<Conversation>, FormatError> {
    let extension =
        path.extension().and_then(|e| e.to_str()).map(|e| e.to_ascii_lowercase());

    let bytes = match extension.as_deref() {
        Some("zip") => {
            let file = open_validated(path)?;
            read_archive_entry(file)?
        }
        Some("json") => {
            let mut file = open_validated(path)?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            bytes
        }
        _ => {
            return Err(FormatError::UnsupportedFile { path: path.display().to_string() });
        }
    };

    parse_collection(&bytes)
}

/// Parse and validate a raw export payload into a collection.
///
/// Validation mirrors what a user can act on:
/// - the payload must be a JSON array
/// - a non-empty array's first element must carry a `uuid` field
///
/// Everything else is left to deserialization; absent optional fields become
/// defaults rather than errors.
pub fn parse_collection(bytes: &[u8]) -> Result<Vec<Conversation>, FormatError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)?;

    let entries = value.as_array().ok_or(FormatError::NotAnArray)?;
    if let Some(first) = entries.first()
        && first.get("uuid").is_none()
    {
        return Err(FormatError::MissingUuid);
    }

    Ok(serde_json::from_value(value)?)
}

/// Open a file and validate its size against [`MAX_ARCHIVE_SIZE_BYTES`].
/// Takes the size from the open handle to avoid a check/use race.
fn open_validated(path: &Path) -> Result<File, FormatError> {
    let file = File::open(path)?;
    let size = file.metadata()?.len();
    if size > MAX_ARCHIVE_SIZE_BYTES {
        return Err(FormatError::TooLarge { size, max: MAX_ARCHIVE_SIZE_BYTES });
    }
    Ok(file)
}

/// Pull the `conversations.json` entry out of a zip export
fn read_archive_entry(file: File) -> Result<Vec<u8>, FormatError> {
    let mut archive = zip::ZipArchive::new(file)?;
    let mut entry = match archive.by_name(ARCHIVE_ENTRY) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(FormatError::MissingEntry { entry: ARCHIVE_ENTRY });
        }
        Err(e) => return Err(FormatError::Archive(e)),
    };

    let mut bytes = Vec::with_capacity(entry.size() as usize);
    entry.read_to_end(&mut bytes)?;
    Ok(bytes)
}
