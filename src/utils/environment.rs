use std::env;
use std::path::PathBuf;

/// Environment variable overriding where the collection store lives
pub const DATA_DIR_ENV: &str = "CHAT_ARCHIVE_DATA_DIR";

/// Resolve the data directory for the collection store.
///
/// `$CHAT_ARCHIVE_DATA_DIR` wins when set (tests and scripted use); otherwise
/// the platform data directory with an application subdirectory. `None` when
/// neither can be resolved.
pub fn data_dir() -> Option<PathBuf> {
    if let Ok(dir) = env::var(DATA_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::data_local_dir().map(|base| base.join("chat-archive-explorer"))
}
