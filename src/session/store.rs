use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use super::model::{DEFAULT_MESSAGE_LIMIT, Session};
use crate::fs::atomic_write;
use crate::paths;

/// Tag written into every session record.
pub const RECORD_FORMAT: &str = "texlate-session";

/// Current version of the session record layout.
pub const RECORD_VERSION: u32 = 1;

/// Errors reading or writing a session record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access session record {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode session record {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode session {id}: {source}")]
    Encode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported session record {path}: found {found}")]
    UnsupportedFormat { path: PathBuf, found: String },

    #[error("Invalid session name '{name}': use a plain name without path separators")]
    InvalidName { name: String },
}

#[derive(Serialize)]
struct RecordRef<'a> {
    format: &'static str,
    version: u32,
    session: &'a Session,
}

#[derive(Deserialize)]
struct Record {
    format: String,
    version: u32,
    session: Session,
}

/// Durable, name-indexed storage of sessions, one JSON record per name.
///
/// Concurrent writers of the same name are not coordinated: the last write wins.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
    default_role: String,
}

impl SessionStore {
    /// Opens a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: PathBuf, default_role: impl Into<String>) -> Result<Self, StoreError> {
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            default_role: default_role.into(),
        })
    }

    /// Opens the store under the user data directory.
    pub fn open_default(default_role: impl Into<String>) -> Result<Self, StoreError> {
        Self::new(paths::sessions_dir(), default_role)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the record for `name`, which must be a single plain path component.
    pub fn record_path(&self, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.json")))
    }

    /// Whether a record for `name` has been written.
    pub fn contains(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.record_path(name)?.exists())
    }

    /// Loads the session called `name`, or creates a fresh one if none is stored.
    ///
    /// A missing record is not an error; an unreadable or undecodable one is.
    pub fn get(&self, name: &str) -> Result<Session, StoreError> {
        let path = self.record_path(name)?;

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Session::new(name, DEFAULT_MESSAGE_LIMIT, &self.default_role));
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let record: Record = match serde_json::from_str(&contents) {
            Ok(record) => record,
            Err(source) => return Err(StoreError::Decode { path, source }),
        };

        if record.format != RECORD_FORMAT || record.version != RECORD_VERSION {
            return Err(StoreError::UnsupportedFormat {
                path,
                found: format!("{} v{}", record.format, record.version),
            });
        }

        Ok(record.session)
    }

    /// Overwrites the record for `session.id()` with the full session.
    pub fn writeback(&self, session: &Session) -> Result<(), StoreError> {
        let path = self.record_path(session.id())?;
        let record = RecordRef {
            format: RECORD_FORMAT,
            version: RECORD_VERSION,
            session,
        };

        let contents =
            serde_json::to_string_pretty(&record).map_err(|source| StoreError::Encode {
                id: session.id().to_string(),
                source,
            })?;

        atomic_write(&path, &contents).map_err(|source| StoreError::Io { path, source })
    }
}

fn validate_name(name: &str) -> Result<(), StoreError> {
    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(part)), None) if part == name
    );
    if single_normal && !name.contains(['/', '\\']) {
        Ok(())
    } else {
        Err(StoreError::InvalidName {
            name: name.to_string(),
        })
    }
}
