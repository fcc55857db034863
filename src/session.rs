//! Session Persistence
//!
//! The bearer token handed out by login/register, kept between runs.
//! A session lives for a fixed number of days (7 by default) or until
//! logout; there is no refresh.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;

/// Default session lifetime in days
pub const DEFAULT_LIFETIME_DAYS: i64 = 7;

/// Accepted session lifetimes in days
pub const LIFETIME_DAYS_RANGE: std::ops::RangeInclusive<i64> = 1..=3650;

/// A persisted login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub token_type: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Start a session now that lasts `lifetime_days`.
    ///
    /// A lifetime past the end of the representable calendar is capped there.
    pub fn new(token: impl Into<String>, token_type: impl Into<String>, lifetime_days: i64) -> Self {
        let issued_at = Utc::now();
        let expires_at = Duration::try_days(lifetime_days)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            token: token.into(),
            token_type: token_type.into(),
            issued_at,
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Value for the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Errors from session storage
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt session file {path:?}: {error}")]
    Corrupt { path: PathBuf, error: String },
}

/// Where the current session is kept
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The current session. Absent, expired and unreadable sessions all read
    /// as `None`.
    async fn load(&self) -> Result<Option<Session>, SessionError>;

    async fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Forget the session. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), SessionError>;
}

/// Session kept in a JSON file
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };

        let session: Session = match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Corrupt session file, removing");
                self.clear().await?;
                return Ok(None);
            }
        };

        if session.is_expired() {
            tracing::info!(expired_at = %session.expires_at, "Stored session expired, removing");
            self.clear().await?;
            return Ok(None);
        }

        Ok(Some(session))
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let json = serde_json::to_string_pretty(session).map_err(|e| SessionError::Corrupt {
            path: self.path.clone(),
            error: e.to_string(),
        })?;

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;

        // `mode` only applies on creation; tighten a file left by an older run
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| self.io_error(e))?;
        }

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;

        tracing::debug!(path = ?self.path, expires_at = %session.expires_at, "Session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::debug!(path = ?self.path, "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Session kept in memory only
#[derive(Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a session
    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, SessionError> {
        let mut guard = self.session.write().await;
        if guard.as_ref().is_some_and(Session::is_expired) {
            *guard = None;
        }
        Ok(guard.clone())
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.session.write().await = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn expired_session() -> Session {
        let mut session = Session::new("old-token", "bearer", DEFAULT_LIFETIME_DAYS);
        session.issued_at -= Duration::days(8);
        session.expires_at -= Duration::days(8);
        session
    }

    #[test]
    fn test_session_lifetime() {
        let session = Session::new("abc", "bearer", DEFAULT_LIFETIME_DAYS);
        assert_eq!(session.expires_at - session.issued_at, Duration::days(7));
        assert!(!session.is_expired());
        assert!(session.is_expired_at(session.issued_at + Duration::days(7)));
        assert_eq!(session.authorization(), "Bearer abc");
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));

        assert!(store.load().await.unwrap().is_none());

        let session = Session::new("abc", "bearer", DEFAULT_LIFETIME_DAYS);
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_file_store_expired_is_removed() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        store.save(&expired_session()).await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_session_lifetime_out_of_range_is_capped() {
        let session = Session::new("abc", "bearer", i64::MAX);
        assert_eq!(session.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!session.is_expired());

        let session = Session::new("abc", "bearer", 3650);
        assert_eq!(session.expires_at - session.issued_at, Duration::days(3650));
    }

    #[tokio::test]
    async fn test_file_store_corrupt_is_removed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{garbage").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(store.load().await.unwrap().is_none());
        assert!(!path.exists());

        // A fresh login works afterwards
        let session = Session::new("abc", "bearer", DEFAULT_LIFETIME_DAYS);
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_clear_twice() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.clear().await.unwrap();
        store.clear().await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_store_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store
            .save(&Session::new("abc", "bearer", DEFAULT_LIFETIME_DAYS))
            .await
            .unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_file_store_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileSessionStore::new(&path);
        let session = Session::new("abc", "bearer", DEFAULT_LIFETIME_DAYS);
        store.save(&session).await.unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().await.unwrap(), Some(session));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemorySessionStore::new();
        assert!(store.load().await.unwrap().is_none());

        let session = Session::new("abc", "bearer", DEFAULT_LIFETIME_DAYS);
        store.save(&session).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(session));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_memory_store_expired() {
        let store = MemorySessionStore::with_session(expired_session());
        assert!(store.load().await.unwrap().is_none());
    }
}
