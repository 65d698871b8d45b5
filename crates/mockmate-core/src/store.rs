//! Session persistence.
//!
//! The durable representation is a single JSON file mapping session id to
//! session record. Every mutation rewrites the whole file; the rewrite goes
//! through a temp file in the same directory and an atomic rename, so a
//! failed write leaves the prior state intact. Last writer wins on the same
//! session id; there is no cross-process locking.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use uuid::Uuid;

use crate::error::StoreError;
use crate::model::Session;

/// Repository contract for session records. The engine only sees this
/// trait, so tests substitute [`MemorySessionStore`] and a future
/// implementation can swap in a real database without touching the engine.
pub trait SessionStore: Send + Sync {
    fn create(&self, session: &Session) -> Result<(), StoreError>;
    fn get(&self, id: Uuid) -> Result<Session, StoreError>;
    /// Whole-record replacement of an existing session.
    fn update(&self, session: &Session) -> Result<(), StoreError>;
    /// All stored sessions, for diagnostics.
    fn list(&self) -> Result<Vec<Session>, StoreError>;
}

/// Flat-file store backed by one JSON document.
pub struct FileSessionStore {
    path: PathBuf,
    // Serializes read-modify-write cycles so concurrent requests for
    // different sessions cannot clobber each other's entries.
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_all(&self) -> Result<HashMap<Uuid, Session>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_all(&self, sessions: &HashMap<Uuid, Session>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(sessions)?;
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        std::fs::create_dir_all(&dir)?;

        // Write-then-rename keeps the previous file intact if this write
        // dies partway.
        let tmp = tempfile::NamedTempFile::new_in(&dir)?;
        std::fs::write(tmp.path(), json)?;
        tmp.persist(&self.path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn create(&self, session: &Session) -> Result<(), StoreError> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut sessions = self.read_all()?;
        if sessions.contains_key(&session.id) {
            return Err(StoreError::AlreadyExists(session.id));
        }
        sessions.insert(session.id, session.clone());
        self.write_all(&sessions)
    }

    fn get(&self, id: Uuid) -> Result<Session, StoreError> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let sessions = self.read_all()?;
        sessions.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    fn update(&self, session: &Session) -> Result<(), StoreError> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut sessions = self.read_all()?;
        if !sessions.contains_key(&session.id) {
            return Err(StoreError::NotFound(session.id));
        }
        sessions.insert(session.id, session.clone());
        self.write_all(&sessions)
    }

    fn list(&self) -> Result<Vec<Session>, StoreError> {
        let _guard = self.lock.lock().expect("store lock poisoned");
        let mut sessions: Vec<Session> = self.read_all()?.into_values().collect();
        sessions.sort_by_key(|s| s.created_at);
        Ok(sessions)
    }
}

/// In-memory store for engine tests.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn create(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().expect("store lock poisoned");
        if sessions.contains_key(&session.id) {
            return Err(StoreError::AlreadyExists(session.id));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    fn get(&self, id: Uuid) -> Result<Session, StoreError> {
        self.sessions
            .lock()
            .expect("store lock poisoned")
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn update(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().expect("store lock poisoned");
        if !sessions.contains_key(&session.id) {
            return Err(StoreError::NotFound(session.id));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    fn list(&self) -> Result<Vec<Session>, StoreError> {
        let mut sessions: Vec<Session> = self
            .sessions
            .lock()
            .expect("store lock poisoned")
            .values()
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.created_at);
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Question, Round, SessionStatus};
    use chrono::Utc;

    fn session(name: &str) -> Session {
        Session {
            id: Uuid::new_v4(),
            user_name: name.into(),
            job_role: "SDE Intern".into(),
            interview_type: "mixed".into(),
            created_at: Utc::now(),
            questions: vec![Question {
                id: "beh-001".into(),
                round: Round::Behavioral,
                text: "Tell me about a conflict.".into(),
                difficulty: None,
                tags: vec![],
                sample_good_points: vec![],
            }],
            position: 0,
            answers: vec![],
            status: SessionStatus::InProgress,
        }
    }

    fn file_store() -> (tempfile::TempDir, FileSessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("sessions.json"));
        (dir, store)
    }

    #[test]
    fn create_then_get_roundtrips() {
        let (_dir, store) = file_store();
        let s = session("Ada");
        store.create(&s).unwrap();

        let loaded = store.get(s.id).unwrap();
        assert_eq!(loaded, s);
    }

    #[test]
    fn get_unknown_is_not_found() {
        let (_dir, store) = file_store();
        let err = store.get(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn create_twice_rejected() {
        let (_dir, store) = file_store();
        let s = session("Ada");
        store.create(&s).unwrap();
        let err = store.create(&s).unwrap_err();
        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[test]
    fn update_replaces_whole_record() {
        let (_dir, store) = file_store();
        let mut s = session("Ada");
        store.create(&s).unwrap();

        s.position = 1;
        s.status = SessionStatus::Completed;
        store.update(&s).unwrap();

        let loaded = store.get(s.id).unwrap();
        assert_eq!(loaded.position, 1);
        assert_eq!(loaded.status, SessionStatus::Completed);
    }

    #[test]
    fn update_unknown_is_not_found() {
        let (_dir, store) = file_store();
        let err = store.update(&session("Ghost")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn update_leaves_other_sessions_intact() {
        let (_dir, store) = file_store();
        let a = session("Ada");
        let mut b = session("Grace");
        store.create(&a).unwrap();
        store.create(&b).unwrap();

        b.position = 1;
        store.update(&b).unwrap();

        assert_eq!(store.get(a.id).unwrap(), a);
        assert_eq!(store.get(b.id).unwrap().position, 1);
        assert_eq!(store.list().unwrap().len(), 2);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let (_dir, store) = file_store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn corrupt_file_surfaces_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = FileSessionStore::new(&path);
        let err = store.list().unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn persists_across_store_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");
        let s = session("Ada");

        FileSessionStore::new(&path).create(&s).unwrap();
        let reloaded = FileSessionStore::new(&path).get(s.id).unwrap();
        assert_eq!(reloaded, s);
    }

    #[test]
    fn memory_store_behaves_like_file_store() {
        let store = MemorySessionStore::new();
        let mut s = session("Ada");
        store.create(&s).unwrap();
        assert!(matches!(
            store.create(&s).unwrap_err(),
            StoreError::AlreadyExists(_)
        ));

        s.position = 1;
        store.update(&s).unwrap();
        assert_eq!(store.get(s.id).unwrap().position, 1);
        assert!(matches!(
            store.get(Uuid::new_v4()).unwrap_err(),
            StoreError::NotFound(_)
        ));
    }
}
