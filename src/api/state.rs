//! Application state for the Coverage Engine API.
//!
//! This module defines the shared application state available to all
//! request handlers: the loaded configuration and the per-session rosters.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use uuid::Uuid;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::Roster;

type SharedRoster = Arc<Mutex<Roster>>;

/// Rosters keyed by session.
///
/// Each session owns exactly one roster behind its own lock, so mutations of
/// one session are serialized while different sessions never contend.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SharedRoster>>,
}

impl SessionStore {
    /// Creates a session with an empty roster and returns its id.
    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, Arc::new(Mutex::new(Roster::new())));
        id
    }

    /// Discards a session and its roster.
    pub fn remove(&self, id: Uuid) -> EngineResult<()> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| EngineError::SessionNotFound { id: id.to_string() })
    }

    /// Returns the number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if there are no live sessions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Runs `f` with exclusive access to a session's roster.
    pub fn with_roster<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Roster) -> EngineResult<T>,
    ) -> EngineResult<T> {
        let roster = self
            .sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::SessionNotFound { id: id.to_string() })?;

        let mut guard = roster.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

/// Shared application state.
///
/// Contains the loaded calculator configuration and the session store.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    sessions: Arc<SessionStore>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
            sessions: Arc::new(SessionStore::default()),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the session store.
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountingBasis, ClinicianEntry, ClinicianType};

    fn entry() -> ClinicianEntry {
        ClinicianEntry {
            clinician_type: ClinicianType::Vm,
            day_shifts: 16,
            night_shifts: 6,
            basis: AccountingBasis::RotationBased { rotations: 1 },
        }
    }

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = SessionStore::default();
        let first = store.create();
        let second = store.create();

        store
            .with_roster(first, |roster| {
                roster.add(entry());
                Ok(())
            })
            .unwrap();

        let first_len = store.with_roster(first, |r| Ok(r.len())).unwrap();
        let second_len = store.with_roster(second, |r| Ok(r.len())).unwrap();
        assert_eq!(first_len, 1);
        assert_eq!(second_len, 0);
    }

    #[test]
    fn test_unknown_session_is_not_found() {
        let store = SessionStore::default();
        let result = store.with_roster(Uuid::new_v4(), |r| Ok(r.len()));
        assert!(matches!(result, Err(EngineError::SessionNotFound { .. })));
    }

    #[test]
    fn test_remove_session() {
        let store = SessionStore::default();
        let id = store.create();
        assert_eq!(store.len(), 1);

        store.remove(id).unwrap();
        assert!(store.is_empty());
        assert!(matches!(
            store.remove(id),
            Err(EngineError::SessionNotFound { .. })
        ));
    }

    #[test]
    fn test_failed_mutation_leaves_roster_unchanged() {
        let store = SessionStore::default();
        let id = store.create();

        let result = store.with_roster(id, |roster| roster.remove_last());
        assert!(matches!(result, Err(EngineError::EmptyRoster)));
        assert_eq!(store.with_roster(id, |r| Ok(r.len())).unwrap(), 0);
    }
}
