//! Table → active session registry
//!
//! Holds only non-closed sessions. Closing a session removes it and frees
//! every table it covered.

use shared::models::Session;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Registry {
    /// Active sessions in seating order
    sessions: Vec<Session>,
    /// table_id → session_id
    by_table: HashMap<String, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn get(&self, session_id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    pub fn session_for_table(&self, table_id: &str) -> Option<&Session> {
        self.by_table
            .get(table_id)
            .and_then(|session_id| self.get(session_id))
    }

    /// Distinct active sessions claiming any of `table_ids`, in seating order
    pub fn claims(&self, table_ids: &[String]) -> Vec<&Session> {
        self.sessions
            .iter()
            .filter(|s| table_ids.iter().any(|t| s.covers(t)))
            .collect()
    }

    /// Register a new active session
    ///
    /// Callers check [`Registry::claims`] first; every table it covers is
    /// indexed to it.
    pub fn insert(&mut self, session: Session) {
        for table_id in &session.table_ids {
            self.by_table.insert(table_id.clone(), session.id.clone());
        }
        self.sessions.push(session);
    }

    /// Replace a stored session; a closed session is released instead
    pub fn update(&mut self, session: Session) {
        if !session.is_active() {
            self.release(&session.id);
            return;
        }
        if let Some(slot) = self.sessions.iter_mut().find(|s| s.id == session.id) {
            *slot = session;
        }
    }

    /// Drop a session and free its tables
    pub fn release(&mut self, session_id: &str) -> Option<Session> {
        let index = self.sessions.iter().position(|s| s.id == session_id)?;
        let session = self.sessions.remove(index);
        self.by_table.retain(|_, owner| owner != session_id);
        Some(session)
    }
}
