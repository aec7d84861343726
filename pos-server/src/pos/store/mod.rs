//! PosStore - table sessions, checks and line mutations
//!
//! # Mutation Flow
//!
//! ```text
//! add_line / update_line / remove_line / clear_lines / update_check
//!     ├─ 1. Resolve Arc<Mutex<Check>> (DashMap, shard lock released)
//!     ├─ 2. Lock the check (one writer per check)
//!     ├─ 3. Reject closed checks, validate the payload
//!     ├─ 4. Clone → apply → revision += 1
//!     ├─ 5. Persist check (+ session) in one redb transaction
//!     ├─ 6. Publish the new check under the same lock
//!     └─ 7. Mirror session changes into the registry
//! ```
//!
//! Closing a check evicts it from memory; closed checks are read back from
//! storage.
//!
//! # Lock Order
//!
//! check mutex → registry lock. Code that holds the registry lock never
//! waits on a check mutex; opening a session only locks a fresh, unshared
//! entry.

use super::check;
use super::error::{PosError, PosResult};
use super::floor_plan::FloorPlan;
use super::registry::Registry;
use super::storage::{PosStorage, StoredSession};
use super::view::derive_table_blocks;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock, RwLockWriteGuard};
use shared::models::{Check, LineMutation, MenuItem, ServiceStatus, Session, Table, TableBlock};
use shared::request::{AddLineInput, BootstrapResponse, CheckPatch, LinePatch, SessionOpened};
use shared::util::{new_id, now_millis};
use std::collections::HashSet;
use std::sync::Arc;

type CheckHandle = Arc<Mutex<Check>>;

/// How the active sessions relate to a requested table set
enum Claim {
    Free,
    Join(String),
    Conflict(Vec<String>),
}

pub struct PosStore {
    floor: FloorPlan,
    registry: RwLock<Registry>,
    checks: DashMap<String, CheckHandle>,
    storage: PosStorage,
}

impl std::fmt::Debug for PosStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PosStore")
            .field("tables", &self.floor.tables.len())
            .field("active_sessions", &self.registry.read().len())
            .field("checks", &self.checks.len())
            .finish()
    }
}

impl PosStore {
    /// Build a store over `storage`, restoring every active session
    pub fn open(floor: FloorPlan, storage: PosStorage) -> PosResult<Self> {
        let store = Self {
            floor,
            registry: RwLock::new(Registry::new()),
            checks: DashMap::new(),
            storage,
        };
        let restored = store.storage.load_active()?;
        let count = restored.len();
        {
            let mut registry = store.registry.write();
            for StoredSession { session, check } in restored {
                store
                    .checks
                    .insert(check.id.clone(), Arc::new(Mutex::new(check)));
                registry.insert(session);
            }
        }
        if count > 0 {
            tracing::info!(sessions = count, "Restored active sessions");
        }
        Ok(store)
    }

    /// Store over a fresh in-memory database
    pub fn in_memory(floor: FloorPlan) -> PosResult<Self> {
        Self::open(floor, PosStorage::open_in_memory()?)
    }

    // ========== Reference data ==========

    pub fn tables(&self) -> &[Table] {
        &self.floor.tables
    }

    pub fn menu(&self) -> &[MenuItem] {
        &self.floor.menu
    }

    /// Trim, reject blanks and unknown ids, collapse duplicates (first wins)
    fn normalize_tables(&self, table_ids: &[String]) -> PosResult<Vec<String>> {
        if table_ids.is_empty() {
            return Err(PosError::invalid("at least one table is required"));
        }
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(table_ids.len());
        for raw in table_ids {
            let id = raw.trim();
            if id.is_empty() {
                return Err(PosError::invalid("table id must not be blank"));
            }
            if self.floor.table(id).is_none() {
                return Err(PosError::TableNotFound(id.to_string()));
            }
            if seen.insert(id.to_string()) {
                normalized.push(id.to_string());
            }
        }
        Ok(normalized)
    }

    // ========== Sessions ==========

    /// Return the check of the session covering `table_ids`, opening one if
    /// none of the tables is claimed
    pub fn ensure_check_for_tables(&self, table_ids: &[String], actor: &str) -> PosResult<Check> {
        let table_ids = self.normalize_tables(table_ids)?;

        loop {
            let existing = {
                let registry = self.registry.write();
                let claim = {
                    let claims = registry.claims(&table_ids);
                    match claims.as_slice() {
                        [] => Claim::Free,
                        [session] if table_ids.iter().all(|t| session.covers(t)) => {
                            Claim::Join(session.check_id.clone())
                        }
                        sessions => Claim::Conflict(sessions.iter().map(|s| s.id.clone()).collect()),
                    }
                };
                match claim {
                    Claim::Free => {
                        let (session, check) =
                            self.open_session(registry, table_ids.clone(), 0, None, actor)?;
                        tracing::info!(
                            target: "audit",
                            session_id = %session.id,
                            check_id = %check.id,
                            tables = ?session.table_ids,
                            actor,
                            "Check opened for tables"
                        );
                        return Ok(check);
                    }
                    Claim::Join(check_id) => check_id,
                    Claim::Conflict(sessions) => {
                        return Err(PosError::TableConflict {
                            requested: table_ids,
                            sessions,
                        });
                    }
                }
            };

            // Registry released; the session may close before we get the check
            let handle = self.checks.get(&existing).map(|e| Arc::clone(e.value()));
            let Some(handle) = handle else {
                std::thread::yield_now();
                continue;
            };
            let current = handle.lock();
            if !current.is_closed() {
                return Ok(current.clone());
            }
            drop(current);
            std::thread::yield_now();
        }
    }

    /// Seat a party at exactly one free table
    pub fn create_session(
        &self,
        table_id: &str,
        party_size: u32,
        reservation_id: Option<String>,
        actor: &str,
    ) -> PosResult<SessionOpened> {
        if party_size < 1 {
            return Err(PosError::invalid("partySize must be at least 1"));
        }
        let table_ids = self.normalize_tables(&[table_id.to_string()])?;
        let reservation_id = reservation_id
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty());

        let registry = self.registry.write();
        if registry.session_for_table(&table_ids[0]).is_some() {
            return Err(PosError::TableOccupied(table_ids[0].clone()));
        }
        let (session, check) =
            self.open_session(registry, table_ids, party_size, reservation_id, actor)?;

        tracing::info!(
            target: "audit",
            session_id = %session.id,
            check_id = %check.id,
            table_id = %session.table_ids[0],
            party_size,
            actor,
            "Session created"
        );
        Ok(SessionOpened { session, check })
    }

    /// Claim the tables for a new session + check, then commit both
    ///
    /// Takes the registry guard holding the claim and releases it before the
    /// redb commit. The new check stays locked until the commit returns, so a
    /// joiner waits on it instead of on the registry. If the commit fails the
    /// check is marked closed for those waiters and the claim is rolled back.
    fn open_session(
        &self,
        mut registry: RwLockWriteGuard<'_, Registry>,
        table_ids: Vec<String>,
        party_size: u32,
        reservation_id: Option<String>,
        actor: &str,
    ) -> PosResult<(Session, Check)> {
        let now = now_millis();
        let session_id = new_id();
        let check = check::new_check(&session_id, actor, now);
        let session = Session {
            id: session_id,
            table_ids,
            status: ServiceStatus::Ordering,
            party_size,
            opened_at: now,
            reservation_id,
            guest_names: Vec::new(),
            opened_by: actor.to_string(),
            closed_at: None,
            check_id: check.id.clone(),
        };

        let handle = Arc::new(Mutex::new(check.clone()));
        let mut pending = handle.lock();
        self.checks.insert(check.id.clone(), Arc::clone(&handle));
        registry.insert(session.clone());
        drop(registry);

        if let Err(e) = self.storage.save(&check, Some(&session)) {
            pending.status = ServiceStatus::Closed;
            self.checks.remove(&check.id);
            self.registry.write().release(&session.id);
            tracing::warn!(session_id = %session.id, "Session open rolled back, commit failed");
            return Err(e.into());
        }
        drop(pending);
        Ok((session, check))
    }

    pub fn active_session_for_table(&self, table_id: &str) -> PosResult<Option<Session>> {
        if self.floor.table(table_id).is_none() {
            return Err(PosError::TableNotFound(table_id.to_string()));
        }
        Ok(self.registry.read().session_for_table(table_id).cloned())
    }

    // ========== Checks ==========

    /// Handle of a live check; an evicted closed check is `CheckClosed`
    fn check_handle(&self, check_id: &str) -> PosResult<CheckHandle> {
        let handle = self.checks.get(check_id).map(|e| Arc::clone(e.value()));
        if let Some(handle) = handle {
            return Ok(handle);
        }
        match self.storage.get_check(check_id)? {
            Some(stored) if stored.is_closed() => Err(PosError::CheckClosed(check_id.to_string())),
            _ => Err(PosError::CheckNotFound(check_id.to_string())),
        }
    }

    /// Live check from memory, closed check from storage
    pub fn get_check(&self, check_id: &str) -> PosResult<Check> {
        let handle = self.checks.get(check_id).map(|e| Arc::clone(e.value()));
        if let Some(handle) = handle {
            let check = handle.lock().clone();
            return Ok(check);
        }
        self.storage
            .get_check(check_id)?
            .ok_or_else(|| PosError::CheckNotFound(check_id.to_string()))
    }

    /// Append a line; revision +1
    pub fn add_line(
        &self,
        check_id: &str,
        input: AddLineInput,
        actor: &str,
    ) -> PosResult<LineMutation> {
        let handle = self.check_handle(check_id)?;
        let mut current = handle.lock();
        check::ensure_open(&current)?;

        let now = now_millis();
        let line = check::build_line(input, actor, now)?;
        let mut next = current.clone();
        next.lines.push(line.clone());
        next.last_fire_at = Some(now);
        check::touch(&mut next, actor, now);

        self.storage.save(&next, None)?;
        let revision = next.revision;
        *current = next;
        drop(current);

        tracing::info!(
            target: "audit",
            check_id,
            line_id = %line.id,
            revision,
            actor,
            "Line added"
        );
        Ok(LineMutation { line, revision })
    }

    /// Partial line update; `None` when the line is not on the check
    pub fn update_line(
        &self,
        check_id: &str,
        patch: LinePatch,
        actor: &str,
    ) -> PosResult<Option<LineMutation>> {
        if patch.line_id.trim().is_empty() {
            return Err(PosError::invalid("lineId is required"));
        }
        let handle = self.check_handle(check_id)?;
        let mut current = handle.lock();
        check::ensure_open(&current)?;

        let line_id = patch.line_id.clone();
        let mut next = current.clone();
        let line = match check::apply_line_patch(&mut next, patch) {
            Ok(line) => line,
            Err(PosError::LineNotFound(_)) => {
                tracing::debug!(check_id, line_id = %line_id, "Line update skipped, line not found");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        check::touch(&mut next, actor, now_millis());

        self.storage.save(&next, None)?;
        let revision = next.revision;
        *current = next;
        drop(current);

        tracing::info!(target: "audit", check_id, line_id = %line_id, revision, actor, "Line updated");
        Ok(Some(LineMutation { line, revision }))
    }

    /// Remove one line; `None` when absent
    pub fn remove_line(&self, check_id: &str, line_id: &str, actor: &str) -> PosResult<Option<u64>> {
        let handle = self.check_handle(check_id)?;
        let mut current = handle.lock();
        check::ensure_open(&current)?;

        let mut next = current.clone();
        if check::remove_line(&mut next, line_id).is_none() {
            return Ok(None);
        }
        check::touch(&mut next, actor, now_millis());

        self.storage.save(&next, None)?;
        let revision = next.revision;
        *current = next;
        drop(current);

        tracing::info!(target: "audit", check_id, line_id, revision, actor, "Line removed");
        Ok(Some(revision))
    }

    /// Drop every line; revision +1 even when already empty
    pub fn clear_lines(&self, check_id: &str, actor: &str) -> PosResult<u64> {
        let handle = self.check_handle(check_id)?;
        let mut current = handle.lock();
        check::ensure_open(&current)?;

        let mut next = current.clone();
        let removed = next.lines.len();
        next.lines.clear();
        check::touch(&mut next, actor, now_millis());

        self.storage.save(&next, None)?;
        let revision = next.revision;
        *current = next;
        drop(current);

        tracing::info!(target: "audit", check_id, removed, revision, actor, "Lines cleared");
        Ok(revision)
    }

    /// Check-level update guarded by `expected_revision`
    ///
    /// Status, party size and guest names are mirrored onto the session.
    /// Closing stamps `closed_at`, frees the session's tables and evicts the
    /// check from memory.
    pub fn update_check(&self, check_id: &str, patch: CheckPatch, actor: &str) -> PosResult<Check> {
        let handle = self.check_handle(check_id)?;
        let mut current = handle.lock();
        check::ensure_open(&current)?;
        check::verify_revision(&current, patch.expected_revision)?;
        if patch.party_size == Some(0) {
            return Err(PosError::invalid("partySize must be at least 1"));
        }

        let now = now_millis();
        let mut next = current.clone();
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(note) = patch.note {
            let note = note.trim().to_string();
            next.note = (!note.is_empty()).then_some(note);
        }
        check::touch(&mut next, actor, now);

        let touches_session =
            patch.status.is_some() || patch.party_size.is_some() || patch.guest_names.is_some();
        let next_session = if touches_session {
            self.session_of(&next).map(|mut session| {
                if let Some(status) = patch.status {
                    session.status = status;
                    if status == ServiceStatus::Closed {
                        session.closed_at = Some(now);
                    }
                }
                if let Some(party_size) = patch.party_size {
                    session.party_size = party_size;
                }
                if let Some(guest_names) = patch.guest_names {
                    session.guest_names = guest_names
                        .into_iter()
                        .map(|g| g.trim().to_string())
                        .filter(|g| !g.is_empty())
                        .collect();
                }
                session
            })
        } else {
            None
        };

        self.storage.save(&next, next_session.as_ref())?;
        *current = next.clone();

        if let Some(session) = next_session {
            self.registry.write().update(session);
        }
        if next.is_closed() {
            self.checks.remove(check_id);
        }
        drop(current);

        tracing::info!(
            target: "audit",
            check_id,
            status = %next.status,
            revision = next.revision,
            actor,
            "Check updated"
        );
        Ok(next)
    }

    /// Active session owning `check`
    ///
    /// Only open checks are updated, and an open check's session is always
    /// registered.
    fn session_of(&self, check: &Check) -> Option<Session> {
        let session = self.registry.read().get(&check.session_id).cloned();
        if session.is_none() {
            tracing::warn!(
                check_id = %check.id,
                session_id = %check.session_id,
                "Check has no active session"
            );
        }
        session
    }

    // ========== Views ==========

    /// Active sessions and a clone of each of their checks
    fn snapshot(&self) -> (Vec<Session>, Vec<Check>) {
        let sessions = self.registry.read().sessions().to_vec();
        let checks = sessions
            .iter()
            .filter_map(|s| self.check_handle(&s.check_id).ok())
            .map(|handle| handle.lock().clone())
            .collect();
        (sessions, checks)
    }

    pub fn bootstrap(&self) -> BootstrapResponse {
        let (sessions, checks) = self.snapshot();
        BootstrapResponse {
            tables: self.floor.tables.clone(),
            sessions,
            checks,
            menu: self.floor.menu.clone(),
        }
    }

    pub fn table_blocks(&self, now_millis: i64) -> Vec<TableBlock> {
        let (sessions, checks) = self.snapshot();
        derive_table_blocks(&self.floor.tables, &sessions, &checks, now_millis)
    }
}

#[cfg(test)]
mod tests;
