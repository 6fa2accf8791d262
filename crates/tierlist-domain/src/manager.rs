//! Manager module - named tierlists and the single active-list state machine
//!
//! The manager is in one of two states: no list active, or exactly one named
//! list active. Only `begin` and `end` move between them, and every mutating
//! command targets the active list.

use crate::error::{TierlistError, TierlistResult};
use crate::member::{Member, MemberId};
use crate::tier::IntoTier;
use crate::tierlist::{RenderSnapshot, Tierlist};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Owner of all tierlists and of the active-list pointer
///
/// Each instance is independent; there is no process-wide state.
#[derive(Debug, Default)]
pub struct TierlistManager {
    tierlists: HashMap<String, Tierlist>,
    active: Option<String>,
}

impl TierlistManager {
    /// Create a manager with no lists and nothing active
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate `name`, creating an empty list if it does not exist yet
    ///
    /// # Errors
    /// `TierlistAlreadyActive` if any list (including `name`) is active.
    pub fn begin_tierlist(&mut self, name: &str) -> TierlistResult<()> {
        if self.active.is_some() {
            return Err(TierlistError::TierlistAlreadyActive);
        }

        self.tierlists.entry(name.to_string()).or_default();
        self.active = Some(name.to_string());
        Ok(())
    }

    /// Deactivate the active list. The list itself is kept.
    ///
    /// # Errors
    /// `TierlistNotActive` if nothing is active.
    pub fn end_tierlist(&mut self) -> TierlistResult<()> {
        match self.active.take() {
            Some(_) => Ok(()),
            None => Err(TierlistError::TierlistNotActive),
        }
    }

    /// Place a member in a tier of the active list
    ///
    /// # Errors
    /// - `TierlistNotActive` if nothing is active
    /// - `InvalidTier` if `tier` names no tier; the list is not modified
    pub fn add_to_tierlist(&mut self, id: MemberId, data: Member, tier: impl IntoTier) -> TierlistResult<()> {
        let list = self.active_mut()?;
        if !list.add_member(id, data, tier) {
            return Err(TierlistError::InvalidTier);
        }
        Ok(())
    }

    /// Remove a member from the active list
    ///
    /// # Errors
    /// - `TierlistNotActive` if nothing is active
    /// - `UserNotFound` if the member is in no tier
    pub fn remove_from_tierlist(&mut self, id: MemberId) -> TierlistResult<()> {
        let list = self.active_mut()?;
        if !list.remove_member(id) {
            return Err(TierlistError::UserNotFound);
        }
        Ok(())
    }

    /// Name of the active list
    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active list
    pub fn active_tierlist(&self) -> Option<&Tierlist> {
        self.active.as_ref().and_then(|name| self.tierlists.get(name))
    }

    /// Freeze the active list for rendering
    ///
    /// # Errors
    /// `TierlistNotActive` if nothing is active.
    pub fn snapshot_active(&self) -> TierlistResult<RenderSnapshot> {
        let name = self.active.as_deref().ok_or(TierlistError::TierlistNotActive)?;
        let list = self.tierlists.get(name).ok_or(TierlistError::TierlistNotActive)?;
        Ok(list.snapshot(name))
    }

    /// Look up any list by name, active or not
    pub fn get(&self, name: &str) -> Option<&Tierlist> {
        self.tierlists.get(name)
    }

    /// Names of every list, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tierlists.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    fn active_mut(&mut self) -> TierlistResult<&mut Tierlist> {
        let name = self.active.as_deref().ok_or(TierlistError::TierlistNotActive)?;
        // `begin_tierlist` always inserts before activating.
        self.tierlists
            .get_mut(name)
            .ok_or(TierlistError::TierlistNotActive)
    }
}

/// Cloneable handle that serializes access to one manager
///
/// `begin`/`end` are not safe to interleave without mutual exclusion, so
/// callers on different tasks go through this lock.
#[derive(Debug, Clone, Default)]
pub struct SharedManager {
    inner: Arc<Mutex<TierlistManager>>,
}

impl SharedManager {
    /// Wrap a manager
    pub fn new(manager: TierlistManager) -> Self {
        Self {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    /// Run `f` with exclusive access to the manager
    ///
    /// A panic inside an earlier closure does not make the manager unusable;
    /// every operation leaves it consistent before it can panic.
    pub fn with<R>(&self, f: impl FnOnce(&mut TierlistManager) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}
