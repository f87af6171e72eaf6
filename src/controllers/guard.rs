// src/controllers/guard.rs
//! Guards against stale responses and duplicate submissions.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

// ==================== LIVENESS ====================

/// Generation counter owned by one screen.
///
/// Each load takes a fresh ticket. A response is applied only if its ticket
/// is still the current generation; a newer load or an unmount makes every
/// older ticket stale.
#[derive(Debug, Clone, Default)]
pub struct Liveness {
    generation: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation.
    pub fn begin(&self) -> Ticket {
        Ticket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Ticket for the current generation, without starting a new one.
    pub fn observe(&self) -> Ticket {
        Ticket(self.generation.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    pub fn handle(&self) -> ScreenHandle {
        ScreenHandle {
            generation: self.generation.clone(),
        }
    }
}

/// Held by whoever owns the screen's lifetime.
///
/// The web handlers never take one. Their controllers live for a single
/// request, and actix drops the whole handler future when the client goes
/// away, so no late response can reach them. The handle matters to a caller
/// that keeps a controller across requests it does not own.
#[derive(Debug, Clone)]
pub struct ScreenHandle {
    generation: Arc<AtomicU64>,
}

impl ScreenHandle {
    /// Invalidates every request still in flight for the screen.
    pub fn unmount(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

// ==================== IN-FLIGHT SUBMISSIONS ====================

/// Keys with a submission currently running.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    keys: Arc<Mutex<HashSet<String>>>,
}

impl InFlight {
    fn lock(keys: &Mutex<HashSet<String>>) -> MutexGuard<'_, HashSet<String>> {
        match keys.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// `None` if `key` is already in flight.
    pub fn try_begin(&self, key: impl Into<String>) -> Option<InFlightGuard> {
        let key = key.into();
        if Self::lock(&self.keys).insert(key.clone()) {
            Some(InFlightGuard {
                keys: self.keys.clone(),
                key,
            })
        } else {
            None
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        Self::lock(&self.keys).contains(key)
    }
}

/// Releases its key on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        InFlight::lock(&self.keys).remove(&self.key);
    }
}
