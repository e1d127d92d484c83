//! Diagnostic sinks

use super::events::{DiagnosticEvent, DiagnosticLevel, EventId};
use std::sync::{Mutex, MutexGuard};

/// Destination for logged diagnostics
///
/// Sinks are shared between validations running on different threads.
pub trait DiagnosticsSink: Send + Sync {
    fn log(&self, event: &DiagnosticEvent);
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn log(&self, event: &DiagnosticEvent) {
        let entity_type = event.entity_type.as_deref().unwrap_or_default();
        let property = event.property.as_deref().unwrap_or_default();
        match event.level {
            DiagnosticLevel::Warning => tracing::warn!(
                event_id = %event.id,
                category = %event.category,
                entity_type,
                property,
                "{}",
                event.message
            ),
            DiagnosticLevel::Debug => tracing::debug!(
                event_id = %event.id,
                category = %event.category,
                entity_type,
                property,
                "{}",
                event.message
            ),
        }
    }
}

/// Keeps diagnostics in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<DiagnosticEvent>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        match self.events.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Snapshot of the recorded events, in logging order
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.lock().clone()
    }

    pub fn count(&self, id: EventId) -> usize {
        self.lock().iter().filter(|e| e.id == id).count()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl DiagnosticsSink for MemorySink {
    fn log(&self, event: &DiagnosticEvent) {
        self.lock().push(event.clone());
    }
}
