//! Shared test utilities.

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::{Mutex, MutexGuard};

use crate::reporter::{self, ParserEvent};

/// Initialize logging for tests
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

/// The reporter is process-wide; tests that swap it take this lock so
/// concurrent test threads cannot observe each other's collectors.
static REPORTER_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub(crate) fn reporter_lock() -> MutexGuard<'static, ()> {
    REPORTER_MUTEX.lock()
}

/// Collecting reporter installed for the lifetime of the value. Holds the
/// reporter lock, so at most one capture exists at a time; dropping it
/// restores the default sink.
pub(crate) struct EventCapture {
    _guard: MutexGuard<'static, ()>,
    events: Arc<Mutex<Vec<ParserEvent>>>,
}

impl EventCapture {
    pub fn install() -> Self {
        let guard = reporter_lock();
        init_logging();
        let events: Arc<Mutex<Vec<ParserEvent>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        reporter::set_reporter(move |event| sink.lock().push(event.clone()));
        EventCapture {
            _guard: guard,
            events,
        }
    }

    pub fn events(&self) -> Vec<ParserEvent> {
        self.events.lock().clone()
    }

    pub fn of_category(&self, category: &str) -> Vec<ParserEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.category() == category)
            .collect()
    }
}

impl Drop for EventCapture {
    fn drop(&mut self) {
        reporter::reset_reporter();
    }
}
