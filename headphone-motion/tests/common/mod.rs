#![allow(dead_code)]

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::{Mutex, MutexGuard, Once, PoisonError};

// Collects log records per thread so parallel tests don't see each other.
struct CaptureLogger;

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let entry = (record.level(), record.args().to_string());
        RECORDS.with(|records| records.borrow_mut().push(entry));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

// Installs the capturing logger and forgets what this thread logged so far.
pub fn capture_logs() {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("logger already set");
        log::set_max_level(LevelFilter::Trace);
    });
    RECORDS.with(|records| records.borrow_mut().clear());
}

// Warnings logged on this thread since the last call.
pub fn take_warnings() -> Vec<String> {
    RECORDS.with(|records| {
        let taken: Vec<_> = records.borrow_mut().drain(..).collect();
        taken.into_iter().filter(|(level, _)| *level == Level::Warn).map(|(_, msg)| msg).collect()
    })
}

static SLOT: Mutex<()> = Mutex::new(());

// Native callbacks reach one context per process. Tests that initialize a
// context hold this for their whole body.
pub fn exclusive_slot() -> MutexGuard<'static, ()> {
    SLOT.lock().unwrap_or_else(PoisonError::into_inner)
}
