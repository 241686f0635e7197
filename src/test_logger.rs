//! Log records captured per test thread

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::{cell::RefCell, sync::Once};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct Capture;
impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }
    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }
    fn flush(&self) {}
}

static LOGGER: Capture = Capture;
static INIT: Once = Once::new();

/// Runs `f` and returns the warnings it logged on the current thread
pub(crate) fn warnings<T, F: FnOnce() -> T>(f: F) -> (T, Vec<String>) {
    INIT.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Trace);
        }
    });
    RECORDS.with(|records| records.borrow_mut().clear());
    let value = f();
    let warnings = RECORDS.with(|records| {
        records
            .borrow_mut()
            .drain(..)
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message)
            .collect()
    });
    (value, warnings)
}
