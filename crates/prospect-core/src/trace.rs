//! Backtrace capture for the degrade-to-empty boundaries.
//!
//! Errors get a backtrace taken where they are caught. Panics get the
//! backtrace of the panicking thread, recorded by a chained panic hook into a
//! thread-local slot and read back by the `catch_unwind` on that same thread.

use std::any::Any;
use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::sync::Once;

thread_local! {
    static LAST_PANIC_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

/// Install the recording panic hook once per process. The previous hook
/// still runs afterwards.
pub fn install_panic_trace_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let trace = Backtrace::force_capture().to_string();
            LAST_PANIC_TRACE.with(|slot| *slot.borrow_mut() = Some(trace));
            previous(info);
        }));
    });
}

/// Take the backtrace recorded for the most recent panic on this thread.
pub fn take_panic_trace() -> Option<String> {
    LAST_PANIC_TRACE.with(|slot| slot.borrow_mut().take())
}

/// Multi-line detail for an error caught at a boundary.
pub fn error_detail(error: &dyn std::fmt::Debug) -> String {
    format!(
        "{error:?}\n\nstack backtrace:\n{}",
        Backtrace::force_capture()
    )
}

/// Multi-line detail for a caught panic. Falls back to the current stack if
/// the hook recorded nothing.
pub fn panic_detail(message: &str) -> String {
    let trace = take_panic_trace().unwrap_or_else(|| Backtrace::force_capture().to_string());
    format!("panicked: {message}\n\nstack backtrace:\n{trace}")
}

pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
