//! Output hook: a late-stage transform applied to every formatted line

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Transform applied to each formatted line before it reaches the sink.
/// Its return value replaces the line verbatim.
///
/// # Example
///
/// ```
/// use rust_line_logger::OutputHook;
/// use std::sync::Arc;
///
/// let redact: OutputHook = Arc::new(|line: &str| line.replace("hunter2", "****"));
/// assert_eq!(redact("password=hunter2"), "password=****");
/// ```
pub type OutputHook = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Run `hook` over `line`, isolating panics.
///
/// Returns `None` if the hook panicked; the caller keeps the original line.
pub(crate) fn apply(hook: &OutputHook, line: &str) -> Option<String> {
    match catch_unwind(AssertUnwindSafe(|| hook(line))) {
        Ok(out) => Some(out),
        Err(panic_info) => {
            eprintln!(
                "[LOGGER CRITICAL] Output hook panicked: {}. Line emitted unmodified.",
                panic_message(panic_info.as_ref())
            );
            None
        }
    }
}

/// Text of a caught panic payload
pub(crate) fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_replaces_line() {
        let hook: OutputHook = Arc::new(|line: &str| format!("<<{}>>", line));
        assert_eq!(apply(&hook, "x").as_deref(), Some("<<x>>"));
    }

    #[test]
    fn test_panicking_hook_is_isolated() {
        let hook: OutputHook = Arc::new(|_: &str| -> String { panic!("boom") });
        assert_eq!(apply(&hook, "x"), None);
    }
}
