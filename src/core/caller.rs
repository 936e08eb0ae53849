//! Call-site location and its abbreviated display token
//!
//! Locations are captured at the logging call site (`file!()`/`line!()` in the
//! macros, `#[track_caller]` on the [`Logger`](super::Logger) methods), so the
//! engine never walks the stack.

use std::fmt;

/// Width of the caller column in plain output
pub const CALLER_WIDTH: usize = 20;

/// Source location of a logging call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerLocation<'a> {
    pub file: &'a str,
    pub line: u32,
}

impl<'a> CallerLocation<'a> {
    pub const fn new(file: &'a str, line: u32) -> Self {
        Self { file, line }
    }

    /// Location of the caller of a `#[track_caller]` function
    #[track_caller]
    pub fn caller() -> CallerLocation<'static> {
        let location = std::panic::Location::caller();
        CallerLocation::new(location.file(), location.line())
    }

    /// `file:line` abbreviated to at most `max_width` characters
    pub fn token(&self, max_width: usize) -> String {
        shorten(&self.to_string(), max_width)
    }
}

impl fmt::Display for CallerLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

impl From<&'static std::panic::Location<'static>> for CallerLocation<'static> {
    fn from(location: &'static std::panic::Location<'static>) -> Self {
        CallerLocation::new(location.file(), location.line())
    }
}

/// Abbreviate a source path for display.
///
/// The first non-empty directory is kept whole, every further directory is
/// collapsed to its first character and the file segment is kept whole.
/// When the result is still wider than `max_width` characters only its tail
/// is kept, since the file name is the most identifying part.
///
/// ```
/// use rust_line_logger::core::caller::shorten;
///
/// assert_eq!(shorten("src/core/formatter/engine.rs:42", 30), "src/c/f/engine.rs:42");
/// assert_eq!(shorten("src/core/formatter/engine.rs:42", 12), "engine.rs:42");
/// ```
pub fn shorten(path: &str, max_width: usize) -> String {
    let mut segments: Vec<&str> = path.split(['/', '\\']).collect();
    let file = segments.pop().unwrap_or_default();

    let mut out = String::with_capacity(path.len());
    let mut directories = segments.into_iter().filter(|s| !s.is_empty());
    if let Some(first) = directories.next() {
        out.push_str(first);
        out.push('/');
    }
    for dir in directories {
        if let Some(initial) = dir.chars().next() {
            out.push(initial);
            out.push('/');
        }
    }
    out.push_str(file);

    let width = out.chars().count();
    if width > max_width {
        out.chars().skip(width - max_width).collect()
    } else {
        out
    }
}
