//! Request-scoped correlation context
//!
//! A `CorrelationContext` is created by request-handling code and passed to
//! the contextual logging calls. The logger only reads it: it looks up the
//! configured correlation key and checks the structured-fields marker.
//! Absence of a context is equivalent to an empty one.

/// Key reserved for the logger's own use; never valid as a correlation key
pub const RESERVED_KEY: &str = "log_with";

/// Immutable key/value context carried alongside a logging call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelationContext {
    values: Vec<(String, String)>,
    structured_fields: bool,
}

impl CorrelationContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive a context carrying `key = value`, shadowing any previous value
    #[must_use]
    pub fn with_value(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let mut values: Vec<(String, String)> = self
            .values
            .iter()
            .filter(|(k, _)| *k != key)
            .cloned()
            .collect();
        values.push((key, value.into()));
        Self {
            values,
            structured_fields: self.structured_fields,
        }
    }

    /// Value stored under `key`; an empty key is never present
    pub fn value(&self, key: &str) -> Option<&str> {
        if key.is_empty() {
            return None;
        }
        self.values
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Derive a context whose calls carry a pre-rendered fields blob
    #[must_use]
    pub fn marked_structured(&self) -> Self {
        Self {
            values: self.values.clone(),
            structured_fields: true,
        }
    }

    pub fn is_structured(&self) -> bool {
        self.structured_fields
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && !self.structured_fields
    }
}

/// Derive a context from `parent` (or from nothing) carrying `key = value`
pub fn with_correlation(
    parent: Option<&CorrelationContext>,
    key: impl Into<String>,
    value: impl Into<String>,
) -> CorrelationContext {
    parent
        .cloned()
        .unwrap_or_default()
        .with_value(key, value)
}

/// Correlation value stored under `key`, if any
pub fn extract_correlation<'a>(
    context: Option<&'a CorrelationContext>,
    key: &str,
) -> Option<&'a str> {
    context.and_then(|ctx| ctx.value(key))
}

/// Derive a context marked as carrying structured fields
pub fn mark_structured_fields(parent: Option<&CorrelationContext>) -> CorrelationContext {
    parent.cloned().unwrap_or_default().marked_structured()
}

pub fn is_structured_fields(context: Option<&CorrelationContext>) -> bool {
    context.is_some_and(CorrelationContext::is_structured)
}
