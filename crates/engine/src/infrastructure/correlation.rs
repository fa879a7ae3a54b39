//! Correlation ids attached to request spans.

use std::fmt;

use axum::http::Request;
use tracing::Span;
use uuid::Uuid;

/// Correlation ID for tracking one request through the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    /// Generate a new correlation ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Short format (first 8 characters) for logging.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Span factory for `TraceLayer::make_span_with`.
pub fn request_span<B>(request: &Request<B>) -> Span {
    let correlation_id = CorrelationId::new();
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        correlation_id = %correlation_id.short(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_generates_unique_ids() {
        assert_ne!(CorrelationId::new(), CorrelationId::new());
    }

    #[test]
    fn short_format_is_8_chars() {
        assert_eq!(CorrelationId::new().short().len(), 8);
    }

    #[test]
    fn display_is_hyphenated_uuid() {
        assert_eq!(CorrelationId::new().to_string().len(), 36);
    }
}
