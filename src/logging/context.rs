//! Request-scoped context accepted by the `*_context` logging methods

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Distributed tracing identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracingContext {
    /// Trace ID for request correlation
    pub trace_id: String,

    /// Span ID for this operation
    pub span_id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
}

impl TracingContext {
    pub fn new(trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
            parent_span_id: None,
        }
    }

    pub fn with_parent(mut self, parent_span_id: impl Into<String>) -> Self {
        self.parent_span_id = Some(parent_span_id.into());
        self
    }
}

/// Request-scoped values carried alongside a call
///
/// Loggers accept a `Context` on every `*_context` method but never read
/// it, so writes neither block on nor observe it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    #[serde(skip_serializing_if = "Option::is_none")]
    tracing: Option<TracingContext>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    values: BTreeMap<String, String>,
}

impl Context {
    /// The empty context
    pub fn background() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_tracing(mut self, tracing: TracingContext) -> Self {
        self.tracing = Some(tracing);
        self
    }

    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn tracing(&self) -> Option<&TracingContext> {
        self.tracing.as_ref()
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.tracing.is_none() && self.values.is_empty()
    }
}
