//! Per-request tracing context.
//!
//! The context is created at the transport boundary and passed explicitly to
//! every service call so log lines and error bodies can be correlated.

use std::fmt::{Display, Formatter};

use uuid::Uuid;

/// Header carrying the caller's trace identifier.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
    trace_id: String,
    span_id: String,
}

fn generate_span_id() -> String {
    format!("{:016x}", Uuid::new_v4().as_u64_pair().0)
}

impl RequestContext {
    pub fn new(trace_id: impl Into<String>, span_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            span_id: span_id.into(),
        }
    }

    /// Opens a new span. Without an incoming trace id the span id doubles as
    /// the trace id.
    pub fn start(trace_id: Option<&str>) -> Self {
        let span_id = generate_span_id();
        let trace_id = match trace_id {
            Some(trace_id) if !trace_id.is_empty() => trace_id.to_string(),
            _ => span_id.clone(),
        };
        Self { trace_id, span_id }
    }

    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn span_id(&self) -> &str {
        &self.span_id
    }
}

impl Display for RequestContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "trace_id={} span_id={}", self.trace_id, self.span_id)
    }
}
