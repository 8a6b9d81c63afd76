//! Where envelope rejections are reported.

use crate::envelope::EnvelopeError;

/// Receives a human-readable report for every rejected dispatch.
pub trait DiagnosticSink {
    fn report(&mut self, error: &EnvelopeError);
}

/// Emits rejections as `tracing` error events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, error: &EnvelopeError) {
        tracing::error!(kind = error.id(), "{error}");
    }
}

/// Keeps rejection messages in memory, oldest first.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub messages: Vec<String>,
}

impl CollectingSink {
    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, error: &EnvelopeError) {
        self.messages.push(error.to_string());
    }
}
