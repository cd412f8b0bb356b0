//! Fire-and-forget telemetry events
//!
//! A sink receives named events with string properties and numeric
//! measures. Sending never fails and never blocks the operation that
//! emitted the event; a caller that does not care wires up [`NoopSink`].
//! The sink is always passed in explicitly so tests can substitute a
//! capturing implementation.

use std::collections::HashMap;

/// Destination for telemetry events
pub trait TelemetrySink: Send + Sync {
    /// Record one event. Implementations must not fail or block.
    fn send(
        &self,
        event: &str,
        properties: &HashMap<String, String>,
        measures: &HashMap<String, f64>,
    );
}

/// Sink that forwards events to `tracing` at debug level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn send(
        &self,
        event: &str,
        properties: &HashMap<String, String>,
        measures: &HashMap<String, f64>,
    ) {
        tracing::debug!(event, ?properties, ?measures, "telemetry");
    }
}

/// Sink that drops every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl TelemetrySink for NoopSink {
    fn send(&self, _: &str, _: &HashMap<String, String>, _: &HashMap<String, f64>) {}
}
