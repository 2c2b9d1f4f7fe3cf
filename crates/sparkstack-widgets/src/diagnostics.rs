#![forbid(unsafe_code)]

//! Reporting of quantization anomalies.
//!
//! A sparkline never fails to draw. When a value maps to a glyph index
//! outside the ramp, the cell falls back to the shortest bar and the
//! anomaly is handed to a [`DiagnosticSink`].

use std::sync::{Arc, Mutex, PoisonError};

/// One out-of-range quantization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizeAnomaly {
    /// Length of the line's history at draw time.
    pub len: usize,
    /// Distance of the column from the right edge.
    pub offset: usize,
    pub value: u64,
    pub fraction: f64,
    pub index: i64,
}

/// Receives anomalies found while drawing.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, anomaly: &QuantizeAnomaly);
}

/// Default sink: emits a `tracing` warning per anomaly.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, anomaly: &QuantizeAnomaly) {
        tracing::warn!(
            len = anomaly.len,
            offset = anomaly.offset,
            value = anomaly.value,
            fraction = anomaly.fraction,
            index = anomaly.index,
            "invalid sparkline data value"
        );
    }
}

/// Keeps every reported anomaly in memory.
///
/// Clones share storage, so a test can hand one clone to a group and read
/// the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    anomalies: Arc<Mutex<Vec<QuantizeAnomaly>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything reported so far.
    pub fn anomalies(&self) -> Vec<QuantizeAnomaly> {
        self.anomalies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.anomalies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.anomalies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, anomaly: &QuantizeAnomaly) {
        self.anomalies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*anomaly);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuantizeAnomaly {
        QuantizeAnomaly {
            len: 3,
            offset: 1,
            value: 7,
            fraction: 2.0,
            index: 17,
        }
    }

    #[test]
    fn collecting_sink_shares_storage_between_clones() {
        let sink = CollectingSink::new();
        let handle: Arc<dyn DiagnosticSink> = Arc::new(sink.clone());
        handle.report(&sample());
        handle.report(&sample());
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.anomalies()[0], sample());
    }

    #[test]
    fn collecting_sink_clear() {
        let sink = CollectingSink::new();
        sink.report(&sample());
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn tracing_sink_does_not_panic_without_subscriber() {
        TracingSink.report(&sample());
    }
}
