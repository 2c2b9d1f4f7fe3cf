#![forbid(unsafe_code)]

//! Tracing integration tests.
//!
//! Verify the render spans, trim events and anomaly warnings the widgets
//! emit, using a capturing `tracing_subscriber` layer.
//!
//!   cargo test -p sparkstack-widgets --test tracing_tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use sparkstack_core::geometry::Rect;
use sparkstack_render::buffer::Buffer;
use sparkstack_widgets::diagnostics::{DiagnosticSink, QuantizeAnomaly, TracingSink};
use sparkstack_widgets::{Sparkline, SparklineGroup};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

// ============================================================================
// Test Infrastructure
// ============================================================================

/// A captured span or event with its fields.
#[derive(Debug, Clone)]
struct Captured {
    name: String,
    level: tracing::Level,
    message: Option<String>,
    fields: HashMap<String, String>,
    parent_name: Option<String>,
}

/// A tracing Layer that records spans and events.
struct Capture {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

/// Handle to read captured records after rendering.
struct CaptureHandle {
    spans: Arc<Mutex<Vec<Captured>>>,
    events: Arc<Mutex<Vec<Captured>>>,
}

impl CaptureHandle {
    fn spans(&self) -> Vec<Captured> {
        self.spans.lock().unwrap().clone()
    }

    fn events(&self) -> Vec<Captured> {
        self.events.lock().unwrap().clone()
    }

    fn events_with_message(&self, message: &str) -> Vec<Captured> {
        self.events()
            .into_iter()
            .filter(|e| e.message.as_deref() == Some(message))
            .collect()
    }
}

/// Visitor that extracts fields as strings.
#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let text = format!("{value:?}");
        if field.name() == "message" {
            self.message = Some(text);
        } else {
            self.fields.push((field.name().to_string(), text));
        }
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for Capture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor::default();
        attrs.record(&mut visitor);

        let parent_name = ctx
            .current_span()
            .id()
            .and_then(|id| ctx.span(id))
            .map(|span_ref| span_ref.name().to_string());

        self.spans.lock().unwrap().push(Captured {
            name: attrs.metadata().name().to_string(),
            level: *attrs.metadata().level(),
            message: visitor.message,
            fields: visitor.fields.into_iter().collect(),
            parent_name,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let parent_name = ctx.lookup_current().map(|span| span.name().to_string());

        self.events.lock().unwrap().push(Captured {
            name: event.metadata().name().to_string(),
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields.into_iter().collect(),
            parent_name,
        });
    }
}

/// Run `f` under a subscriber that captures everything.
fn with_capture<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let spans = Arc::new(Mutex::new(Vec::new()));
    let events = Arc::new(Mutex::new(Vec::new()));
    let layer = Capture {
        spans: spans.clone(),
        events: events.clone(),
    };
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    CaptureHandle { spans, events }
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn group_draw_opens_render_span() {
    let handle = with_capture(|| {
        let mut buf = Buffer::new(12, 6);
        let mut group = SparklineGroup::new(vec![
            Sparkline::new().data(vec![1, 2, 3]),
            Sparkline::new().data(vec![4]),
        ]);
        group.draw(Rect::new(0, 0, 12, 6), &mut buf);
    });

    let spans = handle.spans();
    let group_span = spans
        .iter()
        .find(|s| s.name == "widget_render" && s.fields.get("widget").is_some_and(|w| w == "SparklineGroup"))
        .expect("SparklineGroup span");
    assert_eq!(group_span.level, tracing::Level::DEBUG);
    assert_eq!(group_span.fields.get("w").map(String::as_str), Some("12"));
    assert_eq!(group_span.fields.get("h").map(String::as_str), Some("6"));
    assert_eq!(group_span.fields.get("lines").map(String::as_str), Some("2"));
}

#[test]
fn block_span_nests_inside_group_span() {
    let handle = with_capture(|| {
        let mut buf = Buffer::new(8, 4);
        SparklineGroup::new(vec![Sparkline::new()]).draw(Rect::new(0, 0, 8, 4), &mut buf);
    });

    let spans = handle.spans();
    let block_span = spans
        .iter()
        .find(|s| s.fields.get("widget").is_some_and(|w| w == "Block"))
        .expect("Block span");
    assert_eq!(block_span.parent_name.as_deref(), Some("widget_render"));
}

#[test]
fn trimming_emits_debug_event() {
    let handle = with_capture(|| {
        let mut buf = Buffer::new(6, 3);
        let mut group = SparklineGroup::new(vec![Sparkline::new().data(vec![1; 20])]);
        group.draw(Rect::new(0, 0, 6, 3), &mut buf);
    });

    let trims = handle.events_with_message("trimmed sparkline history");
    assert_eq!(trims.len(), 1);
    let trim = &trims[0];
    assert_eq!(trim.level, tracing::Level::DEBUG);
    assert_eq!(trim.fields.get("before").map(String::as_str), Some("20"));
    assert_eq!(trim.fields.get("after").map(String::as_str), Some("17"));
    assert_eq!(trim.fields.get("line").map(String::as_str), Some("0"));
    assert_eq!(trim.parent_name.as_deref(), Some("widget_render"));
}

#[test]
fn no_trim_event_for_short_history() {
    let handle = with_capture(|| {
        let mut buf = Buffer::new(6, 3);
        let mut group = SparklineGroup::new(vec![Sparkline::new().data(vec![1; 16])]);
        group.draw(Rect::new(0, 0, 6, 3), &mut buf);
    });

    assert!(handle.events_with_message("trimmed sparkline history").is_empty());
}

#[test]
fn tracing_sink_emits_warning() {
    let handle = with_capture(|| {
        TracingSink.report(&QuantizeAnomaly {
            len: 4,
            offset: 2,
            value: 9,
            fraction: 1.5,
            index: 11,
        });
    });

    let warnings = handle.events_with_message("invalid sparkline data value");
    assert_eq!(warnings.len(), 1);
    let warning = &warnings[0];
    assert_eq!(warning.level, tracing::Level::WARN);
    assert_eq!(warning.fields.get("len").map(String::as_str), Some("4"));
    assert_eq!(warning.fields.get("offset").map(String::as_str), Some("2"));
    assert_eq!(warning.fields.get("value").map(String::as_str), Some("9"));
    assert_eq!(warning.fields.get("index").map(String::as_str), Some("11"));
}

#[test]
fn clean_draw_emits_no_warnings() {
    let handle = with_capture(|| {
        let mut buf = Buffer::new(10, 4);
        let mut group = SparklineGroup::new(vec![Sparkline::new().data(vec![0, 3, 1_000_000, 7])]);
        group.draw(Rect::new(0, 0, 10, 4), &mut buf);
    });

    assert!(
        handle
            .events()
            .iter()
            .all(|e| e.level != tracing::Level::WARN),
        "unexpected warnings: {:?}",
        handle.events()
    );
}
