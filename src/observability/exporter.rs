//! Span exporter writing one JSON object per finished span.
//!
//! Each line looks like:
//!
//! ```json
//! {"name":"library_move_book","traceId":"…","spanId":"…","parentSpanId":"…",
//!  "start":"2024-05-01T09:30:00.123456Z","durationMicros":412,
//!  "attributes":{"book_id":"ol-1","from":"toRead","to":"reading"},"status":"unset"}
//! ```

use super::writer::LineWriter;
use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::path::PathBuf;

/// Exports spans to a [`LineWriter`] as they finish.
#[derive(Debug)]
struct SpanFileExporter {
    writer: LineWriter,
    shut_down: bool,
}

impl SpanExporter for SpanFileExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.shut_down {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "span exporter is shut down",
            ))));
        }

        let result = batch
            .iter()
            .try_for_each(|span| self.writer.write_line(&span_line(span).to_string()))
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.shut_down = true;
    }
}

fn span_line(span: &SpanData) -> JsonValue {
    let start: DateTime<Utc> = span.start_time.into();
    let duration_micros = span
        .end_time
        .duration_since(span.start_time)
        .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));

    let parent = if span.parent_span_id == SpanId::INVALID {
        JsonValue::Null
    } else {
        JsonValue::String(format!("{:016x}", span.parent_span_id))
    };

    let status = match &span.status {
        Status::Unset => "unset".to_string(),
        Status::Ok => "ok".to_string(),
        Status::Error { description } => format!("error: {description}"),
    };

    json!({
        "name": span.name,
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent,
        "start": start.to_rfc3339(),
        "durationMicros": duration_micros,
        "attributes": attributes(&span.attributes),
        "status": status,
    })
}

fn attributes(pairs: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = pairs
        .iter()
        .map(|kv| {
            let value = match &kv.value {
                Value::Bool(b) => json!(b),
                Value::I64(i) => json!(i),
                Value::F64(f) => json!(f),
                Value::String(s) => json!(s.as_str()),
                Value::Array(_) => json!(kv.value.to_string()),
            };
            (kv.key.to_string(), value)
        })
        .collect();
    JsonValue::Object(map)
}

/// Builds a tracer provider that appends every finished span to `path`.
///
/// Spans are exported synchronously as they close, so nothing is lost when the
/// process exits right after a command.
pub fn create_tracer_provider(path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = SpanFileExporter {
        writer: LineWriter::new(path),
        shut_down: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}
