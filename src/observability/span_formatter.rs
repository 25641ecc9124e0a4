//! OTLP JSON span formatter.
//!
//! Every exported batch becomes one line holding a complete OTLP
//! `resourceSpans` document, so the trace file can be replayed into any OTLP
//! JSON collector line by line.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

/// Formats span batches as OTLP JSON documents.
pub struct SpanFormatter {
    resource: Resource,
    /// Instrumentation scope name written into every batch.
    scope: &'static str,
}

impl SpanFormatter {
    pub const fn new(resource: Resource, scope: &'static str) -> Self {
        Self { resource, scope }
    }

    /// Formats a batch as one OTLP document.
    ///
    /// ```json
    /// {"resourceSpans":[{"resource":{"attributes":[...]},
    ///   "scopeSpans":[{"scope":{"name":"mailfeed"},"spans":[...]}]}]}
    /// ```
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(key, value)| attribute(key.as_str(), value))
            .collect();

        let spans: Vec<JsonValue> = batch.iter().map(format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attrs },
                "scopeSpans": [{
                    "scope": { "name": self.scope },
                    "spans": spans
                }]
            }]
        })
    }
}

fn format_span(span: &SpanData) -> JsonValue {
    let (status_code, status_message) = status(&span.status);
    let parent_span_id = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent_span_id,
        "name": span.name,
        "kind": kind(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(format_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(format_link).collect::<Vec<_>>(),
        "status": { "code": status_code, "message": status_message },
    })
}

fn format_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn format_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

/// Nanoseconds since the Unix epoch as a decimal string (OTLP encodes 64-bit ints as strings).
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default()
        .to_string()
}

/// OTLP span kind code.
const fn kind(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

/// OTLP status code and message.
fn status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

fn attributes(attributes: &[KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| attribute(kv.key.as_str(), &kv.value))
        .collect()
}

fn attribute(key: &str, value: &Value) -> JsonValue {
    let value = match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": value.to_string() }),
    };
    json!({ "key": key, "value": value })
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "mailfeed")]);
        let formatter = SpanFormatter::new(resource, "mailfeed");

        let doc = formatter.format_batch(&[]);
        let resource_spans = &doc["resourceSpans"][0];

        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "mailfeed");
        assert!(resource_spans["scopeSpans"][0]["spans"].as_array().unwrap().is_empty());
        let attrs = resource_spans["resource"]["attributes"].as_array().unwrap();
        assert!(attrs.iter().any(|attr| attr["key"] == "service.name"
            && attr["value"]["stringValue"] == "mailfeed"));
    }

    #[test]
    fn attribute_values_use_otlp_encodings() {
        assert_eq!(
            attribute("count", &Value::I64(3)),
            json!({ "key": "count", "value": { "intValue": "3" } })
        );
        assert_eq!(
            attribute("ok", &Value::Bool(true)),
            json!({ "key": "ok", "value": { "boolValue": true } })
        );
    }

    #[test]
    fn times_before_the_epoch_format_as_zero() {
        assert_eq!(unix_nanos(UNIX_EPOCH), "0");
    }
}
