//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! - Traces are written to `<data_dir>/mailfeed-otlp.json`
//! - Files rotate at 10 MB, keeping 3 numbered backups
//! - Each line is one OTLP JSON `resourceSpans` document
//!
//! Request spans nest under the event that issued them: the handler's span
//! context travels inside each [`ApiRequest`](crate::worker::ApiRequest) and is
//! re-attached by the worker.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `tracer`: Tracer provider with the file exporter
//! - `span_formatter`: OTLP JSON serialization
//! - `file_writer`: Size-rotated file writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::init_tracing;
