//! OpenTelemetry tracing with file-based export.
//!
//! Spans from the `tracing` macros are exported as OTLP JSON, one batch per
//! line, to `<data_dir>/cinesearch-otlp.json`:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//! ```
//!
//! The file rotates at 10 MB and the three newest backups are kept. Nothing is
//! written to the terminal, which belongs to the presenter.
//!
//! # Filter
//!
//! 1. `RUST_LOG`
//! 2. `trace_level` from the config file or `CINESEARCH_TRACE_LEVEL`
//! 3. `info`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`tracer`]: Tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON encoding
//! - [`file_writer`]: Rotating line writer

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, TRACE_FILE};
