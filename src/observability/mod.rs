//! Tracing setup.
//!
//! Spans and events from the `tracing` macros go to two optional sinks:
//!
//! ```text
//! tracing macros ─┬─► EnvFilter ─► fmt layer ─► stderr
//!                 └─► OpenTelemetry layer ─► SpanFileExporter ─► trace_file (JSON lines)
//! ```
//!
//! The filter comes from `RUST_LOG`, else `trace_level` in the config, else `warn`,
//! so normal command output on stdout stays clean. The span file is only written
//! when `trace_file` is configured.
//!
//! # Modules
//!
//! - `init`: Subscriber construction
//! - `exporter`: Span exporter writing one JSON object per line
//! - `writer`: Append-only line writer with size-based rotation

mod exporter;
mod init;
mod writer;

pub use init::init_tracing;
