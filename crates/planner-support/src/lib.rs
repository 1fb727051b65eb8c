//! Shared plumbing for the Belts and Factory CLIs.
//!
//! Both solvers are one-shot, single-document request/response programs:
//! read one JSON document from stdin, write one JSON document to stdout.
//! This crate owns the parts of that plumbing that would otherwise be
//! duplicated between the two binaries -- stdin/stdout framing and the
//! `tracing` subscriber setup each binary installs once in `main`.

use std::io::{self, Read, Write};

pub mod io_json;

/// Install a compact `tracing` subscriber driven by `RUST_LOG`.
///
/// Defaults to `warn` when `RUST_LOG` is unset, since both CLIs are meant
/// to run silently in pipelines unless something needs attention.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Read the entire contents of stdin as a UTF-8 string.
pub fn read_stdin_to_string() -> io::Result<String> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Write `body` to stdout with no trailing newline, matching the
/// compact, whitespace-free output the spec calls for.
pub fn write_stdout(body: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    out.write_all(body.as_bytes())?;
    out.flush()
}
