// src/log.rs
use std::fmt;
use std::sync::OnceLock;
use std::time::Instant;

use tracing_subscriber::fmt::{format::Writer, time::FormatTime};
use tracing_subscriber::EnvFilter;

static START: OnceLock<Instant> = OnceLock::new();

/// Default filter when `RUST_LOG` is unset. Diagnostics meant for the user go
/// straight to stderr; tracing output is for debugging the tools themselves.
const DEFAULT_FILTER: &str = "warn";

fn start() -> Instant {
    *START.get_or_init(Instant::now)
}

fn fmt_elapsed(ms: u128) -> String {
    let total_ms = ms as u64;
    let h = total_ms / 3_600_000;
    let m = (total_ms % 3_600_000) / 60_000;
    let s = (total_ms % 60_000) / 1_000;
    let ms = total_ms % 1_000;
    format!("{h:02}:{m:02}:{s:02}.{ms:03}")
}

/// `[hh:mm:ss.mmm]` since process start.
struct Elapsed;

impl FormatTime for Elapsed {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "[{}]", fmt_elapsed(start().elapsed().as_millis()))
    }
}

/// Install the stderr subscriber. Safe to call more than once; later calls are no-ops.
pub fn init() {
    start();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(Elapsed)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
