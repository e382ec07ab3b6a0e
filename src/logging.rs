//! Log output in the format NZBGet parses from post-processing scripts.
//!
//! NZBGet reads the script's stdout line by line and uses a leading
//! `[INFO]`, `[WARNING]`, `[ERROR]` or `[DETAIL]` tag as the message kind.
//! Every `tracing` event becomes exactly one such line.

use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Filter used when `RUST_LOG` is not set: everything, including detail lines
const DEFAULT_FILTER: &str = "debug";

/// Event formatter producing `[TAG] message key=value` lines
#[derive(Debug, Clone, Copy, Default)]
pub struct HostLogFormat;

/// Message kind tag NZBGet expects for a tracing level
pub fn severity_tag(level: Level) -> &'static str {
    match level {
        Level::ERROR => "ERROR",
        Level::WARN => "WARNING",
        Level::INFO => "INFO",
        _ => "DETAIL",
    }
}

impl<S, N> FormatEvent<S, N> for HostLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "[{}] ", severity_tag(*event.metadata().level()))?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the stdout logger
///
/// Returns `false` if a global subscriber was already installed.
pub fn init() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_ansi(false)
        .event_format(HostLogFormat)
        .try_init()
        .is_ok()
}
