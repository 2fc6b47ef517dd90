use std::io::{self, Write};

use futures::StreamExt;

use actiontail_types::LogEvent;

use crate::error::Result;
use crate::filter::EventFilter;
use crate::format::EventFormatter;
use crate::parser::LogParser;
use crate::tailer::LogTailer;

/// Filters and renders events in arrival order
///
/// The only component that writes to the feed.
pub struct Dispatcher<W: Write> {
    filter: EventFilter,
    formatter: EventFormatter,
    out: W,
}

impl<W: Write> Dispatcher<W> {
    pub fn new(filter: EventFilter, formatter: EventFormatter, out: W) -> Self {
        Self {
            filter,
            formatter,
            out,
        }
    }

    /// Render `event` unless the filter drops it
    ///
    /// Returns whether a line was written.
    pub fn dispatch(&mut self, event: &LogEvent) -> io::Result<bool> {
        if !self.filter.allows(event) {
            tracing::trace!(kind = event.kind(), tick = event.tick(), "event filtered");
            return Ok(false);
        }

        writeln!(self.out, "{}", self.formatter.format(event))?;
        self.out.flush()?;
        Ok(true)
    }

    /// Parse and dispatch every line the tailer yields until it is cancelled
    ///
    /// Stops at the first malformed record. Returns the number of rendered
    /// lines.
    pub async fn run(&mut self, tailer: LogTailer) -> Result<u64> {
        let lines = tailer.into_lines();
        tokio::pin!(lines);

        let mut rendered = 0;
        while let Some(line) = lines.next().await {
            let line = line?;
            if line.trim().is_empty() {
                tracing::warn!("skipping blank line");
                continue;
            }

            let event = LogParser::parse(&line).inspect_err(|e| {
                tracing::error!(error = %e, line = %line, "cannot parse record");
            })?;
            if self.dispatch(&event)? {
                rendered += 1;
            }
        }

        Ok(rendered)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
