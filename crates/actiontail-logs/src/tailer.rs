use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::Stream;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;

use crate::error::{Error, Result};

/// Delay between reads while waiting for the producer to finish a line
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Follows a growing file, yielding each complete line exactly once
pub struct LogTailer {
    path: PathBuf,

    reader: BufReader<File>,

    /// Bytes of a line whose terminator hasn't been written yet
    pending: Vec<u8>,

    poll_interval: Duration,

    /// Cancelled to end the tail
    cancel: CancellationToken,
}

impl LogTailer {
    /// Open `path` for tailing from its first line
    pub async fn open(path: &Path, cancel: CancellationToken) -> Result<Self> {
        let file = File::open(path).await.map_err(|source| Error::Tail {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            pending: Vec::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            cancel,
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Wait for the next complete line, without its terminator
    ///
    /// Returns `Ok(None)` once the cancellation token fires.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        loop {
            if self.cancel.is_cancelled() {
                return Ok(None);
            }

            let read = self
                .reader
                .read_until(b'\n', &mut self.pending)
                .await
                .map_err(|source| Error::Tail {
                    path: self.path.clone(),
                    source,
                })?;

            if read > 0 && self.pending.last() == Some(&b'\n') {
                return self.take_line().map(Some);
            }

            // At the end of what has been written so far; a partial line
            // stays in `pending` until its terminator arrives
            tokio::select! {
                _ = self.cancel.cancelled() => return Ok(None),
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
    }

    fn take_line(&mut self) -> Result<String> {
        let mut bytes = std::mem::take(&mut self.pending);
        bytes.pop();
        if bytes.last() == Some(&b'\r') {
            bytes.pop();
        }
        String::from_utf8(bytes)
            .map_err(|e| Error::malformed(format!("line is not valid UTF-8: {e}")))
    }

    /// Turn the tailer into a stream of lines that ends on cancellation
    pub fn into_lines(self) -> impl Stream<Item = Result<String>> {
        futures::stream::try_unfold(self, |mut tailer| async move {
            Ok::<_, Error>(tailer.next_line().await?.map(|line| (line, tailer)))
        })
    }
}
