//! Streaming producer/consumer pipeline.
//!
//! A producer closure runs on a dedicated thread and pushes rows through a
//! bounded channel; the consuming [`StreamedTable`] is a forward-only
//! [`Table`] pulling rows off the channel as they are requested. The
//! bounded channel provides back-pressure in both directions: the producer
//! blocks when the consumer lags, the consumer blocks until the next row is
//! parsed.
//!
//! Producer failures travel in-band and are rethrown, unwrapped, on the
//! consumer's next read. Cancellation is explicit: the [`RowSink`] checks
//! its token at every row boundary, and dropping the table cancels the
//! token so an abandoned producer stops at its next push.

use std::cell::RefCell;
use std::thread;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::DEFAULT_STREAM_CAPACITY;
use crate::core::{Table, TableMetadata, Value};
use crate::error::{FixtureError, Result};

/// One streamed row, in canonical column order.
pub type Row = Vec<Value>;

/// Producer-side handle for pushing rows into the stream.
pub struct RowSink {
    tx: mpsc::Sender<Result<Row>>,
    cancel: CancellationToken,
    columns: usize,
}

impl RowSink {
    /// Push one row, blocking while the channel is full.
    ///
    /// # Errors
    ///
    /// [`FixtureError::Cancelled`] once the stream has been cancelled or the
    /// consumer dropped; [`FixtureError::Config`] for a row of the wrong
    /// width.
    pub fn push(&self, row: Row) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(FixtureError::Cancelled);
        }
        if row.len() != self.columns {
            return Err(FixtureError::config(format!(
                "streamed row width {} does not match {} columns",
                row.len(),
                self.columns
            )));
        }
        self.tx
            .blocking_send(Ok(row))
            .map_err(|_| FixtureError::Cancelled)
    }

    /// Whether the stream has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Debug)]
struct StreamState {
    rx: mpsc::Receiver<Result<Row>>,
    /// Source index and values of the row currently buffered.
    current: Option<(usize, Row)>,
    /// Number of rows pulled off the channel so far.
    pulled: usize,
    exhausted: bool,
}

/// A forward-only table consuming rows from a producer thread.
///
/// Only the current row is buffered. Row access must be monotonically
/// non-decreasing; `row_count` is unsupported. Once the producer is
/// exhausted, reads past the end fail with the bounds error carrying the
/// number of rows actually streamed.
#[derive(Debug)]
pub struct StreamedTable {
    metadata: TableMetadata,
    state: RefCell<StreamState>,
    cancel: CancellationToken,
}

impl StreamedTable {
    /// Spawn `producer` on a new thread and return the consuming table.
    ///
    /// The channel is bounded at [`DEFAULT_STREAM_CAPACITY`] rows; use
    /// [`with_capacity`](Self::with_capacity) to tune it.
    pub fn spawn<F>(metadata: TableMetadata, producer: F) -> Result<Self>
    where
        F: FnOnce(&RowSink) -> Result<()> + Send + 'static,
    {
        Self::with_capacity(metadata, DEFAULT_STREAM_CAPACITY, producer)
    }

    /// Spawn `producer` with an explicit channel bound.
    pub fn with_capacity<F>(metadata: TableMetadata, capacity: usize, producer: F) -> Result<Self>
    where
        F: FnOnce(&RowSink) -> Result<()> + Send + 'static,
    {
        if capacity == 0 {
            return Err(FixtureError::config(
                "stream capacity must be at least one row",
            ));
        }

        let (tx, rx) = mpsc::channel(capacity);
        let cancel = CancellationToken::new();
        let sink = RowSink {
            tx: tx.clone(),
            cancel: cancel.clone(),
            columns: metadata.columns().len(),
        };
        let table_name = metadata.table_name().to_string();

        thread::Builder::new()
            .name(format!("dbfixture-stream-{table_name}"))
            .spawn(move || {
                if let Err(e) = producer(&sink) {
                    debug!(table = %table_name, error = %e, "stream producer failed");
                    // best effort: the consumer may already be gone
                    let _ = tx.blocking_send(Err(e));
                }
            })?;

        Ok(Self {
            metadata,
            state: RefCell::new(StreamState {
                rx,
                current: None,
                pulled: 0,
                exhausted: false,
            }),
            cancel,
        })
    }

    /// Cancel the stream; the producer stops at its next row boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for StreamedTable {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl Table for StreamedTable {
    fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    fn row_count(&self) -> Result<usize> {
        Err(FixtureError::unsupported(format!(
            "row count is not supported on streamed table '{}'",
            self.metadata.table_name()
        )))
    }

    fn value(&self, row: usize, column: &str) -> Result<Value> {
        let column_idx = self.metadata.column_index(column)?;
        let mut state = self.state.borrow_mut();

        if let Some((current, _)) = &state.current {
            if row < *current {
                return Err(FixtureError::unsupported(format!(
                    "streamed table '{}' cannot move backward from row {} to row {}",
                    self.metadata.table_name(),
                    current,
                    row
                )));
            }
        }

        loop {
            if let Some((current, values)) = &state.current {
                if *current >= row {
                    return Ok(values[column_idx].clone());
                }
            }
            if state.exhausted {
                return Err(FixtureError::row_out_of_bounds(
                    self.metadata.table_name(),
                    row,
                    state.pulled,
                ));
            }
            match state.rx.blocking_recv() {
                Some(Ok(values)) => {
                    let index = state.pulled;
                    state.pulled += 1;
                    state.current = Some((index, values));
                }
                Some(Err(e)) => {
                    state.exhausted = true;
                    // the producer's original failure, unwrapped
                    return Err(e);
                }
                None => {
                    state.exhausted = true;
                }
            }
        }
    }
}
