//! # Standalone Host
//!
//! Stands in for the browser when the runtime runs as a plain process.
//!
//! ## Wire Format
//!
//! One request per input line:
//!
//! ```text
//! {"action": "fetch-icon-by-domain", "domain": "example.com", "sender": {"id": "abc"}}
//! ```
//!
//! One reply per output line, tagged with the 1-based input line number:
//!
//! ```text
//! {"id": 1, "status": 0, "data": ["https://example.com/favicon.ico"]}
//! ```
//!
//! Unmatched actions and unparsable lines (including bytes that are not
//! UTF-8) produce no output. Replies are
//! written in completion order, not input order.

use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared_types::{InboundRequest, ReplyCallback, ReplyEnvelope, SenderDescriptor};
use std::future::Future;
use sw_02_dispatch::{Dispatch, MessageDispatcher};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::RuntimeResult;

/// Reply line written to the output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdioReply {
    /// Input line number the reply answers.
    pub id: u64,
    #[serde(flatten)]
    pub envelope: ReplyEnvelope,
}

/// Totals for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StdioSummary {
    /// Requests handed to the dispatcher.
    pub requests: u64,
    /// Lines that were not UTF-8 or not a JSON object.
    pub malformed: u64,
    /// Reply lines written.
    pub replies: u64,
}

/// Newline delimited JSON host loop.
pub struct StdioHost {
    dispatcher: MessageDispatcher,
}

impl StdioHost {
    pub fn new(dispatcher: MessageDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Serve requests from `input` until EOF or `shutdown` resolves.
    ///
    /// In-flight deferred replies are drained before returning.
    pub async fn run<R, W, S>(&self, input: R, output: W, shutdown: S) -> RuntimeResult<StdioSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
        S: Future<Output = ()>,
    {
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(write_replies(reply_rx, output));

        let mut summary = StdioSummary::default();
        let mut in_flight = FuturesUnordered::new();
        let mut input = input;
        let mut buf = Vec::new();
        let mut line_no: u64 = 0;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, no longer reading requests");
                    break;
                }
                Some(_) = in_flight.next(), if !in_flight.is_empty() => {}
                // Partial reads stay in `buf` if another branch wins.
                read = input.read_until(b'\n', &mut buf) => {
                    if read? == 0 {
                        debug!("Input closed");
                        break;
                    }
                    line_no += 1;
                    let Ok(line) = String::from_utf8(std::mem::take(&mut buf)) else {
                        warn!(line = line_no, "Skipping request line that is not UTF-8");
                        summary.malformed += 1;
                        continue;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }

                    let Some((request, sender)) = parse_line(&line) else {
                        warn!(line = line_no, "Skipping malformed request line");
                        summary.malformed += 1;
                        continue;
                    };

                    summary.requests += 1;
                    let reply = reply_callback(line_no, reply_tx.clone());
                    if let Dispatch::Deferred(task) = self.dispatcher.dispatch(request, sender, reply) {
                        in_flight.push(task);
                    }
                }
            }
        }

        if !in_flight.is_empty() {
            info!(pending = in_flight.len(), "Draining in-flight replies");
            while in_flight.next().await.is_some() {}
        }

        drop(reply_tx);
        summary.replies = match writer.await {
            Ok(written) => written?,
            Err(e) => {
                warn!(error = %e, "Reply writer task failed");
                0
            }
        };
        Ok(summary)
    }
}

fn reply_callback(id: u64, tx: mpsc::UnboundedSender<StdioReply>) -> ReplyCallback {
    ReplyCallback::new(move |envelope| {
        // Writer gone means output is closed; nothing left to tell.
        let _ = tx.send(StdioReply { id, envelope });
    })
}

/// Split a line into request and sender. `None` unless it is a JSON object.
fn parse_line(line: &str) -> Option<(InboundRequest, SenderDescriptor)> {
    let mut object: Map<String, Value> = serde_json::from_str(line).ok()?;
    let sender = match object.remove("sender") {
        Some(raw) => serde_json::from_value(raw).ok()?,
        None => SenderDescriptor::default(),
    };
    let request = serde_json::from_value(Value::Object(object)).ok()?;
    Some((request, sender))
}

async fn write_replies<W>(mut rx: mpsc::UnboundedReceiver<StdioReply>, mut output: W) -> std::io::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut written = 0;
    while let Some(reply) = rx.recv().await {
        let mut line = serde_json::to_vec(&reply)?;
        line.push(b'\n');
        output.write_all(&line).await?;
        output.flush().await?;
        written += 1;
    }
    output.shutdown().await?;
    Ok(written)
}
