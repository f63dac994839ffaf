//! Tokio glue for `fencestream`.
//!
//! `fencestream` is runtime-agnostic and owned by a single task. This crate drives it from
//! async code:
//!
//! - [`drive`] pulls one fragment per timer tick from any fragment source and forwards the
//!   resulting [`Update`]s, stopping on exhaustion or when cancelled between ticks.
//! - [`spawn_fence_actor`] owns a parser in a task and turns a channel of fragments into a
//!   channel of updates.
//! - [`RandomFragments`] splits a document into randomly sized fragments.
//!
//! For a TUI demo, see `cargo run -p fencestream-tokio --example stream_tui`.

mod source;

pub use source::{FragmentOptions, RandomFragments};

use fencestream::FenceStream;
use fencestream::Update;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

/// README-style document with headings, fenced blocks and inline code, used by the CLI when no
/// input file is given.
pub const SAMPLE_DOCUMENT: &str = include_str!("sample.md");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOptions {
    /// Delay between two fragments.
    pub interval: Duration,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(20),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    #[error("update receiver closed after {ticks} fragments")]
    SinkClosed { ticks: u64 },
}

/// How a [`drive`] run ended. Either way the parser is handed back.
#[derive(Debug)]
pub enum DriveOutcome {
    /// The source ran dry and the stream was finalized.
    Finished(FenceStream),
    /// Cancelled at a tick boundary. The parser keeps its partial state (open regions, a
    /// pending backtick run) and is not finalized.
    Cancelled(FenceStream),
}

impl DriveOutcome {
    pub fn stream(&self) -> &FenceStream {
        match self {
            DriveOutcome::Finished(s) | DriveOutcome::Cancelled(s) => s,
        }
    }

    pub fn into_stream(self) -> FenceStream {
        match self {
            DriveOutcome::Finished(s) | DriveOutcome::Cancelled(s) => s,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, DriveOutcome::Cancelled(_))
    }
}

/// Feed `fragments` into `stream`, one per tick of `opts.interval`.
///
/// Each fragment is drained completely before the next tick is awaited, and every resulting
/// update is sent on `tx`. A fragment is only taken from the source once `tx` has room for its
/// update, so a slow receiver holds the source back instead of the parser. Once the source is
/// exhausted the stream is finalized, the final update is sent, and the run ends.
///
/// Sending `()` on the `cancel` channel stops the run at the next tick boundary, or while
/// waiting for room on `tx`; either way no fragment is half-processed. Dropping the sender
/// without sending leaves the run uncancellable.
pub async fn drive<I, S>(
    mut stream: FenceStream,
    fragments: I,
    opts: TickOptions,
    tx: mpsc::Sender<Update>,
    mut cancel: oneshot::Receiver<()>,
) -> Result<DriveOutcome, DriveError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut fragments = fragments.into_iter();
    let mut ticker = tokio::time::interval(opts.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut cancel_live = true;
    let mut ticks = 0u64;

    loop {
        tokio::select! {
            biased;
            res = &mut cancel, if cancel_live => {
                if res.is_ok() {
                    tracing::info!(ticks, pending_run = stream.pending_run(), "stream cancelled");
                    return Ok(DriveOutcome::Cancelled(stream));
                }
                cancel_live = false;
                continue;
            }
            _ = ticker.tick() => {}
        }

        let Some(permit) = reserve_or_cancel(&tx, &mut cancel, &mut cancel_live)
            .await
            .map_err(|_| DriveError::SinkClosed { ticks })?
        else {
            tracing::info!(
                ticks,
                pending_run = stream.pending_run(),
                "stream cancelled while the receiver was full"
            );
            return Ok(DriveOutcome::Cancelled(stream));
        };

        match fragments.next() {
            Some(fragment) => {
                let fragment = fragment.as_ref();
                ticks += 1;
                let update = stream.append(fragment);
                tracing::debug!(
                    tick = ticks,
                    bytes = fragment.len(),
                    deltas = update.deltas.len(),
                    "fragment fed"
                );
                permit.send(update);
            }
            None => {
                let update = stream.finalize();
                tracing::info!(ticks, regions = stream.regions().len(), "stream finished");
                permit.send(update);
                return Ok(DriveOutcome::Finished(stream));
            }
        }
    }
}

/// Wait for room on `tx`. `Ok(None)` means cancel fired first.
async fn reserve_or_cancel<'a>(
    tx: &'a mpsc::Sender<Update>,
    cancel: &mut oneshot::Receiver<()>,
    cancel_live: &mut bool,
) -> Result<Option<mpsc::Permit<'a, Update>>, mpsc::error::SendError<()>> {
    loop {
        tokio::select! {
            biased;
            res = &mut *cancel, if *cancel_live => {
                if res.is_ok() {
                    return Ok(None);
                }
                *cancel_live = false;
            }
            permit = tx.reserve() => return permit.map(Some),
        }
    }
}

/// Spawn a task that owns `stream` and emits one [`Update`] per received fragment.
///
/// Closing the fragment channel finalizes the stream; its update is the last one sent.
pub fn spawn_fence_actor(
    mut stream: FenceStream,
    mut rx: mpsc::Receiver<String>,
) -> mpsc::Receiver<Update> {
    let (tx_out, rx_out) = mpsc::channel::<Update>(64);

    tokio::spawn(async move {
        while let Some(fragment) = rx.recv().await {
            let u = stream.append(&fragment);
            if tx_out.send(u).await.is_err() {
                tracing::debug!("update receiver dropped, stopping actor");
                return;
            }
        }
        let u = stream.finalize();
        let _ = tx_out.send(u).await;
    });

    rx_out
}
