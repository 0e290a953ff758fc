//! Inbound metadata plumbing: how the data side tells the panel which
//! streams exist, and how the panel asks the data side to re-scan.
//!
//! The data producer holds a [`MetadataSink`] and sends a [`MetadataUpdate`]
//! whenever the stream list (re)resolves; the panel drains the paired
//! receiver each frame and rebuilds the tree. The reverse direction is the
//! [`RefreshController`]: the panel's update button requests a re-scan, and
//! the producer observes the request and answers with a fresh update.

use std::sync::mpsc::{Receiver, SendError, Sender};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

/// Metadata for one stream as reported by the data side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Unique among the streams of one update.
    pub name: String,
    pub channel_count: usize,
    /// Sampling rate in Hz, shown in the panel's status line.
    pub sample_rate: f64,
}

/// A wholesale replacement of the stream list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataUpdate {
    /// Ordered stream list; the tree shows one node per entry.
    pub streams: Vec<StreamInfo>,
    /// Which stream to expand initially.
    pub default_index: usize,
}

/// Producer-side handle for sending metadata updates to the panel.
#[derive(Clone)]
pub struct MetadataSink {
    tx: Sender<MetadataUpdate>,
}

impl MetadataSink {
    /// Send an update. Fails only when the panel side has been dropped.
    pub fn send(&self, update: MetadataUpdate) -> Result<(), SendError<MetadataUpdate>> {
        self.tx.send(update)
    }
}

/// Create the metadata channel: the sink goes to the data producer, the
/// receiver to [`StreamTreePanel`](crate::panel::StreamTreePanel).
pub fn metadata_channel() -> (MetadataSink, Receiver<MetadataUpdate>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (MetadataSink { tx }, rx)
}

// ─────────────────────────────────────────────────────────────────────────────
// RefreshController
// ─────────────────────────────────────────────────────────────────────────────

/// Lets the panel request a stream re-scan from the data producer.
///
/// The producer either polls [`take_request`](Self::take_request) in its
/// loop or blocks on a [`subscribe`](Self::subscribe) receiver; both observe
/// the same request flag, which is consumed once per request.
#[derive(Clone)]
pub struct RefreshController {
    inner: Arc<Mutex<RefreshInner>>,
}

struct RefreshInner {
    pending: bool,
    listeners: Vec<Sender<()>>,
}

impl RefreshController {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(RefreshInner {
                pending: false,
                listeners: Vec::new(),
            })),
        }
    }

    /// Record a re-scan request and wake any listeners.
    pub fn request_refresh(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.pending = true;
        inner.listeners.retain(|tx| tx.send(()).is_ok());
    }

    /// Consume a pending request, if any.
    pub fn take_request(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        std::mem::take(&mut inner.pending)
    }

    /// Receive a `()` per refresh request. Pair with
    /// [`take_request`](Self::take_request) to consume the flag.
    pub fn subscribe(&self) -> Receiver<()> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.listeners.push(tx);
        rx
    }
}

impl Default for RefreshController {
    fn default() -> Self {
        Self::new()
    }
}
