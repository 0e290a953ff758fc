//! Event system for the stream tree panel.
//!
//! Consumers (typically the plot widget rendering the selected channels)
//! subscribe via [`EventController`] and receive [`PanelEvent`]s on an `mpsc`
//! channel. Each event carries a set of [`EventKind`] flags (bitflags-style)
//! so a single occurrence can match multiple categories: expanding a stream
//! whose checked set differs from the previous selection is *both* a
//! `STREAM_EXPANDED` and a `SELECTION_CHANGED` event.
//!
//! The subscriber specifies an [`EventFilter`] to receive only the events
//! they care about. The filter is a simple OR mask: an event is delivered
//! when `(event.kinds & filter) != 0`.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::tree::SelectionState;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the *categories* an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u64);

impl EventKind {
    /// The tree was rebuilt wholesale from a metadata update.
    pub const METADATA_REBUILT: Self = Self(1 << 0);
    /// A stream became the focused (expanded) one.
    ///
    /// Fired on *every* expand, even when the derived selection is unchanged,
    /// so the consumer can re-sync to the newly focused stream.
    pub const STREAM_EXPANDED: Self = Self(1 << 1);
    /// The derived selection differs by value from the previous one.
    pub const SELECTION_CHANGED: Self = Self(1 << 2);

    /// Wildcard: matches *every* event kind.
    pub const ALL: Self = Self(u64::MAX);

    /// Combine two event kinds (bitwise OR).
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Check whether `self` contains all bits in `other`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether `self` intersects with `other` (at least one bit in common).
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Returns `true` if no bits are set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;
    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "EMPTY");
        }
        if *self == EventKind::ALL {
            return write!(f, "ALL");
        }

        let pairs: &[(EventKind, &str)] = &[
            (EventKind::METADATA_REBUILT, "METADATA_REBUILT"),
            (EventKind::STREAM_EXPANDED, "STREAM_EXPANDED"),
            (EventKind::SELECTION_CHANGED, "SELECTION_CHANGED"),
        ];

        let mut names: Vec<String> = Vec::new();
        let mut known_bits = 0u64;
        for (kind, name) in pairs {
            known_bits |= kind.0;
            if self.contains(*kind) {
                names.push((*name).to_string());
            }
        }
        let extra = self.0 & !known_bits;
        if extra != 0 {
            names.push(format!("0x{:x}", extra));
        }

        write!(f, "{}", names.join("|"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Metadata – per-event-type payloads
// ─────────────────────────────────────────────────────────────────────────────

/// Payload attached to `METADATA_REBUILT` events.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataMeta {
    /// Names of the streams now in the tree, in tree order.
    pub stream_names: Vec<String>,
    /// Index of the stream that was expanded (after clamping).
    pub default_index: usize,
    /// Status line for the default stream (`"Sampling rate: {rate}Hz"`),
    /// empty when the stream list is empty.
    pub status: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// PanelEvent – the top-level event type
// ─────────────────────────────────────────────────────────────────────────────

/// An event emitted by the stream tree.
///
/// `kinds` is a bitflag set of [`EventKind`] categories. The optional fields
/// carry the payload relevant to the kinds that are set: selection-carrying
/// events (`STREAM_EXPANDED`, `SELECTION_CHANGED`) populate `selection`;
/// `METADATA_REBUILT` populates `metadata`.
#[derive(Debug, Clone)]
pub struct PanelEvent {
    /// Bitflag set of categories this event belongs to.
    pub kinds: EventKind,
    /// Monotonic timestamp (seconds since controller creation), stamped on emit.
    pub timestamp: f64,

    pub selection: Option<SelectionState>,
    pub metadata: Option<MetadataMeta>,
}

impl PanelEvent {
    /// Create a new event with the given kinds and no payload.
    pub fn new(kinds: EventKind) -> Self {
        Self {
            kinds,
            timestamp: 0.0, // set by the controller
            selection: None,
            metadata: None,
        }
    }

    /// A selection-carrying event. `checked[k]` is to be rendered with
    /// `colors[k]` by the consumer.
    pub fn selection(kinds: EventKind, selection: SelectionState) -> Self {
        Self {
            selection: Some(selection),
            ..Self::new(kinds)
        }
    }

    /// A metadata-rebuild event.
    pub fn metadata(metadata: MetadataMeta) -> Self {
        Self {
            metadata: Some(metadata),
            ..Self::new(EventKind::METADATA_REBUILT)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// A filter that selects which event categories a subscriber receives.
///
/// The filter is an OR-mask: an event is delivered when
/// `event.kinds.intersects(filter.mask)`.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    /// Accept all events.
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    /// Accept only the specified event kinds.
    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    /// Check whether an event passes this filter.
    #[inline]
    pub fn matches(&self, event: &PanelEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<PanelEvent>,
}

/// Controller that distributes tree events to subscribers.
///
/// Attach one to [`PanelConfig`](crate::config::PanelConfig) before building
/// the panel (or let the panel create its own and hand it out via
/// [`StreamTreePanel::events`](crate::panel::StreamTreePanel::events)). Then
/// call [`subscribe`](Self::subscribe) with an optional filter to receive
/// events on an `mpsc` channel.
#[derive(Clone)]
pub struct EventController {
    inner: Arc<Mutex<EventCtrlInner>>,
}

struct EventCtrlInner {
    subscribers: Vec<Subscriber>,
    start_instant: std::time::Instant,
}

impl EventController {
    /// Create a new event controller.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EventCtrlInner {
                subscribers: Vec::new(),
                start_instant: std::time::Instant::now(),
            })),
        }
    }

    /// Subscribe to events matching the given filter.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<PanelEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let mut inner = self.inner.lock().unwrap();
        inner.subscribers.push(Subscriber { filter, sender: tx });
        rx
    }

    /// Subscribe to *all* events (no filtering).
    pub fn subscribe_all(&self) -> Receiver<PanelEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Emit an event to all matching subscribers.
    ///
    /// Called by [`StreamTree`](crate::tree::StreamTree); public so embedding
    /// code can inject synthetic events. Subscribers whose receiver was
    /// dropped are pruned on the next matching emit.
    pub fn emit(&self, mut event: PanelEvent) {
        let mut inner = self.inner.lock().unwrap();
        event.timestamp = inner.start_instant.elapsed().as_secs_f64();
        inner.subscribers.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }
}

impl Default for EventController {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────────────────────────
