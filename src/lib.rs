//! sigtree: stream & channel selection panel for realtime signal visualizers.
//!
//! A desktop data source (EEG amp, DAQ, mock generator) reports a list of
//! named streams with channel counts; this crate shows them as a checkbox
//! tree, assigns each checked channel a distinct color from an evenly-spaced
//! hue palette, and publishes `(stream, checked indices, colors)` events for
//! a plot widget to consume.
//!
//! The crate splits into a toolkit-free core and a thin egui layer:
//! - `tree`: stream/channel model and the selection state machine
//! - `palette`: deterministic HSV channel colors
//! - `events`: subscribe/publish plumbing for selection events
//! - `sink`: inbound metadata channel and the refresh request controller
//! - `channel_map`: JSON-backed channel-name lookup
//! - `config`, `panel`, `app`: egui/eframe panel and window wrapper

pub mod app;
pub mod channel_map;
pub mod config;
pub mod events;
pub mod palette;
pub mod panel;
pub mod sink;
pub mod tree;

// Public re-exports for a compact external API
pub use app::{run_panel, StreamTreeApp};
pub use channel_map::{ChannelMap, ChannelMapError};
pub use config::PanelConfig;
pub use events::{EventController, EventFilter, EventKind, MetadataMeta, PanelEvent};
pub use palette::{generate_palette, generate_palette_with, hsv_to_rgb, PaletteStyle};
pub use panel::StreamTreePanel;
pub use sink::{metadata_channel, MetadataSink, MetadataUpdate, RefreshController, StreamInfo};
pub use tree::{ChannelNode, SelectionState, StreamNode, StreamTree};
